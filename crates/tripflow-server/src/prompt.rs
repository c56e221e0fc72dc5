//! The instruction preamble sent as the hidden system turn of every
//! completion call.

/// Base instructions for the assistant.
const SYSTEM_PROMPT: &str = "You are a highly knowledgeable, professional, and friendly travel assistant specializing in helping users plan trips, book flights, find accommodations, and explore destinations. When answering users' queries:

1. **Keep Responses Concise**: Provide answers in small, digestible chunks. If the user needs more details, wait for them to ask for additional information rather than giving everything at once.
2. **Maintain Context**: Remember the details of the conversation during the session. If the user asks about the same thing multiple times, refer back to previous responses to maintain continuity.
3. **Flight Assistance**: Offer flight booking options and check-in reminders. Suggest airlines based on preferences (budget, luxury, eco-friendly).
4. **Accommodation Recommendations**: Help users find hotels or rentals based on budget and location preferences. Avoid providing too many options in one response.
5. **Destination Insights**: Share relevant details about destinations, such as weather and activities, and only provide further information when asked.
6. **Activity Suggestions**: Offer 1-2 recommendations at a time, including local events or tours. Wait for the user to request more.
7. **Travel Tips**: Offer basic tips in response to specific queries and avoid overwhelming the user with too many details at once.

Be polite and patient. If you cannot handle a query, direct the user to a human travel consultant for further assistance. Remember to engage with users by offering help step by step.";

/// Pre-departure questions woven into every preamble.
const GENERAL_CHECKLIST: [&str; 4] = [
    "Got your passport?",
    "Double-check your boarding passes! Wrong date or time? That could be a nightmare!",
    "Packed your meds? Make sure you’ve got enough for the whole trip plus extra, just in case!",
    "Charged all your devices? No one wants to fight for an airport outlet!",
];

/// Trip details substituted into the guided preamble.
#[derive(Debug, Default)]
pub struct TripContext {
    pub destination: Option<String>,
    pub date: Option<String>,
    pub current_step: Option<String>,
}

/// Country-specific checklist items for a destination, if any.
fn country_items(destination: &str) -> &'static [&'static str] {
    match destination.trim().to_lowercase().as_str() {
        "us" | "usa" | "united states" => {
            &["Do you have your ESTA if you're eligible for the Visa Waiver Program?"]
        }
        "canada" => &["Got your eTA (Electronic Travel Authorization) for Canada?"],
        "china" => &["Do you have your visa for China?"],
        _ => &[],
    }
}

/// Render the preamble. `context` carries the trip details of a guided
/// request; transcript requests get the base preamble.
pub fn preamble(context: Option<&TripContext>) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);

    if let Some(context) = context {
        if let Some(destination) = &context.destination {
            prompt.push_str(&format!("\n\nThe user is traveling to {destination}."));
        }
        if let Some(date) = &context.date {
            prompt.push_str(&format!("\nThe departure date is {date}."));
        }
        if let Some(step) = &context.current_step {
            prompt.push_str(&format!("\nThe current checklist step is: {step}."));
        }
    }

    prompt.push_str(&format!(
        "\n\nUse the following checklist to guide the conversation: {}.",
        GENERAL_CHECKLIST.join(", ")
    ));
    prompt.push_str(
        "\nAsk relevant questions based on the current checklist step, and adjust for country-specific requirements if necessary.",
    );

    if let Some(destination) = context.and_then(|ctx| ctx.destination.as_deref()) {
        let items = country_items(destination);
        if !items.is_empty() {
            prompt.push_str(&format!(
                "\nCountry-specific items for {destination}: {}",
                items.join(", ")
            ));
        }
    }

    prompt
}
