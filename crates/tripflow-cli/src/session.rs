//! Client-side transcript state
//!
//! The turn being streamed is held as a separate draft rather than as a
//! mutable element of the transcript; it is sealed into an immutable turn
//! only when the stream ends.

use tripflow_ai::Message;

/// Greeting seeded into every new transcript.
pub const GREETING: &str = "Hi! I'm your travel assistant. I'll help you make sure you're fully prepared for your trip. From packing to documents, I'll guide you every step of the way. Ready to get started?";

/// Fixed reply shown in place of a failed turn.
pub const APOLOGY: &str = "I'm sorry, but I encountered an error. Please try again later.";

/// One chat session: the sealed transcript plus the in-flight turn, if any.
#[derive(Debug)]
pub struct ChatSession {
    turns: Vec<Message>,
    draft: Option<String>,
    in_flight: bool,
}

impl ChatSession {
    /// New session seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            turns: vec![Message::assistant(GREETING)],
            draft: None,
            in_flight: false,
        }
    }

    /// Sealed turns plus the draft viewed as a trailing assistant turn.
    pub fn turns(&self) -> Vec<Message> {
        let mut view = self.turns.clone();
        if let Some(draft) = &self.draft {
            view.push(Message::assistant(draft.clone()));
        }
        view
    }

    /// Turn count, the open draft included.
    pub fn len(&self) -> usize {
        self.turns.len() + usize::from(self.draft.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a turn is currently being exchanged.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Last turn in the session view, draft included.
    pub fn last(&self) -> Option<Message> {
        match &self.draft {
            Some(draft) => Some(Message::assistant(draft.clone())),
            None => self.turns.last().cloned(),
        }
    }

    /// Append the user's turn and lock submission until the reply settles.
    /// Returns the relay payload: every prior turn plus the new one, in
    /// order. Blank input and in-flight sessions are a no-op.
    pub fn submit(&mut self, input: &str) -> Option<Vec<Message>> {
        let input = input.trim();
        if input.is_empty() || self.in_flight {
            return None;
        }

        self.turns.push(Message::user(input));
        self.in_flight = true;
        Some(self.turns.clone())
    }

    /// Open the draft assistant turn once the reply stream is live.
    pub fn begin_stream(&mut self) {
        debug_assert!(self.in_flight, "begin_stream without a submitted turn");
        self.draft = Some(String::new());
    }

    /// Append one fragment to the draft, in arrival order.
    pub fn push_fragment(&mut self, fragment: &str) {
        if let Some(draft) = &mut self.draft {
            draft.push_str(fragment);
        }
    }

    /// Seal the draft into an immutable assistant turn and unlock
    /// submission.
    pub fn finish_stream(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.turns.push(Message::assistant(draft));
        }
        self.in_flight = false;
    }

    /// Record a failed turn: partial output is sealed as its own turn, the
    /// fixed apology is appended after it, and submission unlocks. An empty
    /// draft is dropped rather than sealed.
    pub fn fail_stream(&mut self) {
        if let Some(draft) = self.draft.take()
            && !draft.is_empty()
        {
            self.turns.push(Message::assistant(draft));
        }
        self.turns.push(Message::assistant(APOLOGY));
        self.in_flight = false;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
