//! The chat relay endpoint

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use serde::Deserialize;
use tripflow_ai::{CompletionRequest, Message};

use crate::api::{error::ApiError, state::AppState};
use crate::prompt::{self, TripContext};

/// Inbound payload. The shape selects the mode: a bare turn array relays
/// the running transcript as-is; a guided object carries the latest user
/// message plus trip context woven into the preamble.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatRequest {
    Transcript(Vec<Message>),
    Guided(GuidedChat),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidedChat {
    pub user_message: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub current_step: Option<String>,
}

impl ChatRequest {
    /// The outbound message list: preamble first, then the turns in the
    /// order they were received.
    fn into_messages(self) -> Vec<Message> {
        match self {
            ChatRequest::Transcript(turns) => {
                let mut messages = Vec::with_capacity(turns.len() + 1);
                messages.push(Message::system(prompt::preamble(None)));
                messages.extend(turns);
                messages
            }
            ChatRequest::Guided(guided) => {
                let context = TripContext {
                    destination: guided.destination,
                    date: guided.date,
                    current_step: guided.current_step,
                };
                vec![
                    Message::system(prompt::preamble(Some(&context))),
                    Message::user(guided.user_message),
                ]
            }
        }
    }
}

// POST /api/chat
pub async fn relay_chat(State(state): State<AppState>, body: Bytes) -> Response {
    // Parsed by hand: a rejected body must still produce the JSON error
    // envelope, which the Json extractor's rejection does not carry.
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting malformed chat request");
            return ApiError::internal(e.to_string()).into_response();
        }
    };

    let messages = request.into_messages();
    tracing::debug!(turns = messages.len(), "relaying chat request");

    let fragments = match state
        .llm
        .complete_stream(CompletionRequest::new(messages))
        .await
    {
        Ok(fragments) => fragments,
        Err(e) => {
            tracing::error!(error = %e, "completion call failed before streaming");
            return ApiError::internal(e.to_string()).into_response();
        }
    };

    // Fragments are forwarded as they arrive, in order and unframed. An
    // upstream error terminates the body mid-stream; the 200 status is
    // already committed at that point.
    let stream = fragments.map_ok(Bytes::from).map_err(|e| {
        tracing::error!(error = %e, "completion stream failed mid-response");
        e
    });

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response()
}
