//! HTTP client for the chat relay

use std::pin::Pin;

use futures::{Stream, StreamExt};
use thiserror::Error;
use tripflow_ai::{Message, Utf8Decoder, Utf8StreamError};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("relay returned HTTP {status}: {details}")]
    Status { status: u16, details: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reply stream error: {0}")]
    Decode(#[from] Utf8StreamError),
}

/// Reply fragments in arrival order. An `Err` item ends the stream.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

/// Client for one relay server. Stateless; the transcript lives in
/// [`crate::session::ChatSession`].
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST the transcript and stream the reply back as decoded text.
    ///
    /// The relay sends raw unframed UTF-8, so fragment boundaries here
    /// are network chunk boundaries; a multi-byte code point split
    /// across chunks is held until its remaining bytes arrive.
    pub async fn send(&self, transcript: &[Message]) -> Result<ReplyStream, ChatError> {
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&transcript)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                details,
            });
        }

        let mut bytes = response.bytes_stream();

        Ok(Box::pin(async_stream::stream! {
            let mut decoder = Utf8Decoder::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(ChatError::Http(e));
                        return;
                    }
                };

                match decoder.feed(&chunk) {
                    Ok(Some(text)) => yield Ok(text),
                    Ok(None) => {}
                    Err(e) => {
                        yield Err(ChatError::Decode(e));
                        return;
                    }
                }
            }

            if let Err(e) = decoder.finish() {
                yield Err(ChatError::Decode(e));
            }
        }))
    }
}
