//! TripFlow AI - streaming completion clients
//!
//! This crate provides:
//! - `LlmClient`, the streaming completion trait the relay is written against
//! - `OpenAIClient` for OpenAI-compatible completion services
//! - `MockLlmClient`, a scripted stand-in for tests
//! - Incremental UTF-8 decoding for chunked byte streams

pub mod error;
mod http_client;
pub mod llm;
pub mod utf8;

// Re-export commonly used types
pub use error::{AiError, Result};
pub use llm::{
    CompletionRequest, FragmentStream, LlmClient, Message, MockLlmClient, MockReply,
    OpenAIClient, Role,
};
pub use utf8::{Utf8Decoder, Utf8StreamError};
