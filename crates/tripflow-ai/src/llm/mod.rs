//! LLM module - streaming completion client abstraction

mod client;
mod mock_client;
mod openai;

pub use client::{CompletionRequest, FragmentStream, LlmClient, Message, Role};
pub use mock_client::{MockLlmClient, MockReply};
pub use openai::OpenAIClient;
