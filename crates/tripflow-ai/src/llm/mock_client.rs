//! Deterministic mock completion client for tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AiError, Result};

use super::{CompletionRequest, FragmentStream, LlmClient, Role};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Stream these fragments in order, then close normally.
    Fragments(Vec<String>),
    /// Fail before any fragment is produced.
    Error(String),
    /// Stream some fragments, then fail mid-stream.
    ErrorAfter {
        fragments: Vec<String>,
        message: String,
    },
}

impl MockReply {
    /// A reply delivered as a single fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Fragments(vec![content.into()])
    }

    pub fn fragments<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Fragments(parts.into_iter().map(Into::into).collect())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn error_after<I>(parts: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::ErrorAfter {
            fragments: parts.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

/// A deterministic completion client driven by scripted replies. Every
/// request it receives is recorded for later inspection.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    model: String,
    script: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_script(model: impl Into<String>, replies: Vec<MockReply>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn push_reply(&self, reply: MockReply) {
        self.script.lock().await.push_back(reply);
    }

    /// Requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Option<MockReply> {
        self.script.lock().await.pop_front()
    }

    /// With an empty script, echo the latest user turn.
    fn echo_reply(request: &CompletionRequest) -> MockReply {
        let text = request
            .messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::User)
            .map(|msg| format!("mock-echo: {}", msg.content))
            .unwrap_or_else(|| "mock-ok".to_string());
        MockReply::text(text)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<FragmentStream> {
        self.requests.lock().await.push(request.clone());

        let reply = match self.next_reply().await {
            Some(reply) => reply,
            None => Self::echo_reply(&request),
        };

        let (fragments, failure) = match reply {
            MockReply::Error(message) => return Err(AiError::Llm(message)),
            MockReply::Fragments(fragments) => (fragments, None),
            MockReply::ErrorAfter { fragments, message } => (fragments, Some(message)),
        };

        Ok(Box::pin(stream! {
            for fragment in fragments {
                if !fragment.is_empty() {
                    yield Ok(fragment);
                }
            }
            if let Some(message) = failure {
                yield Err(AiError::Llm(message));
            }
        }))
    }
}
