use std::sync::Arc;

use tripflow_ai::LlmClient;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}
