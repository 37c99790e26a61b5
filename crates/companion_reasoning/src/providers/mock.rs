//! Mock LLM Provider — deterministic responses for testing without API keys.

use crate::api_types::{Message, MessagesResponse};
use crate::llm::{CompletionParams, LlmClient};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
}

impl MockProvider {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        _messages: Vec<Message>,
        _params: CompletionParams,
    ) -> Result<MessagesResponse> {
        Ok(MessagesResponse::from_text(
            format!("(Mock {} Response) I received your prompt.", self.model),
            Some("stop"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_complete() {
        let provider = MockProvider::new("test-model");
        let resp = provider
            .complete("system", vec![Message::user("hi")], CompletionParams::default())
            .await
            .unwrap();
        let text = resp.text();
        assert!(text.contains("Mock"));
        assert!(text.contains("test-model"));
        assert_eq!(resp.stop_reason.as_deref(), Some("stop"));
    }
}
