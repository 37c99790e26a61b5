use crate::api_types::{Message, MessagesResponse};
use anyhow::Result;
use async_trait::async_trait;
use companion_core::config::LlmConfig;

/// Sampling parameters for one completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl From<&LlmConfig> for CompletionParams {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// The remote completion service, reduced to what the companion needs.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a system prompt plus conversation messages and return the reply.
    async fn complete(
        &self,
        system: &str,
        messages: Vec<Message>,
        params: CompletionParams,
    ) -> Result<MessagesResponse>;
}
