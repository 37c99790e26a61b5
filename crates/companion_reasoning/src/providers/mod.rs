pub mod mock;
pub mod openai;

pub use mock::MockProvider;
pub use openai::OpenAiClient;

use crate::llm::LlmClient;
use anyhow::Result;
use companion_core::config::LlmConfig;

/// Build the completion client named by `config.provider`.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_config(config)?)),
        "mock" => Ok(Box::new(MockProvider::new(&config.model))),
        other => anyhow::bail!("Unknown LLM provider: {} (expected \"openai\" or \"mock\")", other),
    }
}
