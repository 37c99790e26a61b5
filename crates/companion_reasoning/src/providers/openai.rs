use crate::api_types::{Message, MessagesResponse, Role};
use crate::llm::{CompletionParams, LlmClient};
use crate::retry::{with_retry, RetryConfig};
use anyhow::{Context, Result};
use companion_core::config::LlmConfig;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryConfig,
}

impl OpenAiClient {
    /// Build from config. The API key comes from `OPENAI_API_KEY`; the base URL
    /// from config, then `OPENAI_BASE_URL`, then the public endpoint.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
        let base_url = config
            .base_url
            .clone()
            .or_else(|| env::var("OPENAI_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(&api_key, &base_url, &config.model)
    }

    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()?,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn build_payload(&self, system: &str, messages: &[Message], params: &CompletionParams) -> Value {
        // OpenAI puts the system prompt first, as a message with role "system"
        let mut openai_messages = vec![json!({
            "role": "system",
            "content": system
        })];
        for msg in messages {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            openai_messages.push(json!({
                "role": role,
                "content": msg.text()
            }));
        }

        json!({
            "model": self.model,
            "messages": openai_messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, system, messages, params), fields(model = %self.model))]
    async fn complete(
        &self,
        system: &str,
        messages: Vec<Message>,
        params: CompletionParams,
    ) -> Result<MessagesResponse> {
        let payload = self.build_payload(system, &messages, &params);
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("POST {} ({} messages)", url, messages.len() + 1);

        let response = with_retry(&self.retry, "OpenAI", || {
            let request = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&payload);
            async move {
                request
                    .send()
                    .await
                    .context("Failed to send request to OpenAI")
            }
        })
        .await?;

        let resp_json: Value = response
            .json()
            .await
            .context("Failed to decode OpenAI response")?;
        let choice = &resp_json["choices"][0];
        let text = choice["message"]["content"]
            .as_str()
            .context("OpenAI response contained no message content")?;
        let finish_reason = choice["finish_reason"].as_str();

        Ok(MessagesResponse::from_text(text, finish_reason))
    }
}
