//! Retry with exponential backoff for completion-service HTTP calls.
//!
//! Retries on 408, 429 and 5xx gateway/server errors and on network failures.
//! Other client errors (400, 401, 403, 404) fail on the first attempt.

use anyhow::Result;
use reqwest::{Response, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay that follows `current`, capped at `max_delay`.
    fn next_delay(&self, current: Duration) -> Duration {
        Duration::from_secs_f64(
            (current.as_secs_f64() * self.backoff_factor).min(self.max_delay.as_secs_f64()),
        )
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Run `operation` until it yields a successful response, a non-retryable
/// status, or `max_attempts` is exhausted.
pub async fn with_retry<F, Fut>(
    config: &RetryConfig,
    provider_name: &str,
    operation: F,
) -> Result<Response>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Response>>,
{
    let mut delay = config.initial_delay;
    let mut last_error = None;

    for attempt in 1..=config.max_attempts {
        match operation().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    if attempt > 1 {
                        tracing::info!("{}: recovered after {} attempts", provider_name, attempt);
                    }
                    return Ok(response);
                }

                let body = response.text().await.unwrap_or_default();
                if !is_retryable_status(status) {
                    anyhow::bail!("{} request rejected ({}): {}", provider_name, status, body);
                }

                let snippet: String = body.chars().take(200).collect();
                tracing::warn!(
                    "{}: status {} (attempt {} of {}): {}",
                    provider_name,
                    status,
                    attempt,
                    config.max_attempts,
                    snippet
                );
                last_error = Some(format!("status {}: {}", status, snippet));
            }
            Err(e) => {
                tracing::warn!(
                    "{}: request failed (attempt {} of {}): {:#}",
                    provider_name,
                    attempt,
                    config.max_attempts,
                    e
                );
                last_error = Some(format!("{:#}", e));
            }
        }

        if attempt < config.max_attempts {
            tracing::debug!("{}: backing off {:?}", provider_name, delay);
            tokio::time::sleep(delay).await;
            delay = config.next_delay(delay);
        }
    }

    anyhow::bail!(
        "{} gave up after {} attempts, last failure: {}",
        provider_name,
        config.max_attempts,
        last_error.unwrap_or_default()
    )
}
