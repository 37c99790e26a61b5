//! Optional outside-information lookup (web search or similar).
//!
//! The engine asks for enrichment only when a message trips one of the
//! configured [`SearchTriggers`](companion_core::SearchTriggers). A missing or
//! failing source never aborts a response; it becomes a short note instead.

use anyhow::Result;
use async_trait::async_trait;

/// Appended to every non-empty enrichment result.
pub const ATTRIBUTION: &str = "\n\nThis information is based on recent web searches.";

#[async_trait]
pub trait Enrichment: Send + Sync {
    /// Synthesize text about `query`. Empty text means nothing was found.
    async fn enrich(&self, query: &str) -> Result<String>;
}

/// Ask `source` about `query` and turn the outcome into prompt text.
pub async fn gather(source: Option<&dyn Enrichment>, query: &str) -> String {
    let Some(source) = source else {
        return "(Note: Unable to gather web information: no enrichment source configured)"
            .to_string();
    };

    match source.enrich(query).await {
        Ok(text) if text.is_empty() => text,
        Ok(mut text) => {
            text.push_str(ATTRIBUTION);
            text
        }
        Err(e) => {
            tracing::warn!("Enrichment failed: {:#}", e);
            format!("(Note: Unable to gather web information: {})", e)
        }
    }
}
