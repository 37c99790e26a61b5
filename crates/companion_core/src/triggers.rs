//! Trigger phrases that mark a message as needing outside information.

use serde::{Deserialize, Serialize};

/// One category of trigger phrases (e.g. `current_events`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCategory {
    pub category: String,
    pub phrases: Vec<String>,
}

impl TriggerCategory {
    pub fn new(category: &str, phrases: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
        }
    }
}

/// Case-insensitive substring triggers, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTriggers {
    pub categories: Vec<TriggerCategory>,
}

impl Default for SearchTriggers {
    fn default() -> Self {
        Self {
            categories: vec![
                TriggerCategory::new(
                    "current_events",
                    &["news", "current", "latest", "recent", "update", "today", "now"],
                ),
                TriggerCategory::new(
                    "factual_queries",
                    &["what is", "who is", "when did", "where is", "how does"],
                ),
                TriggerCategory::new(
                    "temporal",
                    &["weather", "price", "stock", "happening", "trend"],
                ),
                TriggerCategory::new(
                    "comparative",
                    &["versus", "vs", "compared to", "difference between"],
                ),
            ],
        }
    }
}

impl SearchTriggers {
    /// Name of the first category with a phrase contained in `input`.
    pub fn matching_category(&self, input: &str) -> Option<&str> {
        let lowered = input.to_lowercase();
        self.categories
            .iter()
            .find(|c| {
                c.phrases
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .any(|p| lowered.contains(&p.to_lowercase()))
            })
            .map(|c| c.category.as_str())
    }

    pub fn is_triggered(&self, input: &str) -> bool {
        self.matching_category(input).is_some()
    }
}
