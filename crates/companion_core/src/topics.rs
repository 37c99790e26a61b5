//! Keyword-based topic detection.
//!
//! Each knowledge domain matches when its name (underscores read as spaces)
//! appears anywhere in the text, case-insensitively. No stemming, no scoring.

use serde::{Deserialize, Serialize};

/// A named knowledge domain.
///
/// `weight` is informational only; detection never consults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDomain {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl KnowledgeDomain {
    pub fn new(name: &str, weight: f32) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }

    /// The phrase searched for in text: the name with `_` replaced by spaces.
    fn phrase(&self) -> String {
        self.name.replace('_', " ").to_lowercase()
    }
}

/// Ordered registry of knowledge domains. Detection results follow registry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRegistry {
    pub domains: Vec<KnowledgeDomain>,
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self {
            domains: vec![
                KnowledgeDomain::new("technology", 0.9),
                KnowledgeDomain::new("science", 0.9),
                KnowledgeDomain::new("arts", 0.8),
                KnowledgeDomain::new("history", 0.8),
                KnowledgeDomain::new("current_events", 0.9),
                KnowledgeDomain::new("philosophy", 0.7),
                KnowledgeDomain::new("psychology", 0.8),
            ],
        }
    }
}

impl TopicRegistry {
    pub fn new(domains: Vec<KnowledgeDomain>) -> Self {
        Self { domains }
    }

    /// Labels of every domain mentioned in `text`, in registry order.
    pub fn detect_topics(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut topics: Vec<String> = Vec::new();
        for domain in &self.domains {
            let phrase = domain.phrase();
            // A blank name would match any text
            if phrase.trim().is_empty() {
                continue;
            }
            if lowered.contains(&phrase) && !topics.contains(&domain.name) {
                topics.push(domain.name.clone());
            }
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_in_registry_order() {
        let registry = TopicRegistry::default();
        assert_eq!(
            registry.detect_topics("I love science and history"),
            vec!["science", "history"]
        );
        // Mention order does not matter
        assert_eq!(
            registry.detect_topics("history before science"),
            vec!["science", "history"]
        );
    }

    #[test]
    fn test_underscore_matches_space() {
        let registry = TopicRegistry::default();
        assert_eq!(
            registry.detect_topics("Any Current Events worth knowing?"),
            vec!["current_events"]
        );
        assert!(registry.detect_topics("current_events").is_empty());
    }

    #[test]
    fn test_substring_semantics() {
        let registry = TopicRegistry::default();
        // "arts" inside "startsomething" still counts; no word boundaries
        assert_eq!(registry.detect_topics("startsomething"), vec!["arts"]);
    }

    #[test]
    fn test_no_topics() {
        let registry = TopicRegistry::default();
        assert!(registry.detect_topics("").is_empty());
        assert!(registry.detect_topics("hello there").is_empty());
    }

    #[test]
    fn test_custom_registry() {
        let registry = TopicRegistry::new(vec![
            KnowledgeDomain::new("cooking", 0.5),
            KnowledgeDomain::new("machine_learning", 0.5),
        ]);
        assert_eq!(
            registry.detect_topics("Machine learning for cooking"),
            vec!["cooking", "machine_learning"]
        );
    }

    #[test]
    fn test_blank_domain_names_never_match() {
        let toml_str = r#"
[[domains]]
name = ""

[[domains]]
name = "_"

[[domains]]
name = "music"
"#;
        let registry: TopicRegistry = toml::from_str(toml_str).unwrap();
        assert!(registry.detect_topics("hello there").is_empty());
        assert_eq!(registry.detect_topics("live music"), vec!["music"]);
    }
}
