use crate::interaction::Interaction;
use companion_core::config::default_importance_keywords;

/// Decides which interactions are worth keeping in long-term memory.
///
/// An interaction is important iff its lowercased combined text contains any
/// keyword as a substring.
#[derive(Debug, Clone)]
pub struct ImportanceClassifier {
    keywords: Vec<String>,
}

impl Default for ImportanceClassifier {
    fn default() -> Self {
        Self::new(default_importance_keywords())
    }
}

impl ImportanceClassifier {
    /// Keywords are case-folded; blank ones are dropped since they would match everything.
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .filter(|k| !k.trim().is_empty())
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_important(&self, interaction: &Interaction) -> bool {
        let text = interaction.searchable_text();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
