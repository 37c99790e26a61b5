use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Personality — who the companion presents itself as.
///
/// Loaded once from a JSON persona file at startup. A missing or malformed
/// file silently yields [`Personality::default`], so a fresh checkout can
/// chat without any persona on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub name: String,
    pub traits: Vec<String>,
    pub speaking_style: String,
    pub interests: Vec<String>,
    pub values: Vec<String>,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            name: "Alex".to_string(),
            traits: to_strings(&[
                "friendly",
                "knowledgeable",
                "helpful",
                "curious",
                "empathetic",
                "witty",
                "analytical",
                "creative",
                "patient",
                "adaptable",
            ]),
            speaking_style: "conversational and engaging".to_string(),
            interests: to_strings(&[
                "learning new things",
                "solving problems",
                "exploring ideas",
                "understanding different perspectives",
            ]),
            values: to_strings(&[
                "honesty",
                "intellectual curiosity",
                "empathy",
                "helpfulness",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Personality {
    /// Load a personality from a JSON file, falling back to the default one.
    pub async fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Personality file {} unreadable ({}), using default", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(personality) => personality,
            Err(e) => {
                tracing::debug!("Personality file {} malformed ({}), using default", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace traits and/or speaking style. Empty arguments leave the field as is.
    pub fn modify(&mut self, new_traits: Option<Vec<String>>, new_style: Option<String>) {
        if let Some(traits) = new_traits.filter(|t| !t.is_empty()) {
            self.traits = traits;
        }
        if let Some(style) = new_style.filter(|s| !s.is_empty()) {
            self.speaking_style = style;
        }
    }

    /// Identity paragraph that opens the system prompt.
    pub fn format_identity(&self) -> String {
        format!(
            "You are {}, an AI companion with the following traits: {}.\n\
             You speak in a {} manner.\n\
             Your responses should be natural, engaging, and show genuine interest in the conversation.",
            self.name,
            self.traits.join(", "),
            self.speaking_style
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_personality() {
        let p = Personality::default();
        assert_eq!(p.name, "Alex");
        assert_eq!(p.traits.len(), 10);
        assert_eq!(p.traits[0], "friendly");
        assert_eq!(p.speaking_style, "conversational and engaging");
        assert_eq!(p.values.len(), 4);
    }

    #[tokio::test]
    async fn test_load_missing_file_falls_back() {
        let p = Personality::load("/nonexistent/personality.json").await;
        assert_eq!(p, Personality::default());
    }

    #[tokio::test]
    async fn test_load_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let p = Personality::load(file.path()).await;
        assert_eq!(p, Personality::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "Juno",
                "traits": ["calm", "precise"],
                "speaking_style": "brief",
                "interests": ["astronomy"],
                "values": ["clarity"]
            }}"#
        )
        .unwrap();
        let p = Personality::load(file.path()).await;
        assert_eq!(p.name, "Juno");
        assert_eq!(p.traits, vec!["calm", "precise"]);
        assert_eq!(p.speaking_style, "brief");
    }

    #[test]
    fn test_modify_ignores_empty_arguments() {
        let mut p = Personality::default();
        p.modify(Some(vec![]), Some(String::new()));
        assert_eq!(p, Personality::default());

        p.modify(Some(vec!["stoic".to_string()]), None);
        assert_eq!(p.traits, vec!["stoic"]);
        assert_eq!(p.speaking_style, "conversational and engaging");

        p.modify(None, Some("formal".to_string()));
        assert_eq!(p.speaking_style, "formal");
    }

    #[test]
    fn test_format_identity() {
        let p = Personality::default();
        let identity = p.format_identity();
        assert!(identity.starts_with("You are Alex, an AI companion"));
        assert!(identity.contains("friendly, knowledgeable"));
        assert!(identity.contains("You speak in a conversational and engaging manner."));
    }
}
