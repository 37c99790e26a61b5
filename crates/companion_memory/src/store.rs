use crate::error::{MemoryError, MemoryResult};
use crate::importance::ImportanceClassifier;
use crate::interaction::{Interaction, InteractionContext};
use crate::long_term::LongTermStore;
use crate::short_term::ShortTermHistory;
use chrono::{DateTime, TimeDelta, Utc};
use companion_core::config::MemoryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of `/save` and `/load` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(deserialize_with = "crate::interaction::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub conversations: Vec<Interaction>,
}

/// Conversation memory: bounded short-term history plus durable long-term store.
pub struct ConversationMemory {
    short_term: ShortTermHistory,
    long_term: LongTermStore,
    classifier: ImportanceClassifier,
}

impl ConversationMemory {
    /// Build from config, loading long-term memory from `config.long_term_path`.
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_parts(
            ShortTermHistory::new(config.short_term_capacity),
            LongTermStore::open(&config.long_term_path),
            ImportanceClassifier::new(config.importance_keywords.clone()),
        )
    }

    pub fn with_parts(
        short_term: ShortTermHistory,
        long_term: LongTermStore,
        classifier: ImportanceClassifier,
    ) -> Self {
        Self {
            short_term,
            long_term,
            classifier,
        }
    }

    pub fn short_term(&self) -> &ShortTermHistory {
        &self.short_term
    }

    pub fn long_term(&self) -> &LongTermStore {
        &self.long_term
    }

    /// Record an exchange.
    ///
    /// Always lands in short-term history. Important exchanges are also
    /// appended to long-term memory; a failed long-term write is logged only.
    pub fn add_interaction(
        &mut self,
        user_input: &str,
        ai_response: &str,
        context: Option<InteractionContext>,
    ) {
        let interaction = Interaction::new(user_input, ai_response, context.unwrap_or_default());
        let important = self.classifier.is_important(&interaction);

        self.short_term.push(interaction.clone());

        if important {
            tracing::debug!("Promoting interaction to long-term memory");
            if let Err(e) = self.long_term.append(interaction) {
                tracing::warn!("Error saving long-term memory: {}", e);
            }
        }
    }

    /// The last `n` exchanges as `User: ...` / `AI: ...` lines, oldest first.
    pub fn get_recent_context(&self, n: usize) -> String {
        let mut out = String::new();
        for interaction in self.short_term.recent(n) {
            out.push_str(&format!("User: {}\n", interaction.user_input()));
            out.push_str(&format!("AI: {}\n", interaction.ai_response()));
        }
        out
    }

    pub fn get_conversation_summary(&self) -> String {
        let (first, last) = match (self.short_term.first(), self.short_term.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return "No conversation history available.".to_string(),
        };

        let mut summary = String::from("Conversation Summary:\n\n");
        summary.push_str(&format!("Total messages: {}\n", self.short_term.len()));
        summary.push_str(&format!(
            "Duration: {}\n\n",
            format_duration(last.timestamp() - first.timestamp())
        ));

        let topics = self.discussed_topics();
        if !topics.is_empty() {
            summary.push_str("Main topics discussed:\n");
            for topic in topics {
                summary.push_str(&format!("- {}\n", topic));
            }
        }
        summary
    }

    /// Union of detected topics across short-term history, first-seen order.
    fn discussed_topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for interaction in self.short_term.iter() {
            for topic in interaction.detected_topics() {
                if !topics.contains(&topic) {
                    topics.push(topic);
                }
            }
        }
        topics
    }

    /// Empty short-term history. Long-term memory is untouched.
    pub fn clear_memory(&mut self) {
        self.short_term.clear();
    }

    /// Write short-term history to `path`, overwriting any existing file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> MemoryResult<()> {
        let path = path.as_ref();
        let snapshot = SessionSnapshot {
            timestamp: Utc::now(),
            conversations: self.short_term.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot).map_err(MemoryError::Serialize)?;
        std::fs::write(path, json).map_err(|e| MemoryError::from_io(path, e))?;
        tracing::info!("Saved {} interactions to {}", snapshot.conversations.len(), path.display());
        Ok(())
    }

    /// Replace short-term history with the conversations stored at `path`.
    ///
    /// On any error the current history is left as it was.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> MemoryResult<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| MemoryError::from_io(path, e))?;
        let snapshot: SessionSnapshot =
            serde_json::from_str(&raw).map_err(|source| MemoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("Loaded {} interactions from {}", snapshot.conversations.len(), path.display());
        self.short_term.replace(snapshot.conversations);
        Ok(())
    }

    /// Long-term memories sharing the most words with `query`.
    pub fn get_relevant_memories(&self, query: &str, limit: usize) -> Vec<Interaction> {
        self.long_term
            .relevant(query, limit)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// `H:MM:SS`, clamped at zero.
fn format_duration(delta: TimeDelta) -> String {
    let secs = delta.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(83)), "0:01:23");
        assert_eq!(format_duration(TimeDelta::seconds(3 * 3600 + 5)), "3:00:05");
        assert_eq!(format_duration(TimeDelta::seconds(-10)), "0:00:00");
    }
}
