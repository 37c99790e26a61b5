//! Long-term memory: every important interaction, mirrored to a JSON file.
//!
//! The file is rewritten in full after each append. There is no append log,
//! so two processes sharing one file will overwrite each other.

use crate::error::{MemoryError, MemoryResult};
use crate::interaction::Interaction;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LongTermStore {
    path: PathBuf,
    memories: Vec<Interaction>,
}

impl LongTermStore {
    /// Open the store backed by `path`.
    ///
    /// A missing file is an empty store. A malformed file is moved aside to
    /// [`backup_path`] and the store starts empty, so later appends never
    /// clobber memories that could not be read. Other read errors are logged
    /// and also yield an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let memories = match read_memories(&path) {
            Ok(memories) => memories,
            Err(MemoryError::NotFound { .. }) => Vec::new(),
            Err(e @ MemoryError::Parse { .. }) => {
                let backup = backup_path(&path);
                match std::fs::rename(&path, &backup) {
                    Ok(()) => tracing::warn!(
                        "Unreadable long-term memory moved to {}: {}",
                        backup.display(),
                        e
                    ),
                    Err(rename_err) => tracing::warn!(
                        "Unreadable long-term memory ({}), could not move it aside: {}",
                        e,
                        rename_err
                    ),
                }
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Error loading long-term memory: {}", e);
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} long-term memories from {}", memories.len(), path.display());
        Self { path, memories }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.memories.iter()
    }

    /// Append and rewrite the backing file.
    ///
    /// The interaction stays in memory even when the write fails.
    pub fn append(&mut self, interaction: Interaction) -> MemoryResult<()> {
        self.memories.push(interaction);
        self.persist()
    }

    /// Overwrite the backing file with the whole store.
    pub fn persist(&self) -> MemoryResult<()> {
        let json = serde_json::to_string_pretty(&self.memories).map_err(MemoryError::Serialize)?;
        std::fs::write(&self.path, json).map_err(|e| MemoryError::from_io(&self.path, e))
    }

    /// Up to `limit` memories sharing words with `query`, best match first.
    ///
    /// Ties keep store order. Memories with no matching word are dropped.
    pub fn relevant(&self, query: &str, limit: usize) -> Vec<&Interaction> {
        let tokens = query_tokens(query);
        let mut scored: Vec<(usize, &Interaction)> = self
            .memories
            .iter()
            .map(|m| (score_tokens(&tokens, m), m))
            .filter(|(score, _)| *score > 0)
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, m)| m).collect()
    }
}

/// Where a malformed long-term file is moved: `<file>.bak` next to it.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn read_memories(path: &Path) -> MemoryResult<Vec<Interaction>> {
    let raw = std::fs::read_to_string(path).map_err(|e| MemoryError::from_io(path, e))?;
    serde_json::from_str(&raw).map_err(|source| MemoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Distinct lowercased whitespace-separated tokens, in first-seen order.
fn query_tokens(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in query.to_lowercase().split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

fn score_tokens(tokens: &[String], interaction: &Interaction) -> usize {
    let text = interaction.searchable_text();
    tokens.iter().filter(|t| text.contains(t.as_str())).count()
}

/// Number of distinct query tokens found as substrings of the interaction text.
pub fn relevance_score(query: &str, interaction: &Interaction) -> usize {
    score_tokens(&query_tokens(query), interaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionContext;

    fn interaction(user: &str, ai: &str) -> Interaction {
        Interaction::new(user, ai, InteractionContext::new())
    }

    #[test]
    fn test_relevance_score_counts_distinct_tokens() {
        let m = interaction("My favorite color is blue", "Noted!");
        assert_eq!(relevance_score("favorite color", &m), 2);
        assert_eq!(relevance_score("FAVORITE favorite", &m), 1);
        assert_eq!(relevance_score("pizza", &m), 0);
        assert_eq!(relevance_score("", &m), 0);
        // substring, no word boundaries
        assert_eq!(relevance_score("lor", &m), 1);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LongTermStore::open(dir.path().join("ltm.json"));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_open_malformed_file_is_empty_and_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ltm.json");
        std::fs::write(&path, "{ not a list").unwrap();
        let mut store = LongTermStore::open(&path);
        assert!(store.is_empty());

        let backup = dir.path().join("ltm.json.bak");
        assert_eq!(backup_path(&path), backup);
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not a list");

        store.append(interaction("remember c", "ok")).unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not a list");
        assert_eq!(LongTermStore::open(&path).len(), 1);
    }

    #[test]
    fn test_append_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ltm.json");
        let mut store = LongTermStore::open(&path);
        store.append(interaction("remember a", "ok")).unwrap();
        store.append(interaction("remember b", "ok")).unwrap();

        let reopened = LongTermStore::open(&path);
        assert_eq!(reopened.len(), 2);
        let inputs: Vec<&str> = reopened.iter().map(|m| m.user_input()).collect();
        assert_eq!(inputs, vec!["remember a", "remember b"]);
    }

    #[test]
    fn test_append_keeps_memory_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every write fails
        let mut store = LongTermStore::open(dir.path().join("missing").join("ltm.json"));
        assert!(store.append(interaction("remember", "ok")).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_relevant_orders_by_score_then_store_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LongTermStore::open(dir.path().join("ltm.json"));
        store.append(interaction("my favorite food is ramen", "")).unwrap();
        store.append(interaction("nothing here", "")).unwrap();
        store.append(interaction("favorite color: green", "")).unwrap();
        store.append(interaction("color of the sky", "")).unwrap();

        let hits = store.relevant("favorite color", 10);
        let inputs: Vec<&str> = hits.iter().map(|m| m.user_input()).collect();
        assert_eq!(
            inputs,
            vec!["favorite color: green", "my favorite food is ramen", "color of the sky"]
        );

        assert_eq!(store.relevant("favorite color", 2).len(), 2);
        assert!(store.relevant("favorite color", 0).is_empty());
        assert!(store.relevant("zebra", 5).is_empty());
    }
}
