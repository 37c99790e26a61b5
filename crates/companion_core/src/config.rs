use crate::topics::TopicRegistry;
use crate::triggers::SearchTriggers;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub llm: LlmConfig,
    pub memory: MemoryConfig,
    pub topics: TopicRegistry,
    pub enrichment: SearchTriggers,
    pub personality_path: PathBuf,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            memory: MemoryConfig::default(),
            topics: TopicRegistry::default(),
            enrichment: SearchTriggers::default(),
            personality_path: PathBuf::from("personality.json"),
        }
    }
}

impl CompanionConfig {
    /// Read a TOML config file. Absent keys take their defaults; environment
    /// overrides are layered on top.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Cannot read companion config {}", path.as_ref().display()))?;
        let mut config: CompanionConfig =
            toml::from_str(&content).context("Companion config is not valid TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like [`load`](Self::load), but an unreadable or invalid file yields the
    /// built-in defaults (still subject to environment overrides).
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Using default companion config: {:#}", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// `LLM_*` variables win over whatever the file said.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = v.parse() {
                self.llm.max_tokens = n;
            }
        }
        if let Ok(v) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(n) = v.parse() {
                self.llm.temperature = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: None,
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Maximum number of interactions kept in short-term history.
    pub short_term_capacity: usize,
    /// JSON file mirroring long-term memory.
    pub long_term_path: PathBuf,
    /// How many recent interactions are rendered into each prompt.
    pub recent_context_messages: usize,
    /// How many long-term memories are surfaced per prompt.
    pub relevant_memory_limit: usize,
    /// Keywords that promote an interaction to long-term memory.
    pub importance_keywords: Vec<String>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 10,
            long_term_path: PathBuf::from("long_term_memory.json"),
            recent_context_messages: 5,
            relevant_memory_limit: 5,
            importance_keywords: default_importance_keywords(),
        }
    }
}

pub fn default_importance_keywords() -> Vec<String> {
    vec![
        "remember".to_string(),
        "important".to_string(),
        "don't forget".to_string(),
        "note".to_string(),
        "preference".to_string(),
        "always".to_string(),
        "never".to_string(),
        "favorite".to_string(),
    ]
}

// ============================================================================
// Tests
// ============================================================================
