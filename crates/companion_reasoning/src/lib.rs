pub mod api_types;
pub mod commands;
pub mod engine;
pub mod enrichment;
pub mod llm;
pub mod prompts;
pub mod providers;
pub mod retry;

pub use commands::Command;
pub use engine::CompanionEngine;
pub use enrichment::Enrichment;
pub use llm::{CompletionParams, LlmClient};
