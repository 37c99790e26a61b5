pub mod config;
pub mod persona;
pub mod preferences;
pub mod topics;
pub mod triggers;

pub use config::CompanionConfig;
pub use persona::Personality;
pub use preferences::UserPreferences;
pub use topics::{KnowledgeDomain, TopicRegistry};
pub use triggers::{SearchTriggers, TriggerCategory};
