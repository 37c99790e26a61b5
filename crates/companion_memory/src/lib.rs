pub mod error;
pub mod importance;
pub mod interaction;
pub mod long_term;
pub mod short_term;
pub mod store;

pub use error::{MemoryError, MemoryResult};
pub use importance::ImportanceClassifier;
pub use interaction::{Interaction, InteractionContext};
pub use long_term::{relevance_score, LongTermStore};
pub use short_term::ShortTermHistory;
pub use store::{ConversationMemory, SessionSnapshot};
