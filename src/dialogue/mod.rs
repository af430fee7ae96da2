//! Conversation handling
//!
//! ```text
//! utterance ─▶ CommandRouter ─▶ handled? ─yes─▶ reply
//!                                  │no
//!                                  ▼
//!              prompt (instructions + history + utterance)
//!                                  ▼
//!                            LanguageModel
//!                                  ▼
//!                   markers::parse ─▶ trim_reply ─▶ reply
//! ```

mod assistant;
pub mod history;
pub mod markers;
pub mod prompt;
pub mod trim;

pub use assistant::{Assistant, DEFAULT_LLM_TIMEOUT, NO_OUTPUT_REPLY};
pub use history::{ConversationHistory, DEFAULT_HISTORY_TURNS, Role, Turn};
pub use markers::{ParsedReply, speakable};
pub use trim::{DEFAULT_MAX_SENTENCES, trim_reply};
