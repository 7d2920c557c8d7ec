//! Conversation layer: response table, startup configuration and the
//! chatbot state machine.

pub mod config;
pub mod conversation;
pub mod responses;

pub use config::{ChatbotConfig, CorpusSource};
pub use conversation::{Chatbot, Conversation, ConversationState, SentenceReport, TurnOutcome};
pub use responses::ResponseTable;
