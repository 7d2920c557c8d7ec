//! # Parlance
//!
//! An intent-classifying chatbot built on a small statistical NLP pipeline.
//!
//! ## Features
//!
//! - Rule-based sentence detection and English tokenization
//! - HMM part-of-speech tagging and dictionary lemmatization
//! - Maximum-entropy intent classification over bag-of-words features
//! - A conversation controller that answers each sentence from a response table
//!
//! ## Example
//!
//! ```no_run
//! use parlance::chat::{Chatbot, ChatbotConfig};
//!
//! let bot = Chatbot::bootstrap(&ChatbotConfig::default())?;
//! let mut conversation = bot.conversation();
//!
//! let outcome = conversation.process_turn("Hello there. What do you sell?")?;
//! println!("{}", outcome.response);
//! # Ok::<(), parlance::error::ParlanceError>(())
//! ```

pub mod analysis;
pub mod chat;
pub mod cli;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
