//! Statistical models used by the chatbot.

pub mod intent_classifier;
