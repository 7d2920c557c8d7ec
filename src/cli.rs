//! Command line interface for the Parlance chatbot.

pub mod args;
pub mod commands;
pub mod output;
