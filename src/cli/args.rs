//! Command line argument parsing for the Parlance CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Parlance - an intent-classifying chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "parlance")]
#[command(about = "An intent-classifying chatbot built on a small statistical NLP pipeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ParlanceArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Chatbot configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "PARLANCE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Training corpus, overriding the configured one
    #[arg(long, value_name = "CORPUS_FILE", global = true)]
    pub corpus: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ParlanceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat on the console until the conversation ends
    Chat(ChatArgs),

    /// Classify each sentence of a text
    Classify(TextArgs),

    /// Show sentences, tokens, tags and lemmas of a text
    Annotate(TextArgs),

    /// Train the intent model and show training statistics
    Train,
}

/// Arguments for the console chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Print per-sentence intents with each answer
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for commands working on a single text
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Input text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_classify_command() {
        let args = ParlanceArgs::try_parse_from([
            "parlance",
            "classify",
            "How much is it?",
            "--format",
            "json",
            "--pretty",
        ])
        .unwrap();

        if let Command::Classify(text_args) = args.command {
            assert_eq!(text_args.text, "How much is it?");
        } else {
            panic!("Expected Classify command");
        }
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_global_options() {
        let args = ParlanceArgs::try_parse_from([
            "parlance",
            "--config",
            "bot.json",
            "-vv",
            "chat",
            "--explain",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("bot.json")));
        assert_eq!(args.verbosity(), 2);
        assert!(matches!(args.command, Command::Chat(ChatArgs { explain: true })));
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ParlanceArgs::try_parse_from(["parlance", "train"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ParlanceArgs::try_parse_from(["parlance", "-q", "-vvv", "train"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_missing_text_is_rejected() {
        assert!(ParlanceArgs::try_parse_from(["parlance", "annotate"]).is_err());
    }
}
