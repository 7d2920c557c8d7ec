//! Chatbot configuration.
//!
//! The configuration is a JSON document; every field is optional and
//! falls back to the built-in English bot:
//!
//! ```json
//! {
//!   "resources": "builtin",
//!   "corpus": { "file": "intents.txt" },
//!   "training": { "cutoff": 0, "iterations": 100 },
//!   "responses": { "greeting": "Hi!", "conversation-complete": "Bye!" },
//!   "terminal_intent": "conversation-complete"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::resource::ResourceSource;
use crate::chat::responses::ResponseTable;
use crate::error::{ParlanceError, Result};
use crate::ml::intent_classifier::{TrainOptions, TrainingSample, load_corpus, read_line_corpus};

const BUILTIN_CORPUS: &str = include_str!("../../resources/en/en-intents.txt");

/// Intent whose detection ends a conversation unless configured otherwise.
pub const DEFAULT_TERMINAL_INTENT: &str = "conversation-complete";

/// Where the intent training corpus comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusSource {
    /// The English corpus compiled into the crate.
    #[default]
    Builtin,
    /// A corpus file; `.json` files use the JSON record format.
    File(PathBuf),
}

impl CorpusSource {
    /// Read the training samples.
    pub fn load(&self) -> Result<Vec<TrainingSample>> {
        match self {
            CorpusSource::Builtin => Ok(read_line_corpus(BUILTIN_CORPUS)),
            CorpusSource::File(path) => load_corpus(path),
        }
    }
}

/// Startup configuration of a [`Chatbot`](crate::chat::Chatbot).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    pub resources: ResourceSource,
    pub corpus: CorpusSource,
    /// Fields left out keep the bot's training defaults.
    #[serde(deserialize_with = "deserialize_training")]
    pub training: TrainOptions,
    pub responses: ResponseTable,
    pub terminal_intent: String,
}

/// Training options of the built-in bot. Its corpus is small, so nothing
/// is cut off.
pub fn bot_training_options() -> TrainOptions {
    TrainOptions::default().with_cutoff(0)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TrainingOverrides {
    cutoff: Option<u32>,
    iterations: Option<usize>,
    convergence_threshold: Option<f64>,
    stop_words: Option<Vec<String>>,
}

fn deserialize_training<'de, D>(deserializer: D) -> std::result::Result<TrainOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = TrainingOverrides::deserialize(deserializer)?;
    let base = bot_training_options();
    Ok(TrainOptions {
        cutoff: overrides.cutoff.unwrap_or(base.cutoff),
        iterations: overrides.iterations.unwrap_or(base.iterations),
        convergence_threshold: overrides
            .convergence_threshold
            .unwrap_or(base.convergence_threshold),
        stop_words: overrides.stop_words.unwrap_or(base.stop_words),
    })
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        ChatbotConfig {
            resources: ResourceSource::Builtin,
            corpus: CorpusSource::Builtin,
            training: bot_training_options(),
            responses: ResponseTable::default(),
            terminal_intent: DEFAULT_TERMINAL_INTENT.to_string(),
        }
    }
}

impl ChatbotConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ParlanceError::config(format!("invalid configuration: {e}")))
    }

    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ParlanceError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Check the parts of the configuration that need no training.
    pub fn validate(&self) -> Result<()> {
        if self.terminal_intent.trim().is_empty() {
            return Err(ParlanceError::config("terminal intent must not be empty"));
        }
        if !self.responses.contains(&self.terminal_intent) {
            return Err(ParlanceError::config(format!(
                "terminal intent '{}' has no response",
                self.terminal_intent
            )));
        }
        Ok(())
    }
}
