//! Error types for the Parlance library.
//!
//! All fallible operations return [`ParlanceError`]. Startup failures
//! (resource loading, training data, response configuration) are kept as
//! distinct variants so callers can tell them apart before any turn is
//! processed.
//!
//! # Examples
//!
//! ```
//! use parlance::error::{ParlanceError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ParlanceError::training_data("corpus is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// A single annotator artifact that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFailure {
    /// Name of the annotator the artifact belongs to (e.g. `"pos_tagger"`).
    pub annotator: String,
    /// Where the artifact was expected to come from.
    pub location: String,
    /// Why loading failed.
    pub reason: String,
}

impl fmt::Display for ResourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.annotator, self.location, self.reason)
    }
}

fn join_failures(failures: &[ResourceFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for Parlance operations.
#[derive(Error, Debug)]
pub enum ParlanceError {
    /// One or more annotator artifacts failed to load.
    #[error("Resource load failure: {}", join_failures(.failures))]
    ResourceLoad { failures: Vec<ResourceFailure> },

    /// The training corpus cannot produce a classifier.
    #[error("Training data invalid: {0}")]
    TrainingDataInvalid(String),

    /// A single corpus record could not be parsed.
    #[error("Malformed training record at line {line}: {reason}")]
    MalformedTrainingRecord { line: usize, reason: String },

    /// The classifier can produce intents that have no registered response.
    #[error("No response registered for intents: {}", .0.join(", "))]
    UnknownIntentResponse(Vec<String>),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A turn was submitted after the conversation terminated.
    #[error("Conversation has already ended")]
    ConversationEnded,

    /// Annotator construction errors (invalid patterns, empty tagsets, ...).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with ParlanceError.
pub type Result<T> = std::result::Result<T, ParlanceError>;

impl ParlanceError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ParlanceError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ParlanceError::Config(msg.into())
    }

    /// Create a new training data error.
    pub fn training_data<S: Into<String>>(msg: S) -> Self {
        ParlanceError::TrainingDataInvalid(msg.into())
    }

    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(line: usize, reason: S) -> Self {
        ParlanceError::MalformedTrainingRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this error can only happen during startup.
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            ParlanceError::ResourceLoad { .. }
                | ParlanceError::TrainingDataInvalid(_)
                | ParlanceError::UnknownIntentResponse(_)
                | ParlanceError::Config(_)
        )
    }

    /// Process exit status used by the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParlanceError::ResourceLoad { .. } => 2,
            ParlanceError::TrainingDataInvalid(_) => 3,
            ParlanceError::UnknownIntentResponse(_) | ParlanceError::Config(_) => 4,
            _ => 1,
        }
    }
}
