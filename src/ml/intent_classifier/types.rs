//! Common types for intent classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An intent label from the closed set fixed at training time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intent(String);

impl Intent {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Intent(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Intent {
    fn from(label: &str) -> Self {
        Intent::new(label)
    }
}

impl From<String> for Intent {
    fn from(label: String) -> Self {
        Intent(label)
    }
}

impl PartialEq<str> for Intent {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Intent {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One labeled example: an intent and the raw tokens of its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Intent label.
    pub intent: Intent,
    /// Raw tokens in order.
    pub tokens: Vec<String>,
}

impl TrainingSample {
    pub fn new<I: Into<Intent>>(intent: I, tokens: Vec<String>) -> Self {
        TrainingSample {
            intent: intent.into(),
            tokens,
        }
    }

    /// Create a sample from text split on whitespace.
    pub fn from_text<I: Into<Intent>>(intent: I, text: &str) -> Self {
        Self::new(intent, text.split_whitespace().map(str::to_string).collect())
    }
}

/// Training record of the JSON corpus format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSample {
    /// Intent label.
    pub intent: String,
    /// Sentence text.
    pub text: String,
}

/// Result of classifying one feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The most probable intent.
    pub intent: Intent,
    /// Probability of `intent`.
    pub confidence: f64,
    /// Probability of every intent, in the model's label order.
    pub distribution: Vec<(Intent, f64)>,
}

impl Classification {
    /// Probability assigned to `intent`, zero for labels the model lacks.
    pub fn probability(&self, intent: &str) -> f64 {
        self.distribution
            .iter()
            .find(|(label, _)| label == intent)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}
