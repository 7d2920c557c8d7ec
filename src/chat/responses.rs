//! Intent to response text table.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ParlanceError, Result};
use crate::ml::intent_classifier::Intent;

/// Fixed mapping from intent label to the response text for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTable(BTreeMap<String, String>);

impl Default for ResponseTable {
    fn default() -> Self {
        [
            ("greeting", "Hello, my name is Stacy.  How may I help you today?"),
            (
                "product-inquiry",
                "Our company sells Auto, Life, and Homeowners Insurance to help protect you, and your loved ones.",
            ),
            (
                "price-inquiry",
                "The price is competitive, based on your specific needs, and coverage options.",
            ),
            (
                "contact-inquiry",
                "Please free to reach us via telephone at 1-800-555-sold.",
            ),
            ("conversation-continue", "What else can I help you with?"),
            (
                "conversation-complete",
                "It was nice chatting with you. Goodbye!",
            ),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        ResponseTable(
            iter.into_iter()
                .map(|(intent, text)| (intent.into(), text.into()))
                .collect(),
        )
    }
}

impl ResponseTable {
    /// Response registered for `intent`.
    pub fn get(&self, intent: &str) -> Option<&str> {
        self.0.get(intent).map(String::as_str)
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.0.contains_key(intent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every label has a response.
    ///
    /// Responses for intents the labels do not include are only logged.
    pub fn validate_labels(&self, labels: &[Intent]) -> Result<()> {
        let missing: Vec<String> = labels
            .iter()
            .filter(|label| !self.contains(label.as_str()))
            .map(|label| label.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ParlanceError::UnknownIntentResponse(missing));
        }

        for intent in self.0.keys() {
            if !labels.iter().any(|label| label == intent.as_str()) {
                warn!("Response for intent '{intent}' is never produced by the classifier");
            }
        }
        Ok(())
    }
}
