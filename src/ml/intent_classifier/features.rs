//! Bag-of-words feature extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default prefix of bag-of-words feature names.
pub const BOW_PREFIX: &str = "bow=";

/// Sparse feature vector: feature name -> occurrence count.
///
/// Absent features are zero. Iteration is in feature-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<String, u32>);

impl FeatureVector {
    pub fn new() -> Self {
        FeatureVector::default()
    }

    /// Increment the count of `feature`.
    pub fn add<S: Into<String>>(&mut self, feature: S) {
        *self.0.entry(feature.into()).or_insert(0) += 1;
    }

    pub fn get(&self, feature: &str) -> u32 {
        self.0.get(feature).copied().unwrap_or(0)
    }

    /// Number of distinct features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Turns a lemma sequence into bag-of-words counts.
///
/// Every non-empty lemma, lowercased, contributes one `bow=<lemma>`
/// feature. Order is discarded and nothing is pruned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagOfWordsExtractor {
    prefix: String,
}

impl Default for BagOfWordsExtractor {
    fn default() -> Self {
        Self::with_prefix(BOW_PREFIX)
    }
}

impl BagOfWordsExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        BagOfWordsExtractor {
            prefix: prefix.into(),
        }
    }

    /// Feature name for a single word.
    pub fn feature_name(&self, word: &str) -> String {
        format!("{}{}", self.prefix, word.to_lowercase())
    }

    pub fn extract<S: AsRef<str>>(&self, lemmas: &[S]) -> FeatureVector {
        let mut features = FeatureVector::new();
        for lemma in lemmas {
            let lemma = lemma.as_ref();
            if !lemma.is_empty() {
                features.add(self.feature_name(lemma));
            }
        }
        features
    }
}
