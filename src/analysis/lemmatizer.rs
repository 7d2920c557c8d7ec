//! Lemmatization.
//!
//! A [`Lemmatizer`] maps a word and its part-of-speech tag to a base form.
//! Lemmas are always lowercase; a pair the lemmatizer knows nothing about
//! yields the lowercased word itself.

use crate::analysis::token::TaggedToken;

/// Trait for lemmatizers.
pub trait Lemmatizer: Send + Sync {
    /// Base form of `word` used with part-of-speech `tag`.
    fn lemma(&self, word: &str, tag: &str) -> String;

    /// Lemmatize a tagged sentence, one lemma per token in input order.
    fn lemmatize(&self, tokens: &[TaggedToken]) -> Vec<String> {
        tokens
            .iter()
            .map(|tagged| self.lemma(tagged.text(), &tagged.tag))
            .collect()
    }

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod dictionary;

pub use dictionary::DictionaryLemmatizer;
