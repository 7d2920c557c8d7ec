//! Part-of-speech tagging.
//!
//! A [`PosTagger`] assigns one tag to every token of a sentence, using the
//! neighbouring tokens as context. The tagset is whatever the tagger's
//! model was estimated from; callers treat tags as opaque strings.

use crate::analysis::token::{TaggedToken, Token};

/// Trait for part-of-speech taggers.
pub trait PosTagger: Send + Sync {
    /// Tag a sentence. The result has exactly one entry per input token,
    /// in input order; unknown words receive a fallback tag.
    fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken>;

    /// Tags this tagger can emit, in enumeration order.
    fn tagset(&self) -> &[String];

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

pub mod hmm;

pub use hmm::HmmTagger;
