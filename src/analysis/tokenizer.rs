//! Tokenizer implementations.
//!
//! Tokenizers split a single sentence into word and punctuation tokens.
//!
//! # Available Tokenizers
//!
//! - [`english::EnglishTokenizer`] - Unicode word boundaries with contraction
//!   and abbreviation handling
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::tokenizer::Tokenizer;
//! use parlance::analysis::tokenizer::EnglishTokenizer;
//!
//! let tokenizer = EnglishTokenizer::default();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world!").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert a sentence into tokens.
///
/// Tokenization is deterministic: the same input always yields the same
/// token sequence.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given sentence into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod english;

pub use english::{EnglishTokenizer, TokenizerModel};
