//! Token types produced by the annotation pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A span of a sentence with text, position and byte offsets
//! - [`TokenType`] - Coarse classification of a token's characters
//! - [`TaggedToken`] - A token paired with its part-of-speech tag
//! - [`TokenStream`] - Type alias for a boxed iterator of tokens
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token is a single word or punctuation span of a sentence.
///
/// Offsets are byte offsets into the sentence the token was produced from.
/// Tokens are never mutated once a tokenizer has emitted them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the sentence (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the sentence
    pub start_offset: usize,

    /// The byte offset where this token ends in the sentence
    pub end_offset: usize,

    /// Character class of the token
    pub token_type: TokenType,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphabetic or mixed alphanumeric word
    Alphanum,
    /// Numeric values (digits with optional separators)
    Num,
    /// Punctuation marks
    Punctuation,
    /// Clitic split off a contraction ("n't", "'s", ...)
    Clitic,
    /// Abbreviation carrying its trailing period ("Mr.", "e.g.")
    Abbreviation,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// Classify a piece of text by its characters.
    pub fn detect(text: &str) -> TokenType {
        if text.is_empty() {
            return TokenType::Other;
        }

        if text.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
            && text.chars().any(|c| c.is_ascii_digit())
        {
            return TokenType::Num;
        }

        if text.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
            return TokenType::Punctuation;
        }

        if text.chars().any(|c| c.is_alphanumeric()) {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let end_offset = text.len();
        Token {
            token_type: TokenType::detect(&text),
            text,
            position,
            start_offset: 0,
            end_offset,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let text = text.into();
        Token {
            token_type: TokenType::detect(&text),
            text,
            position,
            start_offset,
            end_offset,
        }
    }

    /// Override the detected token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token together with the part-of-speech tag assigned to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: String,
}

impl TaggedToken {
    pub fn new<S: Into<String>>(token: Token, tag: S) -> Self {
        TaggedToken {
            token,
            tag: tag.into(),
        }
    }

    /// The token text.
    pub fn text(&self) -> &str {
        &self.token.text
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token.text, self.tag)
    }
}

/// Type alias for a stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.end_offset, 5);
        assert_eq!(token.token_type, TokenType::Alphanum);
    }

    #[test]
    fn test_token_type_detection() {
        assert_eq!(TokenType::detect("1,800"), TokenType::Num);
        assert_eq!(TokenType::detect("3.5"), TokenType::Num);
        assert_eq!(TokenType::detect("?"), TokenType::Punctuation);
        assert_eq!(TokenType::detect("..."), TokenType::Punctuation);
        assert_eq!(TokenType::detect("1-800-555-sold"), TokenType::Alphanum);
        assert_eq!(TokenType::detect(""), TokenType::Other);
    }

    #[test]
    fn test_tagged_token_display() {
        let tagged = TaggedToken::new(Token::new("price", 3), "NN");
        assert_eq!(tagged.to_string(), "price/NN");
        assert_eq!(tagged.text(), "price");
    }
}
