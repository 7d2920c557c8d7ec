//! English tokenizer.
//!
//! Splits a sentence on Unicode word boundaries (UAX #29), drops whitespace
//! and then repairs the segments the way English text expects:
//!
//! - hyphenated compounds stay one token (`1-800-555-sold`)
//! - known abbreviations keep their period (`Mr.`)
//! - runs of periods become one ellipsis token (`...`)
//! - contractions are split into host and clitic (`don't` → `do`, `n't`)
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::tokenizer::Tokenizer;
//! use parlance::analysis::tokenizer::english::EnglishTokenizer;
//!
//! let tokenizer = EnglishTokenizer::default();
//! let tokens: Vec<_> = tokenizer
//!     .tokenize("I don't know, Mr. Smith.")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["I", "do", "n't", "know", ",", "Mr.", "Smith", "."]);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Parameters of the English tokenizer, as stored in the `en-token.json`
/// artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerModel {
    /// Clitics split off the end of a word ("n't", "'s", ...).
    pub contractions: Vec<String>,
    /// Words that keep a directly following period, without the period.
    pub abbreviations: Vec<String>,
}

impl Default for TokenizerModel {
    fn default() -> Self {
        TokenizerModel {
            contractions: ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            abbreviations: [
                "mr", "mrs", "ms", "dr", "st", "jr", "sr", "vs", "etc", "e.g", "i.e", "a.m", "p.m",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Contraction- and abbreviation-aware English tokenizer.
#[derive(Clone, Debug)]
pub struct EnglishTokenizer {
    /// Clitics, longest first.
    contractions: Vec<String>,
    abbreviations: HashSet<String>,
}

impl EnglishTokenizer {
    /// Create a tokenizer from its model parameters.
    pub fn new(model: TokenizerModel) -> Self {
        let mut contractions: Vec<String> = model
            .contractions
            .into_iter()
            .map(|c| c.replace('\u{2019}', "'").to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        contractions.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        contractions.dedup();

        EnglishTokenizer {
            contractions,
            abbreviations: model
                .abbreviations
                .into_iter()
                .map(|a| a.trim_end_matches('.').to_lowercase())
                .collect(),
        }
    }

    fn is_wordlike(segment: &str) -> bool {
        segment.chars().any(char::is_alphanumeric)
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&word.to_lowercase())
    }

    /// Merge word-boundary segments into token spans.
    fn spans(&self, text: &str) -> Vec<(usize, usize, TokenType)> {
        let segments: Vec<(usize, &str)> = text
            .split_word_bound_indices()
            .filter(|(_, s)| !s.chars().all(char::is_whitespace))
            .collect();

        let mut spans = Vec::with_capacity(segments.len());
        let mut i = 0;
        while i < segments.len() {
            let (start, segment) = segments[i];
            let mut end = start + segment.len();
            let mut token_type = TokenType::detect(segment);

            if Self::is_wordlike(segment) {
                while i + 2 < segments.len()
                    && segments[i + 1].1 == "-"
                    && segments[i + 1].0 == end
                    && segments[i + 2].0 == end + 1
                    && Self::is_wordlike(segments[i + 2].1)
                {
                    end = segments[i + 2].0 + segments[i + 2].1.len();
                    i += 2;
                }

                if i + 1 < segments.len()
                    && segments[i + 1].1 == "."
                    && segments[i + 1].0 == end
                    && self.is_abbreviation(&text[start..end])
                {
                    end += 1;
                    i += 1;
                    token_type = TokenType::Abbreviation;
                } else if end != start + segment.len() {
                    token_type = TokenType::Alphanum;
                }
            } else if segment == "." {
                while i + 1 < segments.len() && segments[i + 1].1 == "." && segments[i + 1].0 == end
                {
                    end += 1;
                    i += 1;
                }
            }

            spans.push((start, end, token_type));
            i += 1;
        }

        spans
    }

    /// Byte index where a trailing clitic starts, if the word ends with one.
    fn clitic_split(&self, word: &str) -> Option<usize> {
        let normalized = word.replace('\u{2019}', "'").to_lowercase();
        for clitic in &self.contractions {
            if !normalized.ends_with(clitic.as_str()) {
                continue;
            }
            let clitic_chars = clitic.chars().count();
            let split = word
                .char_indices()
                .rev()
                .nth(clitic_chars - 1)
                .map(|(idx, _)| idx)?;
            if split > 0 && Self::is_wordlike(&word[..split]) {
                return Some(split);
            }
        }
        None
    }
}

impl Default for EnglishTokenizer {
    fn default() -> Self {
        Self::new(TokenizerModel::default())
    }
}

impl Tokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        for (start, end, token_type) in self.spans(text) {
            let word = &text[start..end];
            let split = if token_type == TokenType::Alphanum {
                self.clitic_split(word)
            } else {
                None
            };

            match split {
                Some(split) => {
                    tokens.push(Token::with_offsets(
                        &word[..split],
                        tokens.len(),
                        start,
                        start + split,
                    ));
                    tokens.push(
                        Token::with_offsets(&word[split..], tokens.len(), start + split, end)
                            .with_token_type(TokenType::Clitic),
                    );
                }
                None => {
                    tokens.push(
                        Token::with_offsets(word, tokens.len(), start, end)
                            .with_token_type(token_type),
                    );
                }
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "english"
    }
}
