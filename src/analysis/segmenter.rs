//! Sentence segmentation.
//!
//! A [`Segmenter`] splits raw input text into sentences. The rule-based
//! [`RuleSegmenter`] ends a sentence after a run of terminator characters
//! (optionally followed by closing quotes or brackets) when whitespace or
//! the end of the text follows, except after known abbreviations and
//! single-letter initials.
//!
//! Segmentation never drops or reorders text: joining the returned
//! sentences reproduces the input apart from whitespace between sentences.
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::segmenter::{RuleSegmenter, Segmenter, SegmenterModel};
//!
//! let segmenter = RuleSegmenter::new(SegmenterModel::default());
//! let sentences = segmenter.segment("Hello there. How much does it cost?");
//!
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0].text, "Hello there.");
//! assert_eq!(sentences[1].text, "How much does it cost?");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A sentence cut out of the input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text with surrounding whitespace removed
    pub text: String,
    /// Byte offset of the first sentence character in the input
    pub start_offset: usize,
    /// Byte offset just past the last sentence character in the input
    pub end_offset: usize,
}

/// Trait for sentence segmenters.
pub trait Segmenter: Send + Sync {
    /// Split text into sentences. Empty or blank input yields no sentences.
    fn segment(&self, text: &str) -> Vec<Sentence>;

    /// Get the name of this segmenter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Parameters of the rule-based segmenter, as stored in the `en-sent.json`
/// artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterModel {
    /// Characters that can end a sentence.
    pub terminators: Vec<char>,
    /// Words that take a period without ending a sentence, without the
    /// trailing period ("mr", "e.g").
    pub abbreviations: Vec<String>,
}

impl Default for SegmenterModel {
    fn default() -> Self {
        SegmenterModel {
            terminators: vec!['.', '!', '?'],
            abbreviations: [
                "mr", "mrs", "ms", "dr", "st", "jr", "sr", "vs", "etc", "e.g", "i.e", "a.m", "p.m",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Abbreviation-aware rule-based sentence segmenter.
#[derive(Clone, Debug)]
pub struct RuleSegmenter {
    terminators: HashSet<char>,
    abbreviations: HashSet<String>,
}

impl RuleSegmenter {
    /// Create a segmenter from its model parameters.
    pub fn new(model: SegmenterModel) -> Self {
        RuleSegmenter {
            terminators: model.terminators.into_iter().collect(),
            abbreviations: model
                .abbreviations
                .into_iter()
                .map(|a| a.trim_end_matches('.').to_lowercase())
                .collect(),
        }
    }

    fn is_terminator(&self, c: char) -> bool {
        self.terminators.contains(&c)
    }

    fn is_closer(c: char) -> bool {
        matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}')
    }

    /// Whether the word ending at `period_offset` keeps its period.
    fn is_abbreviation(&self, text: &str, sentence_start: usize, period_offset: usize) -> bool {
        let prefix = &text[sentence_start..period_offset];
        let word_start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + prefix[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let word = prefix[word_start..].trim_start_matches(['(', '[', '"', '\'', '\u{201C}']);

        if word.is_empty() {
            return false;
        }

        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if first.is_uppercase() {
                return true;
            }
        }

        self.abbreviations.contains(&word.to_lowercase())
    }

    fn push_sentence(sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
        let slice = &text[start..end];
        let trimmed_start = slice.len() - slice.trim_start().len();
        let trimmed = slice.trim();
        if trimmed.is_empty() {
            return;
        }
        let start_offset = start + trimmed_start;
        sentences.push(Sentence {
            text: trimmed.to_string(),
            start_offset,
            end_offset: start_offset + trimmed.len(),
        });
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new(SegmenterModel::default())
    }
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<Sentence> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut sentence_start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            if !self.is_terminator(c) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j < chars.len() && self.is_terminator(chars[j].1) {
                j += 1;
            }
            let single_period = j - i == 1 && c == '.';
            while j < chars.len() && Self::is_closer(chars[j].1) {
                j += 1;
            }

            let at_end = j == chars.len();
            if !at_end && !chars[j].1.is_whitespace() {
                // "3.5", "e.g.x", "?!abc" stay inside the sentence
                i = j;
                continue;
            }

            if single_period && self.is_abbreviation(text, sentence_start, offset) {
                i = j;
                continue;
            }

            let end = if at_end { text.len() } else { chars[j].0 };
            Self::push_sentence(&mut sentences, text, sentence_start, end);
            sentence_start = end;
            i = j;
        }

        if sentence_start < text.len() {
            Self::push_sentence(&mut sentences, text, sentence_start, text.len());
        }

        sentences
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    fn strip_whitespace(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_basic_segmentation() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("hello. goodbye.");

        assert_eq!(texts(&sentences), vec!["hello.", "goodbye."]);
        assert_eq!(sentences[1].start_offset, 7);
        assert_eq!(sentences[1].end_offset, 15);
    }

    #[test]
    fn test_empty_input() {
        let segmenter = RuleSegmenter::default();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("   \n\t").is_empty());
    }

    #[test]
    fn test_no_terminator() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("  hello there  ");
        assert_eq!(texts(&sentences), vec!["hello there"]);
        assert_eq!(sentences[0].start_offset, 2);
    }

    #[test]
    fn test_abbreviations_and_initials() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("I spoke to Dr. Smith and J. Doe. They agreed.");
        assert_eq!(
            texts(&sentences),
            vec!["I spoke to Dr. Smith and J. Doe.", "They agreed."]
        );
    }

    #[test]
    fn test_terminator_runs_and_closers() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("Really?! He said \"fine.\" Then left...");
        assert_eq!(
            texts(&sentences),
            vec!["Really?!", "He said \"fine.\"", "Then left..."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let segmenter = RuleSegmenter::default();
        let sentences = segmenter.segment("It costs 3.5 dollars. Cheap!");
        assert_eq!(texts(&sentences), vec!["It costs 3.5 dollars.", "Cheap!"]);
    }

    #[test]
    fn test_reconstruction() {
        let segmenter = RuleSegmenter::default();
        let inputs = [
            "hello. goodbye.",
            "What do you sell?   How much is it!  Thanks",
            "Mr. Jones e.g. buys insurance. ok",
            "é. ü? ñ!",
            ". . .",
        ];

        for input in inputs {
            let sentences = segmenter.segment(input);
            let joined: String = sentences.iter().map(|s| s.text.as_str()).collect();
            assert_eq!(strip_whitespace(&joined), strip_whitespace(input), "{input}");
            for sentence in &sentences {
                assert_eq!(&input[sentence.start_offset..sentence.end_offset], sentence.text);
            }
        }
    }

    #[test]
    fn test_segmenter_name() {
        assert_eq!(RuleSegmenter::default().name(), "rule");
    }
}
