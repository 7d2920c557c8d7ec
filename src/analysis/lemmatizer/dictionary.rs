//! Dictionary lemmatizer with induced suffix rules.
//!
//! The dictionary (`en-lemmatizer.txt`) lists `word<TAB>tag<TAB>lemma`
//! entries. Besides exact lookups, suffix edit rules are induced from the
//! regular entries (`"prices"/NNS -> "price"` teaches `NNS: -s`), so
//! inflected words missing from the dictionary still reduce to a base form.
//!
//! Lookup order for `(word, tag)`:
//!
//! 1. the dictionary entry for the lowercased word and tag
//! 2. the induced rule for the tag with the longest matching suffix
//! 3. the lowercased word
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
//!
//! let lemmatizer = DictionaryLemmatizer::from_dictionary(
//!     "prices\tNNS\tprice\nquotes\tNNS\tquote\nwent\tVBD\tgo\n",
//! )
//! .unwrap();
//!
//! assert_eq!(lemmatizer.lemma("Went", "VBD"), "go");
//! assert_eq!(lemmatizer.lemma("cars", "NNS"), "car");
//! assert_eq!(lemmatizer.lemma("hello", "UH"), "hello");
//! ```

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::analysis::lemmatizer::Lemmatizer;
use crate::error::{ParlanceError, Result};

/// Shortest stem a suffix rule may leave behind.
const MIN_STEM_CHARS: usize = 2;

/// Number of dictionary entries a rule needs before it is used.
const MIN_RULE_SUPPORT: usize = 2;

/// A suffix edit: replace `strip` at the end of a word with `append`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixRule {
    pub strip: String,
    pub append: String,
    /// Dictionary entries this rule reproduces.
    pub support: usize,
}

impl SuffixRule {
    fn apply(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.strip.as_str())?;
        if stem.chars().count() < MIN_STEM_CHARS {
            return None;
        }
        Some(format!("{stem}{}", self.append))
    }
}

/// Lemmatizer backed by a word/tag dictionary and suffix rules.
#[derive(Clone, Debug, Default)]
pub struct DictionaryLemmatizer {
    entries: AHashMap<String, AHashMap<String, String>>,
    /// Per tag, most specific rule first.
    rules: AHashMap<String, Vec<SuffixRule>>,
}

/// The suffix edit turning `word` into `lemma`, if the two share a stem
/// long enough to generalize.
fn suffix_edit(word: &str, lemma: &str) -> Option<(String, String)> {
    let shared: usize = word
        .char_indices()
        .zip(lemma.chars())
        .take_while(|((_, a), b)| a == b)
        .map(|((_, a), _)| a.len_utf8())
        .sum();

    if word[..shared].chars().count() < MIN_STEM_CHARS {
        return None;
    }

    let strip = &word[shared..];
    if strip.is_empty() {
        return None;
    }
    Some((strip.to_string(), lemma[shared..].to_string()))
}

impl DictionaryLemmatizer {
    /// Build a lemmatizer from `(word, tag, lemma)` entries.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut lemmatizer = DictionaryLemmatizer::default();
        let mut edits: BTreeMap<(String, String, String), usize> = BTreeMap::new();

        for (word, tag, lemma) in entries {
            let word = word.to_lowercase();
            let lemma = lemma.to_lowercase();

            if let Some((strip, append)) = suffix_edit(&word, &lemma) {
                *edits.entry((tag.clone(), strip, append)).or_insert(0) += 1;
            }

            lemmatizer
                .entries
                .entry(word)
                .or_default()
                .insert(tag, lemma);
        }

        for ((tag, strip, append), support) in edits {
            if support >= MIN_RULE_SUPPORT {
                lemmatizer.rules.entry(tag).or_default().push(SuffixRule {
                    strip,
                    append,
                    support,
                });
            }
        }

        for rules in lemmatizer.rules.values_mut() {
            rules.sort_by(|a, b| {
                b.strip
                    .chars()
                    .count()
                    .cmp(&a.strip.chars().count())
                    .then(b.support.cmp(&a.support))
                    .then_with(|| a.strip.cmp(&b.strip))
                    .then_with(|| a.append.cmp(&b.append))
            });
        }

        lemmatizer
    }

    /// Parse a tab-separated `word<TAB>tag<TAB>lemma` dictionary.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_dictionary(text: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            match fields.as_slice() {
                [word, tag, lemma] if !word.is_empty() && !tag.is_empty() && !lemma.is_empty() => {
                    entries.push((word.to_string(), tag.to_string(), lemma.to_string()));
                }
                _ => {
                    return Err(ParlanceError::analysis(format!(
                        "line {}: expected word<TAB>tag<TAB>lemma",
                        line_no + 1
                    )));
                }
            }
        }

        if entries.is_empty() {
            return Err(ParlanceError::analysis("lemma dictionary has no entries"));
        }

        Ok(Self::new(entries))
    }

    /// Number of distinct words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Induced rules for a tag, most specific first.
    pub fn rules(&self, tag: &str) -> &[SuffixRule] {
        self.rules.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemma(&self, word: &str, tag: &str) -> String {
        let lower = word.to_lowercase();

        if let Some(lemma) = self.entries.get(&lower).and_then(|tags| tags.get(tag)) {
            return lemma.clone();
        }

        self.rules(tag)
            .iter()
            .find_map(|rule| rule.apply(&lower))
            .unwrap_or(lower)
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
