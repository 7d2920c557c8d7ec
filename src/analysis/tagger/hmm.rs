//! Hidden Markov model part-of-speech tagger.
//!
//! A first-order HMM whose parameters are estimated from a tagged corpus
//! (the `en-pos.txt` artifact, one sentence per line of `word/TAG` pairs)
//! and decoded with the Viterbi algorithm in log space.
//!
//! # Model
//!
//! - Transitions: `P(tag | previous tag)`, add-one smoothed, with explicit
//!   sentence start and end states.
//! - Known words: `P(word | tag)` relative frequencies (case-insensitive).
//! - Unknown words, in order: numbers get the tag numbers carry in the
//!   corpus, punctuation its own tag (or the usual punctuation tag),
//!   capitalised words after the first position the proper-noun tag, then
//!   the longest known suffix (up to three characters), then the
//!   distribution of tags over words seen only once, and finally the
//!   default tag.
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::tagger::{HmmTagger, PosTagger};
//! use parlance::analysis::token::Token;
//!
//! let tagger = HmmTagger::from_tagged_corpus(
//!     "the/DT cat/NN sleeps/VBZ ./.\nI/PRP run/VBP ./.\na/DT run/NN ./.",
//! )
//! .unwrap();
//!
//! let tokens = vec![Token::new("a", 0), Token::new("run", 1)];
//! let tags: Vec<_> = tagger.tag(&tokens).into_iter().map(|t| t.tag).collect();
//! assert_eq!(tags, vec!["DT", "NN"]);
//! ```

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::analysis::tagger::PosTagger;
use crate::analysis::token::{TaggedToken, Token, TokenType};
use crate::error::{ParlanceError, Result};

/// Longest word suffix used by the unknown-word model.
const MAX_SUFFIX_LEN: usize = 3;

/// Tag preferred as the default when the tagset has it.
const PREFERRED_DEFAULT_TAG: &str = "NN";

/// First-order HMM tagger decoded with Viterbi.
#[derive(Clone, Debug)]
pub struct HmmTagger {
    tags: Vec<String>,
    tag_index: AHashMap<String, usize>,
    /// `log P(tag | previous)`. Row `tags.len()` is the sentence start,
    /// column `tags.len()` the sentence end.
    transitions: Vec<Vec<f64>>,
    /// Lowercased word -> `(tag, log P(word | tag))`, sorted by tag.
    lexicon: AHashMap<String, Vec<(usize, f64)>>,
    /// Suffix -> `(tag, log P(tag | suffix) - log P(tag))`, sorted by tag.
    suffixes: AHashMap<String, Vec<(usize, f64)>>,
    /// Fallback distribution for words matching no other rule.
    open_class: Vec<(usize, f64)>,
    number_tag: Option<usize>,
    proper_noun_tag: Option<usize>,
    punctuation_tag: Option<usize>,
    default_tag: usize,
}

fn argmax(counts: &[f64]) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0.0)
        .fold(None, |best: Option<(usize, f64)>, (idx, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((idx, count)),
        })
        .map(|(idx, _)| idx)
}

fn last_chars(word: &str, len: usize) -> Option<&str> {
    if word.chars().count() <= len {
        return None;
    }
    word.char_indices()
        .rev()
        .nth(len - 1)
        .map(|(idx, _)| &word[idx..])
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

impl HmmTagger {
    /// Estimate a tagger from tagged sentences of `(word, tag)` pairs.
    pub fn train(sentences: &[Vec<(String, String)>]) -> Result<Self> {
        let tags: Vec<String> = sentences
            .iter()
            .flatten()
            .map(|(_, tag)| tag.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if tags.is_empty() {
            return Err(ParlanceError::analysis("tagged corpus contains no tokens"));
        }

        let tag_index: AHashMap<String, usize> = tags
            .iter()
            .enumerate()
            .map(|(idx, tag)| (tag.clone(), idx))
            .collect();
        let n_tags = tags.len();
        let boundary = n_tags;

        let mut tag_counts = vec![0.0; n_tags];
        let mut transition_counts = vec![vec![0.0; n_tags + 1]; n_tags + 1];
        let mut word_tag_counts: AHashMap<String, Vec<f64>> = AHashMap::new();
        let mut number_counts = vec![0.0; n_tags];
        let mut punctuation_counts = vec![0.0; n_tags];
        let mut proper_counts = vec![0.0; n_tags];

        for sentence in sentences.iter().filter(|s| !s.is_empty()) {
            let mut previous = boundary;
            for (position, (word, tag)) in sentence.iter().enumerate() {
                let tag = tag_index[tag.as_str()];
                tag_counts[tag] += 1.0;
                transition_counts[previous][tag] += 1.0;
                previous = tag;

                word_tag_counts
                    .entry(word.to_lowercase())
                    .or_insert_with(|| vec![0.0; n_tags])[tag] += 1.0;

                match TokenType::detect(word) {
                    TokenType::Num => number_counts[tag] += 1.0,
                    TokenType::Punctuation => punctuation_counts[tag] += 1.0,
                    _ if position > 0 && starts_uppercase(word) => proper_counts[tag] += 1.0,
                    _ => {}
                }
            }
            transition_counts[previous][boundary] += 1.0;
        }

        let transitions: Vec<Vec<f64>> = transition_counts
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum();
                row.iter()
                    .map(|count| ((count + 1.0) / (total + (n_tags + 1) as f64)).ln())
                    .collect()
            })
            .collect();

        let lexicon: AHashMap<String, Vec<(usize, f64)>> = word_tag_counts
            .iter()
            .map(|(word, counts)| {
                let emissions: Vec<(usize, f64)> = counts
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0.0)
                    .map(|(tag, &count)| (tag, (count / tag_counts[tag]).ln()))
                    .collect();
                (word.clone(), emissions)
            })
            .collect();

        let total_tokens: f64 = tag_counts.iter().sum();
        let tag_prior = |tag: usize| tag_counts[tag] / total_tokens;
        let relative_scores = |counts: &[f64]| -> Vec<(usize, f64)> {
            let total: f64 = counts.iter().sum();
            counts
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0.0)
                .map(|(tag, &count)| (tag, (count / total).ln() - tag_prior(tag).ln()))
                .collect()
        };

        let mut suffix_counts: AHashMap<String, Vec<f64>> = AHashMap::new();
        let mut hapax_counts = vec![0.0; n_tags];
        for (word, counts) in &word_tag_counts {
            if TokenType::detect(word) != TokenType::Alphanum {
                continue;
            }
            if counts.iter().sum::<f64>() == 1.0 {
                for (tag, count) in counts.iter().enumerate() {
                    hapax_counts[tag] += count;
                }
            }
            for len in 1..=MAX_SUFFIX_LEN {
                if let Some(suffix) = last_chars(word, len) {
                    let entry = suffix_counts
                        .entry(suffix.to_string())
                        .or_insert_with(|| vec![0.0; n_tags]);
                    for (tag, count) in counts.iter().enumerate() {
                        entry[tag] += count;
                    }
                }
            }
        }

        let suffixes: AHashMap<String, Vec<(usize, f64)>> = suffix_counts
            .iter()
            .map(|(suffix, counts)| (suffix.clone(), relative_scores(counts.as_slice())))
            .collect();
        let open_class = relative_scores(hapax_counts.as_slice());

        let default_tag = tag_index
            .get(PREFERRED_DEFAULT_TAG)
            .copied()
            .or_else(|| argmax(&hapax_counts))
            .or_else(|| argmax(&tag_counts))
            .unwrap_or(0);

        Ok(HmmTagger {
            tags,
            tag_index,
            transitions,
            lexicon,
            suffixes,
            open_class,
            number_tag: argmax(&number_counts),
            proper_noun_tag: argmax(&proper_counts),
            punctuation_tag: argmax(&punctuation_counts),
            default_tag,
        })
    }

    /// Parse a tagged corpus (one sentence per line, `word/TAG` pairs
    /// separated by whitespace) and estimate a tagger from it.
    pub fn from_tagged_corpus(text: &str) -> Result<Self> {
        let mut sentences = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let sentence = line
                .split_whitespace()
                .map(|item| match item.rsplit_once('/') {
                    Some((word, tag)) if !word.is_empty() && !tag.is_empty() => {
                        Ok((word.to_string(), tag.to_string()))
                    }
                    _ => Err(ParlanceError::analysis(format!(
                        "line {}: expected word/TAG, found '{item}'",
                        line_no + 1
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            sentences.push(sentence);
        }

        Self::train(&sentences)
    }

    /// The tag used when nothing else applies.
    pub fn default_tag(&self) -> &str {
        &self.tags[self.default_tag]
    }

    /// Number of distinct (lowercased) words in the lexicon.
    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    fn single(tag: Option<usize>) -> Option<Vec<(usize, f64)>> {
        tag.map(|tag| vec![(tag, 0.0)])
    }

    /// Candidate tags with their log emission scores for one token.
    fn emissions(&self, token: &Token) -> Vec<(usize, f64)> {
        let lower = token.text.to_lowercase();
        if let Some(known) = self.lexicon.get(&lower) {
            return known.clone();
        }

        let shaped = match token.token_type {
            TokenType::Num => Self::single(self.number_tag),
            TokenType::Punctuation => Self::single(
                self.tag_index
                    .get(token.text.as_str())
                    .copied()
                    .or(self.punctuation_tag),
            ),
            _ if token.position > 0 && starts_uppercase(&token.text) => {
                Self::single(self.proper_noun_tag)
            }
            _ => None,
        };
        if let Some(shaped) = shaped {
            return shaped;
        }

        for len in (1..=MAX_SUFFIX_LEN).rev() {
            if let Some(scores) = last_chars(&lower, len).and_then(|s| self.suffixes.get(s)) {
                return scores.clone();
            }
        }

        if !self.open_class.is_empty() {
            return self.open_class.clone();
        }

        vec![(self.default_tag, 0.0)]
    }

    /// Most likely tag sequence for the candidate lists.
    fn viterbi(&self, candidates: &[Vec<(usize, f64)>]) -> Vec<usize> {
        let boundary = self.tags.len();
        let mut scores: Vec<Vec<f64>> = Vec::with_capacity(candidates.len());
        let mut backpointers: Vec<Vec<usize>> = Vec::with_capacity(candidates.len());

        for (i, options) in candidates.iter().enumerate() {
            let mut row = Vec::with_capacity(options.len());
            let mut pointers = Vec::with_capacity(options.len());

            for &(tag, emission) in options {
                let (best_prev, best) = if i == 0 {
                    (0, self.transitions[boundary][tag])
                } else {
                    candidates[i - 1].iter().enumerate().fold(
                        (0, f64::NEG_INFINITY),
                        |(best_j, best), (j, &(prev, _))| {
                            let score = scores[i - 1][j] + self.transitions[prev][tag];
                            if score > best { (j, score) } else { (best_j, best) }
                        },
                    )
                };
                row.push(best + emission);
                pointers.push(best_prev);
            }

            scores.push(row);
            backpointers.push(pointers);
        }

        let Some(last) = candidates.last() else {
            return Vec::new();
        };
        let last_scores = &scores[candidates.len() - 1];
        let (mut j, _) = last.iter().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |(best_j, best), (j, &(tag, _))| {
                let score = last_scores[j] + self.transitions[tag][boundary];
                if score > best { (j, score) } else { (best_j, best) }
            },
        );

        let mut path = vec![0; candidates.len()];
        for i in (0..candidates.len()).rev() {
            path[i] = candidates[i][j].0;
            j = backpointers[i][j];
        }
        path
    }
}

impl PosTagger for HmmTagger {
    fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        let candidates: Vec<Vec<(usize, f64)>> =
            tokens.iter().map(|token| self.emissions(token)).collect();

        self.viterbi(&candidates)
            .into_iter()
            .zip(tokens)
            .map(|(tag, token)| TaggedToken::new(token.clone(), self.tags[tag].clone()))
            .collect()
    }

    fn tagset(&self) -> &[String] {
        &self.tags
    }

    fn name(&self) -> &'static str {
        "hmm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
the/DT cat/NN sleeps/VBZ ./.
the/DT dogs/NNS run/VBP ./.
I/PRP run/VBP fast/RB ./.
a/DT run/NN is/VBZ fun/JJ ./.
I/PRP have/VBP 2/CD cats/NNS ./.
I/PRP met/VBD John/NNP ./.";

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(position, word)| Token::new(*word, position))
            .collect()
    }

    fn tags(tagger: &HmmTagger, words: &[&str]) -> Vec<String> {
        tagger
            .tag(&tokens(words))
            .into_iter()
            .map(|tagged| tagged.tag)
            .collect()
    }

    #[test]
    fn test_context_disambiguates() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();

        assert_eq!(tags(&tagger, &["the", "run"]), vec!["DT", "NN"]);
        assert_eq!(tags(&tagger, &["I", "run"]), vec!["PRP", "VBP"]);
    }

    #[test]
    fn test_unknown_word_shapes() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();

        assert_eq!(tags(&tagger, &["I", "have", "42"]), vec!["PRP", "VBP", "CD"]);
        assert_eq!(tags(&tagger, &["I", "met", "Alice"]), vec!["PRP", "VBD", "NNP"]);
    }

    #[test]
    fn test_every_token_is_tagged() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();
        let words = ["zzz", "qwerty", ";", "Xylophone", "the", "blorps"];
        let tagged = tagger.tag(&tokens(&words));

        assert_eq!(tagged.len(), words.len());
        for (tagged, word) in tagged.iter().zip(words) {
            assert_eq!(tagged.text(), word);
            assert!(tagger.tagset().contains(&tagged.tag));
        }
    }

    #[test]
    fn test_empty_sentence() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();
        assert!(tagger.tag(&[]).is_empty());
    }

    #[test]
    fn test_default_tag_and_tagset() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();

        assert_eq!(tagger.default_tag(), "NN");
        assert_eq!(tagger.tagset().len(), 12);
        assert!(tagger.lexicon_size() > 10);
    }

    #[test]
    fn test_invalid_corpus() {
        assert!(HmmTagger::from_tagged_corpus("").is_err());
        assert!(HmmTagger::from_tagged_corpus("# only a comment").is_err());

        let error = HmmTagger::from_tagged_corpus("good/JJ\nbad line/").unwrap_err();
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn test_tagger_name() {
        let tagger = HmmTagger::from_tagged_corpus(CORPUS).unwrap();
        assert_eq!(tagger.name(), "hmm");
    }
}
