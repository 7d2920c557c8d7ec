//! Annotator artifacts.
//!
//! Each annotator is built from one artifact file:
//!
//! | annotator    | artifact            | format                              |
//! |--------------|---------------------|-------------------------------------|
//! | `segmenter`  | `en-sent.json`      | `{terminators, abbreviations}`      |
//! | `tokenizer`  | `en-token.json`     | `{contractions, abbreviations}`     |
//! | `pos_tagger` | `en-pos.txt`        | tagged sentences, `word/TAG`        |
//! | `lemmatizer` | `en-lemmatizer.txt` | `word<TAB>tag<TAB>lemma`            |
//!
//! The built-in English artifacts are compiled into the crate. A directory
//! source must contain all four files. [`AnnotatorResources::load`] tries
//! every annotator and reports all failures at once, so a broken setup is
//! diagnosed in a single run.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::DictionaryLemmatizer;
use crate::analysis::segmenter::{RuleSegmenter, SegmenterModel};
use crate::analysis::tagger::{HmmTagger, PosTagger};
use crate::analysis::tokenizer::{EnglishTokenizer, TokenizerModel};
use crate::error::{ParlanceError, ResourceFailure, Result};

pub const SEGMENTER_ARTIFACT: &str = "en-sent.json";
pub const TOKENIZER_ARTIFACT: &str = "en-token.json";
pub const POS_TAGGER_ARTIFACT: &str = "en-pos.txt";
pub const LEMMATIZER_ARTIFACT: &str = "en-lemmatizer.txt";

const BUILTIN_SEGMENTER: &str = include_str!("../../resources/en/en-sent.json");
const BUILTIN_TOKENIZER: &str = include_str!("../../resources/en/en-token.json");
const BUILTIN_POS_TAGGER: &str = include_str!("../../resources/en/en-pos.txt");
const BUILTIN_LEMMATIZER: &str = include_str!("../../resources/en/en-lemmatizer.txt");

/// Where annotator artifacts are read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSource {
    /// Artifacts compiled into the crate.
    #[default]
    Builtin,
    /// A directory holding the four artifact files.
    Directory(PathBuf),
}

impl ResourceSource {
    fn location(&self, artifact: &str) -> String {
        match self {
            ResourceSource::Builtin => format!("builtin:{artifact}"),
            ResourceSource::Directory(dir) => dir.join(artifact).display().to_string(),
        }
    }

    fn read(&self, artifact: &str) -> Result<Cow<'static, str>> {
        match self {
            ResourceSource::Builtin => {
                let text = match artifact {
                    SEGMENTER_ARTIFACT => BUILTIN_SEGMENTER,
                    TOKENIZER_ARTIFACT => BUILTIN_TOKENIZER,
                    POS_TAGGER_ARTIFACT => BUILTIN_POS_TAGGER,
                    LEMMATIZER_ARTIFACT => BUILTIN_LEMMATIZER,
                    other => {
                        return Err(ParlanceError::analysis(format!(
                            "no built-in artifact named {other}"
                        )));
                    }
                };
                Ok(Cow::Borrowed(text))
            }
            ResourceSource::Directory(dir) => {
                Ok(Cow::Owned(fs::read_to_string(dir.join(artifact))?))
            }
        }
    }
}

/// The four loaded annotators.
#[derive(Clone, Debug)]
pub struct AnnotatorResources {
    pub segmenter: RuleSegmenter,
    pub tokenizer: EnglishTokenizer,
    pub tagger: HmmTagger,
    pub lemmatizer: DictionaryLemmatizer,
}

fn load_annotator<T, F>(
    source: &ResourceSource,
    annotator: &str,
    artifact: &str,
    build: F,
) -> std::result::Result<T, ResourceFailure>
where
    F: FnOnce(&str) -> Result<T>,
{
    source
        .read(artifact)
        .and_then(|text| build(&text))
        .map_err(|e| {
            let failure = ResourceFailure {
                annotator: annotator.to_string(),
                location: source.location(artifact),
                reason: e.to_string(),
            };
            error!("Failed to load {failure}");
            failure
        })
}

fn build_segmenter(text: &str) -> Result<RuleSegmenter> {
    let model: SegmenterModel = serde_json::from_str(text)?;
    if model.terminators.is_empty() {
        return Err(ParlanceError::analysis("no sentence terminators defined"));
    }
    Ok(RuleSegmenter::new(model))
}

fn build_tokenizer(text: &str) -> Result<EnglishTokenizer> {
    let model: TokenizerModel = serde_json::from_str(text)?;
    Ok(EnglishTokenizer::new(model))
}

impl AnnotatorResources {
    /// Load all four annotators from `source`.
    ///
    /// Every annotator is attempted; if any fails the error lists each
    /// failing annotator.
    pub fn load(source: &ResourceSource) -> Result<Self> {
        let mut failures = Vec::new();

        let segmenter = load_annotator(source, "segmenter", SEGMENTER_ARTIFACT, build_segmenter)
            .map_err(|f| failures.push(f))
            .ok();
        let tokenizer = load_annotator(source, "tokenizer", TOKENIZER_ARTIFACT, build_tokenizer)
            .map_err(|f| failures.push(f))
            .ok();
        let tagger = load_annotator(
            source,
            "pos_tagger",
            POS_TAGGER_ARTIFACT,
            HmmTagger::from_tagged_corpus,
        )
        .map_err(|f| failures.push(f))
        .ok();
        let lemmatizer = load_annotator(
            source,
            "lemmatizer",
            LEMMATIZER_ARTIFACT,
            DictionaryLemmatizer::from_dictionary,
        )
        .map_err(|f| failures.push(f))
        .ok();

        match (segmenter, tokenizer, tagger, lemmatizer) {
            (Some(segmenter), Some(tokenizer), Some(tagger), Some(lemmatizer)) => {
                info!(
                    "All annotator models loaded from {} ({} tags, {} lemma entries)",
                    source.location(""),
                    tagger.tagset().len(),
                    lemmatizer.len()
                );
                Ok(AnnotatorResources {
                    segmenter,
                    tokenizer,
                    tagger,
                    lemmatizer,
                })
            }
            _ => {
                error!("Not all annotator models were loaded");
                Err(ParlanceError::ResourceLoad { failures })
            }
        }
    }

    /// Load the built-in English annotators.
    pub fn builtin() -> Result<Self> {
        Self::load(&ResourceSource::Builtin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemmatizer::Lemmatizer;
    use crate::analysis::segmenter::Segmenter;
    use crate::analysis::tokenizer::Tokenizer;

    #[test]
    fn test_builtin_resources() {
        let resources = AnnotatorResources::builtin().unwrap();

        assert_eq!(resources.segmenter.segment("Hi. Bye.").len(), 2);
        assert_eq!(resources.tokenizer.tokenize("don't").unwrap().count(), 2);
        assert!(resources.tagger.tagset().iter().any(|t| t == "NN"));
        assert_eq!(resources.lemmatizer.lemma("prices", "NNS"), "price");
    }

    #[test]
    fn test_builtin_tagger_on_domain_text() {
        let resources = AnnotatorResources::builtin().unwrap();
        let tokens: Vec<_> = resources
            .tokenizer
            .tokenize("What is the price of life insurance?")
            .unwrap()
            .collect();
        let tags: Vec<String> = resources
            .tagger
            .tag(&tokens)
            .into_iter()
            .map(|t| t.tag)
            .collect();

        assert_eq!(tags, vec!["WP", "VBZ", "DT", "NN", "IN", "NN", "NN", "."]);
    }

    #[test]
    fn test_builtin_time_abbreviations() {
        let resources = AnnotatorResources::builtin().unwrap();
        let sentences: Vec<String> = resources
            .segmenter
            .segment("Call at 5 p.m. tomorrow. OK")
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(sentences, vec!["Call at 5 p.m. tomorrow.", "OK"]);

        let tokens: Vec<String> = resources
            .tokenizer
            .tokenize("Open at 9 a.m. daily")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["Open", "at", "9", "a.m.", "daily"]);
    }

    #[test]
    fn test_missing_directory_lists_every_annotator() {
        let source = ResourceSource::Directory(PathBuf::from("/nonexistent/parlance/models"));

        match AnnotatorResources::load(&source) {
            Err(ParlanceError::ResourceLoad { failures }) => {
                let annotators: Vec<_> = failures.iter().map(|f| f.annotator.as_str()).collect();
                assert_eq!(
                    annotators,
                    vec!["segmenter", "tokenizer", "pos_tagger", "lemmatizer"]
                );
                assert!(failures[0].location.ends_with(SEGMENTER_ARTIFACT));
            }
            other => panic!("expected resource load failure, got {other:?}"),
        }
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_string(&ResourceSource::Builtin).unwrap();
        assert_eq!(json, "\"builtin\"");

        let source: ResourceSource =
            serde_json::from_str(r#"{"directory": "/opt/models"}"#).unwrap();
        assert_eq!(source, ResourceSource::Directory(PathBuf::from("/opt/models")));
    }
}
