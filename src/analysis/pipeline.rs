//! Annotation pipeline chaining the four annotators.
//!
//! # Architecture
//!
//! The pipeline applies processing in this order:
//! 1. Segmenter: splits raw text into sentences
//! 2. Tokenizer: splits each sentence into tokens
//! 3. POS Tagger: tags the token sequence
//! 4. Lemmatizer: reduces each tagged token to its lemma
//!
//! Each stage only sees the previous stage's output.
//!
//! # Examples
//!
//! ```
//! use parlance::analysis::pipeline::AnnotationPipeline;
//! use parlance::analysis::resource::AnnotatorResources;
//!
//! let pipeline = AnnotationPipeline::from_resources(AnnotatorResources::builtin().unwrap());
//! let sentences = pipeline.annotate("Hello there. What are your prices?").unwrap();
//!
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[1].lemmas, vec!["what", "be", "your", "price", "?"]);
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::resource::AnnotatorResources;
use crate::analysis::segmenter::{Segmenter, Sentence};
use crate::analysis::tagger::PosTagger;
use crate::analysis::token::TaggedToken;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A sentence with its tagged tokens and lemmas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub sentence: Sentence,
    pub tokens: Vec<TaggedToken>,
    /// One lemma per token.
    pub lemmas: Vec<String>,
}

impl AnnotatedSentence {
    /// Token texts in order.
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(TaggedToken::text).collect()
    }

    /// Tags in token order.
    pub fn tags(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.tag.as_str()).collect()
    }
}

/// Segmenter, tokenizer, tagger and lemmatizer run in sequence.
#[derive(Clone)]
pub struct AnnotationPipeline {
    segmenter: Arc<dyn Segmenter>,
    tokenizer: Arc<dyn Tokenizer>,
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for AnnotationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationPipeline")
            .field("segmenter", &self.segmenter.name())
            .field("tokenizer", &self.tokenizer.name())
            .field("tagger", &self.tagger.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl AnnotationPipeline {
    /// Create a pipeline from individual annotators.
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        tokenizer: Arc<dyn Tokenizer>,
        tagger: Arc<dyn PosTagger>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        AnnotationPipeline {
            segmenter,
            tokenizer,
            tagger,
            lemmatizer,
        }
    }

    /// Create a pipeline from loaded annotator resources.
    pub fn from_resources(resources: AnnotatorResources) -> Self {
        Self::new(
            Arc::new(resources.segmenter),
            Arc::new(resources.tokenizer),
            Arc::new(resources.tagger),
            Arc::new(resources.lemmatizer),
        )
    }

    /// Split text into sentences.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let sentences = self.segmenter.segment(text);
        debug!(
            "Sentence Detection: {}",
            sentences
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        );
        sentences
    }

    /// Tokenize, tag and lemmatize one sentence.
    pub fn annotate_sentence(&self, sentence: Sentence) -> Result<AnnotatedSentence> {
        let tokens: Vec<_> = self.tokenizer.tokenize(&sentence.text)?.collect();
        debug!(
            "Tokenizer: {}",
            tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        );

        let tagged = self.tagger.tag(&tokens);
        debug!(
            "POS Tags: {}",
            tagged
                .iter()
                .map(|t| t.tag.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        );

        let lemmas = self.lemmatizer.lemmatize(&tagged);
        debug!("Lemmatizer: {}", lemmas.join(" | "));

        Ok(AnnotatedSentence {
            sentence,
            tokens: tagged,
            lemmas,
        })
    }

    /// Segment and annotate a whole text.
    pub fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
        self.segment(text)
            .into_iter()
            .map(|sentence| self.annotate_sentence(sentence))
            .collect()
    }

    pub fn tagger(&self) -> &Arc<dyn PosTagger> {
        &self.tagger
    }
}
