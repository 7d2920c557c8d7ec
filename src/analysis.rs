//! Text analysis for Parlance.
//!
//! Raw text flows through sentence detection, tokenization, part-of-speech
//! tagging and lemmatization. [`pipeline::AnnotationPipeline`] chains the
//! four stages and [`resource`] loads their models.

pub mod lemmatizer;
pub mod pipeline;
pub mod resource;
pub mod segmenter;
pub mod tagger;
pub mod token;
pub mod tokenizer;
