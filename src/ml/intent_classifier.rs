//! Intent classification with a maximum-entropy model.
//!
//! Each sentence is reduced to a bag-of-words [`FeatureVector`] over its
//! lemmas and classified by a [`MaxentModel`] trained with Generalized
//! Iterative Scaling.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: Common interface for all classifiers
//! - `MaxentIntentClassifier`: Bag-of-words extraction plus a maxent model
//! - `BagOfWordsExtractor`: Lemmas to feature counts
//! - `train` / `classify`: Model training and inference
//! - `read_line_corpus` / `read_json_corpus`: Training data readers
//!
//! # Example
//!
//! ```
//! use parlance::ml::intent_classifier::{self, TrainOptions, TrainingSample};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = vec![
//!     TrainingSample::from_text("greeting", "hello there"),
//!     TrainingSample::from_text("conversation-complete", "goodbye"),
//! ];
//!
//! let options = TrainOptions::default().with_cutoff(0);
//! let classifier = intent_classifier::new_maxent(&samples, &options)?;
//!
//! let classification = classifier.predict(&["goodbye".to_string()]);
//! assert_eq!(classification.intent.as_str(), "conversation-complete");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod corpus;
mod features;
mod maxent;
mod maxent_classifier;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::{new_maxent, train_from_file};
pub use corpus::{load_corpus, parse_line_record, read_json_corpus, read_line_corpus};
pub use features::{BOW_PREFIX, BagOfWordsExtractor, FeatureVector};
pub use maxent::{MaxentModel, TrainOptions, TrainingStats, classify, train};
pub use maxent_classifier::MaxentIntentClassifier;
pub use types::{Classification, Intent, IntentSample, TrainingSample};
