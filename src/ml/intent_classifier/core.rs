//! Helper functions for creating intent classifiers.

use std::path::Path;

use crate::error::Result;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::corpus::load_corpus;
use crate::ml::intent_classifier::maxent::TrainOptions;
use crate::ml::intent_classifier::maxent_classifier::MaxentIntentClassifier;
use crate::ml::intent_classifier::types::TrainingSample;

/// Create a new maxent intent classifier from training samples.
pub fn new_maxent(
    samples: &[TrainingSample],
    options: &TrainOptions,
) -> Result<Box<dyn IntentClassifier>> {
    Ok(Box::new(MaxentIntentClassifier::train(samples, options)?))
}

/// Load a corpus file and train a maxent intent classifier on it.
pub fn train_from_file<P: AsRef<Path>>(
    path: P,
    options: &TrainOptions,
) -> Result<Box<dyn IntentClassifier>> {
    let samples = load_corpus(path)?;
    new_maxent(&samples, options)
}
