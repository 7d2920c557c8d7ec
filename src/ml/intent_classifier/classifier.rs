//! Intent classifier trait definition.

use crate::ml::intent_classifier::types::{Classification, Intent};

/// Intent classifier trait.
///
/// Implementations map the lemmas of one sentence to a distribution over a
/// closed set of intents. Prediction never fails: input made only of unseen
/// words still yields an intent.
pub trait IntentClassifier: Send + Sync {
    /// Classify the lemmas of a single sentence.
    fn predict(&self, lemmas: &[String]) -> Classification;

    /// Every intent this classifier can produce, in enumeration order.
    fn labels(&self) -> &[Intent];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
