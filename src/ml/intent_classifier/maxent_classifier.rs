//! Maximum-entropy intent classifier over bag-of-words features.

use log::debug;

use super::classifier::IntentClassifier;
use super::features::BagOfWordsExtractor;
use super::maxent::{self, MaxentModel, TrainOptions};
use super::types::{Classification, Intent, TrainingSample};
use crate::error::Result;

/// Bag-of-words extraction followed by a maxent model.
#[derive(Debug, Clone)]
pub struct MaxentIntentClassifier {
    extractor: BagOfWordsExtractor,
    model: MaxentModel,
}

impl MaxentIntentClassifier {
    /// Wrap an already trained model.
    pub fn new(model: MaxentModel) -> Self {
        Self {
            extractor: BagOfWordsExtractor::new(),
            model,
        }
    }

    /// Train a model from samples and wrap it.
    pub fn train(samples: &[TrainingSample], options: &TrainOptions) -> Result<Self> {
        Ok(Self::new(maxent::train(samples, options)?))
    }
}

impl IntentClassifier for MaxentIntentClassifier {
    fn predict(&self, lemmas: &[String]) -> Classification {
        let features = self.extractor.extract(lemmas);
        let classification = maxent::classify(&self.model, &features);
        debug!(
            "Category: {} ({:.4})",
            classification.intent, classification.confidence
        );
        classification
    }

    fn labels(&self) -> &[Intent] {
        self.model.labels()
    }

    fn name(&self) -> &str {
        "maxent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_maxent_intent_classifier() {
        let samples = vec![
            TrainingSample::from_text("greeting", "hello there"),
            TrainingSample::from_text("greeting", "good morning"),
            TrainingSample::from_text("contact-inquiry", "what is your phone number"),
            TrainingSample::from_text("contact-inquiry", "how can i call you"),
            TrainingSample::from_text("conversation-complete", "goodbye"),
            TrainingSample::from_text("conversation-complete", "see you later"),
        ];
        let classifier =
            MaxentIntentClassifier::train(&samples, &TrainOptions::default().with_cutoff(0))
                .unwrap();

        assert_eq!(classifier.predict(&lemmas(&["Hello", "there", "!"])).intent, "greeting");
        assert_eq!(
            classifier.predict(&lemmas(&["what", "be", "your", "number", "?"])).intent,
            "contact-inquiry"
        );
        assert_eq!(classifier.predict(&lemmas(&["goodbye", "."])).intent, "conversation-complete");
        assert_eq!(classifier.labels().len(), 3);
        assert_eq!(classifier.name(), "maxent");
    }
}
