//! Maximum-entropy (multinomial logistic) intent model.
//!
//! Training uses Generalized Iterative Scaling (GIS) over bag-of-words
//! events. Every event also carries an always-on bias predicate whose
//! weights act as the per-intent prior, so a vector made only of unseen
//! features still gets a well-defined distribution.
//!
//! # Examples
//!
//! ```
//! use parlance::ml::intent_classifier::{
//!     classify, train, BagOfWordsExtractor, TrainOptions, TrainingSample,
//! };
//!
//! let samples = vec![
//!     TrainingSample::from_text("greeting", "hello there"),
//!     TrainingSample::from_text("conversation-complete", "goodbye"),
//! ];
//! let model = train(&samples, &TrainOptions::default().with_cutoff(0)).unwrap();
//!
//! let features = BagOfWordsExtractor::new().extract(&["hello"]);
//! let classification = classify(&model, &features);
//! assert_eq!(classification.intent.as_str(), "greeting");
//! ```

use std::collections::BTreeSet;

use ahash::AHashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ParlanceError, Result};
use crate::ml::intent_classifier::features::{BagOfWordsExtractor, FeatureVector};
use crate::ml::intent_classifier::types::{Classification, Intent, TrainingSample};

/// Training parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    /// Features occurring fewer times than this across the corpus are dropped.
    pub cutoff: u32,
    /// Maximum number of GIS iterations.
    pub iterations: usize,
    /// Stop once the log-likelihood changes by less than this.
    pub convergence_threshold: f64,
    /// Words removed from the training samples before feature counting.
    pub stop_words: Vec<String>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            cutoff: 5,
            iterations: 100,
            convergence_threshold: 1e-4,
            stop_words: Vec::new(),
        }
    }
}

impl TrainOptions {
    pub fn with_cutoff(mut self, cutoff: u32) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Training events (samples).
    pub events: usize,
    /// Predicates kept after the cutoff, bias excluded.
    pub predicates: usize,
    /// Non-zero (predicate, intent) weights, bias excluded.
    pub parameters: usize,
    /// GIS iterations run.
    pub iterations: usize,
    /// Log-likelihood of the training data at the last iteration.
    pub log_likelihood: f64,
    /// Whether training stopped on the convergence threshold.
    pub converged: bool,
}

/// A trained maximum-entropy model. Immutable once built.
#[derive(Debug, Clone)]
pub struct MaxentModel {
    labels: Vec<Intent>,
    predicates: AHashMap<String, usize>,
    /// Per predicate, `(label index, weight)` for labels seen with it.
    parameters: Vec<Vec<(usize, f64)>>,
    bias: Vec<f64>,
    stats: TrainingStats,
}

impl MaxentModel {
    /// Intents in enumeration (first-seen) order.
    pub fn labels(&self) -> &[Intent] {
        &self.labels
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Weight of `(feature, intent)`, if the pair was seen in training.
    pub fn weight(&self, feature: &str, intent: &str) -> Option<f64> {
        let label = self.labels.iter().position(|l| l == intent)?;
        let predicate = *self.predicates.get(feature)?;
        self.parameters[predicate]
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, w)| *w)
    }

    /// Probability of every label, in label order.
    pub fn distribution(&self, features: &FeatureVector) -> Vec<f64> {
        let mut scores = self.bias.clone();
        for (name, count) in features.iter() {
            if let Some(&predicate) = self.predicates.get(name) {
                for &(label, weight) in &self.parameters[predicate] {
                    scores[label] += count as f64 * weight;
                }
            }
        }
        softmax(&mut scores);
        scores
    }
}

fn softmax(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }
    for score in scores.iter_mut() {
        *score /= sum;
    }
}

/// Index of the largest value; the first one wins ties.
fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (idx, &value)| {
            if value > best_value { (idx, value) } else { (best, best_value) }
        })
        .0
}

/// Classify a feature vector: the most probable intent, its probability and
/// the full distribution.
pub fn classify(model: &MaxentModel, features: &FeatureVector) -> Classification {
    let probabilities = model.distribution(features);
    let best = argmax(&probabilities);

    Classification {
        intent: model.labels[best].clone(),
        confidence: probabilities[best],
        distribution: model
            .labels
            .iter()
            .cloned()
            .zip(probabilities)
            .collect(),
    }
}

struct Event {
    label: usize,
    features: Vec<(usize, f64)>,
}

/// Train a model with GIS.
///
/// Fails with [`ParlanceError::TrainingDataInvalid`] when there are no
/// samples or fewer than two distinct intents.
pub fn train(samples: &[TrainingSample], options: &TrainOptions) -> Result<MaxentModel> {
    if samples.is_empty() {
        return Err(ParlanceError::training_data("no training samples"));
    }

    let mut labels: Vec<Intent> = Vec::new();
    for sample in samples {
        if !labels.contains(&sample.intent) {
            labels.push(sample.intent.clone());
        }
    }
    if labels.len() < 2 {
        return Err(ParlanceError::training_data(format!(
            "at least two distinct intents are required, found {}",
            labels.len()
        )));
    }

    let extractor = BagOfWordsExtractor::new();
    let stop_words: BTreeSet<String> = options
        .stop_words
        .iter()
        .map(|w| w.to_lowercase())
        .collect();
    let vectors: Vec<(usize, FeatureVector)> = samples
        .iter()
        .map(|sample| {
            let label = labels.iter().position(|l| *l == sample.intent).unwrap_or(0);
            let tokens: Vec<&str> = sample
                .tokens
                .iter()
                .map(String::as_str)
                .filter(|t| !stop_words.contains(&t.to_lowercase()))
                .collect();
            (label, extractor.extract(&tokens))
        })
        .collect();

    let mut counts: AHashMap<&str, u32> = AHashMap::new();
    for (_, features) in &vectors {
        for (name, count) in features.iter() {
            *counts.entry(name).or_insert(0) += count;
        }
    }
    let kept: BTreeSet<&str> = counts
        .iter()
        .filter(|(_, count)| **count >= options.cutoff)
        .map(|(name, _)| *name)
        .collect();
    let predicates: AHashMap<String, usize> = kept
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.to_string(), idx))
        .collect();

    let events: Vec<Event> = vectors
        .iter()
        .map(|(label, features)| Event {
            label: *label,
            features: features
                .iter()
                .filter_map(|(name, count)| predicates.get(name).map(|&p| (p, count as f64)))
                .collect(),
        })
        .collect();

    info!(
        "Training maxent model: {} events, {} intents, {} predicates (cutoff {})",
        events.len(),
        labels.len(),
        predicates.len(),
        options.cutoff
    );

    let n_labels = labels.len();
    let correction = events
        .iter()
        .map(|e| 1.0 + e.features.iter().map(|(_, v)| v).sum::<f64>())
        .fold(1.0, f64::max);

    // Observed feature mass per (predicate, label); parameters exist only
    // where it is non-zero.
    let mut observed: Vec<AHashMap<usize, f64>> = vec![AHashMap::new(); predicates.len()];
    let mut observed_bias: Vec<f64> = vec![0.0; n_labels];
    for event in &events {
        observed_bias[event.label] += 1.0;
        for &(predicate, value) in &event.features {
            *observed[predicate].entry(event.label).or_insert(0.0) += value;
        }
    }
    let observed: Vec<Vec<(usize, f64)>> = observed
        .into_iter()
        .map(|by_label| {
            let mut pairs: Vec<(usize, f64)> = by_label.into_iter().collect();
            pairs.sort_by_key(|(label, _)| *label);
            pairs
        })
        .collect();

    let mut parameters: Vec<Vec<(usize, f64)>> = observed
        .iter()
        .map(|pairs| pairs.iter().map(|&(label, _)| (label, 0.0)).collect())
        .collect();
    let mut bias = vec![0.0; n_labels];

    let mut log_likelihood = -(events.len() as f64) * (n_labels as f64).ln();
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=options.iterations {
        let mut expected: Vec<Vec<f64>> = parameters.iter().map(|p| vec![0.0; p.len()]).collect();
        let mut expected_bias: Vec<f64> = vec![0.0; n_labels];
        let mut current = 0.0;
        let mut correct = 0;

        for event in &events {
            let mut probabilities = bias.clone();
            for &(predicate, value) in &event.features {
                for &(label, weight) in &parameters[predicate] {
                    probabilities[label] += value * weight;
                }
            }
            softmax(&mut probabilities);

            current += probabilities[event.label].ln();
            if argmax(&probabilities) == event.label {
                correct += 1;
            }

            for (label, p) in probabilities.iter().enumerate() {
                expected_bias[label] += p;
            }
            for &(predicate, value) in &event.features {
                for (slot, &(label, _)) in parameters[predicate].iter().enumerate() {
                    expected[predicate][slot] += value * probabilities[label];
                }
            }
        }

        for (label, weight) in bias.iter_mut().enumerate() {
            *weight += (observed_bias[label].ln() - expected_bias[label].ln()) / correction;
        }
        for (predicate, weights) in parameters.iter_mut().enumerate() {
            for (slot, (_, weight)) in weights.iter_mut().enumerate() {
                let observed = observed[predicate][slot].1;
                *weight += (observed.ln() - expected[predicate][slot].ln()) / correction;
            }
        }

        debug!(
            "Iteration {iteration}: log-likelihood {current:.6}, accuracy {:.4}",
            correct as f64 / events.len() as f64
        );

        let previous = log_likelihood;
        log_likelihood = current;
        iterations = iteration;

        if iteration > 1 {
            if current < previous {
                warn!("Training log-likelihood decreased from {previous:.6} to {current:.6}");
            }
            if (current - previous).abs() < options.convergence_threshold {
                converged = true;
                break;
            }
        }
    }

    let stats = TrainingStats {
        events: events.len(),
        predicates: predicates.len(),
        parameters: parameters.iter().map(Vec::len).sum(),
        iterations,
        log_likelihood,
        converged,
    };
    info!(
        "Maxent model trained: {} iterations, log-likelihood {:.6}{}",
        stats.iterations,
        stats.log_likelihood,
        if stats.converged { " (converged)" } else { "" }
    );

    Ok(MaxentModel {
        labels,
        predicates,
        parameters,
        bias,
        stats,
    })
}
