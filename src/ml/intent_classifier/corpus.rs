//! Training corpus readers.
//!
//! Two formats are accepted:
//!
//! - line format: one `label<whitespace>text` record per line; blank lines
//!   and lines starting with `#` are ignored
//! - JSON format: an array of `{"intent": ..., "text": ...}` objects
//!
//! Malformed records (missing label, missing text) are skipped with a
//! warning; the rest of the corpus is still used.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::{ParlanceError, Result};
use crate::ml::intent_classifier::types::{IntentSample, TrainingSample};

/// Parse one line-format record.
///
/// Returns `Ok(None)` for blank and comment lines and an error for
/// malformed records. `line_no` is 1-based.
pub fn parse_line_record(line_no: usize, line: &str) -> Result<Option<TrainingSample>> {
    let trimmed = line.trim_end();
    if trimmed.trim_start().is_empty() || trimmed.trim_start().starts_with('#') {
        return Ok(None);
    }
    if trimmed.starts_with(char::is_whitespace) {
        return Err(ParlanceError::malformed_record(line_no, "missing label"));
    }

    let mut words = trimmed.split_whitespace();
    let label = words.next().unwrap_or_default();
    let tokens: Vec<String> = words.map(str::to_string).collect();
    if tokens.is_empty() {
        return Err(ParlanceError::malformed_record(line_no, "missing text"));
    }

    Ok(Some(TrainingSample::new(label, tokens)))
}

/// Read a line-format corpus, skipping malformed records.
pub fn read_line_corpus(text: &str) -> Vec<TrainingSample> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| match parse_line_record(idx + 1, line) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Skipping training record: {e}");
                None
            }
        })
        .collect()
}

/// Read a JSON corpus, skipping malformed records.
pub fn read_json_corpus(text: &str) -> Result<Vec<TrainingSample>> {
    let records: Vec<IntentSample> = serde_json::from_str(text)?;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let sample = TrainingSample::from_text(record.intent.trim(), &record.text);
            if record.intent.trim().is_empty() {
                warn!("Skipping training record {}: missing label", idx + 1);
                None
            } else if sample.tokens.is_empty() {
                warn!("Skipping training record {}: missing text", idx + 1);
                None
            } else {
                Some(sample)
            }
        })
        .collect())
}

/// Load a corpus file. `.json` files use the JSON format, anything else the
/// line format.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        ParlanceError::training_data(format!("cannot read corpus {}: {e}", path.display()))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let samples = if is_json {
        read_json_corpus(&text).map_err(|e| {
            ParlanceError::training_data(format!("invalid corpus {}: {e}", path.display()))
        })?
    } else {
        read_line_corpus(&text)
    };

    info!("Read {} training samples from {}", samples.len(), path.display());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_record() {
        let sample = parse_line_record(1, "greeting hello   there").unwrap().unwrap();
        assert_eq!(sample.intent.as_str(), "greeting");
        assert_eq!(sample.tokens, vec!["hello", "there"]);

        let sample = parse_line_record(2, "price-inquiry\thow much is it\r").unwrap().unwrap();
        assert_eq!(sample.tokens.len(), 4);

        assert!(parse_line_record(3, "").unwrap().is_none());
        assert!(parse_line_record(4, "   ").unwrap().is_none());
        assert!(parse_line_record(5, "# comment").unwrap().is_none());
    }

    #[test]
    fn test_malformed_records() {
        match parse_line_record(7, "greeting") {
            Err(ParlanceError::MalformedTrainingRecord { line, reason }) => {
                assert_eq!(line, 7);
                assert_eq!(reason, "missing text");
            }
            other => panic!("expected malformed record, got {other:?}"),
        }

        match parse_line_record(8, "  hello there") {
            Err(ParlanceError::MalformedTrainingRecord { reason, .. }) => {
                assert_eq!(reason, "missing label")
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_read_line_corpus_skips_bad_lines() {
        let corpus = "greeting hello\n\ngreeting\n  orphan text\nconversation-complete goodbye\n";
        let samples = read_line_corpus(corpus);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].intent.as_str(), "conversation-complete");
    }

    #[test]
    fn test_unseen_labels_extend_the_set() {
        let samples = read_line_corpus("a x\nb y\nc z\n");
        let labels: Vec<&str> = samples.iter().map(|s| s.intent.as_str()).collect();

        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_read_json_corpus() {
        let json = r#"[
            {"intent": "greeting", "text": "hello there"},
            {"intent": "", "text": "no label"},
            {"intent": "price-inquiry", "text": "   "},
            {"intent": "price-inquiry", "text": "how much"}
        ]"#;
        let samples = read_json_corpus(json).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].tokens, vec!["hello", "there"]);
        assert!(read_json_corpus("{not json").is_err());
    }

    #[test]
    fn test_load_missing_corpus() {
        match load_corpus("/nonexistent/corpus.txt") {
            Err(ParlanceError::TrainingDataInvalid(message)) => {
                assert!(message.contains("/nonexistent/corpus.txt"))
            }
            other => panic!("expected TrainingDataInvalid, got {other:?}"),
        }
    }
}
