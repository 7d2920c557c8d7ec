//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::chat::SentenceReport;
use crate::cli::args::{OutputFormat, ParlanceArgs};
use crate::error::Result;
use crate::ml::intent_classifier::TrainingStats;

/// Result structure for the classify command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub sentences: Vec<SentenceReport>,
}

/// One annotated sentence.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotatedSentenceOutput {
    pub sentence: String,
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
    pub lemmas: Vec<String>,
}

/// Result structure for the annotate command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotateResult {
    pub sentences: Vec<AnnotatedSentenceOutput>,
}

/// Result structure for the train command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub samples: usize,
    pub intents: Vec<String>,
    pub stats: TrainingStats,
}

/// Human-readable rendering of a command result.
pub trait HumanReadable {
    fn render(&self) -> String;
}

impl HumanReadable for ClassifyResult {
    fn render(&self) -> String {
        let mut out = String::new();
        for (i, report) in self.sentences.iter().enumerate() {
            out.push_str(&format!("Sentence {}: {}\n", i + 1, report.sentence));
            out.push_str(&format!(
                "  Intent: {} ({:.3})\n",
                report.classification.intent, report.classification.confidence
            ));
            for (intent, probability) in &report.classification.distribution {
                out.push_str(&format!("    {intent:<24} {probability:.3}\n"));
            }
            out.push_str(&format!("  Response: {}\n", report.response));
        }
        out
    }
}

impl HumanReadable for AnnotateResult {
    fn render(&self) -> String {
        let mut out = String::new();
        for (i, sentence) in self.sentences.iter().enumerate() {
            out.push_str(&format!("Sentence {}: {}\n", i + 1, sentence.sentence));
            out.push_str(&format!("  Tokens: {}\n", sentence.tokens.join(" | ")));
            out.push_str(&format!("  Tags:   {}\n", sentence.tags.join(" | ")));
            out.push_str(&format!("  Lemmas: {}\n", sentence.lemmas.join(" | ")));
        }
        out
    }
}

impl HumanReadable for TrainResult {
    fn render(&self) -> String {
        format!(
            "Training Statistics:\n\
             ════════════════════\n\
             Samples: {}\n\
             Intents: {}\n\
             Predicates: {}\n\
             Parameters: {}\n\
             Iterations: {}{}\n\
             Log-likelihood: {:.6}\n",
            self.samples,
            self.intents.join(", "),
            self.stats.predicates,
            self.stats.parameters,
            self.stats.iterations,
            if self.stats.converged { " (converged)" } else { "" },
            self.stats.log_likelihood
        )
    }
}

/// Serialize a result as JSON, pretty-printed when requested.
pub fn to_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    })
}

/// Output a command result in the requested format.
pub fn output_result<T, W>(
    message: &str,
    result: &T,
    args: &ParlanceArgs,
    out: &mut W,
) -> Result<()>
where
    T: Serialize + HumanReadable,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            write!(out, "{}", result.render())?;
        }
        OutputFormat::Json => writeln!(out, "{}", to_json(result, args.pretty)?)?,
    }
    Ok(())
}
