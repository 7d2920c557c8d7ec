//! Command implementations for the Parlance CLI.

use std::io::{self, BufRead, Write};

use log::info;

use crate::analysis::pipeline::AnnotationPipeline;
use crate::analysis::resource::AnnotatorResources;
use crate::chat::{ChatbotConfig, Chatbot, CorpusSource, TurnOutcome};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::ml::intent_classifier;

const USER_PROMPT: &str = "##### You:  ";
const AGENT_PREFIX: &str = "##### Virtual Agent: ";

/// Execute a CLI command.
pub fn execute_command(args: ParlanceArgs) -> Result<()> {
    let config = load_config(&args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Chat(chat_args) => {
            let bot = Chatbot::bootstrap(&config)?;
            let stdin = io::stdin();
            run_chat(&bot, stdin.lock(), &mut out, chat_args, &args).map(|_| ())
        }
        Command::Classify(text_args) => classify_text(&config, &text_args.text, &args, &mut out),
        Command::Annotate(text_args) => annotate_text(&config, &text_args.text, &args, &mut out),
        Command::Train => train_model(&config, &args, &mut out),
    }
}

/// Read the configuration file (or the defaults) and apply overrides.
pub fn load_config(args: &ParlanceArgs) -> Result<ChatbotConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ChatbotConfig::from_file(path)?
        }
        None => ChatbotConfig::default(),
    };
    if let Some(corpus) = &args.corpus {
        config.corpus = CorpusSource::File(corpus.clone());
    }
    Ok(config)
}

/// Run the console loop until the conversation ends or input runs out.
///
/// Returns the number of turns processed.
pub fn run_chat<R, W>(
    bot: &Chatbot,
    input: R,
    out: &mut W,
    chat_args: &ChatArgs,
    cli_args: &ParlanceArgs,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut conversation = bot.conversation();
    let human = cli_args.output_format == OutputFormat::Human;
    let mut lines = input.lines();

    loop {
        if human {
            write!(out, "{USER_PROMPT}")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            if human {
                writeln!(out)?;
            }
            break;
        };

        let outcome = conversation.process_turn(&line?)?;
        write_turn(&outcome, out, chat_args, cli_args)?;

        if outcome.conversation_ended {
            break;
        }
    }

    Ok(conversation.turns())
}

fn write_turn<W: Write>(
    outcome: &TurnOutcome,
    out: &mut W,
    chat_args: &ChatArgs,
    cli_args: &ParlanceArgs,
) -> Result<()> {
    match cli_args.output_format {
        OutputFormat::Human => {
            if chat_args.explain {
                for report in &outcome.sentences {
                    writeln!(
                        out,
                        "      [{}] {} ({:.3})",
                        report.sentence,
                        report.classification.intent,
                        report.classification.confidence
                    )?;
                }
            }
            writeln!(out, "{AGENT_PREFIX}{}", outcome.response)?;
        }
        OutputFormat::Json => writeln!(out, "{}", to_json(outcome, cli_args.pretty)?)?,
    }
    Ok(())
}

/// Classify each sentence of a text.
fn classify_text<W: Write>(
    config: &ChatbotConfig,
    text: &str,
    cli_args: &ParlanceArgs,
    out: &mut W,
) -> Result<()> {
    let bot = Chatbot::bootstrap(config)?;
    let result = ClassifyResult {
        sentences: bot.analyze(text)?,
    };
    output_result("Classification:", &result, cli_args, out)
}

/// Annotate a text without training a model.
fn annotate_text<W: Write>(
    config: &ChatbotConfig,
    text: &str,
    cli_args: &ParlanceArgs,
    out: &mut W,
) -> Result<()> {
    let pipeline = AnnotationPipeline::from_resources(AnnotatorResources::load(&config.resources)?);
    let sentences = pipeline
        .annotate(text)?
        .into_iter()
        .map(|annotated| AnnotatedSentenceOutput {
            tokens: annotated.words().into_iter().map(str::to_string).collect(),
            tags: annotated.tags().into_iter().map(str::to_string).collect(),
            sentence: annotated.sentence.text,
            lemmas: annotated.lemmas,
        })
        .collect();

    output_result("Annotation:", &AnnotateResult { sentences }, cli_args, out)
}

/// Train the intent model and report statistics.
fn train_model<W: Write>(
    config: &ChatbotConfig,
    cli_args: &ParlanceArgs,
    out: &mut W,
) -> Result<()> {
    let samples = config.corpus.load()?;
    let model = intent_classifier::train(&samples, &config.training)?;

    let result = TrainResult {
        samples: samples.len(),
        intents: model.labels().iter().map(|l| l.to_string()).collect(),
        stats: model.stats().clone(),
    };
    output_result("Model trained", &result, cli_args, out)
}
