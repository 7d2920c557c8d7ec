//! The chatbot and its per-conversation state machine.
//!
//! A [`Chatbot`] is built once at startup and is read-only afterwards; it
//! can be shared across threads. Each [`Conversation`] borrows the bot and
//! owns its own state:
//!
//! ```text
//!   ACTIVE --(turn containing the terminal intent)--> TERMINATED
//! ```
//!
//! There is no transition out of `TERMINATED`; further turns are rejected
//! with [`ParlanceError::ConversationEnded`].

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::{AnnotatedSentence, AnnotationPipeline};
use crate::analysis::resource::AnnotatorResources;
use crate::chat::config::ChatbotConfig;
use crate::chat::responses::ResponseTable;
use crate::error::{ParlanceError, Result};
use crate::ml::intent_classifier::{self, Classification, Intent, IntentClassifier};

/// Everything derived from one sentence of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceReport {
    pub sentence: String,
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
    pub lemmas: Vec<String>,
    pub classification: Classification,
    pub response: String,
}

/// Result of processing one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Per-sentence responses joined by single spaces.
    pub response: String,
    pub conversation_ended: bool,
    pub sentences: Vec<SentenceReport>,
}

/// State of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Active,
    Terminated,
}

/// Annotation pipeline, trained classifier and response table.
pub struct Chatbot {
    pipeline: AnnotationPipeline,
    classifier: Box<dyn IntentClassifier>,
    responses: ResponseTable,
    terminal_intent: Intent,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("pipeline", &self.pipeline)
            .field("classifier", &self.classifier.name())
            .field("intents", &self.classifier.labels())
            .field("terminal_intent", &self.terminal_intent)
            .finish()
    }
}

impl Chatbot {
    /// Assemble a chatbot, checking that every intent the classifier can
    /// produce has a response and that the terminal intent has one too.
    pub fn new<I: Into<Intent>>(
        pipeline: AnnotationPipeline,
        classifier: Box<dyn IntentClassifier>,
        responses: ResponseTable,
        terminal_intent: I,
    ) -> Result<Self> {
        let terminal_intent = terminal_intent.into();

        responses.validate_labels(classifier.labels())?;
        if !responses.contains(terminal_intent.as_str()) {
            return Err(ParlanceError::config(format!(
                "terminal intent '{terminal_intent}' has no response"
            )));
        }
        if !classifier.labels().contains(&terminal_intent) {
            warn!(
                "Terminal intent '{terminal_intent}' is not in the training data; \
                 conversations will not end on their own"
            );
        }

        Ok(Chatbot {
            pipeline,
            classifier,
            responses,
            terminal_intent,
        })
    }

    /// Train the classifier, load the annotators and assemble the bot.
    ///
    /// Nothing is returned unless every step succeeds.
    pub fn bootstrap(config: &ChatbotConfig) -> Result<Self> {
        config.validate()?;

        let samples = config.corpus.load()?;
        let classifier = intent_classifier::new_maxent(&samples, &config.training)?;
        info!(
            "Categorizer model trained successfully ({} intents)",
            classifier.labels().len()
        );

        let resources = AnnotatorResources::load(&config.resources)?;

        Self::new(
            AnnotationPipeline::from_resources(resources),
            classifier,
            config.responses.clone(),
            config.terminal_intent.as_str(),
        )
    }

    /// Start a new conversation.
    pub fn conversation(&self) -> Conversation<'_> {
        Conversation {
            bot: self,
            state: ConversationState::Active,
            turns: 0,
        }
    }

    /// Classify every sentence of `text` without touching any conversation.
    pub fn analyze(&self, text: &str) -> Result<Vec<SentenceReport>> {
        self.pipeline
            .annotate(text)?
            .into_iter()
            .map(|sentence| self.report(sentence))
            .collect()
    }

    fn report(&self, annotated: AnnotatedSentence) -> Result<SentenceReport> {
        let classification = self.classifier.predict(&annotated.lemmas);
        let response = self
            .responses
            .get(classification.intent.as_str())
            .ok_or_else(|| {
                ParlanceError::UnknownIntentResponse(vec![classification.intent.to_string()])
            })?
            .to_string();

        Ok(SentenceReport {
            tokens: annotated.words().into_iter().map(str::to_string).collect(),
            tags: annotated.tags().into_iter().map(str::to_string).collect(),
            sentence: annotated.sentence.text,
            lemmas: annotated.lemmas,
            classification,
            response,
        })
    }

    pub fn pipeline(&self) -> &AnnotationPipeline {
        &self.pipeline
    }

    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    pub fn responses(&self) -> &ResponseTable {
        &self.responses
    }

    pub fn terminal_intent(&self) -> &Intent {
        &self.terminal_intent
    }
}

/// One conversation with a [`Chatbot`].
#[derive(Debug)]
pub struct Conversation<'a> {
    bot: &'a Chatbot,
    state: ConversationState,
    turns: usize,
}

impl Conversation<'_> {
    /// Answer one user turn.
    ///
    /// Every sentence is classified and answered in order, even after the
    /// terminal intent shows up; the conversation terminates once the turn
    /// is complete. Text without sentences yields an empty response.
    pub fn process_turn(&mut self, text: &str) -> Result<TurnOutcome> {
        if self.state == ConversationState::Terminated {
            return Err(ParlanceError::ConversationEnded);
        }

        let sentences = self.bot.analyze(text)?;
        let conversation_ended = sentences
            .iter()
            .any(|report| report.classification.intent == self.bot.terminal_intent);
        let response = sentences
            .iter()
            .map(|report| report.response.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        self.turns += 1;
        debug!("Turn {}: {} sentence(s)", self.turns, sentences.len());

        if conversation_ended {
            self.state = ConversationState::Terminated;
            info!("Conversation ended after {} turn(s)", self.turns);
        }

        Ok(TurnOutcome {
            response,
            conversation_ended,
            sentences,
        })
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == ConversationState::Terminated
    }

    /// Turns processed so far.
    pub fn turns(&self) -> usize {
        self.turns
    }
}
