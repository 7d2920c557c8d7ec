//! Integration tests for the conversation controller with the built-in bot.

use parlance::analysis::pipeline::AnnotationPipeline;
use parlance::analysis::resource::AnnotatorResources;
use parlance::chat::{Chatbot, ChatbotConfig, ConversationState, ResponseTable};
use parlance::error::{ParlanceError, Result};
use parlance::ml::intent_classifier::{self, TrainOptions, TrainingSample};

const GREETING: &str = "Hello, my name is Stacy.  How may I help you today?";
const FAREWELL: &str = "It was nice chatting with you. Goodbye!";

fn default_bot() -> Result<Chatbot> {
    Chatbot::bootstrap(&ChatbotConfig::default())
}

#[test]
fn test_greeting_then_farewell() -> Result<()> {
    let bot = default_bot()?;
    let mut conversation = bot.conversation();

    let outcome = conversation.process_turn("hello there")?;
    assert_eq!(outcome.response, GREETING);
    assert!(!outcome.conversation_ended);
    assert_eq!(conversation.state(), ConversationState::Active);

    let outcome = conversation.process_turn("goodbye")?;
    assert_eq!(outcome.response, FAREWELL);
    assert!(outcome.conversation_ended);
    assert!(conversation.is_ended());
    assert_eq!(conversation.turns(), 2);

    Ok(())
}

#[test]
fn test_turn_after_termination_is_rejected() -> Result<()> {
    let bot = default_bot()?;
    let mut conversation = bot.conversation();
    conversation.process_turn("bye")?;

    assert!(matches!(
        conversation.process_turn("hello"),
        Err(ParlanceError::ConversationEnded)
    ));
    assert_eq!(conversation.turns(), 1);

    Ok(())
}

#[test]
fn test_every_sentence_is_answered() -> Result<()> {
    let bot = default_bot()?;
    let mut conversation = bot.conversation();

    let outcome = conversation.process_turn("Hello. Goodbye.")?;

    assert_eq!(outcome.sentences.len(), 2);
    assert_eq!(outcome.sentences[0].classification.intent, "greeting");
    assert_eq!(outcome.sentences[1].classification.intent, "conversation-complete");
    assert_eq!(outcome.response, format!("{GREETING} {FAREWELL}"));
    assert!(outcome.conversation_ended);

    Ok(())
}

#[test]
fn test_terminal_sentence_first_still_answers_the_rest() -> Result<()> {
    let bot = default_bot()?;
    let mut conversation = bot.conversation();

    let outcome = conversation.process_turn("Goodbye. Hi.")?;

    assert_eq!(outcome.response, format!("{FAREWELL} {GREETING}"));
    assert!(outcome.conversation_ended);

    Ok(())
}

#[test]
fn test_unseen_words_still_get_an_intent() -> Result<()> {
    let bot = default_bot()?;
    let reports = bot.analyze("Zorblax quindle frumps.")?;

    assert_eq!(reports.len(), 1);
    let classification = &reports[0].classification;
    assert!(bot.classifier().labels().contains(&classification.intent));
    assert!(classification.confidence > 0.0 && classification.confidence <= 1.0);
    assert!(!reports[0].response.is_empty());

    Ok(())
}

#[test]
fn test_empty_turn() -> Result<()> {
    let bot = default_bot()?;
    let mut conversation = bot.conversation();

    let outcome = conversation.process_turn("   ")?;

    assert_eq!(outcome.response, "");
    assert!(outcome.sentences.is_empty());
    assert!(!outcome.conversation_ended);

    Ok(())
}

#[test]
fn test_classification_is_deterministic() -> Result<()> {
    let first = default_bot()?;
    let second = default_bot()?;
    let text = "How much is life insurance? Can I call you?";

    let a = first.analyze(text)?;
    let b = second.analyze(text)?;

    assert_eq!(a, b);
    assert_eq!(a[0].classification.intent, "price-inquiry");
    assert_eq!(a[1].classification.intent, "contact-inquiry");

    Ok(())
}

#[test]
fn test_reports_carry_annotations() -> Result<()> {
    let bot = default_bot()?;
    let reports = bot.analyze("What is the price of life insurance?")?;
    let report = &reports[0];

    assert_eq!(report.tokens.len(), 8);
    assert_eq!(report.tags.len(), report.tokens.len());
    assert_eq!(report.lemmas.len(), report.tokens.len());
    assert_eq!(report.lemmas[1], "be");
    assert_eq!(report.classification.intent, "price-inquiry");

    Ok(())
}

#[test]
fn test_custom_bot() -> Result<()> {
    let samples = vec![
        TrainingSample::from_text("hello", "hi"),
        TrainingSample::from_text("hello", "hey"),
        TrainingSample::from_text("weather", "is it raining"),
        TrainingSample::from_text("weather", "will it rain today"),
        TrainingSample::from_text("done", "bye"),
        TrainingSample::from_text("done", "see you"),
    ];
    let classifier =
        intent_classifier::new_maxent(&samples, &TrainOptions::default().with_cutoff(0))?;
    let responses: ResponseTable = [
        ("hello", "Hi!"),
        ("weather", "Take an umbrella."),
        ("done", "Bye!"),
    ]
    .into_iter()
    .collect();
    let pipeline = AnnotationPipeline::from_resources(AnnotatorResources::builtin()?);
    let bot = Chatbot::new(pipeline, classifier, responses, "done")?;

    let mut conversation = bot.conversation();
    assert_eq!(conversation.process_turn("hey")?.response, "Hi!");
    let outcome = conversation.process_turn("Is it raining? Bye.")?;
    assert_eq!(outcome.response, "Take an umbrella. Bye!");
    assert!(outcome.conversation_ended);

    Ok(())
}

#[test]
fn test_independent_conversations() -> Result<()> {
    let bot = default_bot()?;
    let mut first = bot.conversation();
    let mut second = bot.conversation();

    first.process_turn("goodbye")?;

    assert!(first.is_ended());
    assert!(!second.is_ended());
    assert_eq!(second.process_turn("hi")?.response, GREETING);

    Ok(())
}

#[test]
fn test_two_sample_corpus() -> Result<()> {
    let samples = vec![
        TrainingSample::from_text("greeting", "hello there"),
        TrainingSample::from_text("conversation-complete", "goodbye"),
    ];
    let classifier =
        intent_classifier::new_maxent(&samples, &TrainOptions::default().with_cutoff(0))?;
    let responses: ResponseTable = [("greeting", "G"), ("conversation-complete", "C")]
        .into_iter()
        .collect();
    let pipeline = AnnotationPipeline::from_resources(AnnotatorResources::builtin()?);
    let bot = Chatbot::new(pipeline, classifier, responses, "conversation-complete")?;

    let mut conversation = bot.conversation();
    let outcome = conversation.process_turn("hello there")?;
    assert_eq!(outcome.response, "G");
    assert!(!outcome.conversation_ended);
    let outcome = conversation.process_turn("goodbye")?;
    assert_eq!(outcome.response, "C");
    assert!(outcome.conversation_ended);

    let outcome = bot.conversation().process_turn("hello. goodbye.")?;
    assert_eq!(outcome.response, "G C");
    assert!(outcome.conversation_ended);

    Ok(())
}
