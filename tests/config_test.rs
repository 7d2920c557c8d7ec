//! Integration tests for configuration, corpus and resource loading.

use std::fs;
use std::path::Path;

use parlance::analysis::resource::{
    AnnotatorResources, LEMMATIZER_ARTIFACT, POS_TAGGER_ARTIFACT, ResourceSource,
    SEGMENTER_ARTIFACT, TOKENIZER_ARTIFACT,
};
use parlance::analysis::tagger::PosTagger;
use parlance::chat::{Chatbot, ChatbotConfig, CorpusSource};
use parlance::error::{ParlanceError, Result};
use tempfile::TempDir;

fn builtin_artifact(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/en").join(name);
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_bot_from_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let corpus = dir.path().join("intents.txt");
    fs::write(
        &corpus,
        "# small corpus\nhello hi\nhello hey there\nbye bye\nbye ciao\n",
    )?;
    let config_path = dir.path().join("bot.json");
    let config = serde_json::json!({
        "corpus": { "file": corpus.clone() },
        "training": { "cutoff": 0 },
        "responses": { "hello": "Hi!", "bye": "See you!" },
        "terminal_intent": "bye"
    });
    fs::write(&config_path, config.to_string())?;

    let config = ChatbotConfig::from_file(&config_path)?;
    assert_eq!(config.corpus, CorpusSource::File(corpus));
    assert_eq!(config.training.iterations, 100);

    let bot = Chatbot::bootstrap(&config)?;
    let mut conversation = bot.conversation();
    let outcome = conversation.process_turn("Hey. Ciao.")?;

    assert_eq!(outcome.response, "Hi! See you!");
    assert!(outcome.conversation_ended);

    Ok(())
}

#[test]
fn test_json_corpus() -> Result<()> {
    let dir = TempDir::new()?;
    let corpus = dir.path().join("intents.json");
    fs::write(
        &corpus,
        r#"[
            {"intent": "greeting", "text": "hello"},
            {"intent": "greeting", "text": "good morning"},
            {"intent": "conversation-complete", "text": "goodbye"}
        ]"#,
    )?;

    let config = ChatbotConfig {
        corpus: CorpusSource::File(corpus),
        ..ChatbotConfig::default()
    };
    let bot = Chatbot::bootstrap(&config)?;

    assert_eq!(bot.classifier().labels().len(), 2);
    assert_eq!(bot.analyze("Good morning!")?[0].classification.intent, "greeting");

    Ok(())
}

#[test]
fn test_missing_response_is_a_startup_failure() {
    let config = ChatbotConfig::from_json(
        r#"{"responses": {"conversation-complete": "Bye."}}"#,
    )
    .unwrap();

    match Chatbot::bootstrap(&config) {
        Err(ParlanceError::UnknownIntentResponse(intents)) => {
            assert!(intents.contains(&"greeting".to_string()));
            assert!(!intents.contains(&"conversation-complete".to_string()));
        }
        other => panic!("expected UnknownIntentResponse, got {other:?}"),
    }
}

#[test]
fn test_invalid_config() {
    let error = ChatbotConfig::from_json(r#"{"terminal_intent": 7}"#).unwrap_err();
    assert!(matches!(error, ParlanceError::Config(_)));
    assert_eq!(error.exit_code(), 4);

    let error = ChatbotConfig::from_file("/nonexistent/bot.json").unwrap_err();
    assert!(matches!(error, ParlanceError::Config(_)));
}

#[test]
fn test_corpus_without_records() -> Result<()> {
    let dir = TempDir::new()?;
    let corpus = dir.path().join("empty.txt");
    fs::write(&corpus, "# nothing here\n\n")?;

    let config = ChatbotConfig {
        corpus: CorpusSource::File(corpus),
        ..ChatbotConfig::default()
    };
    let error = Chatbot::bootstrap(&config).unwrap_err();

    assert!(matches!(error, ParlanceError::TrainingDataInvalid(_)));
    assert_eq!(error.exit_code(), 3);

    Ok(())
}

#[test]
fn test_resource_directory() -> Result<()> {
    let dir = TempDir::new()?;
    for artifact in [
        SEGMENTER_ARTIFACT,
        TOKENIZER_ARTIFACT,
        POS_TAGGER_ARTIFACT,
        LEMMATIZER_ARTIFACT,
    ] {
        fs::write(dir.path().join(artifact), builtin_artifact(artifact))?;
    }

    let from_directory = AnnotatorResources::load(&ResourceSource::Directory(dir.path().into()))?;
    let builtin = AnnotatorResources::builtin()?;

    assert_eq!(from_directory.tagger.tagset(), builtin.tagger.tagset());
    assert_eq!(from_directory.lemmatizer.len(), builtin.lemmatizer.len());

    Ok(())
}

#[test]
fn test_resource_failures_are_aggregated() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(SEGMENTER_ARTIFACT), builtin_artifact(SEGMENTER_ARTIFACT))?;
    fs::write(dir.path().join(TOKENIZER_ARTIFACT), builtin_artifact(TOKENIZER_ARTIFACT))?;
    fs::write(dir.path().join(POS_TAGGER_ARTIFACT), "not tagged at all\n")?;

    match AnnotatorResources::load(&ResourceSource::Directory(dir.path().into())) {
        Err(ParlanceError::ResourceLoad { failures }) => {
            let annotators: Vec<&str> = failures.iter().map(|f| f.annotator.as_str()).collect();
            assert_eq!(annotators, vec!["pos_tagger", "lemmatizer"]);
            assert!(failures[1].location.ends_with(LEMMATIZER_ARTIFACT));
        }
        other => panic!("expected ResourceLoad, got {other:?}"),
    }

    Ok(())
}
