//! compass - interactive terminal walkthrough of one assessment journey.
//!
//! Answer with an option letter, type free text where the question allows
//! it, or press Enter to skip. End of input abandons the journey.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use compass_engine::adapters::{
    FileJourneyStore, InMemoryEventBus, InMemoryJourneyStore, KeywordAnalyzer, QuestionBank,
};
use compass_engine::application::{AssessmentEngine, EngineDependencies};
use compass_engine::config::{AppConfig, StorageBackend};
use compass_engine::domain::assessment::DecisionType;
use compass_engine::domain::journey::{JourneyError, Question, Response};
use compass_engine::ports::{JourneyStore, QuestionSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    compass_engine::telemetry::init(&config.telemetry)?;

    let engine = build_engine(&config).await?;
    let journey = engine.start_journey().await?;
    let id = *journey.id();
    println!("Journey {} started. Enter a letter, free text where offered, or nothing to skip.\n", id);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let question = engine.present_question(id).await?;
        print_question(&question);

        let Some(line) = read_line(&mut input).await? else {
            engine.abandon(id).await?;
            println!("\nInput closed; journey abandoned.");
            return Ok(());
        };

        let Some(response) = parse_answer(&question, &line) else {
            println!("Not an option here, try again.\n");
            continue;
        };

        let decision = match engine.submit_response(id, response).await {
            Ok(decision) => decision,
            Err(JourneyError::InvalidResponse(reason)) => {
                println!("Response not accepted: {}\n", reason);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!(
            "[turn {} | {:.1}% confidence] {}\n",
            decision.turn,
            decision.overall_confidence.value(),
            decision.reasoning
        );

        match decision.decision {
            DecisionType::Complete => {
                let profile = engine.get_profile(id).await?;
                println!("{}", serde_json::to_string_pretty(&profile)?);
                return Ok(());
            }
            DecisionType::SavePartial => {
                let snapshot = engine.get_snapshot(id).await?;
                println!("Saved partial results:");
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }
            DecisionType::Continue | DecisionType::Clarify => {}
        }
    }
}

async fn build_engine(config: &AppConfig) -> Result<AssessmentEngine, Box<dyn Error>> {
    let store: Arc<dyn JourneyStore> = match (config.storage.backend, &config.storage.path) {
        (StorageBackend::File, Some(path)) => Arc::new(FileJourneyStore::new(path)),
        _ => Arc::new(InMemoryJourneyStore::new()),
    };

    let questions: Arc<dyn QuestionSource> = match &config.questions.bank_path {
        Some(path) => Arc::new(QuestionBank::from_file(path).await?),
        None => Arc::new(QuestionBank::builtin()?),
    };

    let deps = EngineDependencies {
        store,
        questions,
        analyzer: Arc::new(KeywordAnalyzer::new()),
        publisher: Arc::new(InMemoryEventBus::new()),
    };
    Ok(AssessmentEngine::new(deps, config.engine_settings()))
}

fn print_question(question: &Question) {
    let marker = if question.is_clarification {
        " (clarification)"
    } else {
        ""
    };
    println!("Q{}{}: {}", question.number, marker, question.prompt);
    for (letter, option) in ('a'..='z').zip(&question.options) {
        println!("  {}) {}", letter, option.text);
    }
    if question.allows_free_text {
        println!("  ...or describe it in your own words");
    }
}

/// Maps typed input onto a response. `None` means the input fits nothing.
fn parse_answer(question: &Question, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return Some(Response::skipped(question.id));
    }

    let mut chars = line.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let index = ('a'..='z').position(|l| l == c.to_ascii_lowercase());
        if let Some(option) = index.and_then(|i| question.options.get(i)) {
            return Some(Response::selected(question.id, option.id.clone()));
        }
    }

    question
        .allows_free_text
        .then(|| Response::free_text(question.id, line))
}

async fn read_line(input: &mut Lines<BufReader<Stdin>>) -> std::io::Result<Option<String>> {
    print!("> ");
    std::io::Write::flush(&mut std::io::stdout())?;
    input.next_line().await
}
