//! Scripted session example
//!
//! This example demonstrates:
//! - Building a QuizEngine with the built-in themes
//! - Driving a chat session through consent and every question
//! - Presenting the result card with share links

use shindan_runtime::Role;
use shindan_sdk::{Action, DelayConfig, QuizEngineBuilder, Stage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Scripted Session Example ===\n");

    // Short delays keep the demo snappy while still running the timers
    let engine = QuizEngineBuilder::new()
        .with_delays(DelayConfig {
            consent_accept_ms: 20,
            next_question_ms: 30,
            reveal_result_ms: 120,
            retry_ms: 40,
            decline_reset_ms: 120,
        })
        .strict(true)
        .build()?;

    let mut driver = engine.new_driver();
    driver.dispatch(engine.theme_action("sushi")?)?;
    driver.dispatch(Action::AcceptConsent)?;
    driver.settle().await?;

    for option in ["じわ上げ", "運命に任せる", "ミステリアス", "ふわっと"] {
        let progress = driver.session().progress();
        println!("[{} {}%] answering: {}", progress, progress.percent(), option);
        driver.dispatch(Action::Answer(option.to_string()))?;
        driver.settle().await?;
    }

    println!("\nTranscript:");
    for message in driver.session().transcript() {
        let speaker = match message.role {
            Role::Bot => "bot ",
            Role::User => "user",
            Role::Typing => "... ",
        };
        println!("  {} {}", speaker, message.text.as_deref().unwrap_or_default());
    }

    assert_eq!(driver.session().stage(), Stage::Result);
    if let Some(card) = engine.present_session(driver.session()) {
        println!("\nResult:");
        println!("  {} {}", card.type_def.emoji, card.type_def.label);
        println!("  {}", card.flavor_text);
        println!("  Share: {}", card.share_text);
        println!("  X:     {}", card.links.x);
        println!("  LINE:  {}", card.links.line);
    }

    Ok(())
}
