//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use shindan_sdk::{Action, AnswerSet, QuizEngine, QuizEngineBuilder, SessionDriver, Stage};

/// Engine with only the built-in themes
pub fn builtin_engine() -> QuizEngine {
    QuizEngineBuilder::new()
        .strict(true)
        .build()
        .expect("built-in themes should load")
}

/// Answer set from `(question id, option)` pairs
pub fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

/// Test helper that walks a driver through a whole quiz
pub struct TestSession {
    pub driver: SessionDriver,
}

impl TestSession {
    pub fn new(engine: &QuizEngine) -> Self {
        Self {
            driver: engine.new_driver(),
        }
    }

    /// Select `theme_id` and accept consent, waiting for the first question
    pub async fn start(&mut self, engine: &QuizEngine, theme_id: &str) {
        let action = engine.theme_action(theme_id).expect("theme should exist");
        self.driver.dispatch(action).expect("select theme");
        let accept = self
            .driver
            .session()
            .action_for(&self.driver.session().script().accept_label)
            .expect("consent options offered");
        self.driver.dispatch(accept).expect("accept consent");
        self.driver.settle().await.expect("first question");
        assert_eq!(self.driver.session().stage(), Stage::Questions);
    }

    /// Answer the current question and wait for the next step
    pub async fn answer(&mut self, option: &str) {
        self.driver
            .dispatch(Action::Answer(option.to_string()))
            .expect("answer accepted");
        self.driver.settle().await.expect("step fired");
    }

    /// Answer every question in order
    pub async fn answer_all(&mut self, options: &[&str]) {
        for option in options {
            self.answer(option).await;
        }
    }

    pub fn result_id(&self) -> Option<String> {
        self.driver.session().result().map(|t| t.id.clone())
    }
}
