//! Error types for Shindan Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Invalid option '{value}' for question '{question_id}'")]
    InvalidOption { question_id: String, value: String },

    #[error("Incomplete answers: expected {expected} answers, got {got}")]
    IncompleteAnswers { expected: usize, got: usize },

    #[error("Question index out of range: {index} (theme has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
