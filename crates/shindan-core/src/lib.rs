//! Shindan Core - Core types for the Shindan humor quiz engine
//!
//! This crate provides the fundamental types used across the Shindan crates:
//! - Theme, question, rule and result type definitions
//! - The per-session answer set
//! - Error types

pub mod answers;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use answers::AnswerSet;
pub use error::{CoreError, Result};
pub use model::{Condition, Question, QuestionKind, Rule, RuleSet, Theme, ThemeCard, TypeDef};
