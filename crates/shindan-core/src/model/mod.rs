//! Quiz model definitions
//!
//! This module contains the static configuration types for:
//! - Themes and their landing cards
//! - Questions
//! - Rules and rule sets
//! - Result type definitions

pub mod question;
pub mod rule;
pub mod theme;

pub use question::{Question, QuestionKind};
pub use rule::{Condition, Rule, RuleSet};
pub use theme::{Theme, ThemeCard, TypeDef};
