//! Shindan SDK
//!
//! High-level API for running the humor quiz: load themes, start chat
//! sessions, resolve and present results.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::QuizEngineBuilder;
pub use catalog::ThemeCatalog;
pub use config::{DelayConfig, EngineConfig};
pub use coverage::CoverageReport;
pub use engine::{QuizEngine, ResultCard};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use shindan_core::{AnswerSet, Theme, TypeDef};
pub use shindan_runtime::{Action, Session, SessionDriver, Stage};
