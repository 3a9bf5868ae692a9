//! SDK error types

use std::path::PathBuf;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Domain model error
    #[error("Core error: {0}")]
    CoreError(#[from] shindan_core::CoreError),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] shindan_parser::ParseError),

    /// Session error
    #[error("Session error: {0}")]
    SessionError(#[from] shindan_runtime::SessionError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid theme file
    #[error("Invalid theme file {path:?}: {message}")]
    InvalidThemeFile { path: PathBuf, message: String },

    /// Theme id not in the catalog
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Validation errors found in strict mode
    #[error("Theme '{theme_id}' has {count} configuration error(s)")]
    ValidationFailed { theme_id: String, count: usize },
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
