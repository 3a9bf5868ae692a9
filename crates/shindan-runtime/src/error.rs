//! Runtime error types

use crate::session::Stage;
use shindan_core::CoreError;
use thiserror::Error;

/// Session error
///
/// Returned when a user action cannot be applied. The session is left
/// untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Action not valid in the current stage
    #[error("Action '{action}' is not valid in stage '{stage}'")]
    InvalidAction { action: &'static str, stage: Stage },

    /// A scheduled step has not fired yet
    #[error("A transition is still pending")]
    TransitionPending,

    /// Theme has no questions to ask
    #[error("Theme '{0}' has no questions")]
    EmptyTheme(String),

    /// Answer is not among the currently offered options
    #[error("'{0}' is not one of the offered options")]
    UnknownOption(String),

    /// Theme data error
    #[error("Theme error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_action_display() {
        let err = SessionError::InvalidAction {
            action: "retry",
            stage: Stage::Consent,
        };
        assert_eq!(err.to_string(), "Action 'retry' is not valid in stage 'consent'");
    }

    #[test]
    fn test_empty_theme_display() {
        let err = SessionError::EmptyTheme("blank".to_string());
        assert_eq!(err.to_string(), "Theme 'blank' has no questions");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: SessionError = CoreError::UnknownQuestion("q5".to_string()).into();
        assert!(err.to_string().contains("Unknown question: q5"));
    }
}
