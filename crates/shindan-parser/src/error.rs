//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Type mismatch
    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Generic parse error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ParseError::MissingField {
            field: "theme".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: theme");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ParseError::TypeMismatch {
            field: "questions[0].options[1]".to_string(),
            expected: "string".to_string(),
            actual: "number".to_string(),
        };
        assert!(err.to_string().contains("expected string, got number"));
    }
}
