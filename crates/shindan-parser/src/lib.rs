//! Shindan Parser - YAML to model parser for the Shindan humor quiz engine
//!
//! This crate turns YAML theme files into [`shindan_core::Theme`] values and
//! checks them for configuration defects.

pub mod error;
pub mod theme_parser;
pub mod validation;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use theme_parser::{ThemeDocument, ThemeParser};
pub use validation::{Diagnostic, DiagnosticSeverity, ThemeValidator};
pub use yaml_parser::YamlParser;
