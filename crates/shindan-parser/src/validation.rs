//! Theme validation
//!
//! Reports configuration defects in a parsed theme. Nothing here fails a
//! parse: an unresolvable rule target only makes the resolver return no
//! result, so these diagnostics are meant for `check` runs and tests.

use serde::{Deserialize, Serialize};
use shindan_core::Theme;
use std::collections::HashSet;

/// Severity level for validation diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A single diagnostic message from validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,

    /// Error/warning code (e.g., "E001", "W001")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Where in the theme the problem is (e.g. "rules.map[2]")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, code, message)
    }

    /// Create a new warning diagnostic
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, code, message)
    }

    /// Create a new info diagnostic
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, code, message)
    }

    fn new(severity: DiagnosticSeverity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Add context location
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({})", context)?;
        }
        Ok(())
    }
}

/// Validator for parsed themes
pub struct ThemeValidator;

impl ThemeValidator {
    /// Question count every shipped theme uses
    pub const EXPECTED_QUESTIONS: usize = 4;

    /// Validate a theme and return all diagnostics
    pub fn validate(theme: &Theme) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        Self::check_duplicates(theme, &mut diagnostics);
        Self::check_rules(theme, &mut diagnostics);
        Self::check_fallback(theme, &mut diagnostics);
        Self::check_unreferenced_types(theme, &mut diagnostics);
        Self::check_shadowed_rules(theme, &mut diagnostics);

        if theme.question_count() != Self::EXPECTED_QUESTIONS {
            diagnostics.push(Diagnostic::info(
                "I001",
                format!(
                    "theme '{}' has {} questions (expected {})",
                    theme.id,
                    theme.question_count(),
                    Self::EXPECTED_QUESTIONS
                ),
            ));
        }

        diagnostics
    }

    /// Whether any diagnostic is an error
    pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(Diagnostic::is_error)
    }

    fn check_duplicates(theme: &Theme, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen = HashSet::new();
        for (index, question) in theme.questions.iter().enumerate() {
            if !seen.insert(question.id.as_str()) {
                diagnostics.push(
                    Diagnostic::error("E005", format!("duplicate question id '{}'", question.id))
                        .with_context(format!("questions[{}]", index)),
                );
            }
        }

        let mut seen = HashSet::new();
        for (index, type_def) in theme.types.iter().enumerate() {
            if !seen.insert(type_def.id.as_str()) {
                diagnostics.push(
                    Diagnostic::error("E006", format!("duplicate type id '{}'", type_def.id))
                        .with_context(format!("types[{}]", index)),
                );
            }
        }
    }

    fn check_rules(theme: &Theme, diagnostics: &mut Vec<Diagnostic>) {
        for (index, rule) in theme.rules.rules.iter().enumerate() {
            let context = format!("rules.map[{}]", index);

            if theme.find_type(&rule.type_id).is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        "E001",
                        format!("rule targets unknown type '{}'", rule.type_id),
                    )
                    .with_context(context.clone()),
                );
            }

            for condition in &rule.conditions {
                match theme.find_question(&condition.question_id) {
                    None => diagnostics.push(
                        Diagnostic::error(
                            "E003",
                            format!("rule references unknown question '{}'", condition.question_id),
                        )
                        .with_context(context.clone()),
                    ),
                    Some(question) if !question.has_option(&condition.expected) => diagnostics.push(
                        Diagnostic::error(
                            "E004",
                            format!(
                                "'{}' is not an option of question '{}'",
                                condition.expected, condition.question_id
                            ),
                        )
                        .with_context(context.clone()),
                    ),
                    Some(_) => {}
                }
            }
        }
    }

    fn check_fallback(theme: &Theme, diagnostics: &mut Vec<Diagnostic>) {
        if theme.find_type(&theme.rules.fallback).is_none() {
            diagnostics.push(
                Diagnostic::error(
                    "E002",
                    format!("fallback targets unknown type '{}'", theme.rules.fallback),
                )
                .with_context("rules.fallback"),
            );
        }
    }

    fn check_unreferenced_types(theme: &Theme, diagnostics: &mut Vec<Diagnostic>) {
        for type_def in theme.unreferenced_types() {
            diagnostics.push(Diagnostic::warning(
                "W001",
                format!("type '{}' is never selected by any rule or the fallback", type_def.id),
            ));
        }
    }

    fn check_shadowed_rules(theme: &Theme, diagnostics: &mut Vec<Diagnostic>) {
        let rules = &theme.rules.rules;
        for (index, rule) in rules.iter().enumerate() {
            if let Some(earlier) = rules[..index].iter().position(|r| r.is_subset_of(rule)) {
                diagnostics.push(
                    Diagnostic::warning(
                        "W002",
                        format!("rule {} can never fire: rule {} always matches first", index, earlier),
                    )
                    .with_context(format!("rules.map[{}]", index)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shindan_core::{Question, Rule, RuleSet, TypeDef};

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn base_theme(rules: RuleSet) -> Theme {
        let mut theme = Theme::new("t", "T", rules);
        for i in 1..=4 {
            theme = theme.add_question(Question::new(format!("q{}", i), "q", opts(&["a", "b", "c"])));
        }
        theme
            .add_type(TypeDef::new("t_a", "A", "🅰", "a"))
            .add_type(TypeDef::new("t_b", "B", "🅱", "b"))
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_clean_theme() {
        let theme = base_theme(RuleSet::new("t_a").add_rule(Rule::new("t_b").when("q1", "a")));
        let diagnostics = ThemeValidator::validate(&theme);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_unknown_targets() {
        let theme = base_theme(RuleSet::new("t_missing").add_rule(Rule::new("t_gone").when("q1", "a")));
        let diagnostics = ThemeValidator::validate(&theme);

        assert!(ThemeValidator::has_errors(&diagnostics));
        let codes = codes(&diagnostics);
        assert!(codes.contains(&"E001"));
        assert!(codes.contains(&"E002"));
    }

    #[test]
    fn test_bad_conditions() {
        let theme = base_theme(
            RuleSet::new("t_a").add_rule(Rule::new("t_b").when("q9", "a").when("q2", "z")),
        );
        let diagnostics = ThemeValidator::validate(&theme);
        let codes = codes(&diagnostics);
        assert!(codes.contains(&"E003"));
        assert!(codes.contains(&"E004"));
    }

    #[test]
    fn test_unreferenced_type_is_warning() {
        let theme = base_theme(RuleSet::new("t_a"));
        let diagnostics = ThemeValidator::validate(&theme);

        assert!(!ThemeValidator::has_errors(&diagnostics));
        assert_eq!(codes(&diagnostics), vec!["W001"]);
    }

    #[test]
    fn test_shadowed_rule() {
        let theme = base_theme(
            RuleSet::new("t_a")
                .add_rule(Rule::new("t_b").when("q1", "a"))
                .add_rule(Rule::new("t_a").when("q1", "a").when("q2", "b")),
        );
        let diagnostics = ThemeValidator::validate(&theme);
        let shadowed: Vec<_> = diagnostics.iter().filter(|d| d.code == "W002").collect();

        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].context.as_deref(), Some("rules.map[1]"));
    }

    #[test]
    fn test_duplicates_and_question_count() {
        let theme = base_theme(RuleSet::new("t_a").add_rule(Rule::new("t_b").when("q1", "a")))
            .add_question(Question::new("q1", "again", opts(&["a", "b"])))
            .add_type(TypeDef::new("t_a", "A2", "🅰", "dup"));
        let diagnostics = ThemeValidator::validate(&theme);
        let codes = codes(&diagnostics);

        assert!(codes.contains(&"E005"));
        assert!(codes.contains(&"E006"));
        assert!(codes.contains(&"I001"));
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::warning("W001", "dead type").with_context("types[3]");
        assert_eq!(d.to_string(), "[W001] dead type (types[3])");
    }
}
