//! Answer set for a single session

use crate::error::{CoreError, Result};
use crate::model::Theme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from question id to the chosen option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: HashMap<String, String>,
}

impl AnswerSet {
    /// Create an empty answer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the previous one for that question
    pub fn record(&mut self, question_id: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.answers.insert(question_id.into(), value.into())
    }

    /// Answer for `question_id`
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Iterate over `(question_id, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check every entry names a theme question and one of its options
    pub fn validate_against(&self, theme: &Theme) -> Result<()> {
        for (question_id, value) in self.iter() {
            let question = theme
                .find_question(question_id)
                .ok_or_else(|| CoreError::UnknownQuestion(question_id.to_string()))?;
            if !question.has_option(value) {
                return Err(CoreError::InvalidOption {
                    question_id: question_id.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Exactly one entry per theme question and nothing else
    pub fn is_complete_for(&self, theme: &Theme) -> bool {
        self.answers.len() == theme.question_count()
            && theme.questions.iter().all(|q| self.contains(&q.id))
    }

    /// Validate entries and require an answer for every theme question
    pub fn ensure_complete_for(&self, theme: &Theme) -> Result<()> {
        self.validate_against(theme)?;
        if !self.is_complete_for(theme) {
            return Err(CoreError::IncompleteAnswers {
                expected: theme.question_count(),
                got: self.len(),
            });
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, RuleSet};

    fn two_question_theme() -> Theme {
        Theme::new("t", "Test", RuleSet::new("t_a"))
            .add_question(Question::new("q1", "one", vec!["a".into(), "b".into()]))
            .add_question(Question::new("q2", "two", vec!["c".into(), "d".into()]))
    }

    #[test]
    fn test_record_and_get() {
        let mut answers = AnswerSet::new();
        assert!(answers.is_empty());

        assert_eq!(answers.record("q1", "a"), None);
        assert_eq!(answers.record("q1", "b"), Some("a".to_string()));
        assert_eq!(answers.get("q1"), Some("b"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_complete_for_theme() {
        let theme = two_question_theme();
        let mut answers = AnswerSet::new();
        answers.record("q1", "a");
        assert!(!answers.is_complete_for(&theme));

        answers.record("q2", "d");
        assert!(answers.is_complete_for(&theme));

        answers.record("q3", "extra");
        assert!(!answers.is_complete_for(&theme));
    }

    #[test]
    fn test_validate_against_theme() {
        let theme = two_question_theme();

        let ok: AnswerSet = [("q1", "a"), ("q2", "c")].into_iter().collect();
        assert!(ok.validate_against(&theme).is_ok());

        let unknown: AnswerSet = [("q7", "a")].into_iter().collect();
        assert_eq!(
            unknown.validate_against(&theme),
            Err(CoreError::UnknownQuestion("q7".to_string()))
        );

        let bad_option: AnswerSet = [("q2", "a")].into_iter().collect();
        assert!(matches!(
            bad_option.validate_against(&theme),
            Err(CoreError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_ensure_complete_for_theme() {
        let theme = two_question_theme();

        let partial: AnswerSet = [("q1", "a")].into_iter().collect();
        assert_eq!(
            partial.ensure_complete_for(&theme),
            Err(CoreError::IncompleteAnswers { expected: 2, got: 1 })
        );

        let full: AnswerSet = [("q1", "b"), ("q2", "c")].into_iter().collect();
        assert!(full.ensure_complete_for(&theme).is_ok());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let answers: AnswerSet = [("q1", "a")].into_iter().collect();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({"q1": "a"}));
    }
}
