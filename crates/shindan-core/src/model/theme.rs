//! Theme and result type definitions

use super::question::Question;
use super::rule::RuleSet;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A result type a theme can resolve to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type identifier (e.g. "t_maguro")
    pub id: String,

    /// Display label
    pub label: String,

    /// Emoji or icon token
    pub emoji: String,

    /// Short description, also the flavor text fallback
    pub description: String,
}

impl TypeDef {
    /// Create a new type definition
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            emoji: emoji.into(),
            description: description.into(),
        }
    }
}

/// Landing page card for a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCard {
    pub emoji: String,
    pub title: String,
    pub description: String,
}

/// A complete quiz definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique theme identifier
    pub id: String,

    /// Title announced at the start of the chat
    pub title: String,

    /// Humor register of the copy (e.g. "witty", "kansai")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humor_style: Option<String>,

    /// Optional landing card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<ThemeCard>,

    /// Questions in asking order
    pub questions: Vec<Question>,

    /// Result rules
    pub rules: RuleSet,

    /// Result types. May contain types no rule reaches.
    pub types: Vec<TypeDef>,
}

impl Theme {
    /// Create a new theme with no questions or types
    pub fn new(id: impl Into<String>, title: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            humor_style: None,
            card: None,
            questions: Vec::new(),
            rules,
            types: Vec::new(),
        }
    }

    /// Set the humor style
    pub fn with_humor_style(mut self, style: impl Into<String>) -> Self {
        self.humor_style = Some(style.into());
        self
    }

    /// Set the landing card
    pub fn with_card(mut self, card: ThemeCard) -> Self {
        self.card = Some(card);
        self
    }

    /// Add a question
    pub fn add_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Add a result type
    pub fn add_type(mut self, type_def: TypeDef) -> Self {
        self.types.push(type_def);
        self
    }

    /// Number of questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Question at `index`
    pub fn question(&self, index: usize) -> Result<&Question> {
        self.questions
            .get(index)
            .ok_or(CoreError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// Question by identifier
    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Result type by identifier
    pub fn find_type(&self, id: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Types that no rule and not the fallback point at
    pub fn unreferenced_types(&self) -> Vec<&TypeDef> {
        let referenced: Vec<&str> = self.rules.referenced_type_ids().collect();
        self.types
            .iter()
            .filter(|t| !referenced.contains(&t.id.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rule;

    fn sample_theme() -> Theme {
        Theme::new(
            "aimodel",
            "あなたをAIモデルに例えると？",
            RuleSet::new("t_gpt").add_rule(Rule::new("t_bert").when("q1", "計画的に積む")),
        )
        .add_question(Question::new(
            "q1",
            "アイデアの出し方",
            vec!["ひらめき一発".into(), "計画的に積む".into()],
        ))
        .add_type(TypeDef::new("t_gpt", "GPT", "🧠", "多芸多才なゼネラリスト"))
        .add_type(TypeDef::new("t_bert", "BERT", "📚", "読み解き・要約の職人"))
        .add_type(TypeDef::new("t_rnn", "RNN", "🔁", "味わい深い伝統派"))
    }

    #[test]
    fn test_lookup() {
        let theme = sample_theme();

        assert_eq!(theme.question_count(), 1);
        assert_eq!(theme.question(0).unwrap().id, "q1");
        assert!(theme.find_question("q9").is_none());
        assert_eq!(theme.find_type("t_bert").unwrap().label, "BERT");
    }

    #[test]
    fn test_question_out_of_range() {
        let theme = sample_theme();
        assert_eq!(
            theme.question(3).unwrap_err(),
            CoreError::QuestionOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_unreferenced_types() {
        let theme = sample_theme();
        let dead: Vec<_> = theme.unreferenced_types().iter().map(|t| t.id.clone()).collect();
        assert_eq!(dead, vec!["t_rnn".to_string()]);
    }
}
