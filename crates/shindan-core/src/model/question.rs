//! Question definitions

use serde::{Deserialize, Serialize};

/// Kind of answer a question accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Pick exactly one of the listed options
    #[default]
    Choice,
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier, used as the answer key (e.g. "q1")
    pub id: String,

    /// Prompt shown to the user
    pub text: String,

    #[serde(rename = "type", default)]
    pub kind: QuestionKind,

    /// Offered options in display order
    pub options: Vec<String>,

    /// Reserved. Rule matching does not read it.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Question {
    /// Create a new choice question with weight 1
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Choice,
            options,
            weight: default_weight(),
        }
    }

    /// Set the weight
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Whether `value` is one of the offered options
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}
