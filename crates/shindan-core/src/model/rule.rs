//! Rule definitions
//!
//! A rule is a conjunction of `question == option` conditions mapped to a
//! result type. A rule set keeps rules in declared order plus the fallback
//! type used when nothing matches.

use crate::answers::AnswerSet;
use serde::{Deserialize, Serialize};

/// A single `question == expected option` condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Question identifier
    pub question_id: String,

    /// Option value the answer must equal
    pub expected: String,
}

impl Condition {
    /// Create a new condition
    pub fn new(question_id: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            expected: expected.into(),
        }
    }

    /// A missing answer never satisfies a condition.
    pub fn is_satisfied_by(&self, answers: &AnswerSet) -> bool {
        answers.get(&self.question_id) == Some(self.expected.as_str())
    }
}

/// Rule definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Conditions that must all hold, over a subset of the theme's questions
    pub conditions: Vec<Condition>,

    /// Result type selected when the rule matches
    pub type_id: String,
}

impl Rule {
    /// Create a new rule with no conditions
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            conditions: Vec::new(),
            type_id: type_id.into(),
        }
    }

    /// Add a condition
    pub fn when(mut self, question_id: impl Into<String>, expected: impl Into<String>) -> Self {
        self.conditions.push(Condition::new(question_id, expected));
        self
    }

    /// Whether every condition of this rule is also a condition of `other`.
    ///
    /// If so, this rule matches every answer set `other` matches.
    pub fn is_subset_of(&self, other: &Rule) -> bool {
        self.conditions
            .iter()
            .all(|c| other.conditions.contains(c))
    }

    /// Question ids referenced by this rule
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|c| c.question_id.as_str())
    }
}

/// Ordered rules plus a fallback type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules in evaluation order
    #[serde(rename = "map")]
    pub rules: Vec<Rule>,

    /// Type selected when no rule matches
    pub fallback: String,
}

impl RuleSet {
    /// Create an empty rule set with the given fallback
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Append a rule
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace all rules
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Every type id referenced by a rule or the fallback
    pub fn referenced_type_ids(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(|r| r.type_id.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }
}
