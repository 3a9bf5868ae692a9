//! Resolution tracing types
//!
//! These structures capture how each rule was evaluated against an answer
//! set, for debugging theme tables.

use serde::{Deserialize, Serialize};

/// Trace of a single condition evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTrace {
    pub question_id: String,

    pub expected: String,

    /// The recorded answer, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,

    pub result: bool,
}

/// Trace of a single rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTrace {
    /// Position in the rule list
    pub index: usize,

    /// Type the rule targets
    pub type_id: String,

    pub matched: bool,

    /// Conditions evaluated before the rule was decided. Evaluation stops
    /// at the first failing condition.
    pub conditions: Vec<ConditionTrace>,
}

impl RuleTrace {
    /// Create a new rule trace
    pub fn new(index: usize, type_id: impl Into<String>) -> Self {
        Self {
            index,
            type_id: type_id.into(),
            matched: false,
            conditions: Vec::new(),
        }
    }
}

/// Trace of a whole resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    /// Rules evaluated, in order, up to and including the matching one
    pub rules: Vec<RuleTrace>,

    pub fallback_used: bool,

    /// Selected type id (present even when the theme lacks that type)
    pub type_id: String,
}

impl ResolutionTrace {
    /// Index of the rule that matched, if any
    pub fn matched_rule(&self) -> Option<usize> {
        self.rules.iter().find(|r| r.matched).map(|r| r.index)
    }
}
