//! Rule resolver
//!
//! Maps a completed answer set to a result type: the first rule whose
//! conditions all hold wins, otherwise the rule set's fallback applies.
//! Pure and deterministic.

use crate::trace::{ConditionTrace, ResolutionTrace, RuleTrace};
use shindan_core::{AnswerSet, Rule, Theme, TypeDef};

/// What decided a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Rule at this index matched
    Rule(usize),
    /// No rule matched
    Fallback,
}

/// Outcome of evaluating a theme's rules
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub decision: Decision,

    /// Selected type id
    pub type_id: &'a str,

    /// `None` when the theme has no type with `type_id`, which is a
    /// configuration defect rather than a runtime failure.
    pub type_def: Option<&'a TypeDef>,

    pub trace: Option<ResolutionTrace>,
}

/// Rule resolver
#[derive(Debug, Clone, Default)]
pub struct RuleResolver {
    enable_trace: bool,
}

impl RuleResolver {
    /// Create a new resolver without tracing
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation trace on every resolution
    pub fn with_trace(mut self) -> Self {
        self.enable_trace = true;
        self
    }

    /// Resolve `answers` to a result type of `theme`
    pub fn resolve<'a>(theme: &'a Theme, answers: &AnswerSet) -> Option<&'a TypeDef> {
        Self::new().evaluate(theme, answers).type_def
    }

    /// Evaluate the rule list and report which rule (or the fallback) decided
    pub fn evaluate<'a>(&self, theme: &'a Theme, answers: &AnswerSet) -> Resolution<'a> {
        let mut trace = self.enable_trace.then(ResolutionTrace::default);

        let mut decision = Decision::Fallback;
        for (index, rule) in theme.rules.rules.iter().enumerate() {
            let matched = match trace.as_mut() {
                Some(trace) => {
                    let rule_trace = Self::trace_rule(index, rule, answers);
                    let matched = rule_trace.matched;
                    trace.rules.push(rule_trace);
                    matched
                }
                None => Self::matches(rule, answers),
            };

            if matched {
                decision = Decision::Rule(index);
                break;
            }
        }

        let type_id = match decision {
            Decision::Rule(index) => theme.rules.rules[index].type_id.as_str(),
            Decision::Fallback => theme.rules.fallback.as_str(),
        };

        let type_def = theme.find_type(type_id);
        if type_def.is_none() {
            tracing::warn!(
                theme = %theme.id,
                type_id,
                "Resolved type is not defined in theme; no result"
            );
        }

        tracing::debug!(theme = %theme.id, ?decision, type_id, "Resolved answers");

        if let Some(trace) = trace.as_mut() {
            trace.fallback_used = decision == Decision::Fallback;
            trace.type_id = type_id.to_string();
        }

        Resolution {
            decision,
            type_id,
            type_def,
            trace,
        }
    }

    /// Whether every condition of `rule` holds for `answers`
    pub fn matches(rule: &Rule, answers: &AnswerSet) -> bool {
        rule.conditions.iter().all(|c| c.is_satisfied_by(answers))
    }

    fn trace_rule(index: usize, rule: &Rule, answers: &AnswerSet) -> RuleTrace {
        let mut rule_trace = RuleTrace::new(index, rule.type_id.clone());
        let mut matched = true;

        for condition in &rule.conditions {
            let result = condition.is_satisfied_by(answers);
            rule_trace.conditions.push(ConditionTrace {
                question_id: condition.question_id.clone(),
                expected: condition.expected.clone(),
                actual: answers.get(&condition.question_id).map(str::to_string),
                result,
            });
            if !result {
                matched = false;
                break;
            }
        }

        rule_trace.matched = matched;
        rule_trace
    }
}
