//! Exhaustive answer-space coverage
//!
//! Every theme has a small finite answer space (options per question,
//! multiplied out), so it can be checked completely: each combination must
//! resolve to a defined type.

use serde::Serialize;
use shindan_core::{AnswerSet, Theme};
use shindan_runtime::{Decision, RuleResolver};
use std::collections::BTreeMap;

/// Result of resolving every answer combination of a theme
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub theme_id: String,

    /// Number of combinations evaluated
    pub combinations: usize,

    /// Combinations that resolved to no defined type
    pub unresolved: Vec<AnswerSet>,

    /// Hits per type id, for types that were reached
    pub type_hits: BTreeMap<String, usize>,

    /// Hits per rule index; rules that never win are absent
    pub rule_hits: BTreeMap<usize, usize>,

    /// Combinations decided by the fallback
    pub fallback_hits: usize,

    /// Types defined in the theme that no combination reaches
    pub unreachable_types: Vec<String>,
}

impl CoverageReport {
    /// Resolve every combination of `theme`'s options
    pub fn for_theme(theme: &Theme) -> Self {
        let resolver = RuleResolver::new();
        let mut report = Self {
            theme_id: theme.id.clone(),
            combinations: 0,
            unresolved: Vec::new(),
            type_hits: BTreeMap::new(),
            rule_hits: BTreeMap::new(),
            fallback_hits: 0,
            unreachable_types: Vec::new(),
        };

        for answers in Combinations::new(theme) {
            report.combinations += 1;
            let resolution = resolver.evaluate(theme, &answers);

            match resolution.decision {
                Decision::Rule(index) => *report.rule_hits.entry(index).or_default() += 1,
                Decision::Fallback => report.fallback_hits += 1,
            }

            match resolution.type_def {
                Some(type_def) => *report.type_hits.entry(type_def.id.clone()).or_default() += 1,
                None => report.unresolved.push(answers),
            }
        }

        report.unreachable_types = theme
            .types
            .iter()
            .filter(|t| !report.type_hits.contains_key(&t.id))
            .map(|t| t.id.clone())
            .collect();

        tracing::debug!(
            theme = %theme.id,
            combinations = report.combinations,
            unresolved = report.unresolved.len(),
            "Computed coverage"
        );

        report
    }

    /// Every combination resolves to a defined type
    pub fn is_total(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Rules that never decide any combination
    pub fn dead_rules(&self, theme: &Theme) -> Vec<usize> {
        (0..theme.rules.rules.len())
            .filter(|i| !self.rule_hits.contains_key(i))
            .collect()
    }
}

/// Odometer over every option combination of a theme
struct Combinations<'a> {
    theme: &'a Theme,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    fn new(theme: &'a Theme) -> Self {
        let done = theme.questions.is_empty() || theme.questions.iter().any(|q| q.options.is_empty());
        Self {
            theme,
            indices: vec![0; theme.questions.len()],
            done,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = AnswerSet;

    fn next(&mut self) -> Option<AnswerSet> {
        if self.done {
            return None;
        }

        let current = self
            .theme
            .questions
            .iter()
            .zip(&self.indices)
            .map(|(q, &i)| (q.id.as_str(), q.options[i].as_str()))
            .collect();

        // Advance the last question first.
        self.done = true;
        for (pos, question) in self.theme.questions.iter().enumerate().rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < question.options.len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }

        Some(current)
    }
}
