//! Non-interactive subcommands

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use shindan_parser::Diagnostic;
use shindan_runtime::{Decision, ResolutionTrace};
use shindan_sdk::{AnswerSet, CoverageReport, QuizEngine, ResultCard};

/// One line per theme, in landing order
pub fn list(engine: &QuizEngine) -> Vec<String> {
    engine
        .themes()
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let emoji = theme.card.as_ref().map_or("", |c| c.emoji.as_str());
            format!(
                "{:>2}. {:<18} {} {} ({} questions, {} types)",
                i + 1,
                theme.id,
                emoji,
                theme.title,
                theme.question_count(),
                theme.types.len()
            )
        })
        .collect()
}

/// Validation and coverage of one theme
#[derive(Debug, Serialize)]
pub struct ThemeCheck {
    pub theme_id: String,
    pub diagnostics: Vec<Diagnostic>,
    pub coverage: CoverageReport,
}

impl ThemeCheck {
    pub fn passed(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error) && self.coverage.is_total()
    }
}

/// Check every theme, or only `theme_id`
pub fn check(engine: &QuizEngine, theme_id: Option<&str>) -> anyhow::Result<Vec<ThemeCheck>> {
    let themes = match theme_id {
        Some(id) => vec![engine.theme(id)?],
        None => engine.themes().to_vec(),
    };

    Ok(themes
        .iter()
        .map(|theme| ThemeCheck {
            theme_id: theme.id.clone(),
            diagnostics: engine.catalog().diagnostics(&theme.id).to_vec(),
            coverage: CoverageReport::for_theme(theme),
        })
        .collect())
}

/// Human-readable check report
pub fn format_check(checks: &[ThemeCheck]) -> Vec<String> {
    let mut lines = Vec::new();
    for check in checks {
        let status = if check.passed() { "ok" } else { "FAILED" };
        lines.push(format!("{}: {}", check.theme_id, status));

        for diagnostic in &check.diagnostics {
            lines.push(format!("  {}", diagnostic));
        }

        let coverage = &check.coverage;
        lines.push(format!(
            "  {} combinations, {} by fallback, {} unresolved",
            coverage.combinations,
            coverage.fallback_hits,
            coverage.unresolved.len()
        ));
        for (type_id, hits) in &coverage.type_hits {
            lines.push(format!("    {:<16} {}", type_id, hits));
        }
        for type_id in &coverage.unreachable_types {
            lines.push(format!("    {:<16} unreachable", type_id));
        }
    }
    lines
}

/// Parse `qid=option` arguments into an answer set
pub fn parse_answers(pairs: &[String]) -> anyhow::Result<AnswerSet> {
    let mut answers = AnswerSet::new();
    for pair in pairs {
        let (qid, value) = pair
            .split_once('=')
            .map(|(qid, value)| (qid.trim(), value.trim()))
            .filter(|(qid, _)| !qid.is_empty())
            .ok_or_else(|| anyhow!("Expected QUESTION=OPTION, got '{}'", pair))?;

        if answers.record(qid, value).is_some() {
            bail!("Question '{}' answered more than once", qid);
        }
    }
    Ok(answers)
}

/// Outcome of the `resolve` subcommand
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub card: ResultCard,
    pub decided_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<ResolutionTrace>,
}

/// Resolve answers against a theme and build its result card
pub fn resolve(
    engine: &QuizEngine,
    theme_id: &str,
    answers: &AnswerSet,
    explain: bool,
) -> anyhow::Result<ResolveOutput> {
    let (decision, type_def, trace) = engine.explain(theme_id, answers, |resolution| {
        (
            resolution.decision,
            resolution.type_def.cloned(),
            resolution.trace.clone(),
        )
    })?;

    let Some(type_def) = type_def else {
        bail!("Theme '{}' resolved to an undefined type", theme_id);
    };

    let decided_by = match decision {
        Decision::Rule(index) => format!("rule {}", index),
        Decision::Fallback => "fallback".to_string(),
    };

    Ok(ResolveOutput {
        card: engine.present(theme_id, &type_def),
        decided_by,
        trace: trace.filter(|_| explain),
    })
}

/// Human-readable resolve output
pub fn format_resolve(output: &ResolveOutput) -> Vec<String> {
    let card = &output.card;
    let mut lines = vec![
        format!(
            "{} {} ({}) - decided by {}",
            card.type_def.emoji, card.type_def.label, card.type_def.id, output.decided_by
        ),
        card.flavor_text.clone(),
        card.share_text.clone(),
        format!("X:    {}", card.links.x),
        format!("LINE: {}", card.links.line),
    ];

    if let Some(trace) = &output.trace {
        for rule in &trace.rules {
            let mark = if rule.matched { "✓" } else { "✗" };
            let conditions: Vec<_> = rule
                .conditions
                .iter()
                .map(|c| {
                    format!(
                        "{}={} (got {})",
                        c.question_id,
                        c.expected,
                        c.actual.as_deref().unwrap_or("-")
                    )
                })
                .collect();
            lines.push(format!(
                "  {} rule {} → {}: {}",
                mark,
                rule.index,
                rule.type_id,
                conditions.join(", ")
            ));
        }
        if trace.fallback_used {
            lines.push(format!("  fallback → {}", trace.type_id));
        }
    }
    lines
}

/// Serialize any output as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
