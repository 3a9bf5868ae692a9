//! Unit tests for shindan-runtime
//!
//! Exercises the resolver, session state machine and presentation helpers
//! through the public API.

use shindan_core::{AnswerSet, Question, Rule, RuleSet, Theme, TypeDef};
use shindan_runtime::{
    share_text, Action, Clipboard, ClipboardError, CopyConfirmation, Decision, Delays,
    FlavorTable, Progress, Role, RuleResolver, Script, Session, SessionDriver, SessionError,
    ShareLinks, Stage, Step,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn opts(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Three questions, overlapping rules, fallback to t_plain
fn tea_theme() -> Theme {
    Theme::new(
        "tea",
        "お茶診断",
        RuleSet::new("t_plain")
            .add_rule(Rule::new("t_matcha").when("q1", "濃い").when("q2", "熱い"))
            .add_rule(Rule::new("t_mugi").when("q2", "冷たい"))
            .add_rule(Rule::new("t_matcha").when("q3", "朝")),
    )
    .add_question(Question::new("q1", "濃さ", opts(&["濃い", "薄い"])))
    .add_question(Question::new("q2", "温度", opts(&["熱い", "冷たい"])))
    .add_question(Question::new("q3", "時間", opts(&["朝", "夜"])))
    .add_type(TypeDef::new("t_matcha", "抹茶", "🍵", "渋みの分かる大人"))
    .add_type(TypeDef::new("t_mugi", "麦茶", "🧊", "夏の定番"))
    .add_type(TypeDef::new("t_plain", "白湯", "♨️", "素朴な癒やし"))
}

fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

// ========== Resolver Tests ==========

#[test]
fn test_resolver_first_match() {
    let theme = tea_theme();

    // Matches rules 0 and 2; rule 0 wins.
    let set = answers(&[("q1", "濃い"), ("q2", "熱い"), ("q3", "朝")]);
    let resolution = RuleResolver::new().evaluate(&theme, &set);
    assert_eq!(resolution.decision, Decision::Rule(0));
    assert_eq!(resolution.type_id, "t_matcha");
    assert!(resolution.trace.is_none());
}

#[test]
fn test_resolver_fallback() {
    let theme = tea_theme();
    let set = answers(&[("q1", "薄い"), ("q2", "熱い"), ("q3", "夜")]);

    let resolution = RuleResolver::new().evaluate(&theme, &set);
    assert_eq!(resolution.decision, Decision::Fallback);
    assert_eq!(resolution.type_def.unwrap().label, "白湯");
}

#[test]
fn test_resolver_empty_answers_reach_fallback() {
    let theme = tea_theme();
    let resolved = RuleResolver::resolve(&theme, &AnswerSet::new()).unwrap();
    assert_eq!(resolved.id, "t_plain");
}

#[test]
fn test_resolver_trace_stops_at_first_failing_condition() {
    let theme = tea_theme();
    let set = answers(&[("q1", "薄い"), ("q2", "冷たい")]);

    let resolution = RuleResolver::new().with_trace().evaluate(&theme, &set);
    let trace = resolution.trace.unwrap();

    assert_eq!(trace.rules.len(), 2);
    assert!(!trace.rules[0].matched);
    assert_eq!(trace.rules[0].conditions.len(), 1);
    assert_eq!(trace.rules[0].conditions[0].actual.as_deref(), Some("薄い"));
    assert!(trace.rules[1].matched);
    assert_eq!(trace.matched_rule(), Some(1));
    assert!(!trace.fallback_used);
    assert_eq!(trace.type_id, "t_mugi");
}

#[test]
fn test_resolver_undefined_type_is_none() {
    let theme = Theme::new("bad", "Bad", RuleSet::new("t_ghost"))
        .add_question(Question::new("q1", "one", opts(&["a", "b"])));

    let resolution = RuleResolver::new().evaluate(&theme, &answers(&[("q1", "a")]));
    assert_eq!(resolution.type_id, "t_ghost");
    assert!(resolution.type_def.is_none());
}

// ========== Session Tests ==========

#[test]
fn test_session_walkthrough() -> anyhow::Result<()> {
    let mut session = Session::new(Script::default(), Delays::immediate());
    assert_eq!(session.stage(), Stage::Landing);
    assert_eq!(session.progress(), Progress { completed: 0, total: 0 });

    session.apply(Action::SelectTheme(Arc::new(tea_theme())))?;
    let accept = session.action_for("はい、楽しみます！").unwrap();
    let mut pending = session.apply(accept)?;

    for option in ["薄い", "冷たい", "夜"] {
        let schedule = pending.take().unwrap();
        assert!(session.fire(schedule.step)?);
        pending = session.apply(Action::Answer(option.to_string()))?;
    }

    let schedule = pending.unwrap();
    assert_eq!(schedule.step.step, Step::RevealResult);
    assert!(session.fire(schedule.step)?);

    assert_eq!(session.stage(), Stage::Result);
    assert_eq!(session.result().unwrap().id, "t_mugi");
    assert_eq!(
        session.resolution().unwrap().decision,
        Decision::Rule(1)
    );
    Ok(())
}

#[test]
fn test_session_fire_twice_is_stale() -> anyhow::Result<()> {
    let mut session = Session::default();
    session.apply(Action::SelectTheme(Arc::new(tea_theme())))?;
    let schedule = session.apply(Action::AcceptConsent)?.unwrap();

    assert!(session.fire(schedule.step)?);
    assert!(!session.fire(schedule.step)?);
    assert_eq!(
        session
            .transcript()
            .iter()
            .filter(|m| m.id == "q-q1")
            .count(),
        1
    );
    Ok(())
}

#[test]
fn test_session_retry_only_on_result() {
    let mut session = Session::default();
    session
        .apply(Action::SelectTheme(Arc::new(tea_theme())))
        .unwrap();

    let err = session.apply(Action::Retry).unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidAction {
            action: "retry",
            stage: Stage::Consent
        }
    );
    assert_eq!(err.to_string(), "Action 'retry' is not valid in stage 'consent'");
}

#[test]
fn test_select_theme_outside_landing_is_rejected() {
    let mut session = Session::default();
    let theme = Arc::new(tea_theme());
    session.apply(Action::SelectTheme(theme.clone())).unwrap();

    assert!(matches!(
        session.apply(Action::SelectTheme(theme)),
        Err(SessionError::InvalidAction { .. })
    ));
}

#[test]
fn test_custom_script() {
    let script = Script {
        announcement: "テーマ: {title}".to_string(),
        ..Script::default()
    };
    let mut session = Session::new(script, Delays::default());
    session
        .apply(Action::SelectTheme(Arc::new(tea_theme())))
        .unwrap();

    assert_eq!(
        session.transcript()[1].text.as_deref(),
        Some("テーマ: お茶診断")
    );
    assert!(session.transcript().iter().all(|m| m.role == Role::Bot));
}

// ========== Driver Tests ==========

#[tokio::test(start_paused = true)]
async fn test_driver_delays_are_ordered() {
    let mut driver = SessionDriver::new(Session::default());
    driver
        .dispatch(Action::SelectTheme(Arc::new(tea_theme())))
        .unwrap();

    let start = tokio::time::Instant::now();
    driver.dispatch(Action::AcceptConsent).unwrap();
    driver.settle().await.unwrap();
    let after_consent = start.elapsed();

    driver.dispatch(Action::Answer("濃い".to_string())).unwrap();
    driver.settle().await.unwrap();
    let after_answer = start.elapsed();

    assert!(after_consent >= Duration::from_millis(200));
    assert!(after_answer - after_consent >= Duration::from_millis(300));
    assert_eq!(driver.session().question_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_driver_retry_waits_before_first_question() {
    let delays = Delays {
        retry: Duration::from_millis(400),
        ..Delays::immediate()
    };
    let mut driver = SessionDriver::new(Session::new(Script::default(), delays));
    driver
        .dispatch(Action::SelectTheme(Arc::new(tea_theme())))
        .unwrap();
    driver.dispatch(Action::AcceptConsent).unwrap();
    driver.settle().await.unwrap();
    for option in ["濃い", "熱い", "朝"] {
        driver.dispatch(Action::Answer(option.to_string())).unwrap();
        driver.settle().await.unwrap();
    }
    assert_eq!(driver.session().result().unwrap().id, "t_matcha");

    let start = tokio::time::Instant::now();
    driver.dispatch(Action::Retry).unwrap();
    assert!(driver.session().options().is_empty());
    driver.settle().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(400));
    assert_eq!(driver.session().options(), &["濃い", "薄い"]);
}

// ========== Presentation Tests ==========

struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("denied".to_string()))
    }
}

#[test]
fn test_failed_copy_shows_nothing() {
    let mut confirmation = CopyConfirmation::default();
    let now = Instant::now();

    assert!(!confirmation.copy(&mut FailingClipboard, "text", now));
    assert!(!confirmation.is_shown(now));
}

#[test]
fn test_flavor_falls_back_to_description() {
    let theme = tea_theme();
    let mut flavor = FlavorTable::new();
    flavor.set_theme(
        "tea",
        HashMap::from([("t_matcha".to_string(), "点てる所作まで美しい。".to_string())]),
    );

    let matcha = theme.find_type("t_matcha").unwrap();
    let mugi = theme.find_type("t_mugi").unwrap();
    assert_eq!(flavor.text_for("tea", matcha), "点てる所作まで美しい。");
    assert_eq!(flavor.text_for("tea", mugi), "夏の定番");
}

#[test]
fn test_share_links_carry_share_text() {
    let theme = tea_theme();
    let text = share_text(theme.find_type("t_mugi").unwrap());
    assert_eq!(text, "私は麦茶タイプでした！ 🧊 #ユーモア診断アプリ");

    let links = ShareLinks::build(&text, "https://example.com/");
    let encoded = urlencoding::encode(&text).into_owned();
    assert!(links.x.ends_with(&encoded));
    assert!(links.line.ends_with(&format!("&text={}", encoded)));
}
