//! Integration tests for rule resolution over the built-in themes

mod common;

use common::{answers, builtin_engine};
use shindan_core::CoreError;
use shindan_runtime::Decision;
use shindan_sdk::{CoverageReport, QuizEngineBuilder, SdkError};

// ============================================================================
// Built-in theme scenarios
// ============================================================================

#[test]
fn test_sushi_first_rule_wins() {
    let engine = builtin_engine();
    let result = engine
        .resolve(
            "sushi",
            &answers(&[
                ("q1", "すぐ全開"),
                ("q2", "当日勝負"),
                ("q3", "盛り上げ役"),
                ("q4", "ぷりっと"),
            ]),
        )
        .unwrap();

    // Also satisfies the t_ebi rule, which comes later.
    assert_eq!(result.unwrap().id, "t_maguro");
}

#[test]
fn test_sushi_last_rule() {
    let engine = builtin_engine();
    let set = answers(&[
        ("q1", "じわ上げ"),
        ("q2", "運命に任せる"),
        ("q3", "ミステリアス"),
        ("q4", "ふわっと"),
    ]);

    let decision = engine
        .explain("sushi", &set, |resolution| resolution.decision)
        .unwrap();
    assert_eq!(decision, Decision::Rule(4));
    assert_eq!(engine.resolve("sushi", &set).unwrap().unwrap().id, "t_salmon");
}

#[test]
fn test_kansai_fallback() {
    let engine = builtin_engine();
    let set = answers(&[
        ("q1", "ちょい待ち"),
        ("q2", "ピリッと"),
        ("q3", "乗っかる"),
        ("q4", "カオスで笑う"),
    ]);

    let (decision, fallback_used) = engine
        .explain("kansai_tsukkomi", &set, |resolution| {
            let trace = resolution.trace.as_ref().unwrap();
            (resolution.decision, trace.fallback_used)
        })
        .unwrap();

    assert_eq!(decision, Decision::Fallback);
    assert!(fallback_used);
    assert_eq!(
        engine.resolve("kansai_tsukkomi", &set).unwrap().unwrap().id,
        "t_donaiyanen"
    );
}

#[test]
fn test_subset_match_ignores_other_answers() {
    let engine = builtin_engine();
    let theme = engine.theme("aimodel").unwrap();

    for q2 in &theme.questions[1].options {
        for q3 in &theme.questions[2].options {
            let set = answers(&[
                ("q1", "ひらめき一発"),
                ("q2", q2.as_str()),
                ("q3", q3.as_str()),
                ("q4", "画像ネタ"),
            ]);
            let result = engine.resolve("aimodel", &set).unwrap().unwrap();
            assert_eq!(result.id, "t_diffusion");
        }
    }
}

#[test]
fn test_partial_answers_are_rejected() {
    let engine = builtin_engine();
    let set = answers(&[("q1", "すぐ全開"), ("q2", "当日勝負")]);

    let err = engine.resolve("sushi", &set).unwrap_err();
    assert!(matches!(
        err,
        SdkError::CoreError(CoreError::IncompleteAnswers { expected: 4, got: 2 })
    ));
}

#[test]
fn test_rule_order_matters() {
    let forward = r#"
theme:
  id: order
  title: 順番
  questions:
    - { id: q1, text: one, options: [a, b] }
    - { id: q2, text: two, options: [c, d] }
  rules:
    map:
      - if: { q1: a }
        type_id: t_first
      - if: { q2: c }
        type_id: t_second
    fallback: t_first
  types:
    - { id: t_first, label: First, emoji: "1️⃣", description: first }
    - { id: t_second, label: Second, emoji: "2️⃣", description: second }
"#;
    let reversed = forward.replace(
        "      - if: { q1: a }\n        type_id: t_first\n      - if: { q2: c }\n        type_id: t_second\n",
        "      - if: { q2: c }\n        type_id: t_second\n      - if: { q1: a }\n        type_id: t_first\n",
    );
    assert_ne!(forward, reversed);

    let set = answers(&[("q1", "a"), ("q2", "c")]);
    for (content, expected) in [(forward.to_string(), "t_first"), (reversed, "t_second")] {
        let engine = QuizEngineBuilder::new()
            .include_builtin(false)
            .add_theme_content("order.yaml", content)
            .build()
            .unwrap();
        assert_eq!(engine.resolve("order", &set).unwrap().unwrap().id, expected);
    }
}

// ============================================================================
// Exhaustive coverage
// ============================================================================

#[test]
fn test_every_combination_resolves() {
    let engine = builtin_engine();

    for report in engine.coverage_all() {
        assert_eq!(report.combinations, 81, "theme {}", report.theme_id);
        assert!(report.is_total(), "theme {} has unresolved answers", report.theme_id);
        assert_eq!(report.type_hits.values().sum::<usize>(), 81);
    }
}

#[test]
fn test_sushi_coverage_counts() {
    let report = builtin_engine().coverage("sushi").unwrap();

    assert_eq!(report.type_hits["t_salmon"], 47);
    assert_eq!(report.type_hits["t_maguro"], 17);
    assert_eq!(report.type_hits["t_tamago"], 9);
    assert_eq!(report.type_hits["t_ebi"], 8);
    assert_eq!(report.fallback_hits, 38);
    assert!(report.unreachable_types.is_empty());
}

#[test]
fn test_aimodel_rnn_unreachable() {
    let engine = builtin_engine();
    let theme = engine.theme("aimodel").unwrap();
    let report = CoverageReport::for_theme(&theme);

    assert_eq!(report.unreachable_types, vec!["t_rnn".to_string()]);
    assert!(report.dead_rules(&theme).is_empty());
    assert_eq!(report.type_hits["t_gpt"], 57);
}

#[test]
fn test_kansai_rules_each_decide_three() {
    let report = builtin_engine().coverage("kansai_tsukkomi").unwrap();

    assert_eq!(report.rule_hits.len(), 4);
    assert!(report.rule_hits.values().all(|&hits| hits == 3));
    assert_eq!(report.fallback_hits, 69);
    assert_eq!(report.type_hits["t_donaiyanen"], 72);
}
