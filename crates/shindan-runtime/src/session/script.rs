//! Chat copy and typing delays

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bot lines and button labels used by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub greeting: String,
    /// `{title}` is replaced by the theme title
    pub announcement: String,
    pub consent_prompt: String,
    pub accept_label: String,
    pub decline_label: String,
    pub farewell: String,
    pub restart: String,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            greeting: "こんにちは！3分で笑って帰れます。準備OK？ 😊".to_string(),
            announcement: "今日は「{title}」で診断しますね！".to_string(),
            consent_prompt: "これはジョークです。診断結果は娯楽目的に限ります。よろしいですか？"
                .to_string(),
            accept_label: "はい、楽しみます！".to_string(),
            decline_label: "いいえ".to_string(),
            farewell: "また遊びに来てくださいね！".to_string(),
            restart: "もう一度やってみましょう！".to_string(),
        }
    }
}

impl Script {
    /// Announcement line for a theme title
    pub fn announce(&self, title: &str) -> String {
        self.announcement.replace("{title}", title)
    }
}

/// Simulated typing delays before each scheduled step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Consent accepted → first question
    pub consent_accept: Duration,
    /// Answer → next question
    pub next_question: Duration,
    /// Last answer → result
    pub reveal_result: Duration,
    /// Retry → first question
    pub retry: Duration,
    /// Decline → back to landing
    pub decline_reset: Duration,
}

impl Delays {
    /// All delays zero, for tests and non-interactive runs
    pub fn immediate() -> Self {
        Self {
            consent_accept: Duration::ZERO,
            next_question: Duration::ZERO,
            reveal_result: Duration::ZERO,
            retry: Duration::ZERO,
            decline_reset: Duration::ZERO,
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            consent_accept: Duration::from_millis(200),
            next_question: Duration::from_millis(300),
            reveal_result: Duration::from_millis(1200),
            retry: Duration::from_millis(400),
            decline_reset: Duration::from_millis(1200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce() {
        let script = Script::default();
        assert_eq!(
            script.announce("関西つっこみタイプ診断"),
            "今日は「関西つっこみタイプ診断」で診断しますね！"
        );
    }

    #[test]
    fn test_partial_script_deserializes_with_defaults() {
        let script: Script = serde_json::from_str(r#"{"farewell": "またね"}"#).unwrap();
        assert_eq!(script.farewell, "またね");
        assert_eq!(script.decline_label, "いいえ");
    }
}
