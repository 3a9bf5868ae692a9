//! Configuration types for QuizEngine

use serde::{Deserialize, Serialize};
use shindan_runtime::{Delays, Script};
use std::path::PathBuf;
use std::time::Duration;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory of extra `*.yaml` theme files
    pub theme_dir: Option<PathBuf>,

    /// Theme contents (name, yaml) - alternative to a directory
    #[serde(skip)]
    pub theme_contents: Vec<(String, String)>,

    /// Load the themes compiled into this crate
    pub include_builtin: bool,

    /// Fail to build if any theme has validation errors
    pub strict: bool,

    /// Typing delays
    pub delays: DelayConfig,

    /// Chat copy
    pub script: Script,

    /// Page URL passed to share links
    pub page_url: String,

    /// How long the "copied" confirmation stays visible
    pub copy_confirmation_ms: u64,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            theme_dir: None,
            theme_contents: Vec::new(),
            include_builtin: true,
            strict: false,
            delays: DelayConfig::default(),
            script: Script::default(),
            page_url: "https://example.com/".to_string(),
            copy_confirmation_ms: 1500,
        }
    }

    /// Set the theme directory
    pub fn with_theme_dir(mut self, path: PathBuf) -> Self {
        self.theme_dir = Some(path);
        self
    }

    /// Set the page URL used in share links
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = url.into();
        self
    }

    pub fn copy_confirmation(&self) -> Duration {
        Duration::from_millis(self.copy_confirmation_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Typing delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub consent_accept_ms: u64,
    pub next_question_ms: u64,
    pub reveal_result_ms: u64,
    pub retry_ms: u64,
    pub decline_reset_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self::from(Delays::default())
    }
}

impl From<Delays> for DelayConfig {
    fn from(delays: Delays) -> Self {
        let ms = |d: Duration| d.as_millis() as u64;
        Self {
            consent_accept_ms: ms(delays.consent_accept),
            next_question_ms: ms(delays.next_question),
            reveal_result_ms: ms(delays.reveal_result),
            retry_ms: ms(delays.retry),
            decline_reset_ms: ms(delays.decline_reset),
        }
    }
}

impl From<DelayConfig> for Delays {
    fn from(config: DelayConfig) -> Self {
        Self {
            consent_accept: Duration::from_millis(config.consent_accept_ms),
            next_question: Duration::from_millis(config.next_question_ms),
            reveal_result: Duration::from_millis(config.reveal_result_ms),
            retry: Duration::from_millis(config.retry_ms),
            decline_reset: Duration::from_millis(config.decline_reset_ms),
        }
    }
}
