//! User actions and scheduled steps

use shindan_core::Theme;
use std::sync::Arc;
use std::time::Duration;

/// Something the user did
#[derive(Debug, Clone)]
pub enum Action {
    SelectTheme(Arc<Theme>),
    AcceptConsent,
    DeclineConsent,
    Answer(String),
    Retry,
    GoHome,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectTheme(_) => "select_theme",
            Action::AcceptConsent => "accept_consent",
            Action::DeclineConsent => "decline_consent",
            Action::Answer(_) => "answer",
            Action::Retry => "retry",
            Action::GoHome => "go_home",
        }
    }
}

/// Work deferred behind a typing delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Post question `n` and offer its options
    AskQuestion(usize),
    /// Drop the typing indicator and show the result
    RevealResult,
    /// Return to the initial empty state
    Reset,
}

/// A step tagged with the session epoch it was scheduled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub epoch: u64,
    pub step: Step,
}

/// Request to fire `step` after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub step: ScheduledStep,
    pub delay: Duration,
}
