//! Session state and transitions

use super::action::{Action, Schedule, ScheduledStep, Step};
use super::message::{Message, Role};
use super::script::{Delays, Script};
use super::stage::{Progress, Stage};
use crate::error::{Result, SessionError};
use crate::resolver::{Resolution, RuleResolver};
use shindan_core::{AnswerSet, Theme, TypeDef};
use std::sync::Arc;
use std::time::Duration;

/// One user's progression from theme selection to result
///
/// Every reset (theme selection, retry, go home, decline) bumps `epoch`.
/// Scheduled steps carry the epoch they were created in and are ignored
/// once it is stale, so a late timer cannot write into a reset session.
#[derive(Debug, Clone)]
pub struct Session {
    epoch: u64,
    stage: Stage,
    theme: Option<Arc<Theme>>,
    question_index: usize,
    answers: AnswerSet,
    transcript: Vec<Message>,
    options: Vec<String>,
    pending: Option<ScheduledStep>,
    script: Script,
    delays: Delays,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Script::default(), Delays::default())
    }
}

impl Session {
    /// Create a session on the landing stage
    pub fn new(script: Script, delays: Delays) -> Self {
        Self {
            epoch: 0,
            stage: Stage::Landing,
            theme: None,
            question_index: 0,
            answers: AnswerSet::new(),
            transcript: Vec::new(),
            options: Vec::new(),
            pending: None,
            script,
            delays,
        }
    }

    // ========== Accessors ==========

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn theme(&self) -> Option<&Arc<Theme>> {
        self.theme.as_ref()
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Options the user can currently pick; empty while a step is pending
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<ScheduledStep> {
        self.pending
    }

    /// Answered questions out of the theme's total
    pub fn progress(&self) -> Progress {
        let total = self.theme.as_ref().map_or(0, |t| t.question_count());
        let completed = match self.stage {
            Stage::Questions => self.question_index,
            Stage::Result => total,
            Stage::Landing | Stage::Consent => 0,
        };
        Progress { completed, total }
    }

    /// Resolved result type; only available on the result stage
    pub fn result(&self) -> Option<&TypeDef> {
        self.resolution().and_then(|r| r.type_def)
    }

    /// Full resolution with the deciding rule; only on the result stage
    pub fn resolution(&self) -> Option<Resolution<'_>> {
        if self.stage != Stage::Result {
            return None;
        }
        let theme = self.theme.as_deref()?;
        Some(RuleResolver::new().evaluate(theme, &self.answers))
    }

    /// Map an offered option label to the action it triggers
    pub fn action_for(&self, option: &str) -> Option<Action> {
        if !self.options.iter().any(|o| o == option) {
            return None;
        }
        match self.stage {
            Stage::Consent if option == self.script.accept_label => Some(Action::AcceptConsent),
            Stage::Consent if option == self.script.decline_label => Some(Action::DeclineConsent),
            Stage::Questions => Some(Action::Answer(option.to_string())),
            _ => None,
        }
    }

    // ========== Transitions ==========

    /// Apply a user action
    ///
    /// Returns the step to fire later, if the transition has one. On error
    /// the session is unchanged.
    pub fn apply(&mut self, action: Action) -> Result<Option<Schedule>> {
        let name = action.name();

        if self.pending.is_some() && !matches!(action, Action::GoHome) {
            return Err(SessionError::TransitionPending);
        }

        let schedule = match (self.stage, action) {
            (_, Action::GoHome) => {
                self.reset();
                None
            }
            (Stage::Landing, Action::SelectTheme(theme)) => {
                if theme.questions.is_empty() {
                    return Err(SessionError::EmptyTheme(theme.id.clone()));
                }
                self.select_theme(theme);
                None
            }
            (Stage::Consent, Action::AcceptConsent) => Some(self.accept_consent()),
            (Stage::Consent, Action::DeclineConsent) => Some(self.decline_consent()),
            (Stage::Questions, Action::Answer(value)) => Some(self.answer(value)?),
            (Stage::Result, Action::Retry) => Some(self.retry()),
            (stage, _) => {
                return Err(SessionError::InvalidAction {
                    action: name,
                    stage,
                })
            }
        };

        tracing::debug!(
            action = name,
            stage = %self.stage,
            epoch = self.epoch,
            "Applied session action"
        );

        Ok(schedule)
    }

    /// Fire a scheduled step
    ///
    /// Returns `false` when the step is stale (scheduled before a reset or
    /// not the step currently pending) and was ignored.
    pub fn fire(&mut self, scheduled: ScheduledStep) -> Result<bool> {
        if scheduled.epoch != self.epoch || self.pending != Some(scheduled) {
            tracing::debug!(
                step = ?scheduled.step,
                step_epoch = scheduled.epoch,
                epoch = self.epoch,
                "Ignoring stale scheduled step"
            );
            return Ok(false);
        }
        self.pending = None;

        match scheduled.step {
            Step::AskQuestion(index) => self.ask_question(index)?,
            Step::RevealResult => {
                self.transcript.retain(|m| m.role != Role::Typing);
                self.stage = Stage::Result;
            }
            Step::Reset => self.reset(),
        }

        tracing::debug!(step = ?scheduled.step, stage = %self.stage, "Fired scheduled step");
        Ok(true)
    }

    fn select_theme(&mut self, theme: Arc<Theme>) {
        self.epoch += 1;
        self.stage = Stage::Consent;
        self.question_index = 0;
        self.answers.clear();
        self.transcript = vec![
            Message::bot("m1", self.script.greeting.clone()),
            Message::bot("m2", self.script.announce(&theme.title)),
            Message::bot("m3", self.script.consent_prompt.clone()),
        ];
        self.options = vec![
            self.script.accept_label.clone(),
            self.script.decline_label.clone(),
        ];
        tracing::info!(theme = %theme.id, epoch = self.epoch, "Theme selected");
        self.theme = Some(theme);
    }

    fn accept_consent(&mut self) -> Schedule {
        self.stage = Stage::Questions;
        self.transcript
            .push(Message::user("u-consent", self.script.accept_label.clone()));
        self.options.clear();
        self.schedule(Step::AskQuestion(0), self.delays.consent_accept)
    }

    fn decline_consent(&mut self) -> Schedule {
        self.transcript
            .push(Message::user("u-consent-no", self.script.decline_label.clone()));
        self.transcript
            .push(Message::bot("bye", self.script.farewell.clone()));
        self.options.clear();
        self.schedule(Step::Reset, self.delays.decline_reset)
    }

    fn answer(&mut self, value: String) -> Result<Schedule> {
        if !self.options.contains(&value) {
            return Err(SessionError::UnknownOption(value));
        }
        let theme = self.active_theme()?;
        let question = theme.question(self.question_index)?;
        let question_id = question.id.clone();
        let total = theme.question_count();

        self.transcript
            .push(Message::user(format!("u-{}", question_id), value.clone()));
        self.answers.record(question_id, value);
        self.options.clear();

        let next = self.question_index + 1;
        if next < total {
            Ok(self.schedule(Step::AskQuestion(next), self.delays.next_question))
        } else {
            self.transcript.push(Message::typing());
            Ok(self.schedule(Step::RevealResult, self.delays.reveal_result))
        }
    }

    fn retry(&mut self) -> Schedule {
        self.epoch += 1;
        self.stage = Stage::Questions;
        self.transcript = vec![Message::bot("again", self.script.restart.clone())];
        self.question_index = 0;
        self.answers.clear();
        self.options.clear();
        self.schedule(Step::AskQuestion(0), self.delays.retry)
    }

    fn ask_question(&mut self, index: usize) -> Result<()> {
        let theme = self.active_theme()?;
        let question = theme.question(index)?;

        self.question_index = index;
        self.transcript
            .push(Message::bot(format!("q-{}", question.id), question.text.clone()));
        self.options = question.options.clone();
        Ok(())
    }

    fn reset(&mut self) {
        self.epoch += 1;
        self.stage = Stage::Landing;
        self.theme = None;
        self.question_index = 0;
        self.answers.clear();
        self.transcript.clear();
        self.options.clear();
        self.pending = None;
    }

    fn schedule(&mut self, step: Step, delay: Duration) -> Schedule {
        let step = ScheduledStep {
            epoch: self.epoch,
            step,
        };
        self.pending = Some(step);
        Schedule { step, delay }
    }

    fn active_theme(&self) -> Result<Arc<Theme>> {
        self.theme.clone().ok_or(SessionError::InvalidAction {
            action: "answer",
            stage: self.stage,
        })
    }
}
