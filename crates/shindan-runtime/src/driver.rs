//! Async session driver
//!
//! Applies user actions to a [`Session`] and fires the steps it schedules
//! after their delay. Timers are fire-and-forget tokio tasks; the session's
//! epoch check discards any that outlive a reset.

use crate::error::Result;
use crate::session::{Action, Schedule, ScheduledStep, Session};
use tokio::sync::mpsc;

/// Drives one session on a tokio runtime
pub struct SessionDriver {
    session: Session,
    tx: mpsc::UnboundedSender<ScheduledStep>,
    rx: mpsc::UnboundedReceiver<ScheduledStep>,
}

impl SessionDriver {
    /// Create a new driver around `session`
    pub fn new(session: Session) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { session, tx, rx }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply a user action and start the timer for any step it schedules
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        if let Some(schedule) = self.session.apply(action)? {
            self.spawn_timer(schedule);
        }
        Ok(())
    }

    /// Wait for the next timer and fire its step
    ///
    /// Returns `true` if the step was applied, `false` if it was stale.
    pub async fn next_step(&mut self) -> Result<bool> {
        match self.rx.recv().await {
            Some(step) => self.session.fire(step),
            // The driver holds a sender, so the channel never closes.
            None => Ok(false),
        }
    }

    /// Fire steps until nothing is pending
    pub async fn settle(&mut self) -> Result<()> {
        while self.session.is_pending() {
            self.next_step().await?;
        }
        Ok(())
    }

    fn spawn_timer(&self, schedule: Schedule) {
        let tx = self.tx.clone();
        tracing::trace!(step = ?schedule.step.step, delay_ms = schedule.delay.as_millis() as u64, "Scheduling step");
        tokio::spawn(async move {
            tokio::time::sleep(schedule.delay).await;
            // Receiver gone means the driver was dropped; nothing to do.
            let _ = tx.send(schedule.step);
        });
    }
}
