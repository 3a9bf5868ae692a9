//! Clipboard copy with a transient confirmation flag

use std::time::{Duration, Instant};
use thiserror::Error;

/// Clipboard write failure
#[derive(Error, Debug)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

impl From<std::io::Error> for ClipboardError {
    fn from(err: std::io::Error) -> Self {
        ClipboardError(err.to_string())
    }
}

/// Somewhere share text can be copied to
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Tracks the "copied!" confirmation shown after a successful copy
#[derive(Debug, Clone)]
pub struct CopyConfirmation {
    duration: Duration,
    shown_until: Option<Instant>,
}

impl Default for CopyConfirmation {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl CopyConfirmation {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown_until: None,
        }
    }

    /// Copy `text`; failures are swallowed and leave the flag untouched
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str, now: Instant) -> bool {
        match clipboard.set_text(text) {
            Ok(()) => {
                self.shown_until = Some(now + self.duration);
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "Clipboard copy failed");
                false
            }
        }
    }

    /// Whether the confirmation is visible at `now`
    pub fn is_shown(&self, now: Instant) -> bool {
        self.shown_until.is_some_and(|until| now < until)
    }

    pub fn clear(&mut self) {
        self.shown_until = None;
    }
}
