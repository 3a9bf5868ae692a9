//! Shindan Runtime - Rule resolution and chat session runtime
//!
//! This crate provides:
//! - The first-match rule resolver with optional evaluation trace
//! - The chat session state machine and its timed steps
//! - An async driver that fires scheduled steps on a tokio runtime
//! - Result presentation helpers (flavor text, share links, clipboard)

pub mod driver;
pub mod error;
pub mod presentation;
pub mod resolver;
pub mod session;
pub mod trace;

// Re-export main types
pub use driver::SessionDriver;
pub use error::{Result, SessionError};
pub use presentation::{
    share_text, Clipboard, ClipboardError, CopyConfirmation, FlavorTable, MemoryClipboard,
    ShareLinks,
};
pub use resolver::{Decision, Resolution, RuleResolver};
pub use session::{
    Action, Delays, Message, Progress, Role, Schedule, ScheduledStep, Script, Session, Stage, Step,
};
pub use trace::{ConditionTrace, ResolutionTrace, RuleTrace};
