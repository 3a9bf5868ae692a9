//! Chat session state machine
//!
//! A session moves `landing → consent → questions → result`, with a decline
//! branch back to landing, a retry loop from result to questions, and "go
//! home" from anywhere. Transitions are plain methods on [`Session`];
//! simulated typing delays are returned as [`Schedule`] values for a driver
//! to fire later.

mod action;
mod message;
mod script;
mod stage;
mod state;

pub use action::{Action, Schedule, ScheduledStep, Step};
pub use message::{Message, Role};
pub use script::{Delays, Script};
pub use stage::{Progress, Stage};
pub use state::Session;
