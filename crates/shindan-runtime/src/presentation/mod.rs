//! Result presentation
//!
//! Flavor text lookup, share text and links, and clipboard copy with a
//! short-lived confirmation flag. None of this feeds back into resolution.

mod clipboard;
mod flavor;
mod share;

pub use clipboard::{Clipboard, ClipboardError, CopyConfirmation, MemoryClipboard};
pub use flavor::FlavorTable;
pub use share::{share_text, ShareLinks, HASHTAG};
