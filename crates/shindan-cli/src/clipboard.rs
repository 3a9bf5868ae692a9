//! Terminal clipboard via OSC 52

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use shindan_runtime::{Clipboard, ClipboardError};
use std::io::Write;

/// Writes the OSC 52 "set clipboard" sequence to a terminal
///
/// The terminal emulator decides whether to honour it; a successful write
/// only means the sequence was sent.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

/// OSC 52 sequence selecting the system clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
