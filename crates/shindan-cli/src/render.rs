//! Terminal rendering of a session

use shindan_runtime::{Message, Role};
use shindan_sdk::{QuizEngine, Session, Stage};

/// Incremental renderer
///
/// Remembers what has already been printed so each call only returns the
/// lines that changed since the last one.
#[derive(Debug, Default)]
pub struct ChatView {
    epoch: Option<u64>,
    stage: Option<Stage>,
    shown: usize,
    options: Vec<String>,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print for the current state of `session`
    pub fn render(&mut self, engine: &QuizEngine, session: &Session) -> Vec<String> {
        let mut lines = Vec::new();

        if self.epoch != Some(session.epoch()) {
            self.epoch = Some(session.epoch());
            self.shown = 0;
            self.options.clear();
        }
        let transcript = session.transcript();
        // The typing indicator is removed when the result is revealed.
        self.shown = self.shown.min(transcript.len());

        for message in &transcript[self.shown..] {
            lines.push(format_message(message));
        }
        self.shown = transcript.len();

        let stage_changed = self.stage != Some(session.stage());
        self.stage = Some(session.stage());

        match session.stage() {
            Stage::Landing if stage_changed => {
                lines.push("テーマを選んでください:".to_string());
                for (i, theme) in engine.themes().iter().enumerate() {
                    let line = match &theme.card {
                        Some(card) => format!("  [{}] {} {} - {}", i + 1, card.emoji, card.title, card.description),
                        None => format!("  [{}] {}", i + 1, theme.title),
                    };
                    lines.push(line);
                }
                lines.push("  [q] 終了".to_string());
            }
            Stage::Result if stage_changed => {
                if let Some(card) = engine.present_session(session) {
                    lines.push(String::new());
                    lines.push(format!(
                        "{} あなたは「{}」タイプ！",
                        card.type_def.emoji, card.type_def.label
                    ));
                    lines.push(format!("   {}", card.flavor_text));
                    lines.push(String::new());
                    lines.push(format!("  {}", card.share_text));
                    lines.push(
                        "  [r] もう一度  [h] ホーム  [c] コピー  [x] Xでシェア  [l] LINEでシェア"
                            .to_string(),
                    );
                }
            }
            _ => {}
        }

        if session.options() != self.options.as_slice() {
            self.options = session.options().to_vec();
            if !self.options.is_empty() {
                if session.stage() == Stage::Questions {
                    let progress = session.progress();
                    lines.push(format!("  ({} {}%)", progress, progress.percent()));
                }
                for (i, option) in self.options.iter().enumerate() {
                    lines.push(format!("  [{}] {}", i + 1, option));
                }
                lines.push("  [h] ホーム".to_string());
            }
        }

        lines
    }
}

fn format_message(message: &Message) -> String {
    let text = message.text.as_deref().unwrap_or_default();
    match message.role {
        Role::Bot => format!("🤖 {}", text),
        Role::User => format!("      {} 👤", text),
        Role::Typing => "🤖 …".to_string(),
    }
}
