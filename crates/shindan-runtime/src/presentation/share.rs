//! Share text and links

use serde::Serialize;
use shindan_core::TypeDef;

/// Hashtag appended to every share message
pub const HASHTAG: &str = "#ユーモア診断アプリ";

const X_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const LINE_SHARE_URL: &str = "https://social-plugins.line.me/lineit/share";

/// Message shared to social platforms and the clipboard
pub fn share_text(type_def: &TypeDef) -> String {
    format!("私は{}タイプでした！ {} {}", type_def.label, type_def.emoji, HASHTAG)
}

/// Share URLs for external platforms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub x: String,
    pub line: String,
}

impl ShareLinks {
    /// Build links for `text`; LINE also receives the page URL
    pub fn build(text: &str, page_url: &str) -> Self {
        let text = urlencoding::encode(text);
        Self {
            x: format!("{}?text={}", X_INTENT_URL, text),
            line: format!(
                "{}?url={}&text={}",
                LINE_SHARE_URL,
                urlencoding::encode(page_url),
                text
            ),
        }
    }
}
