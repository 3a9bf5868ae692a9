//! Chat transcript entries

use serde::{Deserialize, Serialize};

/// Who a transcript entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bot,
    User,
    /// Transient "bot is typing" indicator
    Typing,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Message {
    pub fn bot(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Bot,
            text: Some(text.into()),
        }
    }

    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            text: Some(text.into()),
        }
    }

    pub fn typing() -> Self {
        Self {
            id: "typing".to_string(),
            role: Role::Typing,
            text: None,
        }
    }
}
