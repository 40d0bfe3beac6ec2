use serde::{Deserialize, Serialize};

use super::requests::null_as_default;

/// Roles understood by the upstream chat-completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Map a role name coming from the UI onto an upstream conversation role.
    ///
    /// The UI labels model turns `"ai"`. Only `user` and `assistant` can come
    /// out of here; anything unrecognised (including `"system"`) is demoted to
    /// `user` so history can never smuggle in instructions.
    pub fn from_ui(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "ai" | "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One prior turn of the UI conversation, as the front-end sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::new(Role::from_ui(&self.role), self.content.clone())
    }
}
