use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Internal application events delivered to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The deferred assistant reply for a session is ready
    AssistantReply { session_id: Uuid, content: String },
}

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Avatar label shown next to the message
    pub fn avatar(&self) -> &'static str {
        match self {
            MessageRole::User => "U",
            MessageRole::Assistant => "AI",
            MessageRole::System => "--",
        }
    }
}

/// A single message in the chat panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(id: u64, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Which input currently receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Search,
    #[default]
    Composer,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Search => Focus::Composer,
            Focus::Composer => Focus::Search,
        }
    }
}
