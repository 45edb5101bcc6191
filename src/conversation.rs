use chrono::{DateTime, Local};

use crate::interpreter::Rendering;
use crate::models::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire spelling expected by the backend's history field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation. Immutable once pushed.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub rendering: Rendering,
}

/// In-memory, append-only message store. Lives exactly as long as the
/// process; nothing here touches disk.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> u64 {
        self.push(Role::User, content.into(), Rendering::Text)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>, rendering: Rendering) -> u64 {
        self.push(Role::Assistant, content.into(), rendering)
    }

    fn push(&mut self, role: Role, content: String, rendering: Rendering) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: Local::now(),
            rendering,
        });
        id
    }

    /// Drops every message. The id counter keeps going so ids stay unique
    /// across clears.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Projects the store down to the role/content pairs the backend wants
    /// as context, in submission order. Timestamps, ids and renderings do
    /// not cross the wire.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|message| HistoryEntry {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            })
            .collect()
    }
}
