//! Conversation history shared between agents.
//!
//! A [`ChatContext`] is a cheap handle to one append-only history. Cloning the
//! handle does not copy the history: every clone observes the same items, which
//! is how an incoming agent sees exactly what the outgoing agent produced.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human on the call.
    User,
    /// The voice agent.
    Assistant,
    /// Instructions or injected context.
    System,
}

impl Role {
    /// Lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub content: String,
}

impl Message {
    /// Create a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// An entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatItem {
    /// A spoken or written message.
    Message(Message),
    /// The model invoked a tool.
    FunctionCall {
        /// Call identifier assigned by the backend.
        call_id: String,
        /// Tool name.
        name: String,
        /// Parsed arguments.
        arguments: Value,
    },
    /// Output returned to the model for a tool call.
    FunctionOutput {
        /// Call identifier this output answers.
        call_id: String,
        /// Tool name.
        name: String,
        /// Output value.
        output: Value,
    },
}

impl ChatItem {
    /// The message carried by this item, if it is one.
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            ChatItem::Message(message) => Some(message),
            ChatItem::FunctionCall { .. } | ChatItem::FunctionOutput { .. } => None,
        }
    }
}

impl From<Message> for ChatItem {
    fn from(message: Message) -> Self {
        ChatItem::Message(message)
    }
}

/// Shared, append-only conversation history.
#[derive(Clone, Default)]
pub struct ChatContext {
    items: Arc<RwLock<Vec<ChatItem>>>,
}

impl ChatContext {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message with the given role.
    pub fn add_message(&self, role: Role, content: impl Into<String>) {
        self.push(Message::new(role, content));
    }

    /// Append any history item.
    pub fn push(&self, item: impl Into<ChatItem>) {
        self.items.write().push(item.into());
    }

    /// Snapshot of every item, oldest first.
    pub fn items(&self) -> Vec<ChatItem> {
        self.items.read().clone()
    }

    /// Snapshot of the role-tagged messages only, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.items.read().iter().filter_map(ChatItem::as_message).cloned().collect()
    }

    /// Number of items in the history.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Whether two handles refer to the same underlying history.
    pub fn same_history(&self, other: &ChatContext) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl fmt::Debug for ChatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatContext").field("items", &self.len()).finish()
    }
}
