//! HTTP DTOs for the chat endpoint.
//!
//! The envelope mirrors the hosting framework's chat protocol: a message
//! is a list of typed content items, and terminal replies append an
//! `end-session` item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ════════════════════════════════════════════════════════════════════════════════
// Content items
// ════════════════════════════════════════════════════════════════════════════════

/// One typed content item in a chat envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentItem {
    /// Plain text content.
    Text { text: String },
    /// Marks the conversation as finished on terminal replies.
    EndSession,
    /// Any content kind this agent does not read.
    #[serde(other)]
    Unsupported,
}

impl ContentItem {
    /// Creates a text content item.
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Inbound chat message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    /// Message id assigned by the sender.
    pub msg_id: Uuid,
    /// When the sender created the message.
    pub timestamp: DateTime<Utc>,
    /// Conversation id assigned by the hosting framework.
    pub session_id: String,
    /// Stable address of the sending user.
    pub sender: String,
    /// Typed content items.
    pub content: Vec<ContentItem>,
}

impl ChatMessageRequest {
    /// Concatenated text of all text items; other kinds are ignored.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.content {
            if let ContentItem::Text { text: t } = item {
                text.push_str(t);
            }
        }
        text
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Outbound reply envelope: acknowledgement plus response content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    /// The inbound message this reply acknowledges.
    pub acknowledged_msg_id: Uuid,
    /// Message id of this reply.
    pub msg_id: Uuid,
    /// When the reply was created.
    pub timestamp: DateTime<Utc>,
    /// Typed content items.
    pub content: Vec<ContentItem>,
}

impl ChatMessageResponse {
    /// Builds a reply to the given inbound message.
    pub fn reply(acknowledged_msg_id: Uuid, text: impl Into<String>, end_session: bool) -> Self {
        let mut content = vec![ContentItem::text(text)];
        if end_session {
            content.push(ContentItem::EndSession);
        }
        Self {
            acknowledged_msg_id,
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content,
        }
    }

    /// Whether this reply carries the end-session marker.
    pub fn ends_session(&self) -> bool {
        self.content.contains(&ContentItem::EndSession)
    }
}

/// Agent metadata served at `/api/agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub readme: String,
}

/// Error body for chat API failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
