//! Messages pushed to overlay clients.

use chat_emotes::{BadgeImage, MessageSegment};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A message segment with its image URL resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSegment {
    #[serde(flatten)]
    pub segment: MessageSegment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<MessageSegment> for RenderedSegment {
    fn from(segment: MessageSegment) -> Self {
        let url = segment.image_url();
        Self { segment, url }
    }
}

/// A rendered chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLine {
    pub message_id: String,
    pub channel: String,
    pub channel_id: String,
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub color: String,
    pub badges: Vec<BadgeImage>,
    pub segments: Vec<RenderedSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u64>,
    pub is_action: bool,
    pub timestamp: DateTime<Utc>,
}

/// A status line from the relay itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLine {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Milliseconds before the overlay should fade the line out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl AdminLine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subtype: None,
            timeout_ms: None,
        }
    }

    pub fn subtype(mut self, subtype: &str) -> Self {
        self.subtype = Some(subtype.to_string());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// One entry of the replayable chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum LogEntry {
    #[serde(rename = "chat-line")]
    Chat(ChatLine),
    #[serde(rename = "admin-line")]
    Admin(AdminLine),
}

/// Event sent to overlays as `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum OverlayEvent {
    ChatLine(ChatLine),
    AdminLine(AdminLine),
    RemoveLines {
        channel: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    RemoveAdminLines {
        subtype: String,
    },
    History {
        lines: Vec<LogEntry>,
    },
}

impl OverlayEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to serialize overlay event");
            String::new()
        })
    }
}
