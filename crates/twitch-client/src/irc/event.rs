//! Chat events surfaced to the application.

use chat_emotes::{UserBadge, normalize_channel};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::message::IrcMessage;

/// A chat message (including cheers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Channel login without `#`.
    pub channel: String,
    pub message_id: String,
    pub user_id: String,
    pub room_id: String,
    pub login: String,
    pub display_name: String,
    pub color: String,
    pub badges: Vec<UserBadge>,
    /// Raw `emotes` tag, code-point ranges.
    pub emotes: String,
    pub bits: Option<u64>,
    pub text: String,
    pub is_action: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

/// Everything the chat connection reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Connecting,
    Connected,
    Disconnected,
    Message(ChatMessage),
    Join { channel: String, is_self: bool },
    Part { channel: String, is_self: bool },
    RoomState { channel: String, room_id: String },
    ClearChat { channel: String },
    Timeout { channel: String, username: String },
}

impl ChatEvent {
    /// Map an IRC line onto an event. Lines the overlay does not care about yield `None`.
    pub fn from_irc(msg: &IrcMessage, own_nick: &str) -> Option<Self> {
        let channel = msg.param(0).map(normalize_channel)?;
        match msg.command.as_str() {
            "PRIVMSG" => Some(Self::Message(chat_message(msg, channel)?)),
            "JOIN" => Some(Self::Join {
                is_self: is_self(msg, own_nick),
                channel,
            }),
            "PART" => Some(Self::Part {
                is_self: is_self(msg, own_nick),
                channel,
            }),
            "ROOMSTATE" => {
                let room_id = msg.tag("room-id")?.to_string();
                Some(Self::RoomState { channel, room_id })
            }
            "CLEARCHAT" => match msg.param(1).filter(|u| !u.is_empty()) {
                Some(username) => Some(Self::Timeout {
                    channel,
                    username: username.to_lowercase(),
                }),
                None => Some(Self::ClearChat { channel }),
            },
            _ => None,
        }
    }
}

fn is_self(msg: &IrcMessage, own_nick: &str) -> bool {
    msg.nick()
        .is_some_and(|nick| nick.eq_ignore_ascii_case(own_nick))
}

fn chat_message(msg: &IrcMessage, channel: String) -> Option<ChatMessage> {
    let raw_text = msg.param(1)?;
    let (text, is_action) = unwrap_action(raw_text);
    let login = msg.nick().unwrap_or_default().to_lowercase();
    let tag = |key: &str| msg.tag(key).unwrap_or_default().to_string();

    Some(ChatMessage {
        channel,
        message_id: tag("id"),
        user_id: tag("user-id"),
        room_id: tag("room-id"),
        display_name: tag("display-name"),
        login,
        color: tag("color"),
        badges: msg.badges(),
        emotes: tag("emotes"),
        bits: msg.tag("bits").and_then(|b| b.parse().ok()),
        text: text.to_string(),
        is_action,
        sent_at: msg
            .tag("tmi-sent-ts")
            .and_then(|ts| ts.parse::<i64>().ok())
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
    })
}

/// Strip the CTCP `ACTION` wrapper used by `/me`.
fn unwrap_action(text: &str) -> (&str, bool) {
    match text
        .strip_prefix("\u{1}ACTION ")
        .map(|t| t.strip_suffix('\u{1}').unwrap_or(t))
    {
        Some(inner) => (inner, true),
        None => (text, false),
    }
}
