//! Twitch integration client library.
//!
//! Provides the IRC chat client and the emote/badge catalog fetchers
//! that feed the overlay's emote annotation.

pub mod catalog;
pub mod irc;

pub use catalog::{CatalogFetcher, HelixCredentials};
pub use irc::{ChatEvent, ChatMessage, IrcClient, IrcConfig};

/// Unified error type for the twitch-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Twitch API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("IRC error: {0}")]
    Irc(String),

    #[error("Connection timeout")]
    Timeout,
}
