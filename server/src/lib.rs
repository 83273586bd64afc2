//! Overlay chat relay.
//!
//! Reads Twitch chat, annotates each message with emote and badge
//! images, and pushes the result to browser overlays over WebSocket.

pub mod app;
pub mod chat_filter;
pub mod config;
pub mod relay;
pub mod server;
pub mod session;
pub mod shutdown;

pub use relay::run_chat_relay;

use config::AppConfig;

/// Load `.env` (if present) and the runtime configuration.
pub fn init_foundation() -> AppConfig {
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
    }
    let config = AppConfig::load();
    tracing::info!(
        channels = ?config.channels,
        port = config.server_port,
        history = config.chat_history_limit,
        "Configuration loaded"
    );
    config
}
