//! Twitch chat client over IRC-on-WebSocket.
//!
//! Connects to wss://irc-ws.chat.twitch.tv, joins the configured
//! channels, and reports chat activity as [`ChatEvent`]s. Reconnects
//! with exponential backoff until shut down.

mod connection;
pub mod event;
pub mod message;
#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

pub use event::{ChatEvent, ChatMessage};
pub use message::IrcMessage;

const IRC_WS_URL: &str = "wss://irc-ws.chat.twitch.tv:443";
const CAPABILITIES: &str = "twitch.tv/tags twitch.tv/commands twitch.tv/membership";
const READ_TIMEOUT: Duration = Duration::from_secs(6 * 60);
const BASE_BACKOFF: Duration = Duration::from_secs(2);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
const FAILURE_RESET_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Chat connection settings.
#[derive(Debug, Clone)]
pub struct IrcConfig {
    pub url: String,
    /// Login nick. Anonymous `justinfan` nicks need no token.
    pub nick: String,
    /// OAuth token without the `oauth:` prefix.
    pub token: Option<String>,
    pub channels: Vec<String>,
}

impl IrcConfig {
    /// Read-only anonymous login.
    pub fn anonymous(channels: Vec<String>) -> Self {
        Self {
            url: IRC_WS_URL.to_string(),
            nick: format!("justinfan{}", 10_000 + std::process::id() % 80_000),
            token: None,
            channels,
        }
    }

    pub fn with_login(nick: String, token: String, channels: Vec<String>) -> Self {
        Self {
            url: IRC_WS_URL.to_string(),
            nick: nick.to_lowercase(),
            token: Some(token.trim_start_matches("oauth:").to_string()),
            channels,
        }
    }
}

/// IRC chat client with auto-reconnect.
///
/// Events are delivered via `mpsc::Receiver<ChatEvent>`.
pub struct IrcClient;

impl IrcClient {
    /// Start the chat loop. Returns an event receiver and shutdown sender.
    pub fn connect(config: IrcConfig) -> (mpsc::Receiver<ChatEvent>, mpsc::Sender<()>) {
        let (event_tx, event_rx) = mpsc::channel::<ChatEvent>(256);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(Self::run_loop(config, event_tx, shutdown_rx));
        (event_rx, shutdown_tx)
    }

    async fn run_loop(
        config: IrcConfig,
        event_tx: mpsc::Sender<ChatEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut failures: u32 = 0;
        let mut last_failure_at: Option<Instant> = None;
        loop {
            if shutdown_rx.try_recv().is_ok() {
                tracing::info!("IRC shutdown requested");
                return;
            }
            if let Some(last_failure) = last_failure_at {
                if last_failure.elapsed() >= FAILURE_RESET_WINDOW {
                    if failures > 0 {
                        tracing::info!(failures, "IRC failures reset after stable interval");
                    }
                    failures = 0;
                    last_failure_at = None;
                }
            }

            let _ = event_tx.send(ChatEvent::Connecting).await;
            let result = Self::connect_once(&config, &event_tx, &mut shutdown_rx).await;
            let _ = event_tx.send(ChatEvent::Disconnected).await;

            match result {
                Ok(true) => {
                    tracing::info!("IRC server requested reconnect");
                }
                Ok(false) => {
                    tracing::info!("IRC connection closed cleanly");
                    return;
                }
                Err(e) => {
                    failures += 1;
                    last_failure_at = Some(Instant::now());
                    let backoff = Self::backoff_duration(failures);
                    tracing::warn!(
                        error = %e, attempt = failures,
                        backoff_secs = backoff.as_secs(),
                        "IRC connection failed, will reconnect"
                    );
                    tokio::select! {
                        _ = shutdown_rx.recv() => {
                            tracing::info!("IRC shutdown requested during reconnect backoff");
                            return;
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }
    }

    fn backoff_duration(failures: u32) -> Duration {
        let d = BASE_BACKOFF * 2u32.saturating_pow(failures.saturating_sub(1));
        d.min(MAX_BACKOFF)
    }
}
