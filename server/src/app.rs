use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::session::{ChatSession, LogEntry, OverlayEvent};

/// Application shared state accessible from the relay loop and axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    config: AppConfig,
    session: RwLock<ChatSession>,
    shutdown_token: CancellationToken,
    irc_shutdown: Mutex<Option<mpsc::Sender<()>>>,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let (ws_tx, _) = broadcast::channel(2048);
        let session = ChatSession::new(config.chat_history_limit, config.chat_filter_enabled);

        Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                session: RwLock::new(session),
                config,
                shutdown_token: CancellationToken::new(),
                irc_shutdown: Mutex::new(None),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &RwLock<ChatSession> {
        &self.inner.session
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    /// Subscribe to live events together with the current history.
    ///
    /// Holds the session read lock across both, and `dispatch` broadcasts
    /// under the write lock, so no line shows up in both.
    pub async fn subscribe_with_history(&self) -> (broadcast::Receiver<String>, Vec<LogEntry>) {
        let session = self.inner.session.read().await;
        (self.inner.ws_tx.subscribe(), session.history())
    }

    /// Send an event to every connected overlay. No receivers is not an error.
    pub fn broadcast(&self, event: &OverlayEvent) {
        let json = event.to_json();
        if json.is_empty() {
            return;
        }
        let _ = self.inner.ws_tx.send(json);
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    pub async fn set_irc_shutdown(&self, tx: mpsc::Sender<()>) {
        *self.inner.irc_shutdown.lock().await = Some(tx);
    }

    pub async fn take_irc_shutdown(&self) -> Option<mpsc::Sender<()>> {
        self.inner.irc_shutdown.lock().await.take()
    }
}
