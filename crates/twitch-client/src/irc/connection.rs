use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as Msg;

use super::*;
use crate::TwitchError;

/// What the read loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum LineAction {
    Continue,
    Reply(String),
    Welcome,
    Reconnect,
    Event(ChatEvent),
}

impl IrcClient {
    /// Run one connection. `Ok(true)` means the server asked us to reconnect,
    /// `Ok(false)` means shutdown was requested.
    pub(super) async fn connect_once(
        config: &IrcConfig,
        event_tx: &mpsc::Sender<ChatEvent>,
        shutdown_rx: &mut mpsc::Receiver<()>,
    ) -> Result<bool, TwitchError> {
        tracing::info!(url = %config.url, nick = %config.nick, "Connecting to Twitch chat");
        let (mut ws, _) = connect_async(config.url.as_str()).await?;

        for line in Self::handshake_lines(config) {
            ws.send(Msg::Text(line.into())).await?;
        }

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("IRC shutdown during listen");
                    let _ = ws.close(None).await;
                    return Ok(false);
                }
                result = tokio::time::timeout(READ_TIMEOUT, ws.next()) => {
                    match result {
                        Ok(Some(Ok(Msg::Text(text)))) => {
                            // A frame may carry several lines.
                            for line in text.split("\r\n").filter(|l| !l.is_empty()) {
                                match Self::handle_line(line, config) {
                                    LineAction::Continue => {}
                                    LineAction::Reply(reply) => {
                                        ws.send(Msg::Text(reply.into())).await?;
                                    }
                                    LineAction::Welcome => {
                                        tracing::info!(channels = ?config.channels, "Twitch chat connected");
                                        let _ = event_tx.send(ChatEvent::Connected).await;
                                    }
                                    LineAction::Reconnect => {
                                        let _ = ws.close(None).await;
                                        return Ok(true);
                                    }
                                    LineAction::Event(event) => {
                                        let _ = event_tx.send(event).await;
                                    }
                                }
                            }
                        }
                        Ok(Some(Ok(Msg::Ping(data)))) => {
                            let _ = ws.send(Msg::Pong(data)).await;
                        }
                        Ok(Some(Ok(Msg::Close(_)))) | Ok(None) => {
                            tracing::warn!("Twitch chat WebSocket closed by server");
                            return Err(TwitchError::Irc("Server closed".into()));
                        }
                        Ok(Some(Err(e))) => return Err(TwitchError::WebSocket(e)),
                        Ok(Some(Ok(_))) => {}
                        Err(_) => {
                            tracing::warn!("Twitch chat read timeout");
                            return Err(TwitchError::Timeout);
                        }
                    }
                }
            }
        }
    }

    pub(super) fn handshake_lines(config: &IrcConfig) -> Vec<String> {
        let mut lines = vec![format!("CAP REQ :{CAPABILITIES}")];
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("PASS oauth:{token}"));
        }
        lines.push(format!("NICK {}", config.nick));
        let channels: Vec<String> = config
            .channels
            .iter()
            .map(|c| chat_emotes::normalize_channel(c))
            .filter(|c| !c.is_empty())
            .map(|c| format!("#{c}"))
            .collect();
        if !channels.is_empty() {
            lines.push(format!("JOIN {}", channels.join(",")));
        }
        lines
    }

    pub(super) fn handle_line(line: &str, config: &IrcConfig) -> LineAction {
        let Some(msg) = IrcMessage::parse(line) else {
            return LineAction::Continue;
        };
        match msg.command.as_str() {
            "PING" => {
                let payload = msg.param(0).unwrap_or("tmi.twitch.tv");
                LineAction::Reply(format!("PONG :{payload}"))
            }
            "001" => LineAction::Welcome,
            "RECONNECT" => LineAction::Reconnect,
            "NOTICE" => {
                tracing::info!(notice = msg.param(1).unwrap_or_default(), "Twitch chat notice");
                LineAction::Continue
            }
            _ => match ChatEvent::from_irc(&msg, &config.nick) {
                Some(event) => LineAction::Event(event),
                None => {
                    tracing::trace!(command = %msg.command, "Unhandled IRC command");
                    LineAction::Continue
                }
            },
        }
    }
}
