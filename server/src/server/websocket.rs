use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::app::SharedState;
use crate::session::OverlayEvent;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();
    let (mut rx, history) = state.subscribe_with_history().await;

    let client_id = uuid::Uuid::new_v4().to_string();
    let welcome = serde_json::json!({
        "type": "connected",
        "data": { "clientId": client_id }
    });
    if sender
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    let history = OverlayEvent::History { lines: history };
    if sender
        .send(Message::Text(history.to_json().into()))
        .await
        .is_err()
    {
        return;
    }

    tracing::info!("WebSocket client connected: {}", client_id);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Ok(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(client_id, skipped, "WebSocket client lagging; events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_client_message(&text) {
                        if sender.send(Message::Text(reply.into())).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!("WebSocket client disconnected: {}", client_id);
}

/// Reply to a client message, if it needs one.
fn handle_client_message(text: &str) -> Option<String> {
    let msg = serde_json::from_str::<serde_json::Value>(text).ok()?;
    match msg.get("type").and_then(|t| t.as_str()).unwrap_or("") {
        "ping" => Some(serde_json::json!({ "type": "pong" }).to_string()),
        other => {
            tracing::debug!(msg_type = other, "Ignored overlay client message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::handle_client_message;

    #[test]
    fn ping_gets_pong() {
        assert_eq!(
            handle_client_message(r#"{"type":"ping"}"#).as_deref(),
            Some(r#"{"type":"pong"}"#)
        );
    }

    #[test]
    fn other_messages_are_ignored() {
        assert!(handle_client_message(r#"{"type":"hello"}"#).is_none());
        assert!(handle_client_message("not json").is_none());
    }
}
