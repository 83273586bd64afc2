//! Chat relay loop: chat events in, overlay events out.

use twitch_client::{CatalogFetcher, ChatEvent, IrcClient};

use crate::app::SharedState;
use crate::session::{CatalogUpdate, SessionAction};

/// Connect to chat and relay events until shutdown.
pub async fn run_chat_relay(state: SharedState) {
    let config = state.config().clone();
    let fetcher = CatalogFetcher::new(config.helix_credentials());
    if !fetcher.has_credentials() {
        tracing::info!("Twitch credentials not configured; chat badges disabled");
    }

    let (mut events, irc_shutdown) = IrcClient::connect(config.irc_config());
    state.set_irc_shutdown(irc_shutdown).await;

    let shutdown = state.shutdown_token().clone();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Chat relay stopping");
                return;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::warn!("Chat connection ended");
                    return;
                };
                dispatch(&state, &fetcher, event).await;
            }
        }
    }
}

/// Feed one event through the session and act on the result.
pub async fn dispatch(state: &SharedState, fetcher: &CatalogFetcher, event: ChatEvent) {
    let output = {
        // Broadcast under the write lock so a connecting overlay sees each
        // line either in its history snapshot or live, never both.
        let mut session = state.session().write().await;
        let output = session.handle(event);
        for event in &output.events {
            state.broadcast(event);
        }
        output
    };

    for action in output.actions {
        let state = state.clone();
        let fetcher = fetcher.clone();
        tokio::spawn(async move { refresh_catalog(state, fetcher, action).await });
    }
}

async fn refresh_catalog(state: SharedState, fetcher: CatalogFetcher, action: SessionAction) {
    let bttv_enabled = state.config().bttv_enabled;
    let connection = action.connection();
    let mut updates = Vec::new();

    match action {
        SessionAction::RefreshGlobalCatalog { .. } => {
            if bttv_enabled {
                match fetcher.bttv_global_emotes().await {
                    Ok(tokens) => updates.push(CatalogUpdate::GlobalTokens(tokens)),
                    Err(e) => tracing::warn!(error = %e, "Failed to fetch global BTTV emotes"),
                }
            }
            match fetcher.global_badges().await {
                Ok(badges) => updates.push(CatalogUpdate::GlobalBadges(badges)),
                Err(e) => tracing::warn!(error = %e, "Failed to fetch global badges"),
            }
        }
        SessionAction::RefreshChannelCatalog {
            channel, room_id, ..
        } => {
            if bttv_enabled {
                match fetcher.bttv_channel_emotes(&room_id).await {
                    Ok(tokens) => updates.push(CatalogUpdate::ChannelTokens {
                        channel: channel.clone(),
                        tokens,
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, channel, "Failed to fetch channel BTTV emotes")
                    }
                }
            }
            match fetcher.channel_badges(&room_id).await {
                Ok(badges) => updates.push(CatalogUpdate::ChannelBadges { channel, badges }),
                Err(e) => tracing::warn!(error = %e, channel, "Failed to fetch channel badges"),
            }
        }
    }

    if updates.is_empty() {
        return;
    }
    let mut session = state.session().write().await;
    for update in updates {
        session.apply_catalog(connection, update);
    }
}

#[cfg(test)]
mod tests {
    use twitch_client::ChatMessage;

    use super::*;
    use crate::config::AppConfig;
    use crate::session::LogEntry;

    fn offline_fetcher() -> CatalogFetcher {
        CatalogFetcher::with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9", None)
    }

    #[tokio::test]
    async fn dispatch_broadcasts_chat_line() {
        let state = SharedState::new(AppConfig::default());
        let mut rx = state.subscribe_ws();

        let event = ChatEvent::Message(ChatMessage {
            channel: "basetradetv".into(),
            message_id: "m1".into(),
            user_id: "1".into(),
            room_id: "2".into(),
            login: "viewer".into(),
            display_name: "Viewer".into(),
            color: "#FF0000".into(),
            badges: vec![],
            emotes: "25:3-7".into(),
            bits: None,
            text: "gg Kappa".into(),
            is_action: false,
            sent_at: None,
        });
        dispatch(&state, &offline_fetcher(), event).await;

        let json: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(json["type"], "chat-line");
        assert_eq!(json["data"]["name"], "Viewer");
        assert_eq!(json["data"]["segments"][0]["text"], "gg ");
        assert_eq!(json["data"]["segments"][1]["code"], "Kappa");
        assert_eq!(state.session().read().await.log_len(), 1);
    }

    #[tokio::test]
    async fn dispatch_timeout_broadcasts_removal() {
        let state = SharedState::new(AppConfig::default());
        let mut rx = state.subscribe_ws();

        dispatch(
            &state,
            &offline_fetcher(),
            ChatEvent::Timeout {
                channel: "basetradetv".into(),
                username: "spammer".into(),
            },
        )
        .await;

        let json: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(json["type"], "remove-lines");
        assert_eq!(json["data"]["username"], "spammer");
    }

    fn line(id: &str) -> ChatEvent {
        ChatEvent::Message(ChatMessage {
            channel: "basetradetv".into(),
            message_id: id.into(),
            user_id: "1".into(),
            room_id: "2".into(),
            login: "viewer".into(),
            display_name: "Viewer".into(),
            color: String::new(),
            badges: vec![],
            emotes: String::new(),
            bits: None,
            text: format!("line {id}"),
            is_action: false,
            sent_at: None,
        })
    }

    #[tokio::test]
    async fn joining_overlay_gets_each_line_once() {
        let state = SharedState::new(AppConfig::default());
        let fetcher = offline_fetcher();
        dispatch(&state, &fetcher, line("m1")).await;

        // Dispatch races the subscription from another task.
        let racer = {
            let state = state.clone();
            let fetcher = fetcher.clone();
            tokio::spawn(async move { dispatch(&state, &fetcher, line("m2")).await })
        };
        let (mut rx, history) = state.subscribe_with_history().await;
        racer.await.unwrap();
        dispatch(&state, &fetcher, line("m3")).await;

        let mut seen: Vec<String> = history
            .iter()
            .filter_map(|entry| match entry {
                LogEntry::Chat(line) => Some(line.message_id.clone()),
                LogEntry::Admin(_) => None,
            })
            .collect();
        while let Ok(text) = rx.try_recv() {
            let json: serde_json::Value = serde_json::from_str(&text).unwrap();
            if json["type"] == "chat-line" {
                seen.push(json["data"]["messageId"].as_str().unwrap().to_string());
            }
        }
        assert_eq!(seen, vec!["m1", "m2", "m3"]);
    }
}
