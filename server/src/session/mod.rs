//! Per-connection chat state and event dispatch.
//!
//! A [`ChatSession`] owns the emote catalog and the replay log. Each
//! [`ChatEvent`] from the chat connection is turned into overlay events
//! plus catalog refresh requests that the runtime carries out.

mod chat_log;
pub mod events;

use std::collections::{BTreeSet, HashMap};

use chat_emotes::{
    BadgeSets, EmoteCatalog, ThirdPartyEmoteToken, annotate, normalize_channel, parse_emotes_tag,
    segment_message,
};
use twitch_client::{ChatEvent, ChatMessage};

use crate::chat_filter;
pub use chat_log::ChatLog;
pub use events::{AdminLine, ChatLine, LogEntry, OverlayEvent, RenderedSegment};

const SUBTYPE_CONNECTING: &str = "connecting";
const SUBTYPE_CONNECTED: &str = "connected";
const SUBTYPE_DISCONNECTED: &str = "disconnected";
const CONNECTED_TIMEOUT_MS: u64 = 5000;
const JOIN_PART_TIMEOUT_MS: u64 = 1000;

/// Catalog work requested by the session.
///
/// `connection` identifies the chat connection the request belongs to and
/// must be handed back to [`ChatSession::apply_catalog`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    RefreshGlobalCatalog {
        connection: u64,
    },
    RefreshChannelCatalog {
        connection: u64,
        channel: String,
        room_id: String,
    },
}

impl SessionAction {
    pub fn connection(&self) -> u64 {
        match self {
            Self::RefreshGlobalCatalog { connection }
            | Self::RefreshChannelCatalog { connection, .. } => *connection,
        }
    }
}

/// Fetched catalog data to store.
#[derive(Debug, Clone)]
pub enum CatalogUpdate {
    GlobalTokens(Vec<ThirdPartyEmoteToken>),
    GlobalBadges(BadgeSets),
    ChannelTokens {
        channel: String,
        tokens: Vec<ThirdPartyEmoteToken>,
    },
    ChannelBadges {
        channel: String,
        badges: BadgeSets,
    },
}

/// Result of handling one chat event.
#[derive(Debug, Default)]
pub struct SessionOutput {
    pub events: Vec<OverlayEvent>,
    pub actions: Vec<SessionAction>,
}

impl SessionOutput {
    fn event(&mut self, event: OverlayEvent) {
        self.events.push(event);
    }
}

/// Chat state for one relay.
#[derive(Debug)]
pub struct ChatSession {
    catalog: EmoteCatalog,
    log: ChatLog,
    filter_enabled: bool,
    connected: bool,
    /// Bumped on every connect and disconnect.
    connection: u64,
    joined: BTreeSet<String>,
    room_ids: HashMap<String, String>,
}

impl ChatSession {
    pub fn new(history_limit: usize, filter_enabled: bool) -> Self {
        Self {
            catalog: EmoteCatalog::new(),
            log: ChatLog::new(history_limit),
            filter_enabled,
            connected: false,
            connection: 0,
            joined: BTreeSet::new(),
            room_ids: HashMap::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connection(&self) -> u64 {
        self.connection
    }

    pub fn joined_channels(&self) -> Vec<String> {
        self.joined.iter().cloned().collect()
    }

    pub fn history(&self) -> Vec<LogEntry> {
        self.log.snapshot()
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    pub fn catalog(&self) -> &EmoteCatalog {
        &self.catalog
    }

    pub fn handle(&mut self, event: ChatEvent) -> SessionOutput {
        let mut out = SessionOutput::default();
        match event {
            ChatEvent::Connecting => {
                self.admin(&mut out, AdminLine::new("Connecting...").subtype(SUBTYPE_CONNECTING));
                self.remove_admin(&mut out, SUBTYPE_DISCONNECTED);
            }
            ChatEvent::Connected => {
                self.connected = true;
                self.connection += 1;
                self.admin(
                    &mut out,
                    AdminLine::new("Connected...")
                        .subtype(SUBTYPE_CONNECTED)
                        .timeout_ms(CONNECTED_TIMEOUT_MS),
                );
                self.remove_admin(&mut out, SUBTYPE_CONNECTING);
                self.remove_admin(&mut out, SUBTYPE_DISCONNECTED);
                out.actions.push(SessionAction::RefreshGlobalCatalog {
                    connection: self.connection,
                });
            }
            ChatEvent::Disconnected => {
                self.connected = false;
                self.connection += 1;
                self.joined.clear();
                self.room_ids.clear();
                self.catalog.clear();
                self.admin(
                    &mut out,
                    AdminLine::new("Disconnected...").subtype(SUBTYPE_DISCONNECTED),
                );
                self.remove_admin(&mut out, SUBTYPE_CONNECTING);
                self.remove_admin(&mut out, SUBTYPE_CONNECTED);
            }
            ChatEvent::Join { channel, is_self } => {
                if is_self {
                    self.joined.insert(channel.clone());
                    self.admin(
                        &mut out,
                        AdminLine::new(format!("Joined {channel}")).timeout_ms(JOIN_PART_TIMEOUT_MS),
                    );
                }
            }
            ChatEvent::Part { channel, is_self } => {
                if is_self {
                    self.joined.remove(&channel);
                    self.room_ids.remove(&channel);
                    self.catalog.remove_channel(&channel);
                    self.admin(
                        &mut out,
                        AdminLine::new(format!("Parted {channel}")).timeout_ms(JOIN_PART_TIMEOUT_MS),
                    );
                }
            }
            ChatEvent::RoomState { channel, room_id } => {
                // Mode changes resend ROOMSTATE with the same room id.
                if self.joined.contains(&channel)
                    && self.room_ids.get(&channel) != Some(&room_id)
                {
                    self.room_ids.insert(channel.clone(), room_id.clone());
                    out.actions.push(SessionAction::RefreshChannelCatalog {
                        connection: self.connection,
                        channel,
                        room_id,
                    });
                }
            }
            ChatEvent::Message(msg) => {
                if let Some(line) = self.render(msg) {
                    self.log.push(LogEntry::Chat(line.clone()));
                    out.event(OverlayEvent::ChatLine(line));
                }
            }
            ChatEvent::ClearChat { channel } => {
                let removed = self.log.remove_where(
                    |e| matches!(e, LogEntry::Chat(line) if line.channel == channel),
                );
                tracing::debug!(channel, removed, "Chat cleared");
                out.event(OverlayEvent::RemoveLines {
                    channel,
                    username: None,
                });
            }
            ChatEvent::Timeout { channel, username } => {
                let removed = self.log.remove_where(|e| {
                    matches!(e, LogEntry::Chat(line) if line.channel == channel && line.username == username)
                });
                tracing::debug!(channel, username, removed, "User timed out");
                out.event(OverlayEvent::RemoveLines {
                    channel,
                    username: Some(username),
                });
            }
        }
        out
    }

    /// Store fetched catalog data. Data fetched for an earlier connection,
    /// or for channels no longer joined, is discarded.
    pub fn apply_catalog(&mut self, connection: u64, update: CatalogUpdate) {
        if connection != self.connection {
            tracing::debug!(
                connection,
                current = self.connection,
                "Dropped catalog data from previous connection"
            );
            return;
        }
        match update {
            CatalogUpdate::GlobalTokens(tokens) => self.catalog.set_global_tokens(tokens),
            CatalogUpdate::GlobalBadges(badges) => self.catalog.set_global_badges(badges),
            CatalogUpdate::ChannelTokens { channel, tokens } => {
                let channel = normalize_channel(&channel);
                if self.joined.contains(&channel) {
                    self.catalog.set_channel_tokens(&channel, tokens);
                } else {
                    tracing::debug!(channel, "Dropped emotes for parted channel");
                }
            }
            CatalogUpdate::ChannelBadges { channel, badges } => {
                let channel = normalize_channel(&channel);
                if self.joined.contains(&channel) {
                    self.catalog.set_channel_badges(&channel, badges);
                }
            }
        }
    }

    fn render(&self, msg: ChatMessage) -> Option<ChatLine> {
        if self.filter_enabled && chat_filter::is_filtered(&msg.text) {
            tracing::debug!(channel = %msg.channel, user = %msg.login, "Filtered chat message");
            return None;
        }

        let platform = parse_emotes_tag(&msg.emotes, &msg.text);
        let tokens = self.catalog.third_party_tokens_for(&msg.channel);
        let segments = annotate(&msg.text, &platform, &tokens).unwrap_or_else(|e| {
            tracing::warn!(error = %e, message_id = %msg.message_id, "Emote annotation failed");
            segment_message(&msg.text, &[])
        });

        Some(ChatLine {
            badges: self.catalog.resolve_badges(&msg.channel, &msg.badges),
            name: chat_filter::display_name(&msg.display_name, &msg.login),
            color: chat_filter::name_color(&msg.color),
            segments: segments.into_iter().map(RenderedSegment::from).collect(),
            timestamp: msg.sent_at.unwrap_or_else(chrono::Utc::now),
            message_id: msg.message_id,
            channel: msg.channel,
            channel_id: msg.room_id,
            user_id: msg.user_id,
            username: msg.login,
            bits: msg.bits,
            is_action: msg.is_action,
        })
    }

    fn admin(&mut self, out: &mut SessionOutput, line: AdminLine) {
        // Lines that fade out on their own are not worth replaying.
        if line.timeout_ms.is_none() {
            self.log.push(LogEntry::Admin(line.clone()));
        }
        out.event(OverlayEvent::AdminLine(line));
    }

    fn remove_admin(&mut self, out: &mut SessionOutput, subtype: &str) {
        self.log.remove_where(
            |e| matches!(e, LogEntry::Admin(line) if line.subtype.as_deref() == Some(subtype)),
        );
        out.event(OverlayEvent::RemoveAdminLines {
            subtype: subtype.to_string(),
        });
    }
}
