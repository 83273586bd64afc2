//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, bool, &'static str);

const DEFS: &[DefTuple] = &[
    ("CHANNELS", "basetradetv", false, "Comma-separated channel logins to join"),
    ("SERVER_PORT", "8080", false, "Port of the overlay WebSocket server"),
    ("TWITCH_CLIENT_ID", "", false, "Helix client id, needed for badges"),
    ("TWITCH_ACCESS_TOKEN", "", true, "Helix/IRC OAuth token"),
    ("TWITCH_NICK", "", false, "Chat login; empty for anonymous read-only"),
    ("CHAT_HISTORY_LIMIT", "30", false, "Chat lines kept for overlay replay"),
    ("CHAT_FILTER_ENABLED", "true", false, "Drop messages in blocked scripts"),
    ("BTTV_ENABLED", "true", false, "Load BetterTTV emotes"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub secret: bool,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, secret, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    secret,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting definitions in declaration order.
pub fn all_settings() -> impl Iterator<Item = &'static SettingDef> {
    DEFS.iter().filter_map(|(key, ..)| DEFAULT_SETTINGS.get(key))
}
