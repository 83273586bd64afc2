//! Configuration management: defaults, validation, loading from environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;

use serde::Serialize;

/// A setting as reported by the status endpoint. Secrets are masked.
#[derive(Debug, Clone, Serialize)]
pub struct SettingInfo {
    pub key: String,
    pub value: String,
    pub secret: bool,
    pub description: String,
    pub has_value: bool,
}

impl AppConfig {
    /// Current values of every known setting.
    pub fn setting_infos(&self) -> Vec<SettingInfo> {
        defaults::all_settings()
            .map(|def| {
                let value = self.value_of(def.key);
                SettingInfo {
                    key: def.key.to_string(),
                    has_value: !value.is_empty(),
                    value: if def.secret && !value.is_empty() {
                        "********".to_string()
                    } else {
                        value
                    },
                    secret: def.secret,
                    description: def.description.to_string(),
                }
            })
            .collect()
    }

    fn value_of(&self, key: &str) -> String {
        match key {
            "CHANNELS" => self.channels.join(","),
            "SERVER_PORT" => self.server_port.to_string(),
            "TWITCH_CLIENT_ID" => self.twitch_client_id.clone(),
            "TWITCH_ACCESS_TOKEN" => self.twitch_access_token.clone(),
            "TWITCH_NICK" => self.twitch_nick.clone(),
            "CHAT_HISTORY_LIMIT" => self.chat_history_limit.to_string(),
            "CHAT_FILTER_ENABLED" => self.chat_filter_enabled.to_string(),
            "BTTV_ENABLED" => self.bttv_enabled.to_string(),
            _ => String::new(),
        }
    }
}
