//! Runtime application configuration loaded from the environment.

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub channels: Vec<String>,
    pub server_port: u16,
    pub twitch_client_id: String,
    pub twitch_access_token: String,
    pub twitch_nick: String,
    pub chat_history_limit: usize,
    pub chat_filter_enabled: bool,
    pub bttv_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Load configuration from process environment (after `.env`).
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or invalid values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            let default = get_default(key).unwrap_or_default();
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => match validate_setting(key, &value) {
                    Ok(()) => value,
                    Err(reason) => {
                        tracing::warn!(key, reason, "Invalid setting; using default");
                        default.to_string()
                    }
                },
                _ => default.to_string(),
            }
        };

        Self {
            channels: g("CHANNELS")
                .split(',')
                .map(chat_emotes::normalize_channel)
                .filter(|c| !c.is_empty())
                .collect(),
            server_port: parse_or(&g("SERVER_PORT"), 8080),
            twitch_client_id: g("TWITCH_CLIENT_ID"),
            twitch_access_token: g("TWITCH_ACCESS_TOKEN"),
            twitch_nick: g("TWITCH_NICK"),
            chat_history_limit: parse_or(&g("CHAT_HISTORY_LIMIT"), 30),
            chat_filter_enabled: g("CHAT_FILTER_ENABLED") == "true",
            bttv_enabled: g("BTTV_ENABLED") == "true",
        }
    }

    /// Chat login settings. Anonymous unless both nick and token are set.
    pub fn irc_config(&self) -> twitch_client::IrcConfig {
        if self.twitch_nick.is_empty() || self.twitch_access_token.is_empty() {
            twitch_client::IrcConfig::anonymous(self.channels.clone())
        } else {
            twitch_client::IrcConfig::with_login(
                self.twitch_nick.clone(),
                self.twitch_access_token.clone(),
                self.channels.clone(),
            )
        }
    }

    pub fn helix_credentials(&self) -> Option<twitch_client::HelixCredentials> {
        if self.twitch_client_id.is_empty() || self.twitch_access_token.is_empty() {
            return None;
        }
        Some(twitch_client::HelixCredentials {
            client_id: self.twitch_client_id.clone(),
            access_token: self
                .twitch_access_token
                .trim_start_matches("oauth:")
                .to_string(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.channels, vec!["basetradetv"]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.chat_history_limit, 30);
        assert!(config.chat_filter_enabled);
        assert!(config.bttv_enabled);
        assert!(config.helix_credentials().is_none());
    }

    #[test]
    fn values_are_read_and_normalized() {
        let config = config_from(&[
            ("CHANNELS", "#Alca, BaseTradeTV"),
            ("SERVER_PORT", "9001"),
            ("CHAT_FILTER_ENABLED", "false"),
        ]);
        assert_eq!(config.channels, vec!["alca", "basetradetv"]);
        assert_eq!(config.server_port, 9001);
        assert!(!config.chat_filter_enabled);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[("SERVER_PORT", "99999"), ("CHAT_HISTORY_LIMIT", "lots")]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.chat_history_limit, 30);
    }

    #[test]
    fn credentials_need_client_id_and_token() {
        let config = config_from(&[
            ("TWITCH_CLIENT_ID", "abc"),
            ("TWITCH_ACCESS_TOKEN", "oauth:xyz"),
        ]);
        let creds = config.helix_credentials().unwrap();
        assert_eq!(creds.access_token, "xyz");
        // No nick: chat stays anonymous.
        assert!(config.irc_config().token.is_none());
    }
}
