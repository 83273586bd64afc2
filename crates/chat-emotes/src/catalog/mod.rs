//! Per-session emote and badge index.
//!
//! Holds the third-party emote tokens and Twitch badge tables known for
//! the global scope and for each joined channel. Fetching is done
//! elsewhere; this type only stores what it is given and answers lookups.
//! Every setter replaces its part wholesale.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ThirdPartyEmoteToken;

/// One image version of a badge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BadgeVersion {
    pub image_url_1x: String,
    #[serde(default)]
    pub image_url_2x: String,
    #[serde(default)]
    pub image_url_4x: String,
    #[serde(default)]
    pub title: String,
}

/// Version id -> image.
pub type BadgeVersions = HashMap<String, BadgeVersion>;

/// Badge type (`subscriber`, `moderator`, ...) -> versions.
pub type BadgeSets = HashMap<String, BadgeVersions>;

/// A badge a chatter wears, as listed in the message tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub badge_type: String,
    pub version: String,
}

impl UserBadge {
    pub fn new(badge_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            badge_type: badge_type.into(),
            version: version.into(),
        }
    }
}

/// A badge ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeImage {
    pub badge_type: String,
    pub version: String,
    pub url: String,
}

/// Emote tokens and badge tables for the global scope and each channel.
#[derive(Debug, Clone, Default)]
pub struct EmoteCatalog {
    global_tokens: Vec<ThirdPartyEmoteToken>,
    channel_tokens: HashMap<String, Vec<ThirdPartyEmoteToken>>,
    global_badges: BadgeSets,
    channel_badges: HashMap<String, BadgeSets>,
}

/// Strip a leading `#` and lowercase.
pub fn normalize_channel(channel: &str) -> String {
    channel.trim().trim_start_matches('#').to_lowercase()
}

impl EmoteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global_tokens(&mut self, tokens: Vec<ThirdPartyEmoteToken>) {
        tracing::debug!(count = tokens.len(), "Global emote tokens replaced");
        self.global_tokens = tokens;
    }

    pub fn set_channel_tokens(&mut self, channel: &str, tokens: Vec<ThirdPartyEmoteToken>) {
        let channel = normalize_channel(channel);
        tracing::debug!(channel, count = tokens.len(), "Channel emote tokens replaced");
        self.channel_tokens.insert(channel, tokens);
    }

    pub fn set_global_badges(&mut self, badges: BadgeSets) {
        self.global_badges = badges;
    }

    pub fn set_channel_badges(&mut self, channel: &str, badges: BadgeSets) {
        self.channel_badges.insert(normalize_channel(channel), badges);
    }

    /// Forget the channel's emote tokens. Badge tables are kept.
    pub fn remove_channel(&mut self, channel: &str) {
        self.channel_tokens.remove(&normalize_channel(channel));
    }

    /// Drop everything, as after a disconnect.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Tokens to scan for `channel`: global first, then channel, each in catalog order.
    pub fn third_party_tokens_for(&self, channel: &str) -> Vec<ThirdPartyEmoteToken> {
        let mut tokens = self.global_tokens.clone();
        if let Some(channel_tokens) = self.channel_tokens.get(&normalize_channel(channel)) {
            tokens.extend(channel_tokens.iter().cloned());
        }
        tokens
    }

    /// Global badge sets overlaid by the channel's; a channel set replaces
    /// the global set of the same type.
    pub fn platform_badges_for(&self, channel: &str) -> BadgeSets {
        let mut sets = self.global_badges.clone();
        if let Some(channel_sets) = self.channel_badges.get(&normalize_channel(channel)) {
            for (badge_type, versions) in channel_sets {
                sets.insert(badge_type.clone(), versions.clone());
            }
        }
        sets
    }

    /// Images for the badges a chatter wears, in the chatter's order.
    ///
    /// Badges missing from the merged tables are skipped.
    pub fn resolve_badges(&self, channel: &str, badges: &[UserBadge]) -> Vec<BadgeImage> {
        if badges.is_empty() {
            return Vec::new();
        }
        let sets = self.platform_badges_for(channel);
        badges
            .iter()
            .filter_map(|badge| {
                let version = sets.get(&badge.badge_type)?.get(&badge.version)?;
                Some(BadgeImage {
                    badge_type: badge.badge_type.clone(),
                    version: badge.version.clone(),
                    url: version.image_url_1x.clone(),
                })
            })
            .collect()
    }

    pub fn global_token_count(&self) -> usize {
        self.global_tokens.len()
    }

    pub fn channel_token_count(&self, channel: &str) -> usize {
        self.channel_tokens
            .get(&normalize_channel(channel))
            .map_or(0, Vec::len)
    }
}
