use chat_emotes::{BadgeSets, BadgeVersion};
use serde::Deserialize;

use super::*;

#[derive(Debug, Deserialize)]
struct BadgeResponse {
    data: Vec<BadgeSet>,
}

#[derive(Debug, Deserialize)]
struct BadgeSet {
    set_id: String,
    versions: Vec<HelixBadgeVersion>,
}

#[derive(Debug, Deserialize)]
struct HelixBadgeVersion {
    id: String,
    image_url_1x: String,
    #[serde(default)]
    image_url_2x: String,
    #[serde(default)]
    image_url_4x: String,
    #[serde(default)]
    title: String,
}

/// Parse a Helix `chat/badges` response into badge tables.
pub fn parse_badge_sets(body: &str) -> Result<BadgeSets, TwitchError> {
    let resp: BadgeResponse = serde_json::from_str(body)?;
    Ok(resp
        .data
        .into_iter()
        .map(|set| {
            let versions = set
                .versions
                .into_iter()
                .map(|v| {
                    (
                        v.id,
                        BadgeVersion {
                            image_url_1x: v.image_url_1x,
                            image_url_2x: v.image_url_2x,
                            image_url_4x: v.image_url_4x,
                            title: v.title,
                        },
                    )
                })
                .collect();
            (set.set_id, versions)
        })
        .collect())
}

impl CatalogFetcher {
    /// Fetch global chat badges. Empty without credentials.
    pub async fn global_badges(&self) -> Result<BadgeSets, TwitchError> {
        let url = format!("{}/chat/badges/global", self.helix_base);
        self.fetch_badges(&url).await
    }

    /// Fetch a broadcaster's custom badges. Empty without credentials.
    pub async fn channel_badges(&self, broadcaster_id: &str) -> Result<BadgeSets, TwitchError> {
        let url = format!(
            "{}/chat/badges?broadcaster_id={broadcaster_id}",
            self.helix_base
        );
        self.fetch_badges(&url).await
    }

    async fn fetch_badges(&self, url: &str) -> Result<BadgeSets, TwitchError> {
        let Some(credentials) = self.credentials.as_ref() else {
            tracing::debug!("No Helix credentials; skipping badge fetch");
            return Ok(BadgeSets::new());
        };
        let Some(body) = self.fetch(url, Some(credentials)).await? else {
            return Ok(BadgeSets::new());
        };
        let sets = parse_badge_sets(&body)?;
        tracing::debug!(count = sets.len(), "Fetched badge sets");
        Ok(sets)
    }
}
