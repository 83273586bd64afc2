//! Emote and badge catalog fetching.
//!
//! Loads BetterTTV emote tokens and Twitch badge sets so they can be
//! stored in a [`chat_emotes::EmoteCatalog`]. Network and parse errors
//! are returned to the caller, which is expected to log them and keep
//! going with whatever it already has.

mod badges;
mod bttv;

pub use badges::parse_badge_sets;
pub use bttv::{parse_bttv_channel, parse_bttv_global};

use crate::TwitchError;

const BTTV_BASE: &str = "https://api.betterttv.net/3";
const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// App credentials for Helix requests.
#[derive(Debug, Clone)]
pub struct HelixCredentials {
    pub client_id: String,
    pub access_token: String,
}

/// HTTP client for the catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    http: reqwest::Client,
    bttv_base: String,
    helix_base: String,
    credentials: Option<HelixCredentials>,
}

impl CatalogFetcher {
    pub fn new(credentials: Option<HelixCredentials>) -> Self {
        Self::with_base_urls(BTTV_BASE, HELIX_BASE, credentials)
    }

    /// Point the fetcher at other hosts (used by tests and mirrors).
    pub fn with_base_urls(
        bttv_base: &str,
        helix_base: &str,
        credentials: Option<HelixCredentials>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            bttv_base: bttv_base.trim_end_matches('/').to_string(),
            helix_base: helix_base.trim_end_matches('/').to_string(),
            credentials: credentials
                .filter(|c| !c.client_id.is_empty() && !c.access_token.is_empty()),
        }
    }

    /// Whether badge requests can be made.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Send a GET request. `Ok(None)` on 404.
    async fn fetch(
        &self,
        url: &str,
        credentials: Option<&HelixCredentials>,
    ) -> Result<Option<String>, TwitchError> {
        let mut req = self.http.get(url);
        if let Some(c) = credentials {
            req = req
                .header("Authorization", format!("Bearer {}", c.access_token))
                .header("Client-Id", &c.client_id);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(TwitchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(Some(body))
    }
}
