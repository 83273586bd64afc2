use chat_emotes::{EmoteScope, ThirdPartyEmoteToken};
use serde::Deserialize;

use super::*;

#[derive(Debug, Deserialize)]
struct BttvEmote {
    id: String,
    code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BttvUser {
    #[serde(default)]
    channel_emotes: Vec<BttvEmote>,
    #[serde(default)]
    shared_emotes: Vec<BttvEmote>,
}

fn into_tokens(
    emotes: impl IntoIterator<Item = BttvEmote>,
    scope: EmoteScope,
) -> Vec<ThirdPartyEmoteToken> {
    emotes
        .into_iter()
        .filter(|e| !e.code.is_empty())
        .map(|e| ThirdPartyEmoteToken::new(e.code, e.id, scope))
        .collect()
}

/// Parse `/cached/emotes/global`.
pub fn parse_bttv_global(body: &str) -> Result<Vec<ThirdPartyEmoteToken>, TwitchError> {
    let emotes: Vec<BttvEmote> = serde_json::from_str(body)?;
    Ok(into_tokens(emotes, EmoteScope::Global))
}

/// Parse `/cached/users/twitch/{id}`: channel emotes, then shared emotes.
pub fn parse_bttv_channel(body: &str) -> Result<Vec<ThirdPartyEmoteToken>, TwitchError> {
    let user: BttvUser = serde_json::from_str(body)?;
    Ok(into_tokens(
        user.channel_emotes.into_iter().chain(user.shared_emotes),
        EmoteScope::Channel,
    ))
}

impl CatalogFetcher {
    /// Fetch global BetterTTV emotes.
    pub async fn bttv_global_emotes(&self) -> Result<Vec<ThirdPartyEmoteToken>, TwitchError> {
        let url = format!("{}/cached/emotes/global", self.bttv_base);
        let Some(body) = self.fetch(&url, None).await? else {
            return Ok(Vec::new());
        };
        let tokens = parse_bttv_global(&body)?;
        tracing::debug!(count = tokens.len(), "Fetched global BTTV emotes");
        Ok(tokens)
    }

    /// Fetch BetterTTV emotes for a channel by Twitch room id.
    ///
    /// Channels without a BetterTTV account answer 404, which yields an empty list.
    pub async fn bttv_channel_emotes(
        &self,
        room_id: &str,
    ) -> Result<Vec<ThirdPartyEmoteToken>, TwitchError> {
        let url = format!("{}/cached/users/twitch/{room_id}", self.bttv_base);
        let Some(body) = self.fetch(&url, None).await? else {
            tracing::debug!(room_id, "No BTTV account for channel");
            return Ok(Vec::new());
        };
        let tokens = parse_bttv_channel(&body)?;
        tracing::debug!(count = tokens.len(), room_id, "Fetched channel BTTV emotes");
        Ok(tokens)
    }
}
