//! CDN URL builders for emote images.

use crate::model::EmoteSource;

const TWITCH_EMOTE_CDN: &str = "https://static-cdn.jtvnw.net/emoticons/v2";
const BTTV_EMOTE_CDN: &str = "https://cdn.betterttv.net/emote";

/// 1x image of a Twitch emote.
pub fn twitch_emote_url(id: &str) -> String {
    format!("{TWITCH_EMOTE_CDN}/{id}/default/dark/1.0")
}

/// 1x image of a BetterTTV emote.
pub fn bttv_emote_url(id: &str) -> String {
    format!("{BTTV_EMOTE_CDN}/{id}/1x")
}

pub fn emote_url(source: EmoteSource, id: &str) -> String {
    match source {
        EmoteSource::Platform => twitch_emote_url(id),
        EmoteSource::ThirdParty => bttv_emote_url(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_per_source() {
        assert_eq!(
            emote_url(EmoteSource::Platform, "25"),
            "https://static-cdn.jtvnw.net/emoticons/v2/25/default/dark/1.0"
        );
        assert_eq!(
            emote_url(EmoteSource::ThirdParty, "566ca04265dbbdab32ec054a"),
            "https://cdn.betterttv.net/emote/566ca04265dbbdab32ec054a/1x"
        );
    }
}
