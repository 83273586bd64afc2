//! Chat message emote and badge annotation.
//!
//! Turns a raw chat line plus the emote data known for its channel into
//! an ordered list of text and emote-image segments for an overlay to
//! render. Everything here is pure and synchronous.

pub mod catalog;
pub mod emote_tag;
pub mod model;
pub mod resolver;
pub mod segmenter;
pub mod urls;

pub use catalog::{
    BadgeImage, BadgeSets, BadgeVersion, BadgeVersions, EmoteCatalog, UserBadge, normalize_channel,
};
pub use emote_tag::parse_emotes_tag;
pub use model::{
    EmoteScope, EmoteSource, MessageSegment, PlatformEmoteOccurrence, ReplacementSpan,
    ThirdPartyEmoteToken,
};
pub use resolver::resolve_spans;
pub use segmenter::segment_message;

/// Errors raised at the resolver boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid emote range {start}..{end} for emote {id} (message length {len})")]
    InvalidRange {
        id: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Resolve and segment a message in one call.
///
/// Equivalent to [`resolve_spans`] followed by [`segment_message`].
pub fn annotate(
    message: &str,
    platform: &[PlatformEmoteOccurrence],
    tokens: &[ThirdPartyEmoteToken],
) -> Result<Vec<MessageSegment>, ResolveError> {
    let spans = resolve_spans(message, platform, tokens)?;
    Ok(segment_message(message, &spans))
}
