//! Value types shared by the resolver, segmenter and catalog.
//!
//! All offsets are byte offsets into the UTF-8 message, half-open
//! (`start..end`).

use serde::{Deserialize, Serialize};

use crate::urls;

/// Where an emote comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmoteSource {
    /// Supplied by Twitch, located by range.
    #[serde(rename = "twitch")]
    Platform,
    /// Supplied by BetterTTV, located by text match.
    #[serde(rename = "bttv")]
    ThirdParty,
}

impl EmoteSource {
    /// Sort rank used to break ties at the same start offset.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Self::Platform => 0,
            Self::ThirdParty => 1,
        }
    }
}

/// Catalog a third-party token was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmoteScope {
    Global,
    Channel,
}

/// One occurrence of a platform emote in one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEmoteOccurrence {
    pub id: String,
    pub start: usize,
    pub end: usize,
}

impl PlatformEmoteOccurrence {
    pub fn new(id: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// The literal text this occurrence covers, if the range is valid for `message`.
    pub fn code<'a>(&self, message: &'a str) -> Option<&'a str> {
        message.get(self.start..self.end)
    }
}

/// One entry of a third-party emote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyEmoteToken {
    pub code: String,
    pub id: String,
    pub scope: EmoteScope,
}

impl ThirdPartyEmoteToken {
    pub fn new(code: impl Into<String>, id: impl Into<String>, scope: EmoteScope) -> Self {
        Self {
            code: code.into(),
            id: id.into(),
            scope,
        }
    }
}

/// A range of the message slated for image replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementSpan {
    pub start: usize,
    pub end: usize,
    pub source: EmoteSource,
    pub id: String,
}

impl ReplacementSpan {
    pub fn new(start: usize, end: usize, source: EmoteSource, id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            source,
            id: id.into(),
        }
    }
}

/// A contiguous piece of a rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageSegment {
    Text {
        text: String,
    },
    Emote {
        source: EmoteSource,
        id: String,
        /// Original message text, used as alt text.
        code: String,
    },
}

impl MessageSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn emote(source: EmoteSource, id: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Emote {
            source,
            id: id.into(),
            code: code.into(),
        }
    }

    /// The message text this segment stands for.
    pub fn literal(&self) -> &str {
        match self {
            Self::Text { text } => text,
            Self::Emote { code, .. } => code,
        }
    }

    /// Image URL for emote segments.
    pub fn image_url(&self) -> Option<String> {
        match self {
            Self::Text { .. } => None,
            Self::Emote { source, id, .. } => Some(urls::emote_url(*source, id)),
        }
    }
}
