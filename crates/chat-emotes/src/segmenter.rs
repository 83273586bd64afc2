//! Slices a message around resolved spans.

use crate::model::{MessageSegment, ReplacementSpan};

/// Split `message` into text and emote segments.
///
/// `spans` must be sorted and non-overlapping, as returned by
/// [`crate::resolve_spans`]. Empty text segments are never emitted, so an
/// empty message yields an empty list. A span that does not slice
/// `message` cleanly is left in place as text.
pub fn segment_message(message: &str, spans: &[ReplacementSpan]) -> Vec<MessageSegment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor {
            continue;
        }
        let (Some(gap), Some(code)) = (
            message.get(cursor..span.start),
            message.get(span.start..span.end),
        ) else {
            tracing::debug!(start = span.start, end = span.end, "Skipped unsliceable span");
            continue;
        };
        if !gap.is_empty() {
            segments.push(MessageSegment::text(gap));
        }
        segments.push(MessageSegment::emote(span.source, span.id.clone(), code));
        cursor = span.end;
    }

    if let Some(rest) = message.get(cursor..).filter(|rest| !rest.is_empty()) {
        segments.push(MessageSegment::text(rest));
    }

    segments
}
