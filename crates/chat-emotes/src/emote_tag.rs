//! Parsing of the Twitch IRC `emotes` tag.
//!
//! The tag looks like `25:0-4,12-16/1902:6-10`: emote id, then a list of
//! inclusive ranges counted in Unicode code points.

use crate::model::PlatformEmoteOccurrence;

/// Convert an `emotes` tag into byte-range occurrences for `message`.
///
/// Entries that are malformed or fall outside the message are skipped.
/// Output keeps tag order.
pub fn parse_emotes_tag(tag: &str, message: &str) -> Vec<PlatformEmoteOccurrence> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Vec::new();
    }

    // Byte offset of every code point, plus the end of the message.
    let boundaries: Vec<usize> = message
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(message.len()))
        .collect();

    let mut out = Vec::new();
    for entry in tag.split('/').filter(|e| !e.is_empty()) {
        let Some((id, ranges)) = entry.split_once(':') else {
            tracing::debug!(entry, "Skipped emote entry without ranges");
            continue;
        };
        if id.is_empty() {
            continue;
        }
        for range in ranges.split(',').filter(|r| !r.is_empty()) {
            match to_byte_range(range, &boundaries) {
                Some((start, end)) => out.push(PlatformEmoteOccurrence::new(id, start, end)),
                None => tracing::debug!(id, range, "Skipped invalid emote range"),
            }
        }
    }
    out
}

fn to_byte_range(range: &str, boundaries: &[usize]) -> Option<(usize, usize)> {
    let (first, last) = range.split_once('-')?;
    let first: usize = first.trim().parse().ok()?;
    let last: usize = last.trim().parse().ok()?;
    if first > last {
        return None;
    }
    let start = *boundaries.get(first)?;
    let end = *boundaries.get(last.checked_add(1)?)?;
    Some((start, end))
}
