//! Span resolution: which parts of a message become emote images.
//!
//! Platform occurrences are trusted as located by Twitch. Third-party
//! tokens are found by plain substring search. Candidates from both are
//! merged, sorted by start offset, and swept so that the earliest
//! starting candidate wins any overlap.


use crate::model::{EmoteSource, PlatformEmoteOccurrence, ReplacementSpan, ThirdPartyEmoteToken};
use crate::ResolveError;

/// Produce the sorted, non-overlapping replacement spans for `message`.
///
/// `tokens` are scanned in the order given; pass global tokens before
/// channel tokens (see [`crate::EmoteCatalog::third_party_tokens_for`]).
/// At the same start offset platform candidates sort before third-party
/// ones, and otherwise discovery order is kept.
///
/// Fails only when a platform occurrence does not describe a valid
/// range of `message`.
pub fn resolve_spans(
    message: &str,
    platform: &[PlatformEmoteOccurrence],
    tokens: &[ThirdPartyEmoteToken],
) -> Result<Vec<ReplacementSpan>, ResolveError> {
    let mut candidates = Vec::with_capacity(platform.len());

    for occ in platform {
        validate_range(message, occ)?;
        candidates.push(ReplacementSpan::new(
            occ.start,
            occ.end,
            EmoteSource::Platform,
            occ.id.clone(),
        ));
    }

    for token in tokens {
        collect_token_matches(message, token, &mut candidates);
    }

    // Stable: equal keys keep discovery order.
    candidates.sort_by_key(|span| (span.start, span.source.rank()));

    Ok(sweep(candidates))
}

fn validate_range(message: &str, occ: &PlatformEmoteOccurrence) -> Result<(), ResolveError> {
    let valid = occ.start <= occ.end
        && occ.end <= message.len()
        && message.is_char_boundary(occ.start)
        && message.is_char_boundary(occ.end);
    if valid {
        Ok(())
    } else {
        Err(ResolveError::InvalidRange {
            id: occ.id.clone(),
            start: occ.start,
            end: occ.end,
            len: message.len(),
        })
    }
}

/// Every non-overlapping occurrence of `token.code`, left to right.
fn collect_token_matches(
    message: &str,
    token: &ThirdPartyEmoteToken,
    out: &mut Vec<ReplacementSpan>,
) {
    if token.code.is_empty() {
        return;
    }
    let mut cursor = 0;
    while let Some(offset) = message[cursor..].find(token.code.as_str()) {
        let start = cursor + offset;
        let end = start + token.code.len();
        out.push(ReplacementSpan::new(
            start,
            end,
            EmoteSource::ThirdParty,
            token.id.clone(),
        ));
        cursor = end;
    }
}

/// Keep a candidate only when it starts at or after the end of the last kept one.
fn sweep(candidates: Vec<ReplacementSpan>) -> Vec<ReplacementSpan> {
    let mut kept: Vec<ReplacementSpan> = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for span in candidates {
        if span.start == span.end {
            continue;
        }
        if span.start >= last_end {
            last_end = span.end;
            kept.push(span);
        } else {
            tracing::trace!(
                start = span.start,
                end = span.end,
                id = %span.id,
                "Dropped overlapping emote candidate"
            );
        }
    }
    kept
}
