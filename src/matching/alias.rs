//! Layer 2: alias dictionary matching
//!
//! Aliases come pre-sorted longest first from the snapshot, so specific
//! strings ("polski koncern naftowy") are tried before short, ambiguous
//! ones. A hit must sit on word boundaries: "orlen" matches "PKN Orlen:"
//! but not "Orlenowski". Evidence reports the raw substring and its raw
//! character offset, not the folded form.

use super::{keep_best, EvidenceMap};
use crate::config::ResolverConfig;
use crate::normalize::{is_word_char, FoldedText};
use crate::registry::RegistrySnapshot;
use crate::types::{MatchEvidence, MatchMethod};

/// Scan title and body for registered aliases
pub fn match_aliases(
    title: &str,
    body: &str,
    config: &ResolverConfig,
    snapshot: &RegistrySnapshot,
) -> EvidenceMap {
    let title = FoldedText::new(title);
    let body = FoldedText::new(body);
    let mut found = EvidenceMap::new();

    for entry in snapshot.aliases() {
        if found.len() >= config.alias.max_tickers {
            break;
        }
        // Sorted longest first: everything after this is too short as well
        if entry.len < config.alias.min_alias_len {
            break;
        }

        let base = config.alias.base_confidence(entry.len);
        for (text, in_title) in [(&title, true), (&body, false)] {
            let Some(idx) = find_word_bounded(text.as_str(), &entry.alias) else {
                continue;
            };
            keep_best(
                &mut found,
                MatchEvidence {
                    method: MatchMethod::Alias,
                    matched: text.raw_slice(idx, idx + entry.alias.len()).to_string(),
                    ticker: entry.ticker.clone(),
                    position: text.raw_char_offset(idx),
                    in_title,
                    confidence: config.with_title_bonus(base, in_title),
                },
            );
        }
    }

    found
}

/// Byte index of the first occurrence of `needle` that is not part of a larger word
pub fn find_word_bounded(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut start = 0;
    while let Some(rel) = haystack[start..].find(needle) {
        let idx = start + rel;
        let end = idx + needle.len();

        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));

        if before_ok && after_ok {
            return Some(idx);
        }

        // Step one character forward so overlapping occurrences are tried
        start = idx + haystack[idx..].chars().next().map_or(1, |c| c.len_utf8());
    }

    None
}
