//! Layer 3: company-name matching
//!
//! Catches mentions that spell out the registered display name or the
//! official (legal) name. Multi-word names are matched as plain
//! substrings, without word boundaries. The official name scores a little
//! higher: legal names rarely collide with unrelated text. Evidence
//! reports the raw substring and its raw character offset.

use super::{keep_best, EvidenceMap};
use crate::config::ResolverConfig;
use crate::normalize::{char_len, FoldedText};
use crate::registry::RegistrySnapshot;
use crate::types::{MatchEvidence, MatchMethod};

/// Scan title and body for display and official company names
pub fn match_company_names(
    title: &str,
    body: &str,
    config: &ResolverConfig,
    snapshot: &RegistrySnapshot,
) -> EvidenceMap {
    let title = FoldedText::new(title);
    let body = FoldedText::new(body);
    let names = &config.company_name;
    let mut found = EvidenceMap::new();

    for entry in snapshot.names() {
        let variants = [
            (entry.name.as_deref(), names.name_confidence),
            (entry.official_name.as_deref(), names.official_name_confidence),
        ];

        for (variant, base) in variants {
            let Some(variant) = variant else { continue };
            if char_len(variant) < names.min_name_len {
                continue;
            }

            for (text, in_title) in [(&title, true), (&body, false)] {
                let Some(idx) = text.as_str().find(variant) else {
                    continue;
                };
                keep_best(
                    &mut found,
                    MatchEvidence {
                        method: MatchMethod::CompanyName,
                        matched: text.raw_slice(idx, idx + variant.len()).to_string(),
                        ticker: entry.ticker.clone(),
                        position: text.raw_char_offset(idx),
                        in_title,
                        confidence: config.with_title_bonus(base, in_title),
                    },
                );
            }
        }
    }

    found
}
