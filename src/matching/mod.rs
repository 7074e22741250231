//! Matching layers
//!
//! Each layer is a pure function over the title, the body and the registry
//! snapshot, returning the best evidence it found per ticker:
//! - `pattern`: explicit symbol mentions ($CDR, (CDR), GPW:CDR, "akcje CDR")
//! - `alias`: alias dictionary with word boundaries, longest alias first
//! - `company_name`: display / official name substrings
//!
//! The `ranker` folds the three maps into one `MatchResult`.

pub mod alias;
pub mod company_name;
pub mod pattern;
pub mod ranker;

use std::collections::BTreeMap;

use crate::types::MatchEvidence;

pub use alias::match_aliases;
pub use company_name::match_company_names;
pub use pattern::{match_patterns, SymbolPatterns};
pub use ranker::{merge_evidence, rank};

/// Best evidence per ticker, ordered by ticker
pub type EvidenceMap = BTreeMap<String, MatchEvidence>;

/// Insert evidence unless the ticker already holds evidence with equal or
/// higher confidence. Earlier evidence wins ties.
pub fn keep_best(map: &mut EvidenceMap, evidence: MatchEvidence) {
    match map.get(&evidence.ticker) {
        Some(existing) if existing.confidence >= evidence.confidence => {}
        _ => {
            map.insert(evidence.ticker.clone(), evidence);
        }
    }
}
