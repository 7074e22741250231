//! Evidence merger and ranker
//!
//! Folds the per-layer evidence maps into one map (max confidence per
//! ticker), drops tickers below the acceptance threshold, sorts by
//! confidence and truncates to the configured maximum.
//!
//! Merge order is fixed: company names, then aliases, then patterns. A
//! later layer replaces an earlier one only with strictly higher
//! confidence, so on an exact tie the evidence merged first is retained.
//! Equal-confidence tickers keep ticker order (the maps are ordered by
//! ticker and the sort is stable).

use std::cmp::Ordering;

use super::{keep_best, EvidenceMap};
use crate::config::ResolverConfig;
use crate::types::{MatchResult, ResolutionMethod};

/// Combine the three layers into the best evidence per ticker
pub fn merge_evidence(
    name_matches: EvidenceMap,
    alias_matches: EvidenceMap,
    pattern_matches: EvidenceMap,
) -> EvidenceMap {
    let mut merged = EvidenceMap::new();

    for layer in [name_matches, alias_matches, pattern_matches] {
        for evidence in layer.into_values() {
            keep_best(&mut merged, evidence);
        }
    }

    merged
}

/// Threshold, sort and truncate merged evidence into a result
pub fn rank(merged: EvidenceMap, config: &ResolverConfig) -> MatchResult {
    let mut accepted: Vec<_> = merged
        .into_values()
        .filter(|e| e.confidence >= config.acceptance_threshold)
        .collect();

    if accepted.is_empty() {
        return MatchResult::ai_needed();
    }

    accepted.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    accepted.truncate(config.max_results);

    MatchResult {
        tickers: accepted.iter().map(|e| e.ticker.clone()).collect(),
        confidence: accepted
            .iter()
            .map(|e| (e.ticker.clone(), e.confidence))
            .collect(),
        method: ResolutionMethod::Deterministic,
        evidence: accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchEvidence, MatchMethod};
    use proptest::prelude::*;

    fn evidence(ticker: &str, method: MatchMethod, confidence: f32) -> MatchEvidence {
        MatchEvidence {
            method,
            matched: ticker.to_lowercase(),
            ticker: ticker.to_string(),
            position: 0,
            in_title: true,
            confidence,
        }
    }

    fn map(items: &[(&str, MatchMethod, f32)]) -> EvidenceMap {
        let mut map = EvidenceMap::new();
        for (ticker, method, confidence) in items {
            keep_best(&mut map, evidence(ticker, *method, *confidence));
        }
        map
    }

    #[test]
    fn test_merge_takes_max() {
        let merged = merge_evidence(
            map(&[("PKN", MatchMethod::CompanyName, 0.75)]),
            map(&[("PKN", MatchMethod::Alias, 0.90)]),
            map(&[("PKN", MatchMethod::Pattern, 0.90)]),
        );

        // Alias and pattern tie at 0.90; the alias was merged first
        assert_eq!(merged["PKN"].method, MatchMethod::Alias);
        assert_eq!(merged["PKN"].confidence, 0.90);
    }

    #[test]
    fn test_merge_pattern_wins_when_higher() {
        let merged = merge_evidence(
            map(&[("CDR", MatchMethod::CompanyName, 0.75)]),
            map(&[("CDR", MatchMethod::Alias, 0.80)]),
            map(&[("CDR", MatchMethod::Pattern, 0.95)]),
        );
        assert_eq!(merged["CDR"].method, MatchMethod::Pattern);
    }

    #[test]
    fn test_merge_name_kept_on_tie_with_alias() {
        let merged = merge_evidence(
            map(&[("CDR", MatchMethod::CompanyName, 0.75)]),
            map(&[("CDR", MatchMethod::Alias, 0.75)]),
            EvidenceMap::new(),
        );
        assert_eq!(merged["CDR"].method, MatchMethod::CompanyName);
    }

    #[test]
    fn test_rank_filters_below_threshold() {
        let result = rank(
            map(&[
                ("PKN", MatchMethod::Alias, 0.75),
                ("PZU", MatchMethod::Alias, 0.55),
            ]),
            &ResolverConfig::default(),
        );

        assert_eq!(result.tickers, vec!["PKN"]);
        assert!(result.confidence_for("PZU").is_none());
        assert_eq!(result.method, ResolutionMethod::Deterministic);
    }

    #[test]
    fn test_rank_threshold_inclusive() {
        let result = rank(
            map(&[("PKN", MatchMethod::Alias, 0.60)]),
            &ResolverConfig::default(),
        );
        assert_eq!(result.tickers, vec!["PKN"]);
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let result = rank(
            map(&[
                ("AAA", MatchMethod::Alias, 0.70),
                ("BBB", MatchMethod::Pattern, 0.95),
                ("CCC", MatchMethod::Alias, 0.80),
                ("DDD", MatchMethod::CompanyName, 0.75),
                ("EEE", MatchMethod::Alias, 0.90),
                ("FFF", MatchMethod::Alias, 0.65),
            ]),
            &ResolverConfig::default(),
        );

        assert_eq!(result.tickers, vec!["BBB", "EEE", "CCC", "DDD", "AAA"]);
        assert_eq!(result.evidence.len(), 5);
        assert_eq!(result.confidence.len(), 5);
        assert_eq!(result.evidence[0].ticker, "BBB");
    }

    #[test]
    fn test_rank_empty_is_ai_needed() {
        let result = rank(EvidenceMap::new(), &ResolverConfig::default());
        assert_eq!(result, MatchResult::ai_needed());

        let result = rank(
            map(&[("PKN", MatchMethod::Alias, 0.30)]),
            &ResolverConfig::default(),
        );
        assert_eq!(result, MatchResult::ai_needed());
    }

    fn arb_layer() -> impl Strategy<Value = Vec<(usize, f32)>> {
        prop::collection::vec((0usize..12, 0.0f32..=1.0f32), 0..10)
    }

    fn build_layer(items: &[(usize, f32)], method: MatchMethod) -> EvidenceMap {
        let mut layer = EvidenceMap::new();
        for (idx, confidence) in items {
            keep_best(
                &mut layer,
                evidence(&format!("T{idx:02}"), method, *confidence),
            );
        }
        layer
    }

    proptest! {
        #[test]
        fn ranked_result_respects_bounds(
            names in arb_layer(),
            aliases in arb_layer(),
            patterns in arb_layer(),
        ) {
            let config = ResolverConfig::default();
            let name_map = build_layer(&names, MatchMethod::CompanyName);
            let alias_map = build_layer(&aliases, MatchMethod::Alias);
            let pattern_map = build_layer(&patterns, MatchMethod::Pattern);

            let merged = merge_evidence(name_map.clone(), alias_map.clone(), pattern_map.clone());
            let result = rank(merged, &config);

            prop_assert!(result.tickers.len() <= config.max_results);
            prop_assert_eq!(result.tickers.len(), result.evidence.len());
            prop_assert_eq!(result.tickers.len(), result.confidence.len());

            for ticker in &result.tickers {
                let reported = result.confidence[ticker];
                prop_assert!(reported >= config.acceptance_threshold && reported <= 1.0);

                // Reported confidence is the max over all layers, never more
                let best = [&name_map, &alias_map, &pattern_map]
                    .iter()
                    .filter_map(|m| m.get(ticker).map(|e| e.confidence))
                    .fold(f32::MIN, f32::max);
                prop_assert_eq!(reported, best);
            }

            for pair in result.evidence.windows(2) {
                prop_assert!(pair[0].confidence >= pair[1].confidence);
            }

            if result.tickers.is_empty() {
                prop_assert_eq!(result.method, ResolutionMethod::AiNeeded);
            } else {
                prop_assert_eq!(result.method, ResolutionMethod::Deterministic);
            }
        }
    }
}
