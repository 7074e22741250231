//! Layer 1: explicit symbol patterns
//!
//! Recognizes low-ambiguity ticker mentions:
//! - `$CDR` (dollar-prefixed symbol, 2-10 letters)
//! - `(CDR)` (parenthesized uppercase symbol)
//! - `GPW:CDR` (exchange-qualified symbol)
//! - `akcje CDR` (vocabulary word followed by an uppercase token)
//!
//! Every extracted symbol must exist in the registry; this layer never
//! invents identifiers.

use regex::Regex;
use std::sync::LazyLock;

use super::{keep_best, EvidenceMap};
use crate::config::{ConfigError, PatternConfig};
use crate::normalize::char_offset;
use crate::registry::RegistrySnapshot;
use crate::types::{MatchEvidence, MatchMethod};

/// `$CDR`
static DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?P<symbol>[A-Za-z]{2,10})\b").unwrap());

/// `(CDR)`
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<symbol>[A-Z]{2,10})\)").unwrap());

/// `GPW:CDR`
static EXCHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,10}:(?P<symbol>[A-Z]{2,10})\b").unwrap());

/// Compiled symbol patterns with their confidence bands
#[derive(Debug, Clone)]
pub struct SymbolPatterns {
    /// Vocabulary word + uppercase token; None when the vocabulary is empty
    contextual: Option<Regex>,
    symbol_confidence: f32,
    context_confidence: f32,
}

impl SymbolPatterns {
    /// Compile the contextual pattern from the configured vocabulary
    pub fn new(config: &PatternConfig) -> Result<Self, ConfigError> {
        let mut words: Vec<&str> = config
            .context_vocabulary
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .collect();
        // Longer words first so inflected forms win the alternation
        words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        words.dedup();

        let contextual = if words.is_empty() {
            None
        } else {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(
                r"(?i:\b(?:{alternation})\b)\s+(?P<symbol>[A-Z]{{2,10}})\b"
            ))?)
        };

        Ok(Self {
            contextual,
            symbol_confidence: config.symbol_confidence,
            context_confidence: config.context_confidence,
        })
    }

    /// Patterns in scan order with their confidence
    fn scanners(&self) -> Vec<(&Regex, f32)> {
        let mut scanners = vec![
            (&*DOLLAR_RE, self.symbol_confidence),
            (&*PAREN_RE, self.symbol_confidence),
            (&*EXCHANGE_RE, self.symbol_confidence),
        ];
        if let Some(contextual) = &self.contextual {
            scanners.push((contextual, self.context_confidence));
        }
        scanners
    }
}

/// Scan title and body for explicit symbol mentions
pub fn match_patterns(
    title: &str,
    body: &str,
    patterns: &SymbolPatterns,
    snapshot: &RegistrySnapshot,
) -> EvidenceMap {
    let mut found = EvidenceMap::new();

    for (regex, confidence) in patterns.scanners() {
        for (text, in_title) in [(title, true), (body, false)] {
            for caps in regex.captures_iter(text) {
                let (Some(whole), Some(symbol)) = (caps.get(0), caps.name("symbol")) else {
                    continue;
                };

                let ticker = symbol.as_str().to_uppercase();
                if !snapshot.is_valid_ticker(&ticker) {
                    continue;
                }

                keep_best(
                    &mut found,
                    MatchEvidence {
                        method: MatchMethod::Pattern,
                        matched: whole.as_str().to_string(),
                        ticker,
                        position: char_offset(text, whole.start()),
                        in_title,
                        confidence,
                    },
                );
            }
        }
    }

    found
}
