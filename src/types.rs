//! Result and evidence types produced by the resolver

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which matching layer produced a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Explicit symbol pattern ($CDR, (CDR), GPW:CDR, contextual phrase)
    Pattern,
    /// Alias dictionary hit
    Alias,
    /// Display or official company name substring
    CompanyName,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Pattern => "pattern",
            MatchMethod::Alias => "alias",
            MatchMethod::CompanyName => "company_name",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall outcome of a resolution call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// At least one ticker passed the acceptance threshold
    Deterministic,
    /// Nothing qualified; the caller should escalate to a costlier resolver
    AiNeeded,
}

/// One matcher's finding for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub method: MatchMethod,
    /// Literal substring of the title or body that triggered the match
    pub matched: String,
    pub ticker: String,
    /// Character offset of the match within the raw title or body
    pub position: usize,
    pub in_title: bool,
    pub confidence: f32,
}

/// Ranked output of a single resolution call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Highest confidence first
    pub tickers: Vec<String>,
    pub confidence: BTreeMap<String, f32>,
    pub method: ResolutionMethod,
    /// Winning evidence per returned ticker, in `tickers` order
    pub evidence: Vec<MatchEvidence>,
}

impl MatchResult {
    /// The inconclusive result: no tickers, no evidence
    pub fn ai_needed() -> Self {
        Self {
            tickers: Vec::new(),
            confidence: BTreeMap::new(),
            method: ResolutionMethod::AiNeeded,
            evidence: Vec::new(),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.method == ResolutionMethod::Deterministic
    }

    pub fn needs_ai(&self) -> bool {
        self.method == ResolutionMethod::AiNeeded
    }

    /// Best-ranked ticker, if any
    pub fn top_ticker(&self) -> Option<&str> {
        self.tickers.first().map(|s| s.as_str())
    }

    pub fn confidence_for(&self, ticker: &str) -> Option<f32> {
        self.confidence.get(ticker).copied()
    }

    /// Evidence record retained for a ticker
    pub fn evidence_for(&self, ticker: &str) -> Option<&MatchEvidence> {
        self.evidence.iter().find(|e| e.ticker == ticker)
    }
}
