//! Ticker Resolver - Deterministic entity resolution for market text
//!
//! Maps free-form text (news headlines and bodies, filing titles) to the
//! canonical tickers it mentions, each with a confidence score and the
//! evidence that produced it. No network calls and no model inference:
//! everything runs against an in-memory registry snapshot that is loaded
//! once per processing session.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: ingestion pipeline, classifier, AI pre-filter       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ resolve(title, body)
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     TickerResolver                              │
//! │   Layer 1: symbol patterns   ($CDR, (CDR), GPW:CDR, "akcje CDR") │
//! │   Layer 2: alias dictionary  (word-boundary, longest first)     │
//! │   Layer 3: company names     (display / official substrings)    │
//! │   Ranker:  merge by max confidence, threshold, top-N            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                RegistryCache (write-once)                       │
//! │           RegistrySource -> RegistrySnapshot                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticker_resolver::{ResolverConfig, StaticRegistrySource, TickerResolver};
//!
//! let source = StaticRegistrySource::from_file("config/registry.yaml")?;
//! let resolver = TickerResolver::new(Arc::new(source), ResolverConfig::default())?;
//!
//! // Once per batch
//! resolver.populate_cache().await;
//!
//! let result = resolver.resolve("PKN Orlen ogłosił wyniki Q4", "").await;
//! if result.needs_ai() {
//!     // escalate to the expensive resolver
//! }
//! ```

pub mod config;
pub mod matching;
pub mod normalize;
pub mod registry;
pub mod service;
pub mod types;

// Re-export main types
pub use config::{AliasConfig, CompanyNameConfig, ConfigError, PatternConfig, ResolverConfig};
pub use matching::{EvidenceMap, SymbolPatterns};
pub use registry::{
    Alias, Entity, RegistryCache, RegistryError, RegistrySnapshot, RegistrySource, SnapshotStats,
    StaticRegistrySource,
};
#[cfg(feature = "database")]
pub use registry::PgRegistrySource;
pub use service::{StubTickerResolver, TickerResolutionService, TickerResolver};
pub use types::{MatchEvidence, MatchMethod, MatchResult, ResolutionMethod};
