//! Ticker resolution service
//!
//! `TickerResolver` owns one registry cache and the compiled symbol
//! patterns. Construct it once per processing session, call
//! `populate_cache` before a batch, then `resolve` per document.
//! `StubTickerResolver` stands in when no registry is configured.

use async_trait::async_trait;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::{ConfigError, ResolverConfig};
use crate::matching::{
    match_aliases, match_company_names, match_patterns, merge_evidence, rank, SymbolPatterns,
};
use crate::registry::{RegistryCache, RegistrySnapshot, RegistrySource};
use crate::types::MatchResult;

/// Entry points exposed to ingestion / classification pipelines
#[async_trait]
pub trait TickerResolutionService: Send + Sync {
    /// Load the registry once for this session. Never fails; returns
    /// whether a registry is available.
    async fn populate_cache(&self) -> bool;

    /// Resolve the tickers mentioned in a title and body
    async fn resolve(&self, title: &str, body: &str) -> MatchResult;
}

/// Deterministic three-layer resolver
pub struct TickerResolver {
    cache: RegistryCache,
    config: Arc<ResolverConfig>,
    patterns: Arc<SymbolPatterns>,
}

impl TickerResolver {
    /// Create a resolver over a registry source
    ///
    /// Fails only on invalid configuration; the registry itself is not
    /// touched until `populate_cache` or the first `resolve`.
    pub fn new(source: Arc<dyn RegistrySource>, config: ResolverConfig) -> Result<Self, ConfigError> {
        Self::with_cache(RegistryCache::new(source), config)
    }

    /// Create a resolver over an existing cache
    pub fn with_cache(cache: RegistryCache, config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let patterns = SymbolPatterns::new(&config.pattern)?;
        Ok(Self {
            cache,
            config: Arc::new(config),
            patterns: Arc::new(patterns),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &RegistryCache {
        &self.cache
    }

    /// Idempotent registry load; degrades to an empty cache on failure
    #[instrument(skip(self))]
    pub async fn populate_cache(&self) -> bool {
        self.cache.populate().await
    }

    /// Resolve one document, loading the registry on first use
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn resolve(&self, title: &str, body: &str) -> MatchResult {
        let snapshot = self.cache.ensure_loaded().await;
        let result = self.resolve_with_snapshot(&snapshot, title, body);
        debug!(
            tickers = ?result.tickers,
            method = ?result.method,
            "Resolved document"
        );
        result
    }

    /// Pure resolution against a given snapshot
    ///
    /// Identical inputs and snapshot always produce identical output.
    pub fn resolve_with_snapshot(
        &self,
        snapshot: &RegistrySnapshot,
        title: &str,
        body: &str,
    ) -> MatchResult {
        resolve_document(&self.config, &self.patterns, snapshot, title, body)
    }

    /// Resolve many (title, body) pairs against one snapshot
    ///
    /// The registry is loaded once up front. Matching then runs on the
    /// rayon pool inside `spawn_blocking`, so the calling runtime worker
    /// is not held for the length of the batch. Output order matches
    /// input order.
    pub async fn resolve_batch<T>(&self, documents: &[(T, T)]) -> Vec<MatchResult>
    where
        T: AsRef<str>,
    {
        let snapshot = self.cache.ensure_loaded().await;
        let config = self.config.clone();
        let patterns = self.patterns.clone();
        let documents: Vec<(String, String)> = documents
            .iter()
            .map(|(title, body)| (title.as_ref().to_owned(), body.as_ref().to_owned()))
            .collect();
        let count = documents.len();

        let task = tokio::task::spawn_blocking(move || {
            documents
                .par_iter()
                .map(|(title, body)| resolve_document(&config, &patterns, &snapshot, title, body))
                .collect::<Vec<_>>()
        });

        let results = match task.await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Batch resolution task failed, escalating batch to AI");
                vec![MatchResult::ai_needed(); count]
            }
        };

        debug!(
            documents = count,
            resolved = results.iter().filter(|r| r.is_deterministic()).count(),
            "Resolved batch"
        );
        results
    }
}

/// Run the three layers over one document and rank the merged evidence
fn resolve_document(
    config: &ResolverConfig,
    patterns: &SymbolPatterns,
    snapshot: &RegistrySnapshot,
    title: &str,
    body: &str,
) -> MatchResult {
    let name_matches = match_company_names(title, body, config, snapshot);
    let alias_matches = match_aliases(title, body, config, snapshot);
    let pattern_matches = match_patterns(title, body, patterns, snapshot);

    rank(
        merge_evidence(name_matches, alias_matches, pattern_matches),
        config,
    )
}

#[async_trait]
impl TickerResolutionService for TickerResolver {
    async fn populate_cache(&self) -> bool {
        TickerResolver::populate_cache(self).await
    }

    async fn resolve(&self, title: &str, body: &str) -> MatchResult {
        TickerResolver::resolve(self, title, body).await
    }
}

/// Resolver used when no registry is configured: everything needs AI
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTickerResolver;

#[async_trait]
impl TickerResolutionService for StubTickerResolver {
    async fn populate_cache(&self) -> bool {
        false
    }

    async fn resolve(&self, _title: &str, _body: &str) -> MatchResult {
        debug!("Stub resolver: no registry configured");
        MatchResult::ai_needed()
    }
}
