//! Write-once registry cache
//!
//! The cache reads the registry source at most once per session and hands
//! out shared references to the resulting snapshot. Concurrent callers of
//! `ensure_loaded` wait on a single population; nobody observes a
//! partially built snapshot.
//!
//! Population fails soft: if the source errors, the failure is logged and
//! remembered for the rest of the session. Callers get an empty snapshot
//! (every layer then finds nothing) and the source is not read again; a
//! new cache is the only way to retry.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::snapshot::{RegistrySnapshot, SnapshotStats};
use super::source::{RegistryError, RegistrySource, StaticRegistrySource};

/// Session-scoped registry cache
pub struct RegistryCache {
    source: Arc<dyn RegistrySource>,
    /// Outcome of the one population attempt; `None` when it failed
    snapshot: OnceCell<Option<Arc<RegistrySnapshot>>>,
    empty: Arc<RegistrySnapshot>,
}

impl RegistryCache {
    /// Create an unloaded cache backed by the given source
    pub fn new(source: Arc<dyn RegistrySource>) -> Self {
        Self {
            source,
            snapshot: OnceCell::new(),
            empty: Arc::new(RegistrySnapshot::empty()),
        }
    }

    /// Create a cache that is already loaded with a prebuilt snapshot
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            source: Arc::new(StaticRegistrySource::default()),
            snapshot: OnceCell::new_with(Some(Some(Arc::new(snapshot)))),
            empty: Arc::new(RegistrySnapshot::empty()),
        }
    }

    /// Load the registry if no attempt has been made yet
    ///
    /// Idempotent: after the first call, successful or not, this is a
    /// no-op. Returns whether a registry snapshot is available; never errors.
    pub async fn populate(&self) -> bool {
        self.attempt_population().await.is_some()
    }

    /// Guard used by every resolution call
    ///
    /// Returns the loaded snapshot, populating on first use, or the empty
    /// snapshot if the registry was unavailable.
    pub async fn ensure_loaded(&self) -> Arc<RegistrySnapshot> {
        self.attempt_population()
            .await
            .unwrap_or_else(|| self.empty.clone())
    }

    /// Peek at the snapshot without triggering a load
    pub fn snapshot(&self) -> Option<Arc<RegistrySnapshot>> {
        self.snapshot.get().cloned().flatten()
    }

    /// Whether a registry snapshot is available
    pub fn is_loaded(&self) -> bool {
        matches!(self.snapshot.get(), Some(Some(_)))
    }

    /// Whether population has been attempted, successfully or not
    pub fn is_attempted(&self) -> bool {
        self.snapshot.initialized()
    }

    pub fn stats(&self) -> Option<SnapshotStats> {
        self.snapshot().map(|s| s.stats())
    }

    async fn attempt_population(&self) -> Option<Arc<RegistrySnapshot>> {
        self.snapshot
            .get_or_init(|| async {
                match Self::load(self.source.as_ref()).await {
                    Ok(snapshot) => {
                        let stats = snapshot.stats();
                        info!(
                            entities = stats.entity_count,
                            aliases = stats.alias_count,
                            dropped_entities = stats.dropped_entities,
                            dropped_aliases = stats.dropped_aliases,
                            "Registry cache populated"
                        );
                        Some(Arc::new(snapshot))
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            "Registry unavailable, resolving against an empty cache for this session"
                        );
                        None
                    }
                }
            })
            .await
            .clone()
    }

    async fn load(source: &dyn RegistrySource) -> Result<RegistrySnapshot, RegistryError> {
        let entities = source.load_entities().await?;
        let aliases = source.load_aliases().await?;
        Ok(RegistrySnapshot::build(entities, aliases))
    }
}
