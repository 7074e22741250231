//! Immutable registry snapshot used by the matching layers
//!
//! The snapshot is built once from raw registry rows. Malformed rows are
//! filtered out here so that the matchers only ever see clean data:
//! - entities with a blank ticker are dropped; duplicate tickers keep the first row
//! - aliases that are blank, point at an unknown ticker, or repeat an
//!   (alias, ticker) pair are dropped
//! - aliases and names are folded (NFKC + lowercase)
//! - aliases are pre-sorted longest first for the alias layer

use std::cmp::Reverse;
use std::collections::HashSet;

use super::source::{Alias, Entity};
use crate::normalize::{char_len, fold_registry_text, normalize_ticker};

/// A folded alias ready for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Folded alias text
    pub alias: String,
    pub ticker: String,
    /// Length in characters
    pub len: usize,
}

/// Folded display / official names for one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub ticker: String,
    pub name: Option<String>,
    pub official_name: Option<String>,
}

/// In-memory registry snapshot for one session
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    entities: Vec<Entity>,
    tickers: HashSet<String>,
    /// Longest alias first
    aliases: Vec<AliasEntry>,
    names: Vec<NameEntry>,
    dropped_entities: usize,
    dropped_aliases: usize,
}

impl RegistrySnapshot {
    /// The degraded snapshot used when the registry cannot be read
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw registry rows
    pub fn build(entities: Vec<Entity>, aliases: Vec<Alias>) -> Self {
        let mut snapshot = Self::default();

        for entity in entities {
            let Some(ticker) = normalize_ticker(&entity.ticker) else {
                snapshot.dropped_entities += 1;
                continue;
            };
            if !snapshot.tickers.insert(ticker.clone()) {
                snapshot.dropped_entities += 1;
                continue;
            }

            snapshot.names.push(NameEntry {
                ticker: ticker.clone(),
                name: fold_registry_text(&entity.name),
                official_name: entity
                    .official_name
                    .as_deref()
                    .and_then(fold_registry_text),
            });
            snapshot.entities.push(Entity {
                ticker,
                name: entity.name,
                official_name: entity.official_name,
            });
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for alias in aliases {
            let entry = normalize_ticker(&alias.ticker)
                .filter(|t| snapshot.tickers.contains(t))
                .zip(fold_registry_text(&alias.alias));

            let Some((ticker, folded)) = entry else {
                snapshot.dropped_aliases += 1;
                continue;
            };
            if !seen.insert((folded.clone(), ticker.clone())) {
                snapshot.dropped_aliases += 1;
                continue;
            }

            snapshot.aliases.push(AliasEntry {
                len: char_len(&folded),
                alias: folded,
                ticker,
            });
        }

        snapshot.aliases.sort_by(|a, b| {
            Reverse(a.len)
                .cmp(&Reverse(b.len))
                .then_with(|| a.alias.cmp(&b.alias))
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        snapshot
    }

    /// Check whether a ticker exists in the registry
    pub fn is_valid_ticker(&self, ticker: &str) -> bool {
        self.tickers.contains(ticker)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Get entity by ticker
    pub fn get(&self, ticker: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.ticker == ticker)
    }

    /// Aliases sorted longest first
    pub fn aliases(&self) -> &[AliasEntry] {
        &self.aliases
    }

    pub fn names(&self) -> &[NameEntry] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Statistics for logging
    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            entity_count: self.entities.len(),
            alias_count: self.aliases.len(),
            official_name_count: self
                .names
                .iter()
                .filter(|n| n.official_name.is_some())
                .count(),
            dropped_entities: self.dropped_entities,
            dropped_aliases: self.dropped_aliases,
        }
    }
}

/// Snapshot statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStats {
    pub entity_count: usize,
    pub alias_count: usize,
    pub official_name_count: usize,
    pub dropped_entities: usize,
    pub dropped_aliases: usize,
}

impl std::fmt::Display for SnapshotStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Registry Snapshot Statistics:")?;
        writeln!(f, "  Entities: {}", self.entity_count)?;
        writeln!(f, "  Aliases: {}", self.alias_count)?;
        writeln!(f, "  Official names: {}", self.official_name_count)?;
        writeln!(f, "  Dropped entities: {}", self.dropped_entities)?;
        writeln!(f, "  Dropped aliases: {}", self.dropped_aliases)?;
        Ok(())
    }
}
