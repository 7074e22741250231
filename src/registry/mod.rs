//! Entity registry: sources, the immutable snapshot, and the session cache
//!
//! The registry is read-only from the resolver's point of view. A
//! `RegistrySource` supplies entities and aliases, `RegistrySnapshot`
//! turns them into lookup structures, and `RegistryCache` builds the
//! snapshot at most once per session.

mod cache;
#[cfg(feature = "database")]
mod postgres;
mod snapshot;
mod source;

pub use cache::RegistryCache;
#[cfg(feature = "database")]
pub use postgres::PgRegistrySource;
pub use snapshot::{AliasEntry, NameEntry, RegistrySnapshot, SnapshotStats};
pub use source::{Alias, Entity, RegistryError, RegistrySource, StaticRegistrySource};
