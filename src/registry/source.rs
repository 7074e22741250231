//! Registry records and the `RegistrySource` abstraction
//!
//! Hosts plug their entity store in behind `RegistrySource`. The crate
//! ships an in-memory source (optionally loaded from YAML) and, with the
//! `database` feature, a Postgres source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A tradable company / security
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Short unique uppercase identifier (primary key)
    pub ticker: String,
    /// Common display name
    pub name: String,
    /// Full legal name, if known
    #[serde(default)]
    pub official_name: Option<String>,
}

impl Entity {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            official_name: None,
        }
    }

    pub fn with_official_name(mut self, official_name: impl Into<String>) -> Self {
        self.official_name = Some(official_name.into());
        self
    }
}

/// An alternate surface form for a ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub ticker: String,
    pub alias: String,
}

impl Alias {
    pub fn new(ticker: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            alias: alias.into(),
        }
    }
}

/// Errors that can occur while reading the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse registry YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[cfg(feature = "database")]
    #[error("Registry query failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only supplier of registry data
///
/// Implementations must be Send + Sync; the cache calls them at most once
/// per successful population.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// All known entities
    async fn load_entities(&self) -> Result<Vec<Entity>, RegistryError>;

    /// All known aliases
    async fn load_aliases(&self) -> Result<Vec<Alias>, RegistryError>;
}

/// In-memory registry supplied by the host application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticRegistrySource {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl StaticRegistrySource {
    pub fn new(entities: Vec<Entity>, aliases: Vec<Alias>) -> Self {
        Self { entities, aliases }
    }

    /// Load a registry document from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load a registry document from a YAML string
    ///
    /// ```yaml
    /// entities:
    ///   - ticker: PKN
    ///     name: PKN Orlen
    ///     official_name: Polski Koncern Naftowy Orlen S.A.
    /// aliases:
    ///   - ticker: PKN
    ///     alias: orlen
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, RegistryError> {
        let source: StaticRegistrySource = serde_yaml::from_str(content)?;
        Ok(source)
    }
}

#[async_trait]
impl RegistrySource for StaticRegistrySource {
    async fn load_entities(&self) -> Result<Vec<Entity>, RegistryError> {
        Ok(self.entities.clone())
    }

    async fn load_aliases(&self) -> Result<Vec<Alias>, RegistryError> {
        Ok(self.aliases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_yaml() {
        let yaml = r#"
entities:
  - ticker: PKN
    name: PKN Orlen
    official_name: Polski Koncern Naftowy Orlen S.A.
  - ticker: CDR
    name: CD Projekt
aliases:
  - ticker: PKN
    alias: orlen
"#;

        let source = StaticRegistrySource::from_yaml(yaml).unwrap();
        assert_eq!(source.entities.len(), 2);
        assert_eq!(
            source.entities[0].official_name.as_deref(),
            Some("Polski Koncern Naftowy Orlen S.A.")
        );
        assert_eq!(source.entities[1].official_name, None);
        assert_eq!(source.aliases, vec![Alias::new("PKN", "orlen")]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let source = StaticRegistrySource::from_yaml("entities: []\n").unwrap();
        assert!(source.entities.is_empty());
        assert!(source.aliases.is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = StaticRegistrySource::from_yaml("entities: [unterminated");
        assert!(matches!(result, Err(RegistryError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_static_source_loads() {
        let source = StaticRegistrySource::new(
            vec![Entity::new("CDR", "CD Projekt").with_official_name("CD Projekt S.A.")],
            vec![Alias::new("CDR", "cd projekt red")],
        );

        let entities = source.load_entities().await.unwrap();
        let aliases = source.load_aliases().await.unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(aliases.len(), 1);
        assert_eq!(entities[0].official_name.as_deref(), Some("CD Projekt S.A."));
    }
}
