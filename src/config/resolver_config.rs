//! Resolver configuration parsing
//!
//! Loads resolver tuning from YAML. Every field has a default, so a
//! document only needs to name what it overrides:
//!
//! ```yaml
//! acceptance_threshold: 0.65
//! alias:
//!   max_tickers: 10
//! pattern:
//!   context_vocabulary: ["ticker", "shares", "company"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Failed to compile symbol pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Root configuration for the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Tickers whose best confidence is below this are dropped
    pub acceptance_threshold: f32,
    /// Maximum number of tickers returned
    pub max_results: usize,
    /// Added to alias and company-name confidence when the match is in the title
    pub title_bonus: f32,
    /// Absolute ceiling for alias and company-name confidence after bonuses
    pub confidence_ceiling: f32,
    pub pattern: PatternConfig,
    pub alias: AliasConfig,
    pub company_name: CompanyNameConfig,
}

/// Layer 1: explicit symbol patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// `$CDR`, `(CDR)`, `GPW:CDR`
    pub symbol_confidence: f32,
    /// Vocabulary word followed by an uppercase token ("akcje CDR")
    pub context_confidence: f32,
    /// Words meaning ticker / company / shares / price / shareholder.
    /// Matched case-insensitively; an empty list disables the contextual pattern.
    pub context_vocabulary: Vec<String>,
}

/// Layer 2: alias dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Aliases shorter than this (in characters) are only trusted via patterns
    pub min_alias_len: usize,
    /// Aliases strictly longer than this score `long_confidence`
    pub long_alias_len: usize,
    /// Aliases at least this long (and not long) score `medium_confidence`
    pub medium_alias_len: usize,
    pub long_confidence: f32,
    pub medium_confidence: f32,
    pub short_confidence: f32,
    /// Stop scanning once this many distinct tickers have matched
    pub max_tickers: usize,
}

/// Layer 3: display / official company names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyNameConfig {
    /// Names shorter than this (in characters) are skipped
    pub min_name_len: usize,
    pub name_confidence: f32,
    pub official_name_confidence: f32,
}

/// Polish vocabulary for "ticker", "company", "shares", "price", "shareholder"
const DEFAULT_CONTEXT_VOCABULARY: &[&str] = &[
    "ticker",
    "spółka",
    "spółki",
    "spółce",
    "akcje",
    "akcji",
    "kurs",
    "akcjonariusz",
    "akcjonariusze",
    "akcjonariuszy",
];

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.60,
            max_results: 5,
            title_bonus: 0.05,
            confidence_ceiling: 0.95,
            pattern: PatternConfig::default(),
            alias: AliasConfig::default(),
            company_name: CompanyNameConfig::default(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            symbol_confidence: 0.95,
            context_confidence: 0.90,
            context_vocabulary: DEFAULT_CONTEXT_VOCABULARY
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            min_alias_len: 4,
            long_alias_len: 8,
            medium_alias_len: 6,
            long_confidence: 0.90,
            medium_confidence: 0.80,
            short_confidence: 0.70,
            max_tickers: 8,
        }
    }
}

impl Default for CompanyNameConfig {
    fn default() -> Self {
        Self {
            min_name_len: 5,
            name_confidence: 0.70,
            official_name_confidence: 0.75,
        }
    }
}

impl AliasConfig {
    /// Base confidence for an alias of the given character length
    pub fn base_confidence(&self, alias_len: usize) -> f32 {
        if alias_len > self.long_alias_len {
            self.long_confidence
        } else if alias_len >= self.medium_alias_len {
            self.medium_confidence
        } else {
            self.short_confidence
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the title bonus and ceiling to a base confidence
    pub fn with_title_bonus(&self, base: f32, in_title: bool) -> f32 {
        let bonus = if in_title { self.title_bonus } else { 0.0 };
        (base + bonus).min(self.confidence_ceiling)
    }

    /// Check that scores and limits are coherent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scores = [
            ("acceptance_threshold", self.acceptance_threshold),
            ("title_bonus", self.title_bonus),
            ("confidence_ceiling", self.confidence_ceiling),
            ("pattern.symbol_confidence", self.pattern.symbol_confidence),
            ("pattern.context_confidence", self.pattern.context_confidence),
            ("alias.long_confidence", self.alias.long_confidence),
            ("alias.medium_confidence", self.alias.medium_confidence),
            ("alias.short_confidence", self.alias.short_confidence),
            ("company_name.name_confidence", self.company_name.name_confidence),
            (
                "company_name.official_name_confidence",
                self.company_name.official_name_confidence,
            ),
        ];

        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.confidence_ceiling < self.acceptance_threshold {
            return Err(ConfigError::Invalid(format!(
                "confidence_ceiling ({}) is below acceptance_threshold ({})",
                self.confidence_ceiling, self.acceptance_threshold
            )));
        }

        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be at least 1".into()));
        }

        if self.alias.medium_alias_len > self.alias.long_alias_len {
            return Err(ConfigError::Invalid(format!(
                "alias.medium_alias_len ({}) exceeds alias.long_alias_len ({})",
                self.alias.medium_alias_len, self.alias.long_alias_len
            )));
        }

        if self
            .pattern
            .context_vocabulary
            .iter()
            .any(|w| w.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "pattern.context_vocabulary contains a blank entry".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.acceptance_threshold, 0.60);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.pattern.symbol_confidence, 0.95);
        assert_eq!(config.pattern.context_confidence, 0.90);
        assert_eq!(config.alias.max_tickers, 8);
        assert_eq!(config.company_name.min_name_len, 5);
        assert!(config
            .pattern
            .context_vocabulary
            .contains(&"akcje".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
acceptance_threshold: 0.65
alias:
  max_tickers: 10
pattern:
  context_vocabulary: ["ticker", "shares"]
"#;

        let config = ResolverConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.acceptance_threshold, 0.65);
        assert_eq!(config.alias.max_tickers, 10);
        // Untouched fields keep their defaults
        assert_eq!(config.alias.min_alias_len, 4);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.pattern.symbol_confidence, 0.95);
        assert_eq!(config.pattern.context_vocabulary, vec!["ticker", "shares"]);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ResolverConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_alias_bands() {
        let alias = AliasConfig::default();
        assert_eq!(alias.base_confidence(4), 0.70);
        assert_eq!(alias.base_confidence(5), 0.70);
        assert_eq!(alias.base_confidence(6), 0.80);
        assert_eq!(alias.base_confidence(8), 0.80);
        assert_eq!(alias.base_confidence(9), 0.90);
    }

    #[test]
    fn test_title_bonus_capped() {
        let config = ResolverConfig::default();
        assert!((config.with_title_bonus(0.70, true) - 0.75).abs() < 1e-6);
        assert!((config.with_title_bonus(0.70, false) - 0.70).abs() < 1e-6);
        assert_eq!(config.with_title_bonus(0.90, true), 0.95);
        assert_eq!(config.with_title_bonus(0.95, true), 0.95);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let yaml = "acceptance_threshold: 1.5\n";
        let err = ResolverConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_zero_results() {
        let config = ResolverConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ceiling_below_threshold() {
        let config = ResolverConfig {
            confidence_ceiling: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.yaml");
        std::fs::write(&path, "max_results: 3\n").unwrap();

        let config = ResolverConfig::from_file(&path).unwrap();
        assert_eq!(config.max_results, 3);

        let missing = ResolverConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
