//! Resolver configuration
//!
//! All confidence bands, thresholds and limits used by the matching layers
//! live here so a deployment can tune them from YAML without code changes.

mod resolver_config;

pub use resolver_config::{
    AliasConfig, CompanyNameConfig, ConfigError, PatternConfig, ResolverConfig,
};
