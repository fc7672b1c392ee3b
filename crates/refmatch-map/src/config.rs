//! Matcher configuration loaded from TOML.
//!
//! ```toml
//! min_similarity = 50
//!
//! [thresholds]
//! auto_correct = 85
//! clear_winner_margin = 10
//!
//! [aliases.banks]
//! "bri agro" = "bank raya"
//!
//! [patterns.cities]
//! prefixes = ["kota madya"]
//! suffixes = ["raya"]
//! ```
//!
//! Every key is optional; an empty file reproduces the built-in behaviour.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use refmatch_model::FieldType;
use serde::{Deserialize, Serialize};

use crate::aliases::AliasRegistry;
use crate::confidence::ConfidenceThresholds;
use crate::patterns::PatternBook;

/// Default similarity floor; candidates must score strictly above it.
pub const DEFAULT_MIN_SIMILARITY: u8 = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid thresholds: {message}")]
    InvalidThresholds { message: String },
}

/// Extra boilerplate words for one field type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOverrides {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

/// Engine options and data-table extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Candidates scoring at or below this are dropped as noise.
    pub min_similarity: u8,
    pub thresholds: ConfidenceThresholds,
    /// Additional aliases per field type, merged over the built-in tables.
    pub aliases: BTreeMap<FieldType, BTreeMap<String, String>>,
    /// Additional prefixes and suffixes per field type.
    pub patterns: BTreeMap<FieldType, PatternOverrides>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            thresholds: ConfidenceThresholds::default(),
            aliases: BTreeMap::new(),
            patterns: BTreeMap::new(),
        }
    }
}

impl MatcherConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MatcherConfig = toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            alias_tables = config.aliases.len(),
            pattern_tables = config.patterns.len(),
            "Loaded matcher config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_similarity > 100 {
            return Err(ConfigError::InvalidThresholds {
                message: format!(
                    "min_similarity must be at most 100, got {}",
                    self.min_similarity
                ),
            });
        }
        self.thresholds.validate()
    }

    /// Built-in alias tables with this config's entries merged in.
    pub fn alias_registry(&self) -> AliasRegistry {
        let mut registry = AliasRegistry::builtin().clone();
        for (field_type, entries) in &self.aliases {
            registry.extend(*field_type, entries);
        }
        registry
    }

    /// Built-in pattern lists with this config's words appended.
    pub fn pattern_book(&self) -> PatternBook {
        let mut book = PatternBook::builtin().clone();
        for (field_type, overrides) in &self.patterns {
            book.extend(
                *field_type,
                overrides.prefixes.as_slice(),
                overrides.suffixes.as_slice(),
            );
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: MatcherConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(config, MatcherConfig::default());
    }

    #[test]
    fn partial_thresholds_keep_other_defaults() {
        let config: MatcherConfig = toml::from_str(
            r#"
            [thresholds]
            clear_winner_margin = 15
            "#,
        )
        .expect("parse config");
        assert_eq!(config.thresholds.clear_winner_margin, 15);
        assert_eq!(config.thresholds.auto_correct, 85);
        assert_eq!(config.min_similarity, DEFAULT_MIN_SIMILARITY);
    }

    #[test]
    fn aliases_merge_over_builtin_tables() {
        let config: MatcherConfig = toml::from_str(
            r#"
            [aliases.banks]
            "BRI Agro" = "Bank Raya"
            "#,
        )
        .expect("parse config");
        let registry = config.alias_registry();
        assert_eq!(registry.lookup(FieldType::Banks, "bri agro"), Some("bank raya"));
        assert_eq!(
            registry.lookup(FieldType::Banks, "bca"),
            Some("bank central asia")
        );
    }

    #[test]
    fn patterns_extend_builtin_lists() {
        let config: MatcherConfig = toml::from_str(
            r#"
            [patterns.cities]
            prefixes = ["kota madya"]
            "#,
        )
        .expect("parse config");
        let book = config.pattern_book();
        assert!(book.prefixes(FieldType::Cities).any(|p| p == "kota madya"));
        assert!(book.prefixes(FieldType::Cities).any(|p| p == "kabupaten"));
    }

    #[test]
    fn unknown_field_type_is_a_parse_error() {
        let parsed: Result<MatcherConfig, _> = toml::from_str(
            r#"
            [aliases.districts]
            "a" = "b"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn out_of_range_floor_fails_validation() {
        let config = MatcherConfig {
            min_similarity: 120,
            ..MatcherConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }
}
