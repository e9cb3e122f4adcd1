//! TOML-based configuration for cubesmith.
//!
//! Every section is optional; missing keys fall back to the stock rule set.
//!
//! Example configuration:
//! ```toml
//! [classification]
//! fact_fk_threshold = 3
//! dimension_text_threshold = 0.5
//!
//! [measures]
//! unmatched_numeric = "default_aggregations"
//!
//! [[measures.rules]]
//! name = "financial_columns"
//! patterns = ["amount", "price", "fee"]
//! aggregations = ["sum", "avg"]
//! format = "currency"
//!
//! [pre_aggregations]
//! refresh_interval = "6 hours"
//! max_dimensions = 2
//!
//! [domains]
//! match_threshold = 3
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::rules::{
    ClassificationRules, DimensionSettings, DomainSettings, MeasureSettings,
    PreAggregationSettings, SegmentSettings, TypeSettings, ValidationSettings, ViewSettings,
};
use crate::model::AggregationKind;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
///
/// Loaded once and treated as read-only for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub classification: ClassificationRules,
    pub types: TypeSettings,
    pub measures: MeasureSettings,
    pub dimensions: DimensionSettings,
    pub segments: SegmentSettings,
    pub pre_aggregations: PreAggregationSettings,
    pub views: ViewSettings,
    pub validation: ValidationSettings,
    pub domains: DomainSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `CUBESMITH_CONFIG`
    /// 2. `./cubesmith.toml`
    /// 3. `~/.config/cubesmith/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("CUBESMITH_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("cubesmith.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cubesmith").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Reject rule tables that cannot drive generation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.classification;
        check_ratio("classification.fact_numeric_threshold", c.fact_numeric_threshold)?;
        check_ratio("classification.dimension_text_threshold", c.dimension_text_threshold)?;
        if c.numeric_type_markers.is_empty() || c.text_type_markers.is_empty() {
            return invalid("classification type markers must not be empty");
        }

        for rule in &self.measures.rules {
            if rule.patterns.is_empty() {
                return invalid(format!("measure rule '{}' has no patterns", rule.name));
            }
            if rule.aggregations.is_empty() {
                return invalid(format!("measure rule '{}' has no aggregations", rule.name));
            }
            check_distinct(&format!("measure rule '{}'", rule.name), &rule.aggregations)?;
        }
        check_distinct("measures.default_aggregations", &self.measures.default_aggregations)?;

        for rule in &self.segments.rules {
            if rule.patterns.is_empty() {
                return invalid(format!("segment rule '{}' has no patterns", rule.name));
            }
            if rule.segments.iter().any(|s| s.name.trim().is_empty()) {
                return invalid(format!("segment rule '{}' has an unnamed segment", rule.name));
            }
        }

        if self.dimensions.granularities.is_empty() {
            return invalid("dimensions.granularities must not be empty");
        }

        let p = &self.pre_aggregations;
        if p.max_dimensions == 0 {
            return invalid("pre_aggregations.max_dimensions must be at least 1");
        }
        if p.name.trim().is_empty() {
            return invalid("pre_aggregations.name must not be empty");
        }

        if let Err(e) = regex::Regex::new(&self.validation.naming_pattern) {
            return invalid(format!("validation.naming_pattern: {}", e));
        }

        if self.domains.match_threshold == 0 {
            return invalid("domains.match_threshold must be at least 1");
        }
        for profile in &self.domains.profiles {
            let mut vocabulary = profile.fact_tables.iter().chain(&profile.dimension_tables);
            if vocabulary.any(|entry| entry.trim().is_empty()) {
                return invalid(format!(
                    "domain profile '{}' has an empty table name",
                    profile.name
                ));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Result<(), SettingsError> {
    Err(SettingsError::InvalidConfig(message.into()))
}

fn check_distinct(key: &str, aggregations: &[AggregationKind]) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    match aggregations.iter().find(|kind| !seen.insert(**kind)) {
        Some(kind) => invalid(format!("{} lists aggregation '{}' twice", key, kind)),
        None => Ok(()),
    }
}

fn check_ratio(key: &str, value: f64) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        invalid(format!("{} must be between 0 and 1, got {}", key, value))
    }
}
