//! Configuration module for cubesmith.
//!
//! Holds the rule tables (patterns, thresholds, templates) and the TOML
//! settings loader that assembles them.

mod rules;
mod settings;

pub use rules::{
    BusinessMetricsViewSettings, ClassificationRules, DimensionCatalogViewSettings,
    DimensionSettings, DomainProfile, DomainSettings, FactAnalysisViewSettings, MeasureRule,
    MeasureSettings, PreAggregationSettings, SegmentRule, SegmentSettings, SegmentTemplate,
    TypeSettings, UnmatchedNumericPolicy, ValidationSettings, ViewSettings,
};
pub use settings::{Settings, SettingsError};
