//! Rule tables driving classification and synthesis.
//!
//! Every table has a `Default` reproducing the stock rule set, so a config
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{AggregationKind, DisplayFormat, Granularity, TimeGrain, ValueKind};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Classification
// ============================================================================

/// Patterns and thresholds for table role classification.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassificationRules {
    /// Table-name substrings marking a fact table.
    pub fact_name_patterns: Vec<String>,
    /// Table-name substrings marking a dimension table.
    pub dimension_name_patterns: Vec<String>,
    /// Table-name substrings marking a junction table.
    pub junction_name_patterns: Vec<String>,
    /// Column-name substrings scoring towards fact.
    pub fact_column_patterns: Vec<String>,
    /// Column-name substrings scoring towards dimension.
    pub dimension_column_patterns: Vec<String>,
    pub junction_fk_threshold: usize,
    pub junction_max_columns: usize,
    pub fact_fk_threshold: usize,
    /// Minimum share of numeric columns for a fact table.
    pub fact_numeric_threshold: f64,
    /// Minimum share of text columns for a dimension table.
    pub dimension_text_threshold: f64,
    /// Native-type substrings counted as numeric.
    pub numeric_type_markers: Vec<String>,
    /// Native-type substrings counted as text.
    pub text_type_markers: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            fact_name_patterns: strings(&[
                "fact_",
                "sales_",
                "orders_",
                "transactions_",
                "events_",
                "payments_",
                "bookings_",
                "sessions_",
                "activities_",
                "_fact",
                "_sales",
                "_orders",
                "_transactions",
                "_events",
            ]),
            dimension_name_patterns: strings(&[
                "dim_",
                "customers",
                "products",
                "users",
                "categories",
                "locations",
                "employees",
                "vendors",
                "suppliers",
                "_dim",
                "_master",
                "_ref",
                "_lookup",
            ]),
            junction_name_patterns: strings(&[
                "_junction",
                "_bridge",
                "_mapping",
                "_relation",
                "user_roles",
                "product_categories",
                "order_items",
            ]),
            fact_column_patterns: strings(&[
                "amount", "quantity", "price", "cost", "value", "total", "count", "revenue",
                "profit", "volume", "weight", "duration", "distance", "score", "rating",
            ]),
            dimension_column_patterns: strings(&[
                "name",
                "title",
                "description",
                "category",
                "type",
                "status",
                "code",
                "label",
                "classification",
                "group",
            ]),
            junction_fk_threshold: 2,
            junction_max_columns: 6,
            fact_fk_threshold: 2,
            fact_numeric_threshold: 0.3,
            dimension_text_threshold: 0.4,
            numeric_type_markers: strings(&["int", "decimal", "numeric", "float"]),
            text_type_markers: strings(&["varchar", "text", "char"]),
        }
    }
}

// ============================================================================
// Column types
// ============================================================================

/// Extra native type mappings, layered over the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypeSettings {
    /// Lowercase base type name -> value kind.
    pub overrides: BTreeMap<String, ValueKind>,
}

// ============================================================================
// Measures
// ============================================================================

/// What to do with numeric columns no measure rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedNumericPolicy {
    /// Emit no measures.
    #[default]
    Skip,
    /// Emit `default_aggregations` with an inferred format.
    DefaultAggregations,
}

/// One measure rule: first rule whose patterns match a column wins.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MeasureRule {
    pub name: String,
    pub patterns: Vec<String>,
    pub aggregations: Vec<AggregationKind>,
    #[serde(default)]
    pub format: Option<DisplayFormat>,
}

impl MeasureRule {
    fn new(
        name: &str,
        patterns: &[&str],
        aggregations: &[AggregationKind],
        format: DisplayFormat,
    ) -> Self {
        Self {
            name: name.to_string(),
            patterns: strings(patterns),
            aggregations: aggregations.to_vec(),
            format: Some(format),
        }
    }
}

/// Measure generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeasureSettings {
    pub rules: Vec<MeasureRule>,
    pub unmatched_numeric: UnmatchedNumericPolicy,
    pub default_aggregations: Vec<AggregationKind>,
    /// Name terms that make an unmatched column's measures `currency`.
    pub financial_terms: Vec<String>,
    /// Name terms that make an unmatched column's measures `percent`.
    pub percent_terms: Vec<String>,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        use AggregationKind::*;

        Self {
            rules: vec![
                MeasureRule::new(
                    "financial_columns",
                    &["amount", "price", "cost", "value", "total", "revenue", "profit"],
                    &[Sum, Avg, Min, Max],
                    DisplayFormat::Currency,
                ),
                MeasureRule::new(
                    "quantity_columns",
                    &["quantity", "count", "volume", "weight"],
                    &[Sum, Avg, Min, Max],
                    DisplayFormat::Number,
                ),
                MeasureRule::new(
                    "score_columns",
                    &["score", "rating", "percentage"],
                    &[Avg, Min, Max],
                    DisplayFormat::Percent,
                ),
                MeasureRule::new(
                    "metric_columns",
                    &["duration", "distance", "size", "length", "width", "height"],
                    &[Sum, Avg, Min, Max],
                    DisplayFormat::Number,
                ),
            ],
            unmatched_numeric: UnmatchedNumericPolicy::Skip,
            default_aggregations: vec![Sum, Avg, Min, Max],
            financial_terms: strings(&["amount", "price", "cost", "value", "total", "revenue"]),
            percent_terms: strings(&["percent", "rate"]),
        }
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Time granularity tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DimensionSettings {
    /// Granularities every time dimension gets.
    pub granularities: Vec<Granularity>,
    /// Column-name substrings marking audit timestamps.
    pub audit_patterns: Vec<String>,
    /// Granularities appended for audit timestamps.
    pub custom_granularities: Vec<Granularity>,
}

impl Default for DimensionSettings {
    fn default() -> Self {
        Self {
            granularities: vec![
                Granularity::new("hour", "1 hour"),
                Granularity::new("day", "1 day"),
                Granularity::new("week", "1 week"),
                Granularity::new("month", "1 month"),
                Granularity::new("quarter", "1 quarter"),
                Granularity::new("year", "1 year"),
            ],
            audit_patterns: strings(&["created_at", "updated_at"]),
            custom_granularities: vec![
                Granularity::new("fiscal_year", "1 year")
                    .with_offset("3 months", "Fiscal year starting April"),
                Granularity::new("business_week", "1 week")
                    .with_offset("1 day", "Week starting on Monday"),
            ],
        }
    }
}

// ============================================================================
// Segments
// ============================================================================

/// A segment emitted for every column a [`SegmentRule`] matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SegmentTemplate {
    pub name: String,
    /// Predicate suffix appended to the column reference.
    pub condition: String,
    pub description: String,
}

/// A group of segment templates keyed by column-name patterns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SegmentRule {
    pub name: String,
    pub patterns: Vec<String>,
    pub segments: Vec<SegmentTemplate>,
}

fn template(name: &str, condition: &str, description: &str) -> SegmentTemplate {
    SegmentTemplate {
        name: name.to_string(),
        condition: condition.to_string(),
        description: description.to_string(),
    }
}

/// Segment generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SegmentSettings {
    pub rules: Vec<SegmentRule>,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            rules: vec![
                SegmentRule {
                    name: "status_segments".to_string(),
                    patterns: strings(&["status", "state", "is_active", "active", "enabled"]),
                    segments: vec![
                        template("active", "= 'active'", "Active records only"),
                        template("inactive", "= 'inactive'", "Inactive records only"),
                    ],
                },
                SegmentRule {
                    name: "time_segments".to_string(),
                    patterns: strings(&["created_at", "updated_at", "timestamp", "date"]),
                    segments: vec![
                        template(
                            "recent",
                            ">= CURRENT_DATE - INTERVAL '30 days'",
                            "Records from last 30 days",
                        ),
                        template(
                            "this_year",
                            ">= DATE_TRUNC('year', CURRENT_DATE)",
                            "Records from current year",
                        ),
                        template(
                            "this_month",
                            ">= DATE_TRUNC('month', CURRENT_DATE)",
                            "Records from current month",
                        ),
                    ],
                },
                SegmentRule {
                    name: "boolean_segments".to_string(),
                    patterns: strings(&["is_deleted", "is_published", "is_enabled", "visible"]),
                    segments: vec![template("published", "= true", "Published records only")],
                },
            ],
        }
    }
}

// ============================================================================
// Pre-aggregations
// ============================================================================

/// Rollup defaults for fact tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreAggregationSettings {
    pub name: String,
    pub default_granularity: TimeGrain,
    pub partition_granularity: TimeGrain,
    pub refresh_interval: String,
    pub max_dimensions: usize,
    /// Column-name substrings of low-cardinality grouping columns.
    pub preferred_dimensions: Vec<String>,
    /// Template with `{time_column}` and `{table}` placeholders.
    pub build_range_start: String,
    pub build_range_end: String,
}

impl Default for PreAggregationSettings {
    fn default() -> Self {
        Self {
            name: "main_rollup".to_string(),
            default_granularity: TimeGrain::Day,
            partition_granularity: TimeGrain::Month,
            refresh_interval: "1 hour".to_string(),
            max_dimensions: 3,
            preferred_dimensions: strings(&["status", "type", "category", "state"]),
            build_range_start: "SELECT MIN({time_column}) FROM {table}".to_string(),
            build_range_end: "SELECT MAX({time_column}) FROM {table}".to_string(),
        }
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessMetricsViewSettings {
    pub name: String,
    pub description: String,
    /// Measure-name substrings that qualify a cube.
    pub financial_keywords: Vec<String>,
    /// Cube names that always qualify.
    pub always_include: Vec<String>,
    /// A cube with more than this many measures qualifies.
    pub min_measures: usize,
    pub max_cubes: usize,
}

impl Default for BusinessMetricsViewSettings {
    fn default() -> Self {
        Self {
            name: "business_metrics".to_string(),
            description: "Key business metrics across all entities".to_string(),
            financial_keywords: strings(&["price", "value", "amount", "cost"]),
            always_include: strings(&["orders", "order_items", "order_payments"]),
            min_measures: 2,
            max_cubes: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FactAnalysisViewSettings {
    pub name: String,
    pub description: String,
    pub include_joins: bool,
    /// Members pulled from each joined cube.
    pub join_includes: Vec<String>,
}

impl Default for FactAnalysisViewSettings {
    fn default() -> Self {
        Self {
            name: "fact_analysis".to_string(),
            description: "Analysis view for fact tables".to_string(),
            include_joins: true,
            join_includes: strings(&["name", "description", "category", "type"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DimensionCatalogViewSettings {
    pub name: String,
    pub description: String,
    /// Cube-name substrings of tables owned by a fact (skipped).
    pub excluded_patterns: Vec<String>,
    pub max_cubes: usize,
}

impl Default for DimensionCatalogViewSettings {
    fn default() -> Self {
        Self {
            name: "dimension_catalog".to_string(),
            description: "Catalog of all dimensional data".to_string(),
            excluded_patterns: strings(&["_items", "_payments", "_reviews"]),
            max_cubes: 3,
        }
    }
}

/// View composition settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewSettings {
    pub business_metrics: BusinessMetricsViewSettings,
    pub fact_analysis: FactAnalysisViewSettings,
    pub dimension_catalog: DimensionCatalogViewSettings,
}

// ============================================================================
// Validation
// ============================================================================

/// Structural validation limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Regex every cube, view and measure name must match.
    pub naming_pattern: String,
    pub max_measures: usize,
    pub max_dimensions: usize,
    pub max_cubes_per_view: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            naming_pattern: r"^[a-z][a-z0-9_]*$".to_string(),
            max_measures: 50,
            max_dimensions: 100,
            max_cubes_per_view: 20,
        }
    }
}

// ============================================================================
// Domains
// ============================================================================

/// Table-name vocabulary of a business domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainProfile {
    pub name: String,
    #[serde(default)]
    pub fact_tables: Vec<String>,
    #[serde(default)]
    pub dimension_tables: Vec<String>,
}

/// Domain detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DomainSettings {
    /// Vocabulary hits needed to pick a domain.
    pub match_threshold: usize,
    /// Checked in order; the first to reach the threshold wins.
    pub profiles: Vec<DomainProfile>,
}

impl Default for DomainSettings {
    fn default() -> Self {
        let profile = |name: &str, facts: &[&str], dims: &[&str]| DomainProfile {
            name: name.to_string(),
            fact_tables: strings(facts),
            dimension_tables: strings(dims),
        };

        Self {
            match_threshold: 2,
            profiles: vec![
                profile(
                    "ecommerce",
                    &["orders", "order_items", "payments"],
                    &["customers", "products", "categories"],
                ),
                profile(
                    "saas",
                    &["usage_events", "billing_events", "feature_usage"],
                    &["users", "subscriptions", "features"],
                ),
                profile(
                    "finance",
                    &["transactions", "positions", "trades"],
                    &["accounts", "assets", "portfolios"],
                ),
            ],
        }
    }
}
