//! Table role classification.
//!
//! Name patterns decide first (fact, then dimension, then junction). When no
//! name pattern hits, column-level signals are collected and run through the
//! threshold rules in a fixed order, falling back to a score comparison.

use tracing::debug;

use crate::config::ClassificationRules;
use crate::metadata::SchemaDescriptor;
use crate::model::TableRole;

use super::patterns::matches_any;
use super::weights;

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationReason {
    FactName,
    DimensionName,
    JunctionName,
    /// No columns to compute signals from.
    NoColumns,
    JunctionShape,
    FactShape,
    TextHeavy,
    FactScore,
    DimensionScore,
}

/// Column-level signals for one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSignals {
    pub total_columns: usize,
    pub numeric_ratio: f64,
    pub text_ratio: f64,
    pub fk_count: usize,
    pub fact_score: u32,
    pub dimension_score: u32,
}

/// A role together with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub role: TableRole,
    pub reason: ClassificationReason,
    /// `None` when a name pattern decided before signals were needed.
    pub signals: Option<ColumnSignals>,
}

/// Assigns a [`TableRole`] to a table. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct TableClassifier {
    rules: ClassificationRules,
}

impl TableClassifier {
    pub fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    /// Classify a table.
    pub fn classify(&self, table: &SchemaDescriptor) -> TableRole {
        self.explain(table).role
    }

    /// Classify a table and report which rule decided.
    pub fn explain(&self, table: &SchemaDescriptor) -> Classification {
        let result = self.decide(table);
        debug!(
            table = %table.name,
            role = %result.role,
            reason = ?result.reason,
            "classified table"
        );
        result
    }

    fn decide(&self, table: &SchemaDescriptor) -> Classification {
        let rules = &self.rules;
        let by_name = |role, reason| Classification {
            role,
            reason,
            signals: None,
        };

        if matches_any(&table.name, &rules.fact_name_patterns) {
            return by_name(TableRole::Fact, ClassificationReason::FactName);
        }
        if matches_any(&table.name, &rules.dimension_name_patterns) {
            return by_name(TableRole::Dimension, ClassificationReason::DimensionName);
        }
        if matches_any(&table.name, &rules.junction_name_patterns) {
            return by_name(TableRole::Junction, ClassificationReason::JunctionName);
        }

        if table.columns.is_empty() {
            return by_name(TableRole::Generic, ClassificationReason::NoColumns);
        }

        let signals = self.signals(table);
        let (role, reason) = if signals.fk_count >= rules.junction_fk_threshold
            && signals.total_columns <= rules.junction_max_columns
        {
            (TableRole::Junction, ClassificationReason::JunctionShape)
        } else if signals.fk_count >= rules.fact_fk_threshold
            && signals.numeric_ratio >= rules.fact_numeric_threshold
        {
            (TableRole::Fact, ClassificationReason::FactShape)
        } else if signals.text_ratio >= rules.dimension_text_threshold {
            (TableRole::Dimension, ClassificationReason::TextHeavy)
        } else if signals.fact_score > signals.dimension_score {
            (TableRole::Fact, ClassificationReason::FactScore)
        } else {
            (TableRole::Dimension, ClassificationReason::DimensionScore)
        };

        Classification {
            role,
            reason,
            signals: Some(signals),
        }
    }

    /// Collect column-level signals. Ratios are 0 for a table without columns.
    pub fn signals(&self, table: &SchemaDescriptor) -> ColumnSignals {
        let rules = &self.rules;
        let mut numeric = 0usize;
        let mut text = 0usize;
        let mut fact_score = 0u32;
        let mut dimension_score = 0u32;

        for col in &table.columns {
            let is_numeric = matches_any(&col.data_type, &rules.numeric_type_markers);
            let is_text = matches_any(&col.data_type, &rules.text_type_markers);

            if is_numeric {
                numeric += 1;
                fact_score += weights::TYPE_MATCH;
            }
            if is_text {
                text += 1;
                dimension_score += weights::TYPE_MATCH;
            }
            if matches_any(&col.name, &rules.fact_column_patterns) {
                fact_score += weights::NAME_MATCH;
            }
            if matches_any(&col.name, &rules.dimension_column_patterns) {
                dimension_score += weights::NAME_MATCH;
            }
        }

        let total = table.columns.len();
        let ratio = |n: usize| if total == 0 { 0.0 } else { n as f64 / total as f64 };

        ColumnSignals {
            total_columns: total,
            numeric_ratio: ratio(numeric),
            text_ratio: ratio(text),
            fk_count: table.foreign_keys.len(),
            fact_score,
            dimension_score,
        }
    }
}
