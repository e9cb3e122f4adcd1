//! Measure synthesis.

use crate::config::{MeasureSettings, UnmatchedNumericPolicy};
use crate::inference::{first_match, matches_any, ColumnTypeMapper};
use crate::metadata::{ColumnDescriptor, SchemaDescriptor};
use crate::model::{AggregationKind, DisplayFormat, MeasureDefinition, TableRole, ValueKind};

use super::describe::{DescriptionRequest, Describer};

/// Name of the record-count measure every cube carries.
pub const COUNT_MEASURE: &str = "count";
/// Name of the distinct count over the first primary key column.
pub const COUNT_DISTINCT_MEASURE: &str = "count_distinct";

/// Generates measures from numeric columns using the measure rule table.
#[derive(Debug, Clone)]
pub struct MeasureSynthesizer {
    settings: MeasureSettings,
    types: ColumnTypeMapper,
    describer: Describer,
}

impl MeasureSynthesizer {
    pub fn new(settings: MeasureSettings, types: ColumnTypeMapper, describer: Describer) -> Self {
        Self {
            settings,
            types,
            describer,
        }
    }

    /// Measures for one table, in column order then configured aggregation
    /// order. Always starts with `count`.
    ///
    /// The role is accepted for parity with the other synthesizers; every
    /// role gets the same treatment.
    pub fn synthesize(&self, table: &SchemaDescriptor, _role: TableRole) -> Vec<MeasureDefinition> {
        let mut measures = Vec::new();

        let count = DescriptionRequest::Measure {
            table,
            name: COUNT_MEASURE,
            aggregation: AggregationKind::Count,
            column: None,
        };
        measures.push(MeasureDefinition::record_count(
            COUNT_MEASURE,
            self.describer.describe(&count),
        ));

        if let Some(pk) = table.primary_key.first() {
            let request = DescriptionRequest::Measure {
                table,
                name: COUNT_DISTINCT_MEASURE,
                aggregation: AggregationKind::CountDistinct,
                column: Some(pk.as_str()),
            };
            measures.push(MeasureDefinition::over_column(
                COUNT_DISTINCT_MEASURE,
                pk.as_str(),
                AggregationKind::CountDistinct,
                self.describer.describe(&request),
            ));
        }

        for col in &table.columns {
            if table.is_primary_key(&col.name) || self.types.map(&col.data_type) != ValueKind::Number {
                continue;
            }

            let Some((aggregations, format)) = self.aggregations_for(col) else {
                continue;
            };

            for aggregation in aggregations {
                let name = format!("{}_{}", aggregation, col.name);
                let request = DescriptionRequest::Measure {
                    table,
                    name: &name,
                    aggregation,
                    column: Some(col.name.as_str()),
                };
                let description = self.describer.describe(&request);
                measures.push(
                    MeasureDefinition::over_column(name, col.name.as_str(), aggregation, description)
                        .with_format(format),
                );
            }
        }

        measures
    }

    /// Aggregations and format for a numeric column, or `None` to skip it.
    fn aggregations_for(
        &self,
        col: &ColumnDescriptor,
    ) -> Option<(Vec<AggregationKind>, Option<DisplayFormat>)> {
        if let Some(rule) = first_match(&col.name, &self.settings.rules) {
            return Some((rule.aggregations.clone(), rule.format));
        }

        match self.settings.unmatched_numeric {
            UnmatchedNumericPolicy::Skip => None,
            UnmatchedNumericPolicy::DefaultAggregations => Some((
                self.settings.default_aggregations.clone(),
                self.infer_format(&col.name),
            )),
        }
    }

    fn infer_format(&self, column: &str) -> Option<DisplayFormat> {
        if matches_any(column, &self.settings.financial_terms) {
            Some(DisplayFormat::Currency)
        } else if matches_any(column, &self.settings.percent_terms) {
            Some(DisplayFormat::Percent)
        } else {
            None
        }
    }
}
