//! Rollup planning for fact cubes.

use crate::config::PreAggregationSettings;
use crate::inference::{matches_any, ColumnTypeMapper};
use crate::metadata::SchemaDescriptor;
use crate::model::{PreAggregationDefinition, TableRole, ValueKind};

use super::measures::COUNT_MEASURE;

/// Proposes a single time-partitioned rollup for fact tables.
#[derive(Debug, Clone)]
pub struct PreAggregationPlanner {
    settings: PreAggregationSettings,
    types: ColumnTypeMapper,
}

impl PreAggregationPlanner {
    pub fn new(settings: PreAggregationSettings, types: ColumnTypeMapper) -> Self {
        Self { settings, types }
    }

    /// Empty unless `role` is fact and the table has a time column.
    pub fn plan(&self, table: &SchemaDescriptor, role: TableRole) -> Vec<PreAggregationDefinition> {
        if role != TableRole::Fact {
            return Vec::new();
        }

        let Some(time_column) = table
            .columns
            .iter()
            .find(|c| self.types.map(&c.data_type) == ValueKind::Time)
        else {
            return Vec::new();
        };

        let dimensions: Vec<String> = table
            .columns
            .iter()
            .filter(|c| matches_any(&c.name, &self.settings.preferred_dimensions))
            .take(self.settings.max_dimensions)
            .map(|c| c.name.clone())
            .collect();

        let qualified = table.qualified_name();
        let bound = |template: &str| {
            template
                .replace("{time_column}", &time_column.name)
                .replace("{table}", &qualified)
        };

        vec![PreAggregationDefinition {
            name: self.settings.name.clone(),
            measures: vec![COUNT_MEASURE.to_string()],
            time_dimension: time_column.name.clone(),
            granularity: self.settings.default_granularity,
            partition_granularity: self.settings.partition_granularity,
            refresh_every: self.settings.refresh_interval.clone(),
            dimensions,
            build_range_start: bound(&self.settings.build_range_start),
            build_range_end: bound(&self.settings.build_range_end),
        }]
    }
}
