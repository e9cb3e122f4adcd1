//! Dimension synthesis.

use crate::config::DimensionSettings;
use crate::inference::{matches_any, ColumnTypeMapper};
use crate::metadata::SchemaDescriptor;
use crate::model::{DimensionDefinition, ValueKind};

use super::describe::{DescriptionRequest, Describer};

/// Generates one dimension per column.
#[derive(Debug, Clone)]
pub struct DimensionSynthesizer {
    settings: DimensionSettings,
    types: ColumnTypeMapper,
    describer: Describer,
}

impl DimensionSynthesizer {
    pub fn new(settings: DimensionSettings, types: ColumnTypeMapper, describer: Describer) -> Self {
        Self {
            settings,
            types,
            describer,
        }
    }

    /// Dimensions in column order. Time columns get the base granularities,
    /// and audit timestamps additionally get the custom ones appended.
    pub fn synthesize(&self, table: &SchemaDescriptor) -> Vec<DimensionDefinition> {
        table
            .columns
            .iter()
            .map(|col| {
                let kind = self.types.map(&col.data_type);
                let request = DescriptionRequest::Dimension {
                    table,
                    column: col,
                    kind,
                };

                let mut granularities = Vec::new();
                if kind == ValueKind::Time {
                    granularities.extend(self.settings.granularities.iter().cloned());
                    if matches_any(&col.name, &self.settings.audit_patterns) {
                        granularities.extend(self.settings.custom_granularities.iter().cloned());
                    }
                }

                DimensionDefinition {
                    name: col.name.clone(),
                    sql: col.name.clone(),
                    kind,
                    description: self.describer.describe(&request),
                    primary_key: table.is_primary_key(&col.name),
                    granularities,
                }
            })
            .collect()
    }
}
