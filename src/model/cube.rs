//! Cube definitions produced per table.
//!
//! A [`CubeDefinition`] is exactly what the serializer receives. The
//! classification details travel next to it in [`CubeMetadata`], bundled as a
//! [`GeneratedCube`], so nothing has to be stripped before output.

use serde::{Deserialize, Serialize};

use super::types::{AggregationKind, DisplayFormat, Relationship, TableRole, TimeGrain, ValueKind};

/// A measure (aggregation) on a cube.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureDefinition {
    pub name: String,
    /// Source column. `None` only for record-count measures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(rename = "type")]
    pub aggregation: AggregationKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DisplayFormat>,
}

impl MeasureDefinition {
    /// A measure counting rows, with no source column.
    pub fn record_count(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: None,
            aggregation: AggregationKind::Count,
            description: description.into(),
            format: None,
        }
    }

    /// A measure aggregating a column.
    pub fn over_column(
        name: impl Into<String>,
        column: impl Into<String>,
        aggregation: AggregationKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sql: Some(column.into()),
            aggregation,
            description: description.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: Option<DisplayFormat>) -> Self {
        self.format = format;
        self
    }

    /// True when the measure counts records instead of reading a column.
    pub fn is_record_count(&self) -> bool {
        self.sql.is_none() && self.aggregation.is_record_count()
    }
}

/// A named time granularity (standard or custom).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Granularity {
    pub name: String,
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Granularity {
    pub fn new(name: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval: interval.into(),
            offset: None,
            description: None,
        }
    }

    pub fn with_offset(mut self, offset: impl Into<String>, description: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self.description = Some(description.into());
        self
    }
}

/// A dimension bound to one source column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDefinition {
    pub name: String,
    pub sql: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub description: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
    /// Only populated for [`ValueKind::Time`] dimensions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub granularities: Vec<Granularity>,
}

/// A named boolean filter over the cube's rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentDefinition {
    pub name: String,
    pub sql: String,
    pub description: String,
}

/// A join from the owning cube to another cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinDefinition {
    /// Target cube name.
    pub name: String,
    pub relationship: Relationship,
    pub sql: String,
}

/// A rollup proposal for a fact cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreAggregationDefinition {
    pub name: String,
    pub measures: Vec<String>,
    pub time_dimension: String,
    pub granularity: TimeGrain,
    pub partition_granularity: TimeGrain,
    pub refresh_every: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    /// Opaque SQL computing the lower build bound.
    pub build_range_start: String,
    /// Opaque SQL computing the upper build bound.
    pub build_range_end: String,
}

/// A cube generated from one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeDefinition {
    pub name: String,
    /// Schema-qualified backing table.
    pub sql_table: String,
    pub description: String,
    pub measures: Vec<MeasureDefinition>,
    pub dimensions: Vec<DimensionDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SegmentDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pre_aggregations: Vec<PreAggregationDefinition>,
}

impl CubeDefinition {
    pub fn measure(&self, name: &str) -> Option<&MeasureDefinition> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn dimension(&self, name: &str) -> Option<&DimensionDefinition> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn segment(&self, name: &str) -> Option<&SegmentDefinition> {
        self.segments.iter().find(|s| s.name == name)
    }
}

/// Classification details kept beside a cube, never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CubeMetadata {
    pub role: TableRole,
    pub source_table: String,
    pub column_count: usize,
    pub foreign_key_count: usize,
}

/// A cube together with its classification metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCube {
    pub cube: CubeDefinition,
    pub metadata: CubeMetadata,
}

impl GeneratedCube {
    pub fn name(&self) -> &str {
        &self.cube.name
    }

    pub fn role(&self) -> TableRole {
        self.metadata.role
    }
}
