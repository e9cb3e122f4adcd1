//! Generated semantic model types.

pub mod cube;
pub mod types;
pub mod view;

pub use cube::{
    CubeDefinition, CubeMetadata, DimensionDefinition, GeneratedCube, Granularity,
    JoinDefinition, MeasureDefinition, PreAggregationDefinition, SegmentDefinition,
};
pub use types::{AggregationKind, DisplayFormat, Relationship, TableRole, TimeGrain, ValueKind};
pub use view::{IncludeSelector, ViewCube, ViewDefinition, ViewPrefix};
