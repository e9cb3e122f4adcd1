//! Artifact synthesis.
//!
//! Each synthesizer reads one [`SchemaDescriptor`](crate::metadata::SchemaDescriptor)
//! (plus its role where that matters) and returns a complete list of
//! artifacts. None of them keep state between tables, so tables can be
//! processed in any order or in parallel. [`ViewComposer`] is the exception:
//! it needs every cube and runs after all per-table work is done.

pub mod describe;
mod dimensions;
mod joins;
mod measures;
mod pre_aggregations;
mod segments;
mod views;

pub use describe::{
    CallbackDescriptions, DescribeError, DescriptionProvider, DescriptionRequest, Describer,
    RoleAwareDescriptions, TemplateDescriptions,
};
pub use dimensions::DimensionSynthesizer;
pub use joins::JoinResolver;
pub use measures::{MeasureSynthesizer, COUNT_DISTINCT_MEASURE, COUNT_MEASURE};
pub use pre_aggregations::PreAggregationPlanner;
pub use segments::SegmentSynthesizer;
pub use views::ViewComposer;
