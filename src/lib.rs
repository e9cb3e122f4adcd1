//! # Cubesmith
//!
//! Turns relational schema metadata into a semantic analytics model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        SchemaDescriptor (tables, columns, keys)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │     TableRole (fact / dimension / junction / generic)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [synthesis, per table]
//! ┌─────────────────────────────────────────────────────────┐
//! │   CubeDefinition (measures, dimensions, segments,        │
//! │                   joins, pre-aggregations)               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [domain + views, all cubes]
//! ┌─────────────────────────────────────────────────────────┐
//! │           ViewDefinition + validation results            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything between the descriptor and the output is pure. Getting
//! metadata out of a database and writing files are left to the caller;
//! [`metadata::SchemaSource`] is the seam for the former.

pub mod config;
pub mod generate;
pub mod inference;
pub mod metadata;
pub mod model;
pub mod synthesis;
pub mod validation;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Settings, SettingsError};
    pub use crate::generate::{GenerationOutput, Generator, TableInput};
    pub use crate::inference::{ColumnTypeMapper, DomainDetector, TableClassifier};
    pub use crate::metadata::{
        ColumnDescriptor, ForeignKeyDescriptor, SchemaDescriptor, SchemaSource, SnapshotSource,
    };
    pub use crate::model::{
        CubeDefinition, GeneratedCube, TableRole, ValueKind, ViewDefinition,
    };
    pub use crate::synthesis::{DescriptionProvider, Describer};
    pub use crate::validation::{ModelValidator, ValidationError};
}

pub use generate::{Generator, TableInput};
pub use model::{CubeDefinition, TableRole, ViewDefinition};
