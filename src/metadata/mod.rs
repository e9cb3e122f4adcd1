//! Table metadata module.
//!
//! Introspection itself lives outside this crate. This module holds the
//! descriptor types it produces and the [`SchemaSource`] seam it plugs into.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SchemaSource                             │
//! │  - list_tables()           - describe_table()                   │
//! │  - sample_rows()           - describe_all()   (join_all)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        SchemaDescriptor (immutable, one per table)              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cubesmith::metadata::{SchemaSource, SnapshotSource};
//!
//! let source = SnapshotSource::from_file("schema.json")?;
//! let tables = source.describe_all("public").await?;
//! ```

mod provider;
mod snapshot;
mod types;

pub use provider::{SchemaSource, SourceError, SourceResult};
pub use snapshot::SnapshotSource;
pub use types::*;
