//! File-backed schema source.
//!
//! Reads a JSON snapshot of already-introspected tables:
//!
//! ```json
//! {
//!   "schema": "public",
//!   "tables": [ { "name": "orders", "columns": [ ... ], "primary_key": ["id"] } ],
//!   "samples": { "orders": [ { "id": 1, "status": "active" } ] }
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::provider::{SchemaSource, SourceError, SourceResult};
use super::types::{SampleRow, SchemaDescriptor};

#[derive(Debug, Clone, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    tables: Vec<SchemaDescriptor>,
    #[serde(default)]
    samples: HashMap<String, Vec<SampleRow>>,
}

/// A [`SchemaSource`] over an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    default_schema: Option<String>,
    tables: Vec<SchemaDescriptor>,
    samples: HashMap<String, Vec<SampleRow>>,
}

impl SnapshotSource {
    pub fn new(tables: Vec<SchemaDescriptor>) -> Self {
        Self {
            default_schema: None,
            tables,
            samples: HashMap::new(),
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> SourceResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self {
            default_schema: snapshot.schema,
            tables: snapshot.tables,
            samples: snapshot.samples,
        })
    }

    pub fn with_samples(mut self, table: &str, rows: Vec<SampleRow>) -> Self {
        self.samples.insert(table.to_string(), rows);
        self
    }

    /// Schema named by the snapshot, else the first table's schema.
    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema
            .as_deref()
            .or_else(|| self.tables.first().map(|t| t.schema.as_str()))
    }

    pub fn tables(&self) -> &[SchemaDescriptor] {
        &self.tables
    }
}

#[async_trait]
impl SchemaSource for SnapshotSource {
    async fn list_tables(&self, schema: &str) -> SourceResult<Vec<String>> {
        let names: Vec<String> = self
            .tables
            .iter()
            .filter(|t| t.schema == schema)
            .map(|t| t.name.clone())
            .collect();

        if names.is_empty() && !self.tables.is_empty() {
            return Err(SourceError::SchemaNotFound(schema.to_string()));
        }
        Ok(names)
    }

    async fn describe_table(&self, schema: &str, table: &str) -> SourceResult<SchemaDescriptor> {
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == table)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            })
    }

    async fn sample_rows(
        &self,
        _schema: &str,
        table: &str,
        limit: usize,
    ) -> SourceResult<Vec<SampleRow>> {
        Ok(self
            .samples
            .get(table)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
