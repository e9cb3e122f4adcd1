//! SchemaSource trait definition.
//!
//! The SchemaSource trait abstracts over the introspection layer: whatever
//! connects to a database and turns its catalog into [`SchemaDescriptor`]s.
//! The generator only ever sees finished descriptors.

use async_trait::async_trait;

use super::types::{SampleRow, SchemaDescriptor};

/// Errors raised by a schema source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Table not found: {schema}.{table}")]
    TableNotFound { schema: String, table: String },

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Introspection failed: {0}")]
    Introspection(String),
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Trait for fetching table metadata.
///
/// # Example
///
/// ```ignore
/// use cubesmith::metadata::{SchemaSource, SnapshotSource};
///
/// async fn example(source: &impl SchemaSource) -> SourceResult<()> {
///     let tables = source.list_tables("public").await?;
///     let orders = source.describe_table("public", "orders").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// List table names in a schema.
    async fn list_tables(&self, schema: &str) -> SourceResult<Vec<String>>;

    /// Get the descriptor for one table.
    async fn describe_table(&self, schema: &str, table: &str) -> SourceResult<SchemaDescriptor>;

    /// A few representative rows, for description providers only.
    ///
    /// Default implementation returns no rows.
    async fn sample_rows(
        &self,
        _schema: &str,
        _table: &str,
        _limit: usize,
    ) -> SourceResult<Vec<SampleRow>> {
        Ok(Vec::new())
    }

    /// Describe every table in a schema.
    ///
    /// Default implementation fetches tables in parallel using `join_all`.
    /// One table failing does not abort the others: each result is returned
    /// next to its table name, in listing order.
    async fn describe_all(
        &self,
        schema: &str,
    ) -> SourceResult<Vec<(String, SourceResult<SchemaDescriptor>)>> {
        let tables = self.list_tables(schema).await?;

        let futures: Vec<_> = tables
            .iter()
            .map(|table| self.describe_table(schema, table))
            .collect();

        let results = futures::future::join_all(futures).await;

        Ok(tables.into_iter().zip(results).collect())
    }
}
