//! Table metadata as delivered by introspection.
//!
//! These are plain data carriers: produced once per table, read-only
//! afterwards, never mutated by the generator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of sample data, keyed by column name.
pub type SampleRow = serde_json::Map<String, serde_json::Value>;

/// Metadata about a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name (unique within its table)
    pub name: String,
    /// Native database type, e.g. `numeric(10,2)`
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub autoincrement: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default: None,
            autoincrement: false,
        }
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Local (constrained) columns, in key order
    pub columns: Vec<String>,
    pub referenced_table: String,
    /// Referenced columns, paired positionally with `columns`
    pub referenced_columns: Vec<String>,
    #[serde(default)]
    pub referenced_schema: Option<String>,
}

impl ForeignKeyDescriptor {
    pub fn new(
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
    ) -> Self {
        Self {
            columns,
            referenced_table: referenced_table.into(),
            referenced_columns,
            referenced_schema: None,
        }
    }

    /// Single-column key shorthand.
    pub fn single(column: &str, referenced_table: &str, referenced_column: &str) -> Self {
        Self::new(
            vec![column.to_string()],
            referenced_table,
            vec![referenced_column.to_string()],
        )
    }

    /// First (local, referenced) column pair, if both sides have one.
    pub fn first_pair(&self) -> Option<(&str, &str)> {
        match (self.columns.first(), self.referenced_columns.first()) {
            (Some(local), Some(remote)) => Some((local.as_str(), remote.as_str())),
            _ => None,
        }
    }
}

/// An index. Carried for completeness; classification ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Normalized metadata for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Table name
    pub name: String,
    /// Schema name
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key column names, in key order
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    #[serde(default)]
    pub indexes: Vec<IndexDescriptor>,
}

fn default_schema() -> String {
    "public".to_string()
}

/// A descriptor that breaks its own data invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("Table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("Table '{table}' primary key references unknown column '{column}'")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    #[error(
        "Table '{table}' foreign key to '{referenced_table}' pairs {local} local column(s) with {remote} referenced column(s)"
    )]
    ForeignKeyArity {
        table: String,
        referenced_table: String,
        local: usize,
        remote: usize,
    },
}

impl SchemaDescriptor {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, data_type: &str) -> Self {
        self.columns.push(ColumnDescriptor::new(name, data_type));
        self
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKeyDescriptor) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// `schema.table`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == column)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check the descriptor's own invariants.
    ///
    /// Odd-but-legal shapes (no columns, no primary key, self references,
    /// foreign keys with an empty side) pass; only contradictions fail.
    pub fn check(&self) -> Result<(), DescriptorError> {
        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(DescriptorError::DuplicateColumn {
                    table: self.name.clone(),
                    column: col.name.clone(),
                });
            }
        }

        for pk in &self.primary_key {
            if !seen.contains(pk.as_str()) {
                return Err(DescriptorError::UnknownPrimaryKeyColumn {
                    table: self.name.clone(),
                    column: pk.clone(),
                });
            }
        }

        for fk in &self.foreign_keys {
            let (local, remote) = (fk.columns.len(), fk.referenced_columns.len());
            if local > 0 && remote > 0 && local != remote {
                return Err(DescriptorError::ForeignKeyArity {
                    table: self.name.clone(),
                    referenced_table: fk.referenced_table.clone(),
                    local,
                    remote,
                });
            }
        }

        Ok(())
    }
}
