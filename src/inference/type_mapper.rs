//! Native column type to semantic value kind mapping.

use std::collections::BTreeMap;

use crate::config::TypeSettings;
use crate::model::ValueKind;

/// Built-in mapping of lowercase base type names.
static TYPE_MAPPINGS: &[(&str, ValueKind)] = &[
    // Numeric
    ("integer", ValueKind::Number),
    ("int", ValueKind::Number),
    ("bigint", ValueKind::Number),
    ("smallint", ValueKind::Number),
    ("tinyint", ValueKind::Number),
    ("decimal", ValueKind::Number),
    ("numeric", ValueKind::Number),
    ("real", ValueKind::Number),
    ("double precision", ValueKind::Number),
    ("double", ValueKind::Number),
    ("float", ValueKind::Number),
    ("money", ValueKind::Number),
    ("serial", ValueKind::Number),
    ("bigserial", ValueKind::Number),
    // String
    ("varchar", ValueKind::String),
    ("character varying", ValueKind::String),
    ("text", ValueKind::String),
    ("char", ValueKind::String),
    ("character", ValueKind::String),
    ("nvarchar", ValueKind::String),
    ("nchar", ValueKind::String),
    ("citext", ValueKind::String),
    ("interval", ValueKind::String),
    ("uuid", ValueKind::String),
    ("json", ValueKind::String),
    ("jsonb", ValueKind::String),
    ("array", ValueKind::String),
    ("text[]", ValueKind::String),
    ("varchar[]", ValueKind::String),
    ("integer[]", ValueKind::String),
    // Time
    ("timestamp", ValueKind::Time),
    ("timestamp without time zone", ValueKind::Time),
    ("timestamp with time zone", ValueKind::Time),
    ("timestamptz", ValueKind::Time),
    ("datetime", ValueKind::Time),
    ("date", ValueKind::Time),
    ("time", ValueKind::Time),
    ("timetz", ValueKind::Time),
    // Boolean
    ("boolean", ValueKind::Boolean),
    ("bool", ValueKind::Boolean),
];

/// Maps native type strings to [`ValueKind`]s. Total: unknown types map to
/// [`ValueKind::String`].
#[derive(Debug, Clone)]
pub struct ColumnTypeMapper {
    mappings: BTreeMap<String, ValueKind>,
}

impl Default for ColumnTypeMapper {
    fn default() -> Self {
        Self::new(&TypeSettings::default())
    }
}

impl ColumnTypeMapper {
    /// Built-in table with configured overrides layered on top.
    pub fn new(settings: &TypeSettings) -> Self {
        let mut mappings: BTreeMap<String, ValueKind> = TYPE_MAPPINGS
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect();

        for (name, kind) in &settings.overrides {
            mappings.insert(name.to_lowercase(), *kind);
        }

        Self { mappings }
    }

    /// Map a native type, ignoring any parenthesized parameters.
    pub fn map(&self, native_type: &str) -> ValueKind {
        let lower = native_type.to_lowercase();
        let base = lower.split('(').next().unwrap_or_default().trim();
        self.mappings
            .get(base)
            .copied()
            .unwrap_or(ValueKind::String)
    }
}
