//! Join resolution from foreign keys.

use tracing::debug;

use crate::inference::sanitize_name;
use crate::metadata::SchemaDescriptor;
use crate::model::{JoinDefinition, Relationship};

/// Turns foreign keys into joins.
///
/// Every join is `many_to_one` from the owning cube. Composite keys are
/// reduced to their first column pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinResolver;

impl JoinResolver {
    pub fn new() -> Self {
        Self
    }

    /// One join per usable foreign key, in declaration order.
    pub fn resolve(&self, table: &SchemaDescriptor) -> Vec<JoinDefinition> {
        let mut joins = Vec::new();

        for fk in &table.foreign_keys {
            if fk.referenced_table.is_empty() {
                debug!(table = %table.name, "skipping foreign key without a referenced table");
                continue;
            }
            let Some((local, remote)) = fk.first_pair() else {
                debug!(
                    table = %table.name,
                    referenced = %fk.referenced_table,
                    "skipping foreign key without columns"
                );
                continue;
            };

            let target = sanitize_name(&fk.referenced_table);
            joins.push(JoinDefinition {
                sql: format!("{{CUBE}}.{} = {{{}.{}}}", local, target, remote),
                name: target,
                relationship: Relationship::ManyToOne,
            });
        }

        joins
    }
}
