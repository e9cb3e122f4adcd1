//! Segment synthesis.

use std::collections::HashSet;

use crate::config::SegmentSettings;
use crate::inference::PatternRule;
use crate::metadata::SchemaDescriptor;
use crate::model::SegmentDefinition;

/// Generates filter segments from column names.
#[derive(Debug, Clone, Default)]
pub struct SegmentSynthesizer {
    settings: SegmentSettings,
}

impl SegmentSynthesizer {
    pub fn new(settings: SegmentSettings) -> Self {
        Self { settings }
    }

    /// Segments for one table, in rule order then column order. A segment
    /// name is emitted at most once; the first column that produces it wins.
    pub fn synthesize(&self, table: &SchemaDescriptor) -> Vec<SegmentDefinition> {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for rule in &self.settings.rules {
            for col in table.columns.iter().filter(|c| rule.matches(&c.name)) {
                for template in &rule.segments {
                    if !seen.insert(template.name.clone()) {
                        continue;
                    }
                    segments.push(SegmentDefinition {
                        name: template.name.clone(),
                        sql: format!("{{CUBE}}.{} {}", col.name, template.condition),
                        description: template.description.clone(),
                    });
                }
            }
        }

        segments
    }
}
