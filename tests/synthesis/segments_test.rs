use std::collections::HashSet;

use cubesmith::config::{SegmentRule, SegmentSettings, SegmentTemplate};
use cubesmith::metadata::SchemaDescriptor;
use cubesmith::synthesis::SegmentSynthesizer;

fn template(name: &str, condition: &str) -> SegmentTemplate {
    SegmentTemplate {
        name: name.to_string(),
        condition: condition.to_string(),
        description: format!("{} rows", name),
    }
}

#[test]
fn test_names_are_unique_for_many_matching_columns() {
    let table = SchemaDescriptor::new("public", "posts")
        .with_column("status", "text")
        .with_column("workflow_state", "text")
        .with_column("is_active", "boolean")
        .with_column("created_at", "timestamp")
        .with_column("publish_date", "date")
        .with_column("is_published", "boolean")
        .with_column("visible", "boolean");
    let segments = SegmentSynthesizer::default().synthesize(&table);

    let names: HashSet<&str> = segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), segments.len());
    assert_eq!(segments.len(), 6);
    assert_eq!(
        segments.iter().find(|s| s.name == "published").unwrap().sql,
        "{CUBE}.is_published = true"
    );
}

#[test]
fn test_dedup_spans_rules() {
    // Two rules emitting the same segment name: the first rule keeps it
    let settings = SegmentSettings {
        rules: vec![
            SegmentRule {
                name: "flags".to_string(),
                patterns: vec!["archived".to_string()],
                segments: vec![template("hidden", "= true")],
            },
            SegmentRule {
                name: "visibility".to_string(),
                patterns: vec!["visible".to_string()],
                segments: vec![template("hidden", "= false")],
            },
        ],
    };
    let table = SchemaDescriptor::new("public", "docs")
        .with_column("visible", "boolean")
        .with_column("archived", "boolean");

    let segments = SegmentSynthesizer::new(settings).synthesize(&table);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].sql, "{CUBE}.archived = true");
}

#[test]
fn test_no_columns() {
    let table = SchemaDescriptor::new("public", "empty");
    assert!(SegmentSynthesizer::default().synthesize(&table).is_empty());
}
