use cubesmith::config::ClassificationRules;
use cubesmith::inference::{ClassificationReason, ColumnTypeMapper, TableClassifier};
use cubesmith::metadata::{ForeignKeyDescriptor, SchemaDescriptor};
use cubesmith::model::{TableRole, ValueKind};

fn classify(table: &SchemaDescriptor) -> TableRole {
    TableClassifier::default().classify(table)
}

#[test]
fn test_name_patterns() {
    assert_eq!(classify(&SchemaDescriptor::new("dw", "fact_sales")), TableRole::Fact);
    assert_eq!(classify(&SchemaDescriptor::new("dw", "daily_sales")), TableRole::Fact);
    assert_eq!(classify(&SchemaDescriptor::new("dw", "dim_store")), TableRole::Dimension);
    assert_eq!(classify(&SchemaDescriptor::new("dw", "country_lookup")), TableRole::Dimension);
    assert_eq!(classify(&SchemaDescriptor::new("dw", "tag_bridge")), TableRole::Junction);
}

#[test]
fn test_name_match_is_case_insensitive() {
    assert_eq!(classify(&SchemaDescriptor::new("dw", "FACT_Sales")), TableRole::Fact);
}

#[test]
fn test_junction_shape() {
    let table = SchemaDescriptor::new("public", "memberships")
        .with_column("id", "integer")
        .with_column("team_id", "integer")
        .with_column("player_id", "integer")
        .with_foreign_key(ForeignKeyDescriptor::single("team_id", "teams", "id"))
        .with_foreign_key(ForeignKeyDescriptor::single("player_id", "players", "id"));

    let result = TableClassifier::default().explain(&table);
    assert_eq!(result.role, TableRole::Junction);
    assert_eq!(result.reason, ClassificationReason::JunctionShape);
}

#[test]
fn test_wide_table_with_two_keys_is_not_junction() {
    let mut table = SchemaDescriptor::new("public", "shipments")
        .with_foreign_key(ForeignKeyDescriptor::single("a_id", "a", "id"))
        .with_foreign_key(ForeignKeyDescriptor::single("b_id", "b", "id"));
    for i in 0..7 {
        table = table.with_column(&format!("metric_{}", i), "numeric");
    }

    let result = TableClassifier::default().explain(&table);
    assert_eq!(result.role, TableRole::Fact);
    assert_eq!(result.reason, ClassificationReason::FactShape);
}

#[test]
fn test_classification_is_deterministic() {
    let table = SchemaDescriptor::new("public", "readings")
        .with_column("sensor", "text")
        .with_column("value", "float")
        .with_column("taken_at", "timestamp");
    let classifier = TableClassifier::default();
    assert_eq!(classifier.explain(&table), classifier.explain(&table));
}

#[test]
fn test_every_table_gets_a_role() {
    let tables = vec![
        SchemaDescriptor::new("public", ""),
        SchemaDescriptor::new("public", "x").with_column("y", ""),
        SchemaDescriptor::new("public", "z").with_column("w", "geometry"),
    ];
    for table in &tables {
        assert!(TableRole::ALL.contains(&classify(table)));
    }
}

#[test]
fn test_alternate_rule_set() {
    let rules = ClassificationRules {
        fact_name_patterns: vec!["log".to_string()],
        ..ClassificationRules::default()
    };
    let table = SchemaDescriptor::new("public", "audit_log").with_column("message", "text");
    assert_eq!(TableClassifier::new(rules).classify(&table), TableRole::Fact);
    assert_eq!(classify(&table), TableRole::Dimension);
}

#[test]
fn test_type_mapper_kinds() {
    let mapper = ColumnTypeMapper::default();
    assert_eq!(mapper.map("BIGINT"), ValueKind::Number);
    assert_eq!(mapper.map("decimal(18, 4)"), ValueKind::Number);
    assert_eq!(mapper.map("bool"), ValueKind::Boolean);
    assert_eq!(mapper.map("date"), ValueKind::Time);
    assert_eq!(mapper.map("jsonb"), ValueKind::String);
    assert_eq!(mapper.map("tsvector"), ValueKind::String);
}
