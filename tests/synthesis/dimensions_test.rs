use std::sync::Arc;

use cubesmith::config::{DimensionSettings, TypeSettings};
use cubesmith::inference::ColumnTypeMapper;
use cubesmith::metadata::SchemaDescriptor;
use cubesmith::model::{Granularity, ValueKind};
use cubesmith::synthesis::{
    CallbackDescriptions, DescribeError, DescriptionRequest, Describer, DimensionSynthesizer,
};

fn synthesizer() -> DimensionSynthesizer {
    DimensionSynthesizer::new(
        DimensionSettings::default(),
        ColumnTypeMapper::default(),
        Describer::templates(),
    )
}

fn users() -> SchemaDescriptor {
    SchemaDescriptor::new("public", "users")
        .with_column("tenant_id", "integer")
        .with_column("user_no", "integer")
        .with_column("email", "citext")
        .with_column("updated_at", "timestamp with time zone")
        .with_primary_key(&["tenant_id", "user_no"])
}

#[test]
fn test_composite_primary_key_marks_every_column() {
    let dims = synthesizer().synthesize(&users());
    let marked: Vec<&str> = dims
        .iter()
        .filter(|d| d.primary_key)
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(marked, vec!["tenant_id", "user_no"]);
}

#[test]
fn test_audit_column_keeps_base_set_first() {
    let dims = synthesizer().synthesize(&users());
    let updated = &dims[3];

    assert_eq!(updated.kind, ValueKind::Time);
    let names: Vec<&str> = updated.granularities.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(&names[..6], &["hour", "day", "week", "month", "quarter", "year"]);
    assert_eq!(&names[6..], &["fiscal_year", "business_week"]);
}

#[test]
fn test_configured_granularities() {
    let settings = DimensionSettings {
        granularities: vec![Granularity::new("day", "1 day")],
        audit_patterns: vec!["_at".to_string()],
        custom_granularities: vec![Granularity::new("shift", "8 hours")],
    };
    let synth = DimensionSynthesizer::new(settings, ColumnTypeMapper::default(), Describer::templates());
    let table = SchemaDescriptor::new("public", "punches")
        .with_column("punched_at", "timestamp")
        .with_column("punch_day", "date");
    let dims = synth.synthesize(&table);

    assert_eq!(dims[0].granularities.len(), 2);
    assert_eq!(dims[1].granularities.len(), 1);
}

#[test]
fn test_type_overrides_flow_through() {
    let mut types = TypeSettings::default();
    types.overrides.insert("citext".to_string(), ValueKind::Number);
    let synth = DimensionSynthesizer::new(
        DimensionSettings::default(),
        ColumnTypeMapper::new(&types),
        Describer::templates(),
    );
    let dims = synth.synthesize(&users());
    assert_eq!(dims[2].kind, ValueKind::Number);
}

#[test]
fn test_pluggable_descriptions() {
    let provider = CallbackDescriptions::new(|req: &DescriptionRequest<'_>| match req {
        DescriptionRequest::Dimension { column, kind, .. } => {
            Ok(format!("{} ({})", column.name, kind))
        }
        _ => Err(DescribeError::Unavailable("dimensions only".to_string())),
    });
    let synth = DimensionSynthesizer::new(
        DimensionSettings::default(),
        ColumnTypeMapper::default(),
        Describer::with_provider(Arc::new(provider)),
    );
    let dims = synth.synthesize(&users());
    assert_eq!(dims[2].description, "email (string)");
}
