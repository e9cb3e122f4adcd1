use cubesmith::config::{Settings, ValidationSettings};
use cubesmith::generate::{Generator, TableInput};
use cubesmith::inference::sanitize_name;
use cubesmith::metadata::SchemaDescriptor;
use cubesmith::model::{CubeDefinition, MeasureDefinition, ViewDefinition};
use cubesmith::validation::{ModelValidator, ValidationError};

fn validator() -> ModelValidator {
    ModelValidator::new(&ValidationSettings::default()).unwrap()
}

fn cube(name: &str) -> CubeDefinition {
    CubeDefinition {
        name: name.to_string(),
        sql_table: "public.t".to_string(),
        description: String::new(),
        measures: vec![MeasureDefinition::record_count("count", "")],
        dimensions: vec![],
        segments: vec![],
        joins: vec![],
        pre_aggregations: vec![],
    }
}

#[test]
fn test_naming_counter_example() {
    let errors = validator().validate_cube(&cube("Orders!")).unwrap_err();
    let naming: Vec<_> = errors
        .iter()
        .filter(|e| matches!(e, ValidationError::InvalidName { .. }))
        .collect();
    assert_eq!(naming.len(), 1);
}

#[test]
fn test_sanitized_names_always_pass() {
    for raw in ["Orders!", "2024 Sales", "__tmp__", "Ünïcode Table", "a-b-c", ""] {
        let name = sanitize_name(raw);
        assert!(
            validator().validate_cube(&cube(&name)).is_ok(),
            "{:?} sanitized to {:?}",
            raw,
            name
        );
    }
}

#[test]
fn test_view_naming_and_entries() {
    let view = ViewDefinition {
        name: "Orders!".to_string(),
        description: String::new(),
        cubes: vec![],
    };
    let errors = validator().validate_view(&view).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::InvalidName { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MissingField { .. })));
}

#[test]
fn test_validation_does_not_mutate() {
    let c = cube("Orders!");
    let before = c.clone();
    let _ = validator().validate_cube(&c);
    assert_eq!(c, before);
}

#[test]
fn test_error_display() {
    let error = ValidationError::TooMany {
        entity_type: "Cube".to_string(),
        entity_name: "orders".to_string(),
        member_type: "measures".to_string(),
        count: 51,
        max: 50,
    };
    assert_eq!(error.to_string(), "Cube 'orders' has 51 measures (maximum 50)");
}

#[test]
fn test_generator_reports_issues_without_dropping_cubes() {
    let settings = Settings {
        validation: ValidationSettings {
            max_dimensions: 1,
            ..ValidationSettings::default()
        },
        ..Settings::default()
    };
    let table = SchemaDescriptor::new("public", "wide")
        .with_column("a", "text")
        .with_column("b", "text");

    let output = Generator::new(&settings).unwrap().generate(&[TableInput::new(table)]);
    assert_eq!(output.cubes.len(), 1);
    assert_eq!(output.cube_issues.len(), 1);
    assert_eq!(output.cube_issues[0].artifact, "wide");
    assert_eq!(output.stats.validation_errors, 1);
}
