use cubesmith::config::{DomainProfile, DomainSettings};
use cubesmith::inference::{DomainDetector, GENERIC_DOMAIN};
use cubesmith::model::CubeDefinition;

fn cube(name: &str) -> CubeDefinition {
    CubeDefinition {
        name: name.to_string(),
        sql_table: format!("public.{}", name),
        description: String::new(),
        measures: vec![],
        dimensions: vec![],
        segments: vec![],
        joins: vec![],
        pre_aggregations: vec![],
    }
}

#[test]
fn test_detect_from_cubes() {
    let cubes = vec![cube("usage_events"), cube("subscriptions"), cube("invoices")];
    assert_eq!(DomainDetector::default().detect(&cubes), "saas");
}

#[test]
fn test_finance() {
    let cubes = vec![cube("trades"), cube("portfolios")];
    assert_eq!(DomainDetector::default().detect(&cubes), "finance");
}

#[test]
fn test_no_cubes_is_generic() {
    let cubes: Vec<CubeDefinition> = vec![];
    assert_eq!(DomainDetector::default().detect(&cubes), GENERIC_DOMAIN);
}

#[test]
fn test_configured_threshold() {
    let settings = DomainSettings {
        match_threshold: 1,
        profiles: vec![DomainProfile {
            name: "logistics".to_string(),
            fact_tables: vec!["shipments".to_string()],
            dimension_tables: vec!["carriers".to_string()],
        }],
    };
    let detector = DomainDetector::new(settings);
    assert_eq!(detector.detect(&[cube("shipments")]), "logistics");
    assert_eq!(detector.detect(&[cube("orders")]), GENERIC_DOMAIN);
}
