use cubesmith::config::Settings;
use cubesmith::generate::{Generator, TableInput};
use cubesmith::metadata::{ForeignKeyDescriptor, SchemaDescriptor, SnapshotSource};
use cubesmith::model::{AggregationKind, DisplayFormat, Relationship, TableRole, ValueKind};
use insta::assert_snapshot;

fn generator() -> Generator {
    Generator::new(&Settings::default()).unwrap()
}

fn orders() -> SchemaDescriptor {
    SchemaDescriptor::new("public", "orders")
        .with_column("id", "integer")
        .with_column("customer_id", "integer")
        .with_column("order_date", "timestamp")
        .with_column("total_amount", "numeric")
        .with_column("status", "varchar")
        .with_primary_key(&["id"])
        .with_foreign_key(ForeignKeyDescriptor::single("customer_id", "customers", "id"))
}

fn user_roles() -> SchemaDescriptor {
    SchemaDescriptor::new("public", "user_roles")
        .with_column("user_id", "integer")
        .with_column("role_id", "integer")
        .with_foreign_key(ForeignKeyDescriptor::single("user_id", "users", "id"))
        .with_foreign_key(ForeignKeyDescriptor::single("role_id", "roles", "id"))
}

fn categories() -> SchemaDescriptor {
    SchemaDescriptor::new("public", "categories")
        .with_column("id", "integer")
        .with_column("name", "varchar")
        .with_column("description", "text")
        .with_primary_key(&["id"])
}

// ============================================================================
// orders
// ============================================================================

#[test]
fn test_orders_classified_by_score_fallback() {
    let g = generator();
    let result = g.classifier().explain(&orders());
    let signals = result.signals.unwrap();

    assert_eq!(result.role, TableRole::Fact);
    assert_eq!(signals.fk_count, 1);
    assert!(signals.fact_score > signals.dimension_score);
}

#[test]
fn test_orders_measures() {
    let cube = generator().generate_cube(&orders(), &[]).unwrap().cube;

    let names: Vec<&str> = cube.measures.iter().map(|m| m.name.as_str()).collect();
    assert_snapshot!(
        names.join(","),
        @"count,count_distinct,sum_total_amount,avg_total_amount,min_total_amount,max_total_amount"
    );

    assert_eq!(cube.measure("count_distinct").unwrap().sql.as_deref(), Some("id"));
    for name in ["sum_total_amount", "avg_total_amount", "min_total_amount", "max_total_amount"] {
        assert_eq!(cube.measure(name).unwrap().format, Some(DisplayFormat::Currency));
    }
    assert_eq!(
        cube.measure("sum_total_amount").unwrap().description,
        "Sum of total_amount"
    );
}

#[test]
fn test_orders_dimensions_segments_joins() {
    let cube = generator().generate_cube(&orders(), &[]).unwrap().cube;

    let order_date = cube.dimension("order_date").unwrap();
    assert_eq!(order_date.kind, ValueKind::Time);
    assert_eq!(order_date.granularities.len(), 6);
    assert!(cube.dimension("id").unwrap().primary_key);

    assert!(cube.segment("active").is_some());
    assert!(cube.segment("inactive").is_some());
    assert_eq!(
        cube.segment("recent").unwrap().sql,
        "{CUBE}.order_date >= CURRENT_DATE - INTERVAL '30 days'"
    );

    assert_eq!(cube.joins.len(), 1);
    assert_eq!(cube.joins[0].name, "customers");
    assert_eq!(cube.joins[0].relationship, Relationship::ManyToOne);

    assert_eq!(cube.pre_aggregations.len(), 1);
    assert_eq!(cube.pre_aggregations[0].name, "main_rollup");
    assert_eq!(cube.pre_aggregations[0].time_dimension, "order_date");
    assert_eq!(cube.pre_aggregations[0].dimensions, vec!["status"]);
}

// ============================================================================
// user_roles / categories
// ============================================================================

#[test]
fn test_user_roles_is_junction_without_rollup() {
    let generated = generator().generate_cube(&user_roles(), &[]).unwrap();
    assert_eq!(generated.role(), TableRole::Junction);
    assert!(generated.cube.pre_aggregations.is_empty());
    assert_eq!(generated.cube.joins.len(), 2);
}

#[test]
fn test_categories_is_dimension() {
    let generated = generator().generate_cube(&categories(), &[]).unwrap();
    assert_eq!(generated.role(), TableRole::Dimension);

    let kinds: Vec<AggregationKind> = generated.cube.measures.iter().map(|m| m.aggregation).collect();
    assert_eq!(kinds, vec![AggregationKind::Count, AggregationKind::CountDistinct]);
    assert!(generated.cube.pre_aggregations.is_empty());
}

#[test]
fn test_categories_text_ratio_path() {
    // A name that no pattern recognizes still lands on dimension through the text ratio
    let mut table = categories();
    table.name = "taxonomy".to_string();

    let result = generator().classifier().explain(&table);
    assert_eq!(result.role, TableRole::Dimension);
    assert!(result.signals.unwrap().text_ratio >= 0.4);
}

// ============================================================================
// Whole run
// ============================================================================

#[test]
fn test_full_run() {
    let output = generator().generate(&[
        TableInput::new(orders()),
        TableInput::new(user_roles()),
        TableInput::new(categories()),
    ]);

    assert!(output.failures.is_empty());
    assert_eq!(output.domain, "ecommerce");

    let views: Vec<&str> = output.views.iter().map(|v| v.name.as_str()).collect();
    assert_snapshot!(views.join(","), @"business_metrics,fact_analysis,dimension_catalog");

    let fact = output.view("fact_analysis").unwrap();
    let paths: Vec<&str> = fact.cubes.iter().map(|c| c.join_path.as_str()).collect();
    assert_eq!(paths, vec!["orders", "orders.customers"]);

    assert!(output.is_clean(), "issues: {:?}", output.cube_issues);
    assert_eq!(output.stats.cubes, 3);
    assert_eq!(output.stats.views, 3);
}

#[test]
fn test_every_count_measure_is_unique() {
    let output = generator().generate(&[
        TableInput::new(orders()),
        TableInput::new(user_roles()),
        TableInput::new(categories()),
        TableInput::new(SchemaDescriptor::new("public", "empty")),
    ]);

    for cube in output.cube_definitions() {
        let counts: Vec<_> = cube
            .measures
            .iter()
            .filter(|m| m.name == "count" && m.aggregation == AggregationKind::Count)
            .collect();
        assert_eq!(counts.len(), 1, "cube {}", cube.name);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let tables = vec![
        TableInput::new(orders()),
        TableInput::new(user_roles()),
        TableInput::new(categories()),
    ];
    let first = serde_json::to_string(&generator().generate(&tables)).unwrap();
    let second = serde_json::to_string(&generator().generate(&tables)).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_snapshot_source_end_to_end() {
    let json = r#"{
        "schema": "shop",
        "tables": [
            {
                "name": "orders",
                "schema": "shop",
                "columns": [
                    {"name": "id", "type": "integer", "nullable": false},
                    {"name": "customer_id", "type": "integer"},
                    {"name": "order_date", "type": "timestamp"},
                    {"name": "total_amount", "type": "numeric(10,2)"},
                    {"name": "status", "type": "varchar(20)"}
                ],
                "primary_key": ["id"],
                "foreign_keys": [
                    {"columns": ["customer_id"], "referenced_table": "customers", "referenced_columns": ["id"]}
                ]
            },
            {
                "name": "customers",
                "schema": "shop",
                "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "name", "type": "varchar(100)"}
                ],
                "primary_key": ["id"]
            }
        ]
    }"#;
    let source = SnapshotSource::from_json(json).unwrap();

    let output = generator()
        .generate_from_source(&source, "shop", 3)
        .await
        .unwrap();

    assert_eq!(output.cubes.len(), 2);
    assert_eq!(output.cube("orders").unwrap().cube.sql_table, "shop.orders");
    assert_eq!(
        output.cube("orders").unwrap().cube.pre_aggregations[0].build_range_start,
        "SELECT MIN(order_date) FROM shop.orders"
    );
}

#[test]
fn test_role_aware_descriptions() {
    let generator = Generator::with_provider(
        &Settings::default(),
        std::sync::Arc::new(cubesmith::synthesis::RoleAwareDescriptions),
    )
    .unwrap();
    let output = generator.generate(&[TableInput::new(orders()), TableInput::new(user_roles())]);

    let orders = &output.cube("orders").unwrap().cube;
    assert_eq!(orders.description, "Orders transaction and metrics data");
    assert_eq!(
        orders.dimension("customer_id").unwrap().description,
        "Unique Customer identifier"
    );
    assert_eq!(orders.measure("count").unwrap().description, "Total number of records");

    let roles = &output.cube("user_roles").unwrap().cube;
    assert_eq!(roles.description, "User Roles relationship mapping data");
}
