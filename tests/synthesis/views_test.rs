use cubesmith::config::Settings;
use cubesmith::generate::{Generator, TableInput};
use cubesmith::metadata::{ForeignKeyDescriptor, SchemaDescriptor};
use cubesmith::model::{IncludeSelector, ViewPrefix};
use cubesmith::synthesis::ViewComposer;
use insta::assert_snapshot;

fn shop() -> Vec<TableInput> {
    let orders = SchemaDescriptor::new("public", "orders")
        .with_column("id", "integer")
        .with_column("customer_id", "integer")
        .with_column("product_id", "integer")
        .with_column("ordered_at", "timestamp")
        .with_column("total", "numeric")
        .with_column("status", "text")
        .with_column("channel", "text")
        .with_primary_key(&["id"])
        .with_foreign_key(ForeignKeyDescriptor::single("customer_id", "customers", "id"))
        .with_foreign_key(ForeignKeyDescriptor::single("product_id", "products", "id"));

    let customers = SchemaDescriptor::new("public", "customers")
        .with_column("id", "integer")
        .with_column("name", "text")
        .with_primary_key(&["id"]);

    let products = SchemaDescriptor::new("public", "products")
        .with_column("id", "integer")
        .with_column("name", "text")
        .with_column("price", "numeric")
        .with_primary_key(&["id"]);

    vec![
        TableInput::new(orders),
        TableInput::new(customers),
        TableInput::new(products),
    ]
}

#[test]
fn test_views_over_generated_cubes() {
    let output = Generator::new(&Settings::default()).unwrap().generate(&shop());

    let business = output.view("business_metrics").unwrap();
    let paths: Vec<&str> = business.cubes.iter().map(|c| c.join_path.as_str()).collect();
    assert_snapshot!(paths.join(","), @"orders,products");

    let fact = output.view("fact_analysis").unwrap();
    let paths: Vec<&str> = fact.cubes.iter().map(|c| c.join_path.as_str()).collect();
    assert_snapshot!(paths.join(","), @"orders,orders.customers,orders.products");
    assert_eq!(
        fact.cubes[1].prefix,
        Some(ViewPrefix::Alias("customers".to_string()))
    );
    match &fact.cubes[0].includes {
        IncludeSelector::Members(members) => {
            assert_snapshot!(
                members.join(","),
                @"count,count_distinct,sum_total,avg_total,min_total,max_total,ordered_at"
            );
        }
        IncludeSelector::All => panic!("fact cube should list its members"),
    }

    let catalog = output.view("dimension_catalog").unwrap();
    let paths: Vec<&str> = catalog.cubes.iter().map(|c| c.join_path.as_str()).collect();
    assert_eq!(paths, vec!["customers", "products"]);
}

#[test]
fn test_composer_is_order_sensitive_not_random() {
    let generator = Generator::new(&Settings::default()).unwrap();
    let mut tables = shop();
    let first = generator.generate(&tables).views;
    tables.reverse();
    let reversed = generator.generate(&tables).views;

    let catalog = |views: &[cubesmith::ViewDefinition]| -> Vec<String> {
        views
            .iter()
            .find(|v| v.name == "dimension_catalog")
            .unwrap()
            .cubes
            .iter()
            .map(|c| c.join_path.clone())
            .collect()
    };
    assert_eq!(catalog(&first), vec!["customers", "products"]);
    assert_eq!(catalog(&reversed), vec!["products", "customers"]);
}

#[test]
fn test_view_json_shape() {
    let output = Generator::new(&Settings::default()).unwrap().generate(&shop());
    let json = serde_json::to_value(output.view("business_metrics").unwrap()).unwrap();

    assert_eq!(json["cubes"][0]["includes"], "*");
    assert_eq!(json["cubes"][0]["prefix"], true);
}

#[test]
fn test_empty_input() {
    assert!(ViewComposer::default().compose(&[]).is_empty());
}
