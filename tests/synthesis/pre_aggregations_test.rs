use cubesmith::config::PreAggregationSettings;
use cubesmith::inference::ColumnTypeMapper;
use cubesmith::metadata::SchemaDescriptor;
use cubesmith::model::{TableRole, TimeGrain};
use cubesmith::synthesis::PreAggregationPlanner;

fn planner(settings: PreAggregationSettings) -> PreAggregationPlanner {
    PreAggregationPlanner::new(settings, ColumnTypeMapper::default())
}

fn events() -> SchemaDescriptor {
    SchemaDescriptor::new("analytics", "events")
        .with_column("id", "bigint")
        .with_column("event_type", "text")
        .with_column("occurred_at", "timestamptz")
        .with_column("device_category", "text")
}

#[test]
fn test_gated_on_role_and_time_column() {
    let p = planner(PreAggregationSettings::default());
    for role in TableRole::ALL {
        let plans = p.plan(&events(), role);
        assert_eq!(plans.len(), usize::from(role == TableRole::Fact));
    }

    let no_time = SchemaDescriptor::new("analytics", "events").with_column("event_type", "text");
    for role in TableRole::ALL {
        assert!(p.plan(&no_time, role).is_empty());
    }
}

#[test]
fn test_configured_rollup() {
    let settings = PreAggregationSettings {
        name: "hourly".to_string(),
        default_granularity: TimeGrain::Hour,
        partition_granularity: TimeGrain::Week,
        refresh_interval: "15 minutes".to_string(),
        max_dimensions: 1,
        ..PreAggregationSettings::default()
    };
    let plans = planner(settings).plan(&events(), TableRole::Fact);
    let rollup = &plans[0];

    assert_eq!(rollup.name, "hourly");
    assert_eq!(rollup.granularity, TimeGrain::Hour);
    assert_eq!(rollup.partition_granularity, TimeGrain::Week);
    assert_eq!(rollup.refresh_every, "15 minutes");
    assert_eq!(rollup.dimensions, vec!["event_type"]);
    assert_eq!(rollup.time_dimension, "occurred_at");
}

#[test]
fn test_serialized_rollup_omits_empty_dimensions() {
    let table = SchemaDescriptor::new("public", "pings").with_column("at", "timestamp");
    let plans = planner(PreAggregationSettings::default()).plan(&table, TableRole::Fact);
    let json = serde_json::to_value(&plans[0]).unwrap();

    assert!(json.get("dimensions").is_none());
    assert_eq!(json["granularity"], "day");
    assert_eq!(json["partition_granularity"], "month");
    assert_eq!(json["build_range_end"], "SELECT MAX(at) FROM public.pings");
}
