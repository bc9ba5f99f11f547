use serde_json::{Value, json};
use shot_chart::core::{Record, ShotSettings, build_actual_goal_series, build_series, trim_index};

fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Object(fields) => Record::new(fields),
            other => panic!("test record must be an object, got {other}"),
        })
        .collect()
}

#[test]
fn series_length_matches_records_even_when_field_is_absent() {
    let records = records(vec![
        json!({"time": 0, "shot": {"pressure": 1.0}}),
        json!({"time": 100}),
        json!({"time": 200, "shot": {"pressure": "3"}}),
    ]);

    let pressure = build_series(&records, &["shot", "pressure"]);
    assert_eq!(pressure.len(), 3);
    assert_eq!(pressure[0], 1.0);
    assert!(pressure[1].is_nan());
    assert_eq!(pressure[2], 3.0);

    let missing = build_series(&records, &["sensors", "nowhere"]);
    assert_eq!(missing.len(), 3);
    assert!(missing.iter().all(|value| value.is_nan()));
}

#[test]
fn actual_goal_series_keeps_all_goals_regardless_of_active() {
    let records = records(vec![
        json!({
            "time": 0,
            "shot": {
                "pressure": 2.0,
                "flow": 1.0,
                "setpoints": {"pressure": 9.0, "flow": 2.5, "active": "pressure"}
            },
            "sensors": {"motor_speed": 10.0, "motor_power": 40.0}
        }),
        json!({
            "time": 100,
            "shot": {"pressure": 8.0, "setpoints": {"power": 60.0, "active": "power"}},
            "sensors": {"motor_power": 55.0}
        }),
    ]);

    let series = build_actual_goal_series(&records);
    assert_eq!(series.len(), 2);
    assert_eq!(series.time_s[0], 0.0);
    assert_eq!(series.goal_pressure[0], 9.0);
    assert_eq!(series.goal_flow[0], 2.5);
    assert!(series.goal_power[0].is_nan());
    assert!(series.goal_pressure[1].is_nan());
    assert_eq!(series.goal_power[1], 60.0);
    assert!(series.flow[1].is_nan());
    assert!(series.motor_speed[1].is_nan());
    assert_eq!(series.motor_power, vec![40.0, 55.0]);
    assert_eq!(series.active, vec![Some(json!("pressure")), Some(json!("power"))]);
}

#[test]
fn trim_index_keeps_samples_up_to_bound() {
    let elapsed = [0.0, 1.0, 2.0, 3.0, 4.0];
    assert_eq!(trim_index(&elapsed, 2.5), 3);
    assert_eq!(trim_index(&elapsed, 2.0), 3);
    assert_eq!(trim_index(&elapsed, 4.0), 5);
    assert_eq!(trim_index(&elapsed, 100.0), 5);
    assert_eq!(trim_index(&elapsed, -1.0), 0);
    assert_eq!(trim_index(&[], 1.0), 0);
}

#[test]
fn untrimmed_settings_resolve_to_full_duration() {
    assert_eq!(ShotSettings::default().resolve_bound(12.5), 12.5);
    assert_eq!(ShotSettings::trimmed_to(4.0).resolve_bound(12.5), 4.0);
}

#[test]
fn shot_settings_serialize_with_trim_duration_key() {
    let json = serde_json::to_value(ShotSettings::trimmed_to(25.0)).expect("serialize");
    assert_eq!(json, json!({"trim_duration": 25.0}));

    let empty: ShotSettings = serde_json::from_value(json!({})).expect("deserialize");
    assert_eq!(empty, ShotSettings::default());
}
