use approx::assert_abs_diff_eq;
use indexmap::IndexMap;
use shot_chart::core::{
    ActualsVsGoals, AxisSide, FieldDescriptor, LinePattern, PlotMode, SelectedField, Shot,
    ShotSettings, ShotSlot, StyleDirective, assemble_comparison, assemble_single, find_field,
};

fn descriptor(key: &str) -> &'static FieldDescriptor {
    find_field(key).expect("registry field")
}

fn shot(json: &str) -> Shot {
    Shot::from_json_str(json).expect("valid shot")
}

fn first_shot() -> Shot {
    shot(
        r#"{"profile_name":"A","data":[
            {"time":0,"shot":{"pressure":1.0,"flow":0.5}},
            {"time":100,"shot":{"pressure":2.0,"flow":1.0}},
            {"time":200,"shot":{"pressure":3.0,"flow":1.5}},
            {"time":300,"shot":{"pressure":4.0,"flow":2.0}}
        ]}"#,
    )
}

fn second_shot() -> Shot {
    shot(
        r#"{"profile_name":"B","data":[
            {"time":10.0,"shot":{"pressure":5.0}},
            {"time":10.5,"shot":{"pressure":6.0}},
            {"time":11.0,"shot":{"pressure":7.0}}
        ]}"#,
    )
}

#[test]
fn single_view_trims_and_labels_traces() {
    let shot = first_shot();
    let fields = [
        SelectedField::primary(descriptor("shot.pressure")),
        SelectedField::secondary(descriptor("shot.flow")),
    ];

    let model = assemble_single(&shot, ShotSettings::trimmed_to(0.15), &fields, &IndexMap::new());

    assert_eq!(model.mode, PlotMode::Single);
    assert_eq!(model.title, "A");
    assert_eq!(model.traces.len(), 2);
    assert!(model.has_secondary_axis());

    let pressure = &model.traces[0];
    assert_eq!(pressure.label, "Pressure (bar)");
    assert_eq!(pressure.values, vec![1.0, 2.0]);
    assert_eq!(pressure.time.len(), 2);
    assert_eq!(pressure.style.color, "#1f77b4");

    let flow = &model.traces[1];
    assert_eq!(flow.label, "Flow (ml/s) [2nd]");
    assert_eq!(flow.axis, AxisSide::Secondary);
    assert_eq!(flow.style.color, "#ff7f0e");
}

#[test]
fn empty_selection_yields_placeholder_title() {
    let model = assemble_single(&first_shot(), ShotSettings::default(), &[], &IndexMap::new());
    assert_eq!(model.mode, PlotMode::Empty);
    assert_eq!(model.title, "No data series selected");
    assert!(model.traces.is_empty());
}

#[test]
fn comparison_traces_share_colour_and_differ_in_pattern() {
    let fields = [SelectedField::primary(descriptor("shot.pressure"))];
    let model = assemble_comparison(
        (&first_shot(), ShotSettings::default()),
        (&second_shot(), ShotSettings::default()),
        &fields,
        &IndexMap::new(),
    );

    assert_eq!(model.mode, PlotMode::Comparison);
    assert_eq!(model.title, "Comparison: A vs B");
    assert_eq!(model.traces.len(), 2);

    let (first, second) = (&model.traces[0], &model.traces[1]);
    assert_eq!(first.slot, ShotSlot::First);
    assert_eq!(second.slot, ShotSlot::Second);
    assert_eq!(first.style.color, second.style.color);
    assert_eq!(first.style.pattern, LinePattern::Solid);
    assert_eq!(second.style.pattern, LinePattern::Dashed);
    assert_eq!(first.label, "Pressure (A)");
    assert_eq!(second.label, "Pressure (B)");
}

#[test]
fn comparison_keeps_independent_time_bases_and_trims() {
    let fields = [SelectedField::primary(descriptor("shot.pressure"))];
    let model = assemble_comparison(
        (&first_shot(), ShotSettings::trimmed_to(0.1)),
        (&second_shot(), ShotSettings::default()),
        &fields,
        &IndexMap::new(),
    );

    let first = &model.traces[0];
    assert_eq!(first.values, vec![1.0, 2.0]);
    assert_abs_diff_eq!(first.time[1], 0.1, epsilon = 1e-12);

    let second = &model.traces[1];
    assert_eq!(second.values, vec![5.0, 6.0, 7.0]);
    assert_eq!(second.time, vec![0.0, 0.5, 1.0]);
}

#[test]
fn style_overrides_apply_to_both_shots() {
    let fields = [SelectedField::primary(descriptor("shot.pressure"))];
    let mut styles = IndexMap::new();
    styles.insert(
        "shot.pressure".to_owned(),
        StyleDirective {
            color: Some("#000000".to_owned()),
            linestyle: Some(LinePattern::Dotted),
            linewidth: Some(3.0),
        },
    );

    let model = assemble_comparison(
        (&first_shot(), ShotSettings::default()),
        (&second_shot(), ShotSettings::default()),
        &fields,
        &styles,
    );

    assert!(model.traces.iter().all(|trace| trace.style.color == "#000000"));
    assert!(model.traces.iter().all(|trace| trace.style.width == 3.0));
    assert_eq!(model.traces[0].style.pattern, LinePattern::Dotted);
    assert_eq!(model.traces[1].style.pattern, LinePattern::Dotted);
}

#[test]
fn actuals_vs_goals_places_power_on_secondary_axis() {
    let shot = shot(
        r#"{"profile_name":"P","data":[
            {"time":0,"shot":{"pressure":1,"flow":2,"setpoints":{"pressure":9,"power":50}},
             "sensors":{"motor_speed":100,"motor_power":40}},
            {"time":100,"shot":{"pressure":2,"flow":3,"setpoints":{"flow":4}},
             "sensors":{"motor_speed":110,"motor_power":45}}
        ]}"#,
    );

    let model = ActualsVsGoals::default().plot_model(&shot, "custom");
    assert_eq!(model.title, "custom");
    assert_eq!(model.traces.len(), 7);

    let secondary: Vec<&str> = model
        .traces_on(AxisSide::Secondary)
        .map(|trace| trace.label.as_str())
        .collect();
    assert_eq!(
        secondary,
        vec!["Motor power (actual)", "Motor power goal (setpoint)"]
    );

    let goal = model
        .traces_for_field("shot.setpoints.pressure")
        .next()
        .expect("pressure goal trace");
    assert_eq!(goal.style.pattern, LinePattern::Dotted);
    assert_eq!(goal.values[0], 9.0);
    assert!(goal.values[1].is_nan());
    assert!(model.traces.iter().all(|trace| trace.style.width == 2.0));
}

#[test]
fn actuals_vs_goals_switches_hide_series() {
    let shot = first_shot();
    let switches = ActualsVsGoals {
        motor_power: false,
        motor_power_goal: false,
        motor_speed: false,
        ..ActualsVsGoals::default()
    };

    let model = switches.plot_model(&shot, "t");
    assert_eq!(model.traces.len(), 4);
    assert!(!model.has_secondary_axis());
    assert_eq!(model.traces[0].style.color, "#1f77b4");
    assert_eq!(model.traces[3].style.color, "#d62728");
}
