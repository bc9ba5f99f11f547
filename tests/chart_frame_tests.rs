use indexmap::IndexMap;
use shot_chart::chart::{
    ChartRanges, ChartStyle, MAX_LEGEND_HEIGHT_FRACTION, OutputFormat, build_chart_frame,
    export_chart,
};
use shot_chart::core::{
    ActualsVsGoals, AxisRange, PlotModel, SelectedField, SelectionPreset, Shot, ShotSettings,
    ShotSlot, Viewport, assemble_single, find_field,
};
use shot_chart::viewer::Viewer;
use shot_chart::ShotError;
use shot_chart::render::{LinePrimitive, LineStrokeStyle, NullRenderer, Renderer};

fn shot_with_gap() -> Shot {
    Shot::from_json_str(
        r#"{"profile_name":"Gap","data":[
            {"time":0,"shot":{"pressure":1.0,"flow":-1.0},"sensors":{"motor_power":10}},
            {"time":100,"shot":{"pressure":2.0,"flow":1.0},"sensors":{"motor_power":20}},
            {"time":200,"shot":{"flow":2.0},"sensors":{"motor_power":30}},
            {"time":300,"shot":{"pressure":4.0,"flow":3.0},"sensors":{"motor_power":40}},
            {"time":400,"shot":{"pressure":5.0,"flow":4.0},"sensors":{"motor_power":50}}
        ]}"#,
    )
    .expect("valid shot")
}

fn single_model(fields: &[SelectedField]) -> PlotModel {
    assemble_single(&shot_with_gap(), ShotSettings::default(), fields, &IndexMap::new())
}

#[test]
fn empty_model_renders_title_only() {
    let frame = build_chart_frame(&PlotModel::empty("No data loaded"), &ChartStyle::default())
        .expect("frame");
    frame.validate().expect("valid frame");

    assert!(frame.polylines.is_empty());
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "No data loaded");
    assert_eq!(frame.viewport, Viewport::new(1400, 700));
}

#[test]
fn nan_samples_split_polylines() {
    let model = single_model(&[SelectedField::primary(
        find_field("shot.pressure").expect("field"),
    )]);
    let frame = build_chart_frame(&model, &ChartStyle::default()).expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.polylines.len(), 2);
    assert_eq!(frame.polylines[0].points.len(), 2);
    assert_eq!(frame.polylines[1].points.len(), 2);
}

#[test]
fn frame_contains_axis_titles_and_legend_labels() {
    let model = single_model(&[
        SelectedField::primary(find_field("shot.pressure").expect("field")),
        SelectedField::secondary(find_field("sensors.motor_power").expect("field")),
    ]);
    let frame = build_chart_frame(&model, &ChartStyle::default()).expect("frame");

    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    for expected in [
        "Gap",
        "Time (s)",
        "Primary Axis",
        "Secondary Axis",
        "Pressure (bar)",
        "Motor Power (%) [2nd]",
    ] {
        assert!(texts.contains(&expected), "missing text {expected}");
    }
}

#[test]
fn secondary_axis_ranges_are_zero_aligned() {
    let model = single_model(&[
        SelectedField::primary(find_field("shot.flow").expect("field")),
        SelectedField::secondary(find_field("sensors.motor_power").expect("field")),
    ]);
    let ranges = ChartRanges::for_model(&model);
    let secondary = ranges.secondary.expect("secondary axis in use");

    let zero_fraction = |range: AxisRange| -range.min / range.span();
    assert!((zero_fraction(ranges.primary) - zero_fraction(secondary)).abs() < 1e-9);
    assert!(ranges.primary.min <= -1.0);
    assert!(secondary.max >= 50.0);
}

#[test]
fn primary_only_model_has_no_secondary_range() {
    let model = single_model(&[SelectedField::primary(
        find_field("shot.pressure").expect("field"),
    )]);
    assert_eq!(ChartRanges::for_model(&model).secondary, None);
}

#[test]
fn grid_can_be_disabled() {
    let model = single_model(&[SelectedField::primary(
        find_field("shot.pressure").expect("field"),
    )]);
    let with_grid = build_chart_frame(&model, &ChartStyle::default()).expect("frame");
    let without_grid =
        build_chart_frame(&model, &ChartStyle::default().with_grid(false)).expect("frame");

    let dashed = |lines: &[LinePrimitive]| {
        lines
            .iter()
            .filter(|line| line.stroke_style == LineStrokeStyle::Dashed)
            .count()
    };
    assert!(dashed(&with_grid.lines) > 0);
    assert_eq!(dashed(&without_grid.lines), 0);
}

#[test]
fn figure_size_scales_viewport() {
    let style = ChartStyle::default().with_figure_size(14.0, 7.0, 200);
    assert_eq!(style.viewport, Viewport::new(2800, 1400));
    assert_eq!(style.scale, 2.0);

    let model = ActualsVsGoals::default().plot_model(&shot_with_gap(), "big");
    let frame = build_chart_frame(&model, &style).expect("frame");
    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_polyline_count, frame.polylines.len());
    assert!(frame.texts.iter().any(|text| text.text == "Motor power"));
}

#[test]
fn zero_viewport_is_rejected() {
    let style = ChartStyle {
        viewport: Viewport::new(0, 700),
        ..ChartStyle::default()
    };
    let err = build_chart_frame(&PlotModel::empty("x"), &style).expect_err("invalid viewport");
    assert!(matches!(err, ShotError::InvalidViewport { .. }));
}

#[test]
fn invalid_trace_colour_falls_back_to_palette() {
    let mut model = single_model(&[SelectedField::primary(
        find_field("shot.pressure").expect("field"),
    )]);
    model.traces[0].style.color = "not-a-colour".to_owned();

    let frame = build_chart_frame(&model, &ChartStyle::default()).expect("frame");
    frame.validate().expect("valid frame");
    let color = frame.polylines[0].color;
    assert!((color.red - 0x1f as f64 / 255.0).abs() < 1e-9);
}

#[test]
fn style_file_overrides_selected_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("style.json");
    std::fs::write(&path, r#"{"show_grid": false, "title_font_px": 20.0}"#).expect("write");

    let style = ChartStyle::load(&path).expect("style");
    assert!(!style.show_grid);
    assert_eq!(style.title_font_px, 20.0);
    assert_eq!(style.viewport, Viewport::new(1400, 700));
}

#[test]
fn frame_json_export_writes_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.frame.json");
    let model = ActualsVsGoals::default().plot_model(&shot_with_gap(), "export");

    let frame = export_chart(&model, &ChartStyle::default(), OutputFormat::FrameJson, &path)
        .expect("export");
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(
        written["polylines"].as_array().map(Vec::len),
        Some(frame.polylines.len())
    );
}

#[cfg(not(feature = "cairo-backend"))]
#[test]
fn png_export_requires_cairo_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = export_chart(
        &PlotModel::empty("x"),
        &ChartStyle::default(),
        OutputFormat::Png,
        &dir.path().join("x.png"),
    )
    .expect_err("backend missing");
    assert!(matches!(err, ShotError::BackendUnavailable(_)));
}

fn every_field_compared() -> PlotModel {
    let mut viewer = Viewer::new();
    viewer.set_shot(ShotSlot::First, shot_with_gap());
    viewer.set_shot(ShotSlot::Second, shot_with_gap());
    viewer.session_mut().apply_preset(SelectionPreset::All);
    viewer.session_mut().compare_mode = true;
    viewer.plot_model()
}

#[test]
fn crowded_legend_shrinks_to_fit_short_figures() {
    let model = every_field_compared();
    assert_eq!(model.traces.len(), 56);

    for dpi in [100, 200] {
        let style = ChartStyle::default().with_figure_size(14.0, 3.5, dpi);
        let frame = build_chart_frame(&model, &style).expect("frame fits");
        frame.validate().expect("valid frame");

        let height = f64::from(style.viewport.height);
        let legend_texts: Vec<_> = frame
            .texts
            .iter()
            .filter(|text| model.traces.iter().any(|trace| trace.label == text.text))
            .collect();
        assert_eq!(legend_texts.len(), 56);
        let legend_top = legend_texts
            .iter()
            .map(|text| text.y)
            .fold(f64::INFINITY, f64::min);
        assert!(legend_top >= height * (1.0 - MAX_LEGEND_HEIGHT_FRACTION) - 12.0 * style.scale);
        assert!(
            legend_texts
                .iter()
                .all(|text| text.y + text.font_size_px <= height)
        );
    }
}

#[test]
fn oversized_tick_counts_are_clamped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("style.json");
    std::fs::write(&path, r#"{"x_tick_count": 1000000, "y_tick_count": 0}"#).expect("write");

    let style = ChartStyle::load(&path).expect("style");
    assert_eq!(style.x_tick_count, 50);
    assert_eq!(style.y_tick_count, 2);

    let unchecked = ChartStyle {
        x_tick_count: usize::MAX,
        ..ChartStyle::default()
    };
    let model = single_model(&[SelectedField::primary(
        find_field("shot.pressure").expect("field"),
    )]);
    let frame = build_chart_frame(&model, &unchecked).expect("frame");
    assert!(frame.lines.len() < 200);
}
