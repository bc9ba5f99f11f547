#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use indexmap::IndexMap;
use shot_chart::ShotError;
use shot_chart::chart::{ChartStyle, OutputFormat, build_chart_frame, export_chart};
use shot_chart::core::{
    ActualsVsGoals, SelectedField, Shot, ShotSettings, Viewport, assemble_single, find_field,
};
use shot_chart::render::{CairoContextRenderer, CairoRenderer, Renderer};

fn shot() -> Shot {
    Shot::from_json_str(
        r#"{"profile_name":"Cairo","data":[
            {"time":0,"shot":{"pressure":1.0},"sensors":{"motor_power":5}},
            {"time":100,"shot":{"pressure":3.0},"sensors":{"motor_power":15}},
            {"time":200,"shot":{"pressure":2.0},"sensors":{"motor_power":10}}
        ]}"#,
    )
    .expect("valid shot")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ShotError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_chart_frame() {
    let model = assemble_single(
        &shot(),
        ShotSettings::default(),
        &[SelectedField::primary(find_field("shot.pressure").expect("field"))],
        &IndexMap::new(),
    );
    let style = ChartStyle::default();
    let frame = build_chart_frame(&model, &style).expect("frame");

    let mut renderer = CairoRenderer::for_frame(&frame).expect("renderer");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.surface().width(), 1400);
    assert_eq!(renderer.surface().height(), 700);
    let stats = renderer.last_stats();

    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.texts_drawn, frame.texts.len());
    assert_eq!(stats.lines_drawn, frame.lines.len());
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let model = ActualsVsGoals::default().plot_model(&shot(), "external");
    let style = ChartStyle {
        viewport: Viewport::new(600, 320),
        ..ChartStyle::default()
    };
    let frame = build_chart_frame(&model, &style).expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert!(renderer.last_stats().polylines_drawn >= 2);
}

#[test]
fn png_export_writes_png_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("shot.png");
    let model = ActualsVsGoals::default().plot_model(&shot(), "png");

    export_chart(&model, &ChartStyle::default(), OutputFormat::Png, &path).expect("export");
    let bytes = std::fs::read(&path).expect("read png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
