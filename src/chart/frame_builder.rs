use tracing::debug;

use crate::chart::style::{
    ChartStyle, MAX_LEGEND_COLUMNS, MAX_LEGEND_HEIGHT_FRACTION, TICK_COUNT_RANGE, parse_color,
    trace_color,
};
use crate::core::{
    AxisRange, AxisSide, DEFAULT_MARGIN_RATIO, LinearScale, PlotModel, Trace, align_zero,
};
use crate::error::{ShotError, ShotResult};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

const X_AXIS_TITLE: &str = "Time (s)";

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

#[derive(Debug, Clone, Copy)]
struct LegendLayout {
    columns: usize,
    rows: usize,
    top: f64,
    row_height: f64,
    font_px: f64,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    plot_background: Color,
    axis: Color,
    grid: Color,
    text: Color,
}

impl Palette {
    fn from_style(style: &ChartStyle) -> Self {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);
        let alpha = if style.grid_alpha.is_finite() {
            style.grid_alpha.clamp(0.0, 1.0)
        } else {
            0.3
        };
        Self {
            background: parse_color(&style.background_color, white),
            plot_background: parse_color(&style.plot_background_color, white),
            axis: parse_color(&style.axis_color, black),
            grid: parse_color(&style.grid_color, Color::rgb(0.5, 0.5, 0.5)).with_alpha(alpha),
            text: parse_color(&style.text_color, black),
        }
    }
}

/// Value ranges of the x axis and both y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRanges {
    pub time: AxisRange,
    pub primary: AxisRange,
    /// Present when at least one trace sits on the secondary axis; zero is
    /// then aligned across both y axes.
    pub secondary: Option<AxisRange>,
}

impl ChartRanges {
    #[must_use]
    pub fn for_model(model: &PlotModel) -> Self {
        let time = AxisRange::from_values(
            model
                .traces
                .iter()
                .flat_map(|trace| trace.time.iter().copied()),
            DEFAULT_MARGIN_RATIO,
        );
        let primary = axis_range(model, AxisSide::Primary);
        if !model.has_secondary_axis() {
            return Self {
                time,
                primary,
                secondary: None,
            };
        }

        let (primary, secondary) = align_zero(primary, axis_range(model, AxisSide::Secondary));
        Self {
            time,
            primary,
            secondary: Some(secondary),
        }
    }
}

fn axis_range(model: &PlotModel, axis: AxisSide) -> AxisRange {
    AxisRange::from_values(
        model
            .traces_on(axis)
            .flat_map(|trace| trace.values.iter().copied()),
        DEFAULT_MARGIN_RATIO,
    )
}

/// Lays out a complete chart scene for `model`.
///
/// A model without traces yields the background and the title only.
pub fn build_chart_frame(model: &PlotModel, style: &ChartStyle) -> ShotResult<RenderFrame> {
    let viewport = style.viewport;
    if !viewport.is_valid() {
        return Err(ShotError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let palette = Palette::from_style(style);
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    let mut frame = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        width,
        height,
        palette.background,
    ));
    push_text(
        &mut frame,
        TextPrimitive::new(
            model.title.clone(),
            width / 2.0,
            style.px(12.0),
            style.px(style.title_font_px),
            palette.text,
            TextHAlign::Center,
        )
        .bold(),
    );

    if model.traces.is_empty() {
        debug!(title = %model.title, "empty chart frame");
        return Ok(frame);
    }

    let legend = legend_layout(model, style, height);
    let area = plot_area(model, style, width, legend.top);
    if area.right - area.left < 1.0 || area.bottom - area.top < 1.0 {
        return Err(ShotError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let ranges = ChartRanges::for_model(model);
    let x_scale = LinearScale::new(ranges.time.min, ranges.time.max, area.left, area.right)?;
    let primary_scale =
        LinearScale::new(ranges.primary.min, ranges.primary.max, area.bottom, area.top)?;
    let secondary_scale = ranges
        .secondary
        .map(|range| LinearScale::new(range.min, range.max, area.bottom, area.top))
        .transpose()?;

    frame.rects.push(
        RectPrimitive::new(
            area.left,
            area.top,
            area.right - area.left,
            area.bottom - area.top,
            palette.plot_background,
        )
        .with_border(style.px(style.axis_line_width), palette.axis),
    );

    append_x_axis(&mut frame, style, &palette, area, x_scale);
    append_y_axis(
        &mut frame,
        style,
        &palette,
        area,
        primary_scale,
        AxisSide::Primary,
        &model.axis_titles.primary,
    );
    if let Some(scale) = secondary_scale {
        append_y_axis(
            &mut frame,
            style,
            &palette,
            area,
            scale,
            AxisSide::Secondary,
            &model.axis_titles.secondary,
        );
    }

    for (index, trace) in model.traces.iter().enumerate() {
        let y_scale = match (trace.axis, secondary_scale) {
            (AxisSide::Secondary, Some(scale)) => scale,
            _ => primary_scale,
        };
        append_trace(&mut frame, style, trace, index, x_scale, y_scale);
    }

    append_legend(&mut frame, model, style, &palette, legend, width);

    debug!(
        traces = model.traces.len(),
        polylines = frame.polylines.len(),
        "chart frame built"
    );
    Ok(frame)
}

fn legend_layout(model: &PlotModel, style: &ChartStyle, height: f64) -> LegendLayout {
    let entries = model.traces.len();
    let columns = entries.clamp(1, MAX_LEGEND_COLUMNS);
    let rows = entries.div_ceil(columns);
    let padding = style.px(8.0);
    let budget = (height * MAX_LEGEND_HEIGHT_FRACTION - padding).max(1.0);
    let row_height = style.px(style.legend_row_height).min(budget / rows as f64);
    LegendLayout {
        columns,
        rows,
        top: height - style.px(style.margin_bottom) - rows as f64 * row_height - padding,
        row_height,
        font_px: style.px(style.legend_font_px).min(row_height * 0.8),
    }
}

fn plot_area(model: &PlotModel, style: &ChartStyle, width: f64, legend_top: f64) -> PlotArea {
    let right_margin = if model.has_secondary_axis() {
        style.margin_right
    } else {
        style.margin_right / 2.0
    };
    let axis_band = style.px(style.tick_length)
        + style.px(style.tick_font_px)
        + style.px(style.axis_title_font_px)
        + style.px(16.0);
    PlotArea {
        left: style.px(style.margin_left),
        top: style.px(style.margin_top),
        right: width - style.px(right_margin),
        bottom: legend_top - axis_band,
    }
}

fn append_x_axis(
    frame: &mut RenderFrame,
    style: &ChartStyle,
    palette: &Palette,
    area: PlotArea,
    scale: LinearScale,
) {
    let ticks = scale.nice_ticks(clamp_tick_count(style.x_tick_count));
    let step = tick_step(&ticks);
    let tick_length = style.px(style.tick_length);
    let stroke = style.px(style.axis_line_width);

    for value in ticks {
        let Some(x) = scale.domain_to_pixel(value) else {
            continue;
        };
        if style.show_grid {
            frame.lines.push(
                LinePrimitive::new(
                    x,
                    area.top,
                    x,
                    area.bottom,
                    style.px(style.grid_line_width),
                    palette.grid,
                )
                .with_stroke_style(LineStrokeStyle::Dashed),
            );
        }
        frame.lines.push(LinePrimitive::new(
            x,
            area.bottom,
            x,
            area.bottom + tick_length,
            stroke,
            palette.axis,
        ));
        push_text(
            frame,
            TextPrimitive::new(
                format_tick(value, step),
                x,
                area.bottom + tick_length + style.px(2.0),
                style.px(style.tick_font_px),
                palette.text,
                TextHAlign::Center,
            ),
        );
    }

    push_text(
        frame,
        TextPrimitive::new(
            X_AXIS_TITLE,
            (area.left + area.right) / 2.0,
            area.bottom + tick_length + style.px(style.tick_font_px) + style.px(8.0),
            style.px(style.axis_title_font_px),
            palette.text,
            TextHAlign::Center,
        ),
    );
}

fn append_y_axis(
    frame: &mut RenderFrame,
    style: &ChartStyle,
    palette: &Palette,
    area: PlotArea,
    scale: LinearScale,
    side: AxisSide,
    title: &str,
) {
    let ticks = scale.nice_ticks(clamp_tick_count(style.y_tick_count));
    let step = tick_step(&ticks);
    let tick_length = style.px(style.tick_length);
    let stroke = style.px(style.axis_line_width);
    let font = style.px(style.tick_font_px);

    let (edge, outward, align) = match side {
        AxisSide::Primary => (area.left, -1.0, TextHAlign::Right),
        AxisSide::Secondary => (area.right, 1.0, TextHAlign::Left),
    };

    for value in ticks {
        let Some(y) = scale.domain_to_pixel(value) else {
            continue;
        };
        if style.show_grid && side == AxisSide::Primary {
            frame.lines.push(
                LinePrimitive::new(
                    area.left,
                    y,
                    area.right,
                    y,
                    style.px(style.grid_line_width),
                    palette.grid,
                )
                .with_stroke_style(LineStrokeStyle::Dashed),
            );
        }
        frame.lines.push(LinePrimitive::new(
            edge,
            y,
            edge + outward * tick_length,
            y,
            stroke,
            palette.axis,
        ));
        push_text(
            frame,
            TextPrimitive::new(
                format_tick(value, step),
                edge + outward * (tick_length + style.px(3.0)),
                y - font / 2.0,
                font,
                palette.text,
                align,
            ),
        );
    }

    let title_align = match side {
        AxisSide::Primary => TextHAlign::Left,
        AxisSide::Secondary => TextHAlign::Right,
    };
    let title_x = match side {
        AxisSide::Primary => area.left,
        AxisSide::Secondary => area.right,
    };
    push_text(
        frame,
        TextPrimitive::new(
            title,
            title_x,
            area.top - style.px(style.axis_title_font_px) - style.px(6.0),
            style.px(style.axis_title_font_px),
            palette.text,
            title_align,
        ),
    );
}

fn append_trace(
    frame: &mut RenderFrame,
    style: &ChartStyle,
    trace: &Trace,
    index: usize,
    x_scale: LinearScale,
    y_scale: LinearScale,
) {
    let color = trace_color(&trace.style.color, index);
    let width = style.px(trace.style.width.max(0.1));
    let stroke_style = LineStrokeStyle::from(trace.style.pattern);

    for run in split_runs(&trace.time, &trace.values, x_scale, y_scale) {
        frame
            .polylines
            .push(PolylinePrimitive::new(run, width, color, stroke_style));
    }
}

/// Maps samples to pixels, breaking the line wherever a sample is missing.
/// Runs shorter than two points are dropped.
fn split_runs(
    time: &[f64],
    values: &[f64],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (t, v) in time.iter().zip(values) {
        match (x_scale.domain_to_pixel(*t), y_scale.domain_to_pixel(*v)) {
            (Some(x), Some(y)) => current.push((x, y)),
            _ => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

fn append_legend(
    frame: &mut RenderFrame,
    model: &PlotModel,
    style: &ChartStyle,
    palette: &Palette,
    legend: LegendLayout,
    width: f64,
) {
    let margin = style.px(style.margin_left);
    let column_width = (width - 2.0 * margin).max(1.0) / legend.columns as f64;
    let row_height = legend.row_height;
    let swatch = style.px(style.legend_swatch_length);
    let font = legend.font_px;

    for (index, trace) in model.traces.iter().enumerate() {
        let row = index / legend.columns;
        let column = index % legend.columns;
        debug_assert!(row < legend.rows);
        let x = margin + column as f64 * column_width;
        let center_y = legend.top + style.px(4.0) + row as f64 * row_height + row_height / 2.0;

        frame.lines.push(
            LinePrimitive::new(
                x,
                center_y,
                x + swatch,
                center_y,
                style.px(trace.style.width.max(0.1)),
                trace_color(&trace.style.color, index),
            )
            .with_stroke_style(trace.style.pattern.into()),
        );
        push_text(
            frame,
            TextPrimitive::new(
                trace.label.clone(),
                x + swatch + style.px(6.0),
                center_y - font / 2.0,
                font,
                palette.text,
                TextHAlign::Left,
            ),
        );
    }
}

fn push_text(frame: &mut RenderFrame, text: TextPrimitive) {
    if !text.text.is_empty() {
        frame.texts.push(text);
    }
}

fn clamp_tick_count(count: usize) -> usize {
    count.clamp(*TICK_COUNT_RANGE.start(), *TICK_COUNT_RANGE.end())
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [first, second, ..] => (second - first).abs(),
        _ => 0.0,
    }
}

/// Formats a tick value with just enough decimals to tell ticks `step`
/// apart.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..=6)
        .find(|decimals| {
            let scaled = step * 10_f64.powi(*decimals);
            (scaled - scaled.round()).abs() <= 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(6) as usize;
    let snapped = if value.abs() < step.abs() * 1e-9 {
        0.0
    } else {
        value
    };
    format!("{snapped:.decimals$}")
}
