use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Viewport, palette_color};
use crate::error::{ShotError, ShotResult};
use crate::render::Color;

/// Pixel density the font sizes and margins below are expressed at.
pub const BASE_DPI: u32 = 100;

/// Upper bound on legend columns.
pub const MAX_LEGEND_COLUMNS: usize = 4;

/// Share of the frame height the legend band may take; rows shrink to fit.
pub const MAX_LEGEND_HEIGHT_FRACTION: f64 = 0.35;

/// Accepted range for `x_tick_count` / `y_tick_count`.
pub const TICK_COUNT_RANGE: RangeInclusive<usize> = 2..=50;

/// Presentation contract for one chart frame.
///
/// Lengths are in pixels at [`BASE_DPI`] and get multiplied by `scale`
/// when the frame is built. Colours are `#rrggbb` strings so the struct
/// can be loaded from a JSON style file; any field may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub viewport: Viewport,
    pub scale: f64,
    pub show_grid: bool,
    pub grid_alpha: f64,
    pub background_color: String,
    pub plot_background_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub title_font_px: f64,
    pub axis_title_font_px: f64,
    pub tick_font_px: f64,
    pub legend_font_px: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub axis_line_width: f64,
    pub grid_line_width: f64,
    pub tick_length: f64,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub legend_row_height: f64,
    pub legend_swatch_length: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1400, 700),
            scale: 1.0,
            show_grid: true,
            grid_alpha: 0.3,
            background_color: "#ffffff".to_owned(),
            plot_background_color: "#ffffff".to_owned(),
            axis_color: "#000000".to_owned(),
            grid_color: "#808080".to_owned(),
            text_color: "#000000".to_owned(),
            title_font_px: 16.0,
            axis_title_font_px: 13.0,
            tick_font_px: 11.0,
            legend_font_px: 11.0,
            margin_left: 80.0,
            margin_right: 80.0,
            margin_top: 48.0,
            margin_bottom: 12.0,
            axis_line_width: 1.0,
            grid_line_width: 0.8,
            tick_length: 4.0,
            x_tick_count: 9,
            y_tick_count: 7,
            legend_row_height: 20.0,
            legend_swatch_length: 28.0,
        }
    }
}

impl ChartStyle {
    pub fn load(path: &Path) -> ShotResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| ShotError::io(path, err))?;
        let style: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "chart style loaded");
        Ok(style.with_clamped_tick_counts())
    }

    /// Pulls both tick counts into [`TICK_COUNT_RANGE`].
    #[must_use]
    pub fn with_clamped_tick_counts(mut self) -> Self {
        let (min, max) = (*TICK_COUNT_RANGE.start(), *TICK_COUNT_RANGE.end());
        for (axis, count) in [("x", &mut self.x_tick_count), ("y", &mut self.y_tick_count)] {
            let clamped = (*count).clamp(min, max);
            if clamped != *count {
                warn!(axis, requested = *count, used = clamped, "tick count out of range");
                *count = clamped;
            }
        }
        self
    }

    /// Sizes the output like a figure of `width_in` x `height_in` inches at
    /// `dpi`, scaling fonts and strokes with it.
    #[must_use]
    pub fn with_figure_size(mut self, width_in: f64, height_in: f64, dpi: u32) -> Self {
        self.viewport = Viewport::from_inches(width_in, height_in, dpi);
        self.scale = f64::from(dpi) / f64::from(BASE_DPI);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub(crate) fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    pub(crate) fn px(&self, length: f64) -> f64 {
        length * self.effective_scale()
    }
}

/// Parses a style colour, falling back to `fallback` with a warning.
pub(crate) fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_hex(value).unwrap_or_else(|| {
        warn!(color = value, "unparseable colour; using fallback");
        fallback
    })
}

/// Colour of a trace; unparseable values fall back to the palette slot.
pub(crate) fn trace_color(value: &str, palette_index: usize) -> Color {
    let fallback =
        Color::from_hex(palette_color(palette_index)).unwrap_or(Color::rgb(0.0, 0.0, 0.0));
    parse_color(value, fallback)
}
