use serde::{Deserialize, Serialize};

use crate::core::field::deserialize_coerced;

/// Default trace palette (the common ten-colour categorical cycle).
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub const DEFAULT_LINE_WIDTH: f64 = 1.5;

/// Stroke pattern; serialized with the short codes used in session files.
///
/// The spelled-out names (`"solid"`, `"dashed"`, ...) are accepted on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinePattern {
    #[default]
    #[serde(rename = "-", alias = "solid")]
    Solid,
    #[serde(rename = "--", alias = "dashed")]
    Dashed,
    #[serde(rename = ":", alias = "dotted")]
    Dotted,
    #[serde(rename = "-.", alias = "dashdot")]
    DashDot,
}

impl LinePattern {
    /// Pattern of the second shot's trace when comparing two shots.
    #[must_use]
    pub fn comparison_counterpart(self) -> Self {
        match self {
            Self::Solid => Self::Dashed,
            _ => Self::Dotted,
        }
    }
}

/// Optional per-field overrides; missing entries fall back to defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDirective {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linestyle: Option<LinePattern>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_coerced"
    )]
    pub linewidth: Option<f64>,
}

impl StyleDirective {
    /// Fills the gaps with the palette colour at `palette_index`.
    #[must_use]
    pub fn resolve(&self, palette_index: usize) -> TraceStyle {
        TraceStyle {
            color: self
                .color
                .clone()
                .unwrap_or_else(|| palette_color(palette_index).to_owned()),
            pattern: self.linestyle.unwrap_or_default(),
            width: self.linewidth.unwrap_or(DEFAULT_LINE_WIDTH),
        }
    }
}

/// Fully resolved stroke of one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStyle {
    /// `#rrggbb`.
    pub color: String,
    pub pattern: LinePattern,
    pub width: f64,
}

impl TraceStyle {
    #[must_use]
    pub fn new(color: impl Into<String>, pattern: LinePattern, width: f64) -> Self {
        Self {
            color: color.into(),
            pattern,
            width,
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }
}

#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}
