//! Chart layout: turns a [`PlotModel`](crate::core::PlotModel) into a
//! backend-agnostic [`RenderFrame`](crate::render::RenderFrame).

mod export;
mod frame_builder;
mod style;

pub use export::{OutputFormat, export_chart};
pub use frame_builder::{ChartRanges, build_chart_frame, format_tick};
pub use style::{
    BASE_DPI, ChartStyle, MAX_LEGEND_COLUMNS, MAX_LEGEND_HEIGHT_FRACTION, TICK_COUNT_RANGE,
};
