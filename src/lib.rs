//! shot-chart: normalize, align and chart espresso shot time-series logs.
//!
//! The crate is layered: `core` holds the pure data pipeline (field
//! coercion, time normalization, trimming, dual-axis alignment, plot model
//! assembly), `chart` lays a plot model out as a backend-agnostic
//! `RenderFrame`, `render` draws frames, and `viewer` owns the session state
//! that drives it all.

pub mod chart;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod viewer;

pub use chart::{ChartStyle, OutputFormat, build_chart_frame, export_chart};
pub use core::{PlotModel, Shot, ShotSettings};
pub use error::{ShotError, ShotResult};
pub use viewer::{SessionState, Viewer};
