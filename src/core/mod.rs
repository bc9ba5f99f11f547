pub mod axis_align;
pub mod field;
pub mod plot_model;
pub mod readout;
pub mod registry;
pub mod scale;
pub mod series;
pub mod shot;
pub mod style;
pub mod time;
pub mod trim;
pub mod types;

pub use axis_align::{AxisRange, DEFAULT_MARGIN_RATIO, align_zero};
pub use field::{FieldValue, Record, Setpoints, get, lookup};
pub use plot_model::{
    ActualsVsGoals, AxisSide, AxisTitles, NO_DATA_TITLE, NO_SELECTION_TITLE, PlotMode, PlotModel,
    SelectedField, ShotSlot, Trace, assemble_comparison, assemble_single,
};
pub use readout::{Readout, ReadoutRow, ReadoutValue, format_value, nearest_index};
pub use registry::{
    DEFAULT_SELECTION, FIELD_REGISTRY, FieldDescriptor, SelectionPreset, fields_by_category,
    find_field,
};
pub use scale::LinearScale;
pub use series::{ActualGoalSeries, build_actual_goal_series, build_series, raw_times};
pub use shot::Shot;
pub use style::{LinePattern, StyleDirective, TraceStyle, palette_color};
pub use time::{MILLISECOND_STEP_THRESHOLD, infer_time_scale, normalize_elapsed};
pub use trim::{ShotSettings, trim_index};
pub use types::Viewport;
