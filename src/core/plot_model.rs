use indexmap::IndexMap;
use serde::Serialize;

use crate::core::registry::{FieldDescriptor, find_field};
use crate::core::series::ActualGoalSeries;
use crate::core::shot::Shot;
use crate::core::style::{LinePattern, StyleDirective, TraceStyle, palette_color};
use crate::core::trim::ShotSettings;

pub const NO_DATA_TITLE: &str = "No data loaded";
pub const NO_SELECTION_TITLE: &str = "No data series selected";

/// Value axis a trace is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

/// Which loaded shot a trace came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotSlot {
    First,
    Second,
}

impl ShotSlot {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// A registry field chosen for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedField {
    pub descriptor: &'static FieldDescriptor,
    pub axis: AxisSide,
}

impl SelectedField {
    #[must_use]
    pub fn primary(descriptor: &'static FieldDescriptor) -> Self {
        Self {
            descriptor,
            axis: AxisSide::Primary,
        }
    }

    #[must_use]
    pub fn secondary(descriptor: &'static FieldDescriptor) -> Self {
        Self {
            descriptor,
            axis: AxisSide::Secondary,
        }
    }
}

/// One drawable line: a time base and a value sequence of equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub field_key: String,
    pub name: String,
    pub unit: String,
    pub label: String,
    pub slot: ShotSlot,
    pub axis: AxisSide,
    pub style: TraceStyle,
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlotMode {
    Empty,
    Single,
    Comparison,
}

/// Y axis captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitles {
    pub primary: String,
    pub secondary: String,
}

impl Default for AxisTitles {
    fn default() -> Self {
        Self {
            primary: "Primary Axis".to_owned(),
            secondary: "Secondary Axis".to_owned(),
        }
    }
}

/// Everything a renderer or a hover readout needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotModel {
    pub title: String,
    pub mode: PlotMode,
    /// Short names of the contributing shots, indexed by `ShotSlot::index`.
    pub shot_names: Vec<String>,
    pub axis_titles: AxisTitles,
    pub traces: Vec<Trace>,
}

impl PlotModel {
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mode: PlotMode::Empty,
            shot_names: Vec::new(),
            axis_titles: AxisTitles::default(),
            traces: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_secondary_axis(&self) -> bool {
        self.traces
            .iter()
            .any(|trace| trace.axis == AxisSide::Secondary)
    }

    pub fn traces_on(&self, axis: AxisSide) -> impl Iterator<Item = &Trace> {
        self.traces.iter().filter(move |trace| trace.axis == axis)
    }

    /// Traces for one field, in slot order.
    pub fn traces_for_field<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Trace> {
        self.traces.iter().filter(move |trace| trace.field_key == key)
    }
}

fn secondary_suffix(axis: AxisSide) -> &'static str {
    match axis {
        AxisSide::Primary => "",
        AxisSide::Secondary => " [2nd]",
    }
}

fn resolve_style(
    styles: &IndexMap<String, StyleDirective>,
    key: &str,
    palette_index: usize,
) -> TraceStyle {
    match styles.get(key) {
        Some(directive) => directive.resolve(palette_index),
        None => StyleDirective::default().resolve(palette_index),
    }
}

/// Single-shot view of the selected fields, trimmed by `settings`.
#[must_use]
pub fn assemble_single(
    shot: &Shot,
    settings: ShotSettings,
    fields: &[SelectedField],
    styles: &IndexMap<String, StyleDirective>,
) -> PlotModel {
    if fields.is_empty() {
        return PlotModel::empty(NO_SELECTION_TITLE);
    }

    let cut = shot.trim_index(settings.resolve_bound(shot.duration()));
    let time = shot.elapsed_seconds()[..cut].to_vec();

    let traces = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let descriptor = field.descriptor;
            let key = descriptor.key();
            let style = resolve_style(styles, &key, index);
            let mut values = shot.series(descriptor.path);
            values.truncate(cut);
            Trace {
                label: format!(
                    "{}{}",
                    descriptor.label_with_unit(),
                    secondary_suffix(field.axis)
                ),
                field_key: key,
                name: descriptor.display_name.to_owned(),
                unit: descriptor.unit.to_owned(),
                slot: ShotSlot::First,
                axis: field.axis,
                style,
                time: time.clone(),
                values,
            }
        })
        .collect();

    PlotModel {
        title: shot.title(),
        mode: PlotMode::Single,
        shot_names: vec![shot.short_name()],
        axis_titles: AxisTitles::default(),
        traces,
    }
}

/// Two-shot overlay: each field gets one trace per shot, sharing a colour.
///
/// Each shot keeps its own elapsed-time base and its own trim bound; shot
/// two is told apart by its line pattern.
#[must_use]
pub fn assemble_comparison(
    first: (&Shot, ShotSettings),
    second: (&Shot, ShotSettings),
    fields: &[SelectedField],
    styles: &IndexMap<String, StyleDirective>,
) -> PlotModel {
    if fields.is_empty() {
        return PlotModel::empty(NO_SELECTION_TITLE);
    }

    let slots = [(ShotSlot::First, first), (ShotSlot::Second, second)].map(
        |(slot, (shot, settings))| {
            let cut = shot.trim_index(settings.resolve_bound(shot.duration()));
            (slot, shot, cut, shot.elapsed_seconds()[..cut].to_vec())
        },
    );

    let mut traces = Vec::with_capacity(fields.len() * 2);
    for (index, field) in fields.iter().enumerate() {
        let descriptor = field.descriptor;
        let key = descriptor.key();
        let first_style = resolve_style(styles, &key, index);
        let second_style = first_style
            .clone()
            .with_pattern(first_style.pattern.comparison_counterpart());

        for ((slot, shot, cut, time), style) in slots.iter().zip([first_style, second_style]) {
            let mut values = shot.series(descriptor.path);
            values.truncate(*cut);
            traces.push(Trace {
                field_key: key.clone(),
                name: descriptor.display_name.to_owned(),
                unit: descriptor.unit.to_owned(),
                label: format!(
                    "{} ({}){}",
                    descriptor.display_name,
                    shot.short_name(),
                    secondary_suffix(field.axis)
                ),
                slot: *slot,
                axis: field.axis,
                style,
                time: time.clone(),
                values,
            });
        }
    }

    let first_name = first.0.short_name();
    let second_name = second.0.short_name();
    PlotModel {
        title: format!("Comparison: {first_name} vs {second_name}"),
        mode: PlotMode::Comparison,
        shot_names: vec![first_name, second_name],
        axis_titles: AxisTitles::default(),
        traces,
    }
}

/// Series switches of the fixed actual-versus-goal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActualsVsGoals {
    pub pressure: bool,
    pub flow: bool,
    pub motor_speed: bool,
    pub pressure_goal: bool,
    pub flow_goal: bool,
    pub motor_power: bool,
    pub motor_power_goal: bool,
}

impl Default for ActualsVsGoals {
    fn default() -> Self {
        Self {
            pressure: true,
            flow: true,
            motor_speed: true,
            pressure_goal: true,
            flow_goal: true,
            motor_power: true,
            motor_power_goal: true,
        }
    }
}

impl ActualsVsGoals {
    /// Pressure, flow and motor speed with their goals on the primary axis;
    /// motor power and its goal on the secondary axis.
    #[must_use]
    pub fn plot_model(&self, shot: &Shot, title: impl Into<String>) -> PlotModel {
        let series = shot.actual_goal_series();
        let ActualGoalSeries {
            time_s,
            pressure,
            flow,
            motor_speed,
            motor_power,
            goal_pressure,
            goal_flow,
            goal_power,
            ..
        } = series;

        use AxisSide::{Primary, Secondary};
        use LinePattern::{Dashed, Dotted, Solid};
        let candidates = [
            (self.pressure, "shot.pressure", "Pressure (actual)", pressure, Solid, Primary),
            (self.flow, "shot.flow", "Flow (actual)", flow, Solid, Primary),
            (
                self.motor_speed,
                "sensors.motor_speed",
                "Motor speed (actual)",
                motor_speed,
                Solid,
                Primary,
            ),
            (
                self.pressure_goal,
                "shot.setpoints.pressure",
                "Pressure goal (setpoint)",
                goal_pressure,
                Dotted,
                Primary,
            ),
            (
                self.flow_goal,
                "shot.setpoints.flow",
                "Flow goal (setpoint)",
                goal_flow,
                Dotted,
                Primary,
            ),
            (
                self.motor_power,
                "sensors.motor_power",
                "Motor power (actual)",
                motor_power,
                Dashed,
                Secondary,
            ),
            (
                self.motor_power_goal,
                "shot.setpoints.power",
                "Motor power goal (setpoint)",
                goal_power,
                Dotted,
                Secondary,
            ),
        ];

        let traces = candidates
            .into_iter()
            .filter(|candidate| candidate.0)
            .enumerate()
            .map(|(index, (_, key, label, values, pattern, axis))| {
                let descriptor = find_field(key);
                Trace {
                    field_key: key.to_owned(),
                    name: descriptor.map_or(label, |d| d.display_name).to_owned(),
                    unit: descriptor.map_or("", |d| d.unit).to_owned(),
                    label: label.to_owned(),
                    slot: ShotSlot::First,
                    axis,
                    style: TraceStyle::new(palette_color(index), pattern, 2.0),
                    time: time_s.clone(),
                    values,
                }
            })
            .collect();

        PlotModel {
            title: title.into(),
            mode: PlotMode::Single,
            shot_names: vec![shot.short_name()],
            axis_titles: AxisTitles {
                primary: "Pressure / Flow / Motor speed".to_owned(),
                secondary: "Motor power".to_owned(),
            },
            traces,
        }
    }
}
