use serde_json::Value;

use crate::core::field::Record;
use crate::core::time::normalize_elapsed;

/// One sample per record for `path`, NaN where the record has no value.
#[must_use]
pub fn build_series<S: AsRef<str>>(records: &[Record], path: &[S]) -> Vec<f64> {
    records.iter().map(|record| record.get(path)).collect()
}

/// Raw `time` values; a record without a numeric time counts as `0.0`.
#[must_use]
pub fn raw_times(records: &[Record]) -> Vec<f64> {
    records
        .iter()
        .map(|record| record.time().unwrap_or(0.0))
        .collect()
}

/// Actual readings and their goals, extracted in one pass.
///
/// Goals are taken from `shot.setpoints` wherever a record carries them;
/// several goals may coexist and `active` never hides one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActualGoalSeries {
    pub time_s: Vec<f64>,
    pub pressure: Vec<f64>,
    pub flow: Vec<f64>,
    pub motor_speed: Vec<f64>,
    pub motor_power: Vec<f64>,
    pub goal_pressure: Vec<f64>,
    pub goal_flow: Vec<f64>,
    pub goal_power: Vec<f64>,
    pub active: Vec<Option<Value>>,
}

impl ActualGoalSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

#[must_use]
pub fn build_actual_goal_series(records: &[Record]) -> ActualGoalSeries {
    let mut series = ActualGoalSeries {
        time_s: normalize_elapsed(&raw_times(records)),
        ..ActualGoalSeries::default()
    };

    for record in records {
        series.pressure.push(record.get(&["shot", "pressure"]));
        series.flow.push(record.get(&["shot", "flow"]));
        series.motor_speed.push(record.get(&["sensors", "motor_speed"]));
        series.motor_power.push(record.get(&["sensors", "motor_power"]));

        let setpoints = record.setpoints();
        series.goal_pressure.push(setpoints.pressure.as_f64());
        series.goal_flow.push(setpoints.flow.as_f64());
        series.goal_power.push(setpoints.power.as_f64());
        series.active.push(setpoints.active);
    }

    series
}
