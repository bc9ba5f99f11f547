use serde::Serialize;

use crate::core::plot_model::{PlotModel, ShotSlot};

/// Index of the sample nearest to `target`; ties keep the earliest.
#[must_use]
pub fn nearest_index(time: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, t) in time.iter().enumerate() {
        let distance = (t - target).abs();
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// `"9.00 bar"`, `"9.00"` for unitless fields, `"N/A"` for gaps.
#[must_use]
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) if !value.is_nan() => {
            if unit.is_empty() {
                format!("{value:.2}")
            } else {
                format!("{value:.2} {unit}")
            }
        }
        _ => "N/A".to_owned(),
    }
}

/// Value of one trace under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadoutValue {
    pub slot: ShotSlot,
    pub shot_name: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadoutRow {
    pub field_key: String,
    pub name: String,
    pub unit: String,
    pub color: String,
    pub values: Vec<ReadoutValue>,
}

/// Hover readout at one elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub time: f64,
    pub rows: Vec<ReadoutRow>,
}

impl Readout {
    /// Plain-text rendering, one line per field after a time header.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Time: {:.2}s", self.time)];
        for row in &self.rows {
            let rendered = match row.values.as_slice() {
                [single] => format_value(single.value, &row.unit),
                many => many
                    .iter()
                    .map(|entry| {
                        format!(
                            "{} ({})",
                            format_value(entry.value, &row.unit),
                            entry.shot_name
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(" | "),
            };
            lines.push(format!("{}: {rendered}", row.name));
        }
        lines
    }
}

impl PlotModel {
    /// Values of every plotted field at the samples nearest to `time`.
    ///
    /// Each shot is looked up on its own time base.
    #[must_use]
    pub fn readout(&self, time: f64) -> Readout {
        let mut rows: Vec<ReadoutRow> = Vec::new();
        for trace in &self.traces {
            let value = nearest_index(&trace.time, time)
                .and_then(|index| trace.values.get(index).copied());
            let entry = ReadoutValue {
                slot: trace.slot,
                shot_name: self
                    .shot_names
                    .get(trace.slot.index())
                    .cloned()
                    .unwrap_or_default(),
                value,
            };

            match rows.iter_mut().find(|row| row.field_key == trace.field_key) {
                Some(row) => row.values.push(entry),
                None => rows.push(ReadoutRow {
                    field_key: trace.field_key.clone(),
                    name: trace.name.clone(),
                    unit: trace.unit.clone(),
                    color: trace.style.color.clone(),
                    values: vec![entry],
                }),
            }
        }

        Readout { time, rows }
    }
}
