use serde::{Deserialize, Serialize};

use crate::core::field::deserialize_coerced;

/// Number of leading samples with `elapsed <= bound`.
///
/// Equals the index of the first sample strictly past the bound, or the full
/// length. Elapsed time is expected to be non-decreasing.
#[must_use]
pub fn trim_index(elapsed_seconds: &[f64], duration_bound: f64) -> usize {
    elapsed_seconds
        .iter()
        .position(|elapsed| *elapsed > duration_bound)
        .unwrap_or(elapsed_seconds.len())
}

/// Per-shot presentation settings stored in sessions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotSettings {
    /// Duration bound in seconds; `None` keeps the whole shot.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_coerced"
    )]
    pub trim_duration: Option<f64>,
}

impl ShotSettings {
    #[must_use]
    pub fn trimmed_to(trim_duration: f64) -> Self {
        Self {
            trim_duration: Some(trim_duration),
        }
    }

    /// The bound to apply to a shot whose full span is `full_duration`.
    #[must_use]
    pub fn resolve_bound(self, full_duration: f64) -> f64 {
        self.trim_duration.unwrap_or(full_duration)
    }
}
