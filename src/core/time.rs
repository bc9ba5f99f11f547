/// Median raw step at or above which `time` is read as milliseconds.
///
/// Typical cadences are 50..200 ms, so raw steps of that size mean the
/// stream was logged in milliseconds. This is a heuristic: irregular or
/// heavily downsampled streams can be misread and nothing corrects that.
pub const MILLISECOND_STEP_THRESHOLD: f64 = 5.0;

/// Returns the multiplier converting raw time deltas to seconds.
#[must_use]
pub fn infer_time_scale(raw_times: &[f64]) -> f64 {
    if raw_times.len() < 2 {
        return 1.0;
    }

    let mut deltas: Vec<f64> = raw_times
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .filter(|delta| *delta > 0.0)
        .collect();
    if deltas.is_empty() {
        return 1.0;
    }

    deltas.sort_by(f64::total_cmp);
    // Lower-middle element on even counts, no averaging.
    let median = deltas[deltas.len() / 2];
    tracing::trace!(median, samples = raw_times.len(), "inferred raw time step");

    if median >= MILLISECOND_STEP_THRESHOLD {
        0.001
    } else {
        1.0
    }
}

/// Zero-based elapsed seconds for a raw time stream.
#[must_use]
pub fn normalize_elapsed(raw_times: &[f64]) -> Vec<f64> {
    let Some(&first) = raw_times.first() else {
        return Vec::new();
    };
    let scale = infer_time_scale(raw_times);

    raw_times
        .iter()
        .enumerate()
        .map(|(index, raw)| if index == 0 { 0.0 } else { (raw - first) * scale })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_uses_lower_middle_element() {
        // Sorted deltas [1, 10]: index 1 is 10, so milliseconds.
        assert_eq!(infer_time_scale(&[0.0, 1.0, 11.0]), 0.001);
        // Sorted deltas [1, 1, 10, 10] -> index 2 is 10.
        assert_eq!(infer_time_scale(&[0.0, 1.0, 2.0, 12.0, 22.0]), 0.001);
        // Sorted deltas [1, 1, 1, 10] -> index 2 is 1.
        assert_eq!(infer_time_scale(&[0.0, 1.0, 2.0, 3.0, 13.0]), 1.0);
    }
}
