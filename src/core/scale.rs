use crate::error::{ShotError, ShotResult};

/// Linear mapping from a data domain onto a pixel span.
///
/// `pixel_start` maps to `domain_start`; pass a start below the end to get
/// a downward-growing (screen y) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ShotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ShotError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ShotError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    /// Maps a finite value; `None` for NaN/infinite input.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Some(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    /// Round-valued ticks inside the domain, about `target_count` of them,
    /// spaced by 1, 2, 2.5 or 5 times a power of ten.
    #[must_use]
    pub fn nice_ticks(self, target_count: usize) -> Vec<f64> {
        let min = self.domain_start.min(self.domain_end);
        let max = self.domain_start.max(self.domain_end);
        let step = nice_step((max - min) / target_count.max(2).saturating_sub(1) as f64);
        if step <= 0.0 {
            return vec![min];
        }

        let first = (min / step - 1e-9).ceil() as i64;
        let last = (max / step + 1e-9).floor() as i64;
        (first..=last)
            .map(|index| {
                let value = index as f64 * step;
                if value == 0.0 { 0.0 } else { value }
            })
            .collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let multiplier = [1.0, 2.0, 2.5, 5.0]
        .into_iter()
        .find(|candidate| normalized <= *candidate * (1.0 + 1e-9))
        .unwrap_or(10.0);
    multiplier * magnitude
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn nice_ticks_land_on_round_values() {
        let scale = LinearScale::new(-0.45, 9.45, 0.0, 100.0).expect("valid scale");
        assert_eq!(scale.nice_ticks(6), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn nice_ticks_include_negative_side() {
        let scale = LinearScale::new(-5.0, 10.0, 0.0, 100.0).expect("valid scale");
        assert_eq!(scale.nice_ticks(7), vec![-5.0, -2.5, 0.0, 2.5, 5.0, 7.5, 10.0]);
    }
}
