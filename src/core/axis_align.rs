use serde::{Deserialize, Serialize};

/// Default relative margin added around autoscaled data.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.05;

/// Vertical extent of one value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    fn including_zero(self) -> Self {
        Self::new(self.min.min(0.0), self.max.max(0.0))
    }

    /// Autoscaled range over the finite values, padded by `margin_ratio` of
    /// the span on both sides.
    ///
    /// No finite values gives `(0, 1)`. Flat data is padded by 5% of its
    /// magnitude, or by 0.5 around zero.
    #[must_use]
    pub fn from_values<I>(values: I, margin_ratio: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }

        if !min.is_finite() || !max.is_finite() {
            return Self::new(0.0, 1.0);
        }

        let span = max - min;
        if span <= 0.0 {
            let pad = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
            return Self::new(min - pad, max + pad);
        }

        let margin = if margin_ratio.is_finite() && margin_ratio > 0.0 {
            span * margin_ratio
        } else {
            0.0
        };
        Self::new(min - margin, max + margin)
    }
}

/// Adjusts two ranges so zero sits at the same fractional height on both.
///
/// Only negative sides are ever extended, so nothing inside the inputs gets
/// clipped. Degenerate pairs (both axes without positive extent, or both
/// without negative extent) come back unchanged, as does a pair where only
/// one axis lacks positive extent: aligning that would need an unbounded
/// negative side.
#[must_use]
pub fn align_zero(primary: AxisRange, secondary: AxisRange) -> (AxisRange, AxisRange) {
    let widened_primary = primary.including_zero();
    let widened_secondary = secondary.including_zero();

    if widened_primary.max == 0.0 && widened_secondary.max == 0.0 {
        return (primary, secondary);
    }
    if widened_primary.min == 0.0 && widened_secondary.min == 0.0 {
        return (primary, secondary);
    }

    let target_ratio = negative_ratio(widened_primary).max(negative_ratio(widened_secondary));
    if !target_ratio.is_finite() {
        tracing::debug!(?primary, ?secondary, "zero alignment skipped: unbounded ratio");
        return (primary, secondary);
    }

    // A finite target implies both axes have positive extent.
    (
        stretch_negative(widened_primary, target_ratio),
        stretch_negative(widened_secondary, target_ratio),
    )
}

/// Lowers `min` to `-ratio * max`; rounding never lifts it.
fn stretch_negative(range: AxisRange, ratio: f64) -> AxisRange {
    AxisRange::new((-ratio * range.max).min(range.min), range.max)
}

fn negative_ratio(range: AxisRange) -> f64 {
    if range.max > 0.0 {
        -range.min / range.max
    } else {
        f64::INFINITY
    }
}
