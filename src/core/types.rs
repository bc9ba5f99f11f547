use serde::{Deserialize, Serialize};

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Pixel size of a figure given in inches at `dpi`.
    #[must_use]
    pub fn from_inches(width_in: f64, height_in: f64, dpi: u32) -> Self {
        let to_px = |inches: f64| {
            (inches * f64::from(dpi))
                .round()
                .clamp(0.0, f64::from(u32::MAX)) as u32
        };
        Self::new(to_px(width_in), to_px(height_in))
    }
}
