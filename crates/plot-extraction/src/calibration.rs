//! Pixel to physical-unit calibration

use serde::{Deserialize, Serialize};

/// Closed value range of one plot axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Linear mapping from image pixels to plot axes.
///
/// Pixel rows grow downwards while plot values grow upwards, so the y axis
/// is inverted: row 0 maps to `y.max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Calibration {
    /// PRPD plots: phase 0–360° against intensity 0–60 dB
    pub const PRPD: Calibration = Calibration {
        x: AxisRange::new(0.0, 360.0),
        y: AxisRange::new(0.0, 60.0),
    };

    /// Waveform plots: time -5–+6 µs against amplitude -10–+25 dB
    pub const WAVEFORM: Calibration = Calibration {
        x: AxisRange::new(-5.0, 6.0),
        y: AxisRange::new(-10.0, 25.0),
    };

    /// Map a pixel coordinate of a `width` x `height` image to (x, y) in axis units
    pub fn to_physical(&self, px: u32, py: u32, width: u32, height: u32) -> (f64, f64) {
        let x = (px as f64 / width as f64) * self.x.span() + self.x.min;
        let y = (1.0 - py as f64 / height as f64) * self.y.span() + self.y.min;
        (x, y)
    }
}
