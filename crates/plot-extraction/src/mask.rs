//! Foreground masks isolating plot ink from background

use image::{GrayImage, Luma, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::open;

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Gray levels at or below this value count as waveform ink
pub const TRACE_BRIGHTNESS_CUTOFF: u8 = 200;

/// Inclusive HSV box on the 8-bit hue scale (H in 0..=180, S and V in 0..=255)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvBand {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvBand {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Whether an HSV triple falls inside the band
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

/// Trace colours used by PRPD renderings: blue, red (both ends of the hue
/// circle), green and brown
pub const PRPD_INK_BANDS: [HsvBand; 5] = [
    HsvBand::new([100, 80, 80], [130, 255, 255]),
    HsvBand::new([0, 80, 80], [10, 255, 255]),
    HsvBand::new([170, 80, 80], [180, 255, 255]),
    HsvBand::new([40, 50, 50], [80, 255, 255]),
    HsvBand::new([10, 100, 20], [20, 255, 200]),
];

/// Convert an RGB pixel to HSV with hue halved to fit a byte
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { (255.0 * diff / v).round() } else { 0.0 };

    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    [(h / 2.0).round() as u8, s as u8, v as u8]
}

/// Binary mask of PRPD ink with isolated specks suppressed.
///
/// Pixels matching any band become foreground; a 3x3 median pass followed by
/// a 3x3 opening removes single-pixel noise while keeping trace clusters.
pub fn prpd_ink_mask(rgb: &RgbImage, bands: &[HsvBand]) -> GrayImage {
    let raw = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let hsv = rgb_to_hsv(rgb.get_pixel(x, y).0);
        if bands.iter().any(|band| band.contains(hsv)) {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    });

    let smoothed = median_filter(&raw, 1, 1);
    open(&smoothed, Norm::LInf, 1)
}

/// Luma using the 0.299 / 0.587 / 0.114 weighting
pub fn to_grayscale(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114;
        Luma([luma.round().min(255.0) as u8])
    })
}

/// Binary mask of dark waveform ink on a light background
pub fn waveform_trace_mask(rgb: &RgbImage, cutoff: u8) -> GrayImage {
    threshold(&to_grayscale(rgb), cutoff, ThresholdType::BinaryInverted)
}

/// Coordinates of all foreground pixels, row by row
pub fn foreground_pixels(mask: &GrayImage) -> Vec<(u32, u32)> {
    let mut pixels = Vec::new();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get_pixel(x, y)[0] != BACKGROUND {
                pixels.push((x, y));
            }
        }
    }
    pixels
}
