//! Plot extractor: encoded image in, calibrated points out

use crate::calibration::Calibration;
use crate::error::ExtractionError;
use crate::mask::{
    foreground_pixels, prpd_ink_mask, waveform_trace_mask, HsvBand, PRPD_INK_BANDS,
    TRACE_BRIGHTNESS_CUTOFF,
};
use crate::point::{PrpdPoint, SignalKind, WaveformPoint};
use image::RgbImage;
use tracing::debug;

/// Points recovered from one image, with the source dimensions
#[derive(Debug, Clone)]
pub struct Extraction<P> {
    /// Calibrated points, in pixel scan order
    pub points: Vec<P>,
    /// Source image width (pixels)
    pub width: u32,
    /// Source image height (pixels)
    pub height: u32,
}

impl<P> Extraction<P> {
    fn empty(width: u32, height: u32) -> Self {
        Self {
            points: Vec::new(),
            width,
            height,
        }
    }

    /// True when no foreground pixel survived filtering
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Extracts PRPD and waveform points from plot images.
///
/// Holds only fixed calibration tables, so one instance can serve any
/// number of threads.
#[derive(Debug, Clone)]
pub struct PlotExtractor {
    prpd_calibration: Calibration,
    waveform_calibration: Calibration,
    ink_bands: Vec<HsvBand>,
    trace_cutoff: u8,
}

impl Default for PlotExtractor {
    fn default() -> Self {
        Self {
            prpd_calibration: Calibration::PRPD,
            waveform_calibration: Calibration::WAVEFORM,
            ink_bands: PRPD_INK_BANDS.to_vec(),
            trace_cutoff: TRACE_BRIGHTNESS_CUTOFF,
        }
    }
}

impl PlotExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract PRPD scatter points (phase, intensity)
    pub fn extract_prpd(&self, image_bytes: &[u8]) -> Result<Extraction<PrpdPoint>, ExtractionError> {
        let rgb = decode(image_bytes)?;
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Ok(Extraction::empty(width, height));
        }

        let mask = prpd_ink_mask(&rgb, &self.ink_bands);
        let pixels = foreground_pixels(&mask);
        debug!(
            "PRPD extraction: {}x{} image, {} ink pixels",
            width,
            height,
            pixels.len()
        );

        let points = pixels
            .into_iter()
            .map(|(px, py)| {
                let (phase_deg, intensity_db) =
                    self.prpd_calibration.to_physical(px, py, width, height);
                PrpdPoint {
                    phase_deg,
                    intensity_db,
                }
            })
            .collect();

        Ok(Extraction {
            points,
            width,
            height,
        })
    }

    /// Extract waveform trace points (time, amplitude)
    pub fn extract_waveform(
        &self,
        image_bytes: &[u8],
    ) -> Result<Extraction<WaveformPoint>, ExtractionError> {
        let rgb = decode(image_bytes)?;
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Ok(Extraction::empty(width, height));
        }

        let mask = waveform_trace_mask(&rgb, self.trace_cutoff);
        let pixels = foreground_pixels(&mask);
        debug!(
            "Waveform extraction: {}x{} image, {} trace pixels",
            width,
            height,
            pixels.len()
        );

        let points = pixels
            .into_iter()
            .map(|(px, py)| {
                let (time_us, amplitude_db) =
                    self.waveform_calibration.to_physical(px, py, width, height);
                WaveformPoint {
                    time_us,
                    amplitude_db,
                }
            })
            .collect();

        Ok(Extraction {
            points,
            width,
            height,
        })
    }

    /// Calibration applied for the given plot kind
    pub fn calibration(&self, kind: SignalKind) -> &Calibration {
        match kind {
            SignalKind::Prpd => &self.prpd_calibration,
            SignalKind::Waveform => &self.waveform_calibration,
        }
    }
}

fn decode(image_bytes: &[u8]) -> Result<RgbImage, ExtractionError> {
    let img = image::load_from_memory(image_bytes)?;
    Ok(img.to_rgb8())
}
