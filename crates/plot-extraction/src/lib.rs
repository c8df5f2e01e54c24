//! Plot Image Extraction
//!
//! Recovers calibrated data points from raster renderings of PD instrument plots:
//! - PRPD scatter plots (phase vs. intensity), isolated by ink hue
//! - Time-domain waveform traces (time vs. amplitude), isolated by darkness

mod calibration;
mod error;
mod extractor;
mod mask;
mod point;

pub use calibration::{AxisRange, Calibration};
pub use error::ExtractionError;
pub use extractor::{Extraction, PlotExtractor};
pub use mask::{HsvBand, PRPD_INK_BANDS, TRACE_BRIGHTNESS_CUTOFF};
pub use point::{PrpdPoint, SignalKind, WaveformPoint};
