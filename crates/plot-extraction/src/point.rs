//! Physical-unit points recovered from plot pixels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of plot being extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Phase-resolved partial discharge scatter plot
    Prpd,
    /// Time-domain pulse waveform
    Waveform,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Prpd => write!(f, "PRPD"),
            SignalKind::Waveform => write!(f, "waveform"),
        }
    }
}

/// A single PRPD sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrpdPoint {
    /// Position in the AC cycle, degrees in [0, 360)
    pub phase_deg: f64,
    /// Discharge intensity (dB)
    pub intensity_db: f64,
}

/// A single waveform sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformPoint {
    /// Time relative to trigger (µs)
    pub time_us: f64,
    /// Pulse amplitude (dB)
    pub amplitude_db: f64,
}
