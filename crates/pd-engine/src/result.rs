//! Extraction results

use feature_engine::{FeatureSet, SensorType};
use plot_extraction::SignalKind;
use serde::Serialize;
use std::fmt;

/// Whether the extracted plot indicates partial discharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PdIndication {
    #[serde(rename = "Ada")]
    Detected,
    #[serde(rename = "Tidak signifikan")]
    NotSignificant,
    /// No PRPD points survived extraction
    #[serde(rename = "Tidak ada titik")]
    NoPoints,
    /// No waveform trace survived extraction
    #[serde(rename = "Tidak ada jejak")]
    NoTrace,
}

impl PdIndication {
    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            PdIndication::Detected => "Ada",
            PdIndication::NotSignificant => "Tidak signifikan",
            PdIndication::NoPoints => "Tidak ada titik",
            PdIndication::NoTrace => "Tidak ada jejak",
        }
    }

    pub fn is_detected(self) -> bool {
        self == PdIndication::Detected
    }

    /// True when extraction found nothing to evaluate
    pub fn is_empty(self) -> bool {
        matches!(self, PdIndication::NoPoints | PdIndication::NoTrace)
    }
}

impl fmt::Display for PdIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points, features and indication from one plot image
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult<P> {
    pub kind: SignalKind,
    pub sensor: SensorType,
    pub points: Vec<P>,
    pub features: FeatureSet,
    pub indication: PdIndication,
    /// Source image width (pixels)
    pub width: u32,
    /// Source image height (pixels)
    pub height: u32,
}

impl<P> ExtractionResult<P> {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
