//! PD Signal Extraction & Severity Classification Engine
//!
//! Entry points tying the pipeline together:
//! - plot image → calibrated points → features → "PD detected" indication
//! - per-sensor readings → graded verdict
//! - per-method verdicts → one fused verdict per measurement point
//!
//! The free functions run on a shared engine with default configuration;
//! use [`PdEngine`] directly for a loaded [`EngineConfig`].

mod config;
mod engine;
mod result;

pub use config::EngineConfig;
pub use engine::{PdEngine, ReadingPoint};
pub use result::{ExtractionResult, PdIndication};

pub use feature_engine::{
    ClusterParams, DetectionThresholds, FeatureSet, FeatureValue, SensorType,
};
pub use plot_extraction::{PrpdPoint, SignalKind, WaveformPoint};
pub use sensor_classifier::{
    ClassificationVerdict, Classify, Flag, HfctReading, MethodVerdict, SensingMethod,
    SensorReading, SeverityLevel, TevReading, UltrasonicProbe, UltrasonicReading,
};
pub use severity_fusion::{FusedVerdict, MeasurementPoint, MethodWeights, PointAssessment};

use std::sync::OnceLock;
use thiserror::Error;

/// Engine error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Image load failed: {0}")]
    ImageLoad(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<plot_extraction::ExtractionError> for EngineError {
    fn from(err: plot_extraction::ExtractionError) -> Self {
        match err {
            plot_extraction::ExtractionError::ImageLoad(msg) => EngineError::ImageLoad(msg),
        }
    }
}

impl From<feature_engine::FeatureError> for EngineError {
    fn from(err: feature_engine::FeatureError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}

impl From<sensor_classifier::InputError> for EngineError {
    fn from(err: sensor_classifier::InputError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}

impl From<severity_fusion::FusionError> for EngineError {
    fn from(err: severity_fusion::FusionError) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

fn default_engine() -> &'static PdEngine {
    static ENGINE: OnceLock<PdEngine> = OnceLock::new();
    ENGINE.get_or_init(PdEngine::default)
}

/// Extract PRPD points and features from an encoded plot image
pub fn extract_prpd(image_bytes: &[u8], sensor_type: &str) -> Result<ExtractionResult<PrpdPoint>, EngineError> {
    default_engine().extract_prpd(image_bytes, sensor_type)
}

/// Extract waveform points and features from an encoded plot image
pub fn extract_waveform(
    image_bytes: &[u8],
    sensor_type: &str,
) -> Result<ExtractionResult<WaveformPoint>, EngineError> {
    default_engine().extract_waveform(image_bytes, sensor_type)
}

pub fn classify_tev(
    level_db: Option<f64>,
    pulses_per_cycle: Option<u32>,
    interpretation: Option<&str>,
) -> ClassificationVerdict {
    default_engine().classify_tev(level_db, pulses_per_cycle, interpretation)
}

pub fn classify_hfct(
    charge_pc: Option<f64>,
    pulses_per_cycle: Option<u32>,
    unipolar: Flag,
    two_wave_cluster: Flag,
) -> ClassificationVerdict {
    default_engine().classify_hfct(charge_pc, pulses_per_cycle, unipolar, two_wave_cluster)
}

pub fn classify_ultrasonic(
    level_dbuv: Option<f64>,
    confidence_pct: Option<f64>,
    two_wave_cluster: Flag,
    crackling: Flag,
    interpretation: Option<&str>,
    probe: UltrasonicProbe,
) -> ClassificationVerdict {
    default_engine().classify_ultrasonic(
        level_dbuv,
        confidence_pct,
        two_wave_cluster,
        crackling,
        interpretation,
        probe,
    )
}

/// Fuse verdicts from one measurement point with the default method weights
pub fn fuse(verdicts: &[MethodVerdict]) -> FusedVerdict {
    default_engine().fuse(verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_share_default_engine() {
        let verdict = classify_hfct(Some(600.0), Some(10), Flag::NotSupplied, Flag::Present);
        assert_eq!(verdict.severity, Some(SeverityLevel::High));

        let tev = classify_tev(Some(25.0), Some(3), None);
        let fused = fuse(&[
            MethodVerdict::new(SensingMethod::Hfct, verdict),
            MethodVerdict::new(SensingMethod::Tev, tev),
        ]);
        assert_eq!(fused.severity, Some(SeverityLevel::High));
    }

    #[test]
    fn test_blank_sensor_is_invalid_input() {
        let err = extract_prpd(b"irrelevant", " ").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_garbage_image_is_image_load() {
        let err = extract_waveform(b"not a png", "TEV").unwrap_err();
        assert!(matches!(err, EngineError::ImageLoad(_)));
    }

    #[test]
    fn test_flag_error_maps_to_invalid_input() {
        let err: EngineError = "sometimes".parse::<Flag>().unwrap_err().into();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
