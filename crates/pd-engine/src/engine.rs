//! Engine facade over extraction, features, classification and fusion

use crate::config::EngineConfig;
use crate::result::{ExtractionResult, PdIndication};
use crate::EngineError;
use feature_engine::{FeatureSet, PrpdFeatures, SensorType, WaveformFeatures};
use plot_extraction::{PlotExtractor, PrpdPoint, SignalKind, WaveformPoint};
use sensor_classifier::{
    ClassificationVerdict, Classify, Flag, HfctReading, MethodVerdict, SensorReading, TevReading,
    UltrasonicProbe, UltrasonicReading,
};
use serde::{Deserialize, Serialize};
use severity_fusion::{FusedVerdict, MeasurementPoint, PointAssessment, SeverityFuser};
use tracing::{debug, info};

/// Raw readings gathered at one labelled measurement point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingPoint {
    pub label: String,
    #[serde(default)]
    pub readings: Vec<SensorReading>,
}

/// PD engine.
///
/// Holds only immutable configuration, so a single instance can be shared
/// across threads without locking.
#[derive(Debug, Clone)]
pub struct PdEngine {
    config: EngineConfig,
    extractor: PlotExtractor,
    fuser: SeverityFuser,
}

impl Default for PdEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            extractor: PlotExtractor::new(),
            fuser: SeverityFuser::default(),
        }
    }
}

impl PdEngine {
    /// Create an engine, rejecting invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let fuser = SeverityFuser::new(config.fusion)?;
        info!(
            "Creating PD engine: eps={}, min_samples={}, weights={:?}",
            config.clustering.eps, config.clustering.min_samples, config.fusion
        );
        Ok(Self {
            config,
            extractor: PlotExtractor::new(),
            fuser,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Extract PRPD points, compute features and evaluate the sensor's rule
    pub fn extract_prpd(
        &self,
        image_bytes: &[u8],
        sensor_type: &str,
    ) -> Result<ExtractionResult<PrpdPoint>, EngineError> {
        let sensor = SensorType::from_label(sensor_type)?;
        let extraction = self.extractor.extract_prpd(image_bytes)?;

        let (features, indication) = if extraction.is_empty() {
            (FeatureSet::new(), PdIndication::NoPoints)
        } else {
            let features = PrpdFeatures::compute_with(&extraction.points, &self.config.clustering);
            let indication = if self.config.detection.detect_prpd(sensor, &features) {
                PdIndication::Detected
            } else {
                PdIndication::NotSignificant
            };
            (features.to_feature_set(), indication)
        };

        info!(
            "PRPD {} plot: {} points → {}",
            sensor,
            extraction.points.len(),
            indication
        );

        Ok(ExtractionResult {
            kind: SignalKind::Prpd,
            sensor,
            features,
            indication,
            width: extraction.width,
            height: extraction.height,
            points: extraction.points,
        })
    }

    /// Extract waveform points, compute features and evaluate the sensor's rule
    pub fn extract_waveform(
        &self,
        image_bytes: &[u8],
        sensor_type: &str,
    ) -> Result<ExtractionResult<WaveformPoint>, EngineError> {
        let sensor = SensorType::from_label(sensor_type)?;
        let extraction = self.extractor.extract_waveform(image_bytes)?;

        let (features, indication) = if extraction.is_empty() {
            (FeatureSet::new(), PdIndication::NoTrace)
        } else {
            let features = WaveformFeatures::compute(&extraction.points);
            debug!("Waveform peak {:.2} dB, rms {:.2} dB", features.peak_db, features.rms_db);
            let indication = if self.config.detection.detect_waveform(sensor, &features) {
                PdIndication::Detected
            } else {
                PdIndication::NotSignificant
            };
            (features.to_feature_set(), indication)
        };

        info!(
            "Waveform {} plot: {} points → {}",
            sensor,
            extraction.points.len(),
            indication
        );

        Ok(ExtractionResult {
            kind: SignalKind::Waveform,
            sensor,
            features,
            indication,
            width: extraction.width,
            height: extraction.height,
            points: extraction.points,
        })
    }

    pub fn classify(&self, reading: &SensorReading) -> MethodVerdict {
        reading.classify()
    }

    pub fn classify_tev(
        &self,
        level_db: Option<f64>,
        pulses_per_cycle: Option<u32>,
        interpretation: Option<&str>,
    ) -> ClassificationVerdict {
        TevReading {
            level_db,
            pulses_per_cycle,
            interpretation: interpretation.map(str::to_string),
        }
        .classify()
    }

    pub fn classify_hfct(
        &self,
        charge_pc: Option<f64>,
        pulses_per_cycle: Option<u32>,
        unipolar: Flag,
        two_wave_cluster: Flag,
    ) -> ClassificationVerdict {
        HfctReading {
            charge_pc,
            pulses_per_cycle,
            unipolar,
            two_wave_cluster,
        }
        .classify()
    }

    pub fn classify_ultrasonic(
        &self,
        level_dbuv: Option<f64>,
        confidence_pct: Option<f64>,
        two_wave_cluster: Flag,
        crackling: Flag,
        interpretation: Option<&str>,
        probe: UltrasonicProbe,
    ) -> ClassificationVerdict {
        UltrasonicReading {
            level_dbuv,
            confidence_pct,
            two_wave_cluster,
            crackling,
            interpretation: interpretation.map(str::to_string),
            probe,
        }
        .classify()
    }

    pub fn fuse(&self, verdicts: &[MethodVerdict]) -> FusedVerdict {
        self.fuser.fuse(verdicts)
    }

    /// Fuse already classified verdicts per measurement point
    pub fn assess(&self, points: Vec<MeasurementPoint>) -> Vec<PointAssessment> {
        self.fuser.assess(points)
    }

    /// Classify every reading, then fuse per measurement point
    pub fn assess_readings(&self, points: Vec<ReadingPoint>) -> Vec<PointAssessment> {
        let classified = points
            .into_iter()
            .map(|point| {
                let verdicts: Vec<MethodVerdict> = point.readings.iter().map(SensorReading::classify).collect();
                debug!("Point {:?}: {} verdict(s)", point.label, verdicts.len());
                MeasurementPoint::new(point.label, verdicts)
            })
            .collect();
        self.assess(classified)
    }
}
