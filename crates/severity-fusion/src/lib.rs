//! Severity Fusion Engine
//!
//! Combines verdicts from independent sensing methods:
//! - HFCT (internal discharge, dominant)
//! - TEV (external / surface discharge)
//! - Ultrasonic (acoustic, complementary)
//!
//! into one weighted severity and recommendation per measurement point.

mod assessment;

pub use assessment::{MeasurementPoint, PointAssessment};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use sensor_classifier::{MethodVerdict, SensingMethod, SeverityLevel};

/// Recommendation when no method produced a usable verdict
pub const NO_RESULTS_RECOMMENDATION: &str = "cannot determine – no measurement results";

/// Fusion error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("Invalid weight {weight} for {method}: must be finite and > 0")]
    InvalidWeight { method: SensingMethod, weight: f64 },
}

/// Relative trust in each sensing method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodWeights {
    pub hfct: f64,
    pub tev: f64,
    pub ultrasonic: f64,
}

impl Default for MethodWeights {
    fn default() -> Self {
        Self {
            hfct: 0.5,
            tev: 0.3,
            ultrasonic: 0.2,
        }
    }
}

impl MethodWeights {
    pub fn weight(&self, method: SensingMethod) -> f64 {
        match method {
            SensingMethod::Hfct => self.hfct,
            SensingMethod::Tev => self.tev,
            SensingMethod::Ultrasonic => self.ultrasonic,
        }
    }

    pub fn validate(&self) -> Result<(), FusionError> {
        for method in SensingMethod::ALL {
            let weight = self.weight(method);
            if !weight.is_finite() || weight <= 0.0 {
                return Err(FusionError::InvalidWeight { method, weight });
            }
        }
        Ok(())
    }
}

/// Final verdict for one measurement point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedVerdict {
    /// `None` when no method contributed
    pub severity: Option<SeverityLevel>,
    /// Weighted mean grade before rounding
    pub score: Option<f64>,
    pub recommendation: String,
    /// Methods with at least one graded verdict
    pub contributing: Vec<SensingMethod>,
}

impl FusedVerdict {
    fn no_results() -> Self {
        Self {
            severity: None,
            score: None,
            recommendation: NO_RESULTS_RECOMMENDATION.to_string(),
            contributing: Vec::new(),
        }
    }
}

/// Weighted severity fuser
#[derive(Debug, Clone)]
pub struct SeverityFuser {
    weights: MethodWeights,
}

impl Default for SeverityFuser {
    fn default() -> Self {
        Self {
            weights: MethodWeights::default(),
        }
    }
}

impl SeverityFuser {
    /// Create a fuser, rejecting non-finite or non-positive weights
    pub fn new(weights: MethodWeights) -> Result<Self, FusionError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &MethodWeights {
        &self.weights
    }

    /// Fuse verdicts gathered at one measurement point.
    ///
    /// No-data verdicts are dropped, each method contributes its worst grade,
    /// and the weighted mean over contributing methods is rounded half away
    /// from zero.
    pub fn fuse(&self, verdicts: &[MethodVerdict]) -> FusedVerdict {
        let mut worst: BTreeMap<SensingMethod, SeverityLevel> = BTreeMap::new();
        for verdict in verdicts {
            if let Some(level) = verdict.severity() {
                worst
                    .entry(verdict.method)
                    .and_modify(|current| *current = (*current).max(level))
                    .or_insert(level);
            }
        }

        if worst.is_empty() {
            debug!("Fusion: no graded verdicts among {}", verdicts.len());
            return FusedVerdict::no_results();
        }

        let (weighted, total_weight) = worst.iter().fold((0.0, 0.0), |(sum, total), (&method, &level)| {
            let weight = self.weights.weight(method);
            (sum + level.score() as f64 * weight, total + weight)
        });
        let score = weighted / total_weight;
        let level = SeverityLevel::from_score(score.round() as i32);

        info!("Fusion: score {:.3} from {} method(s) → {}", score, worst.len(), level);

        FusedVerdict {
            severity: Some(level),
            score: Some(score),
            recommendation: level.recommendation().to_string(),
            contributing: worst.into_keys().collect(),
        }
    }

    /// Fuse every measurement point independently, keeping input order
    pub fn assess(&self, points: Vec<MeasurementPoint>) -> Vec<PointAssessment> {
        points
            .into_iter()
            .map(|point| {
                let fused = self.fuse(&point.verdicts);
                PointAssessment {
                    label: point.label,
                    verdicts: point.verdicts,
                    fused,
                }
            })
            .collect()
    }
}
