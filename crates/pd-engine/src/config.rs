//! Engine configuration

use crate::EngineError;
use feature_engine::{ClusterParams, DetectionThresholds};
use serde::{Deserialize, Serialize};
use severity_fusion::MethodWeights;

/// Tunable constants of the pipeline; every section defaults to the
/// standard thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-sensor "PD detected" rules
    pub detection: DetectionThresholds,
    /// DBSCAN parameters for PRPD pattern clustering
    pub clustering: ClusterParams,
    /// Method weights for severity fusion
    pub fusion: MethodWeights,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.fusion.validate()?;

        let eps = self.clustering.eps;
        if !eps.is_finite() || eps <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "clustering eps must be finite and > 0, got {}",
                eps
            )));
        }
        if self.clustering.min_samples == 0 {
            return Err(EngineError::InvalidConfig(
                "clustering min_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
