//! Per measurement point grouping

use serde::{Deserialize, Serialize};

use sensor_classifier::MethodVerdict;

use crate::FusedVerdict;

/// Verdicts gathered at one labelled location (e.g. "Cubicle 3 / Phase R")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub label: String,
    #[serde(default)]
    pub verdicts: Vec<MethodVerdict>,
}

impl MeasurementPoint {
    pub fn new(label: impl Into<String>, verdicts: Vec<MethodVerdict>) -> Self {
        Self {
            label: label.into(),
            verdicts,
        }
    }
}

/// Fused outcome for one measurement point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAssessment {
    pub label: String,
    pub verdicts: Vec<MethodVerdict>,
    pub fused: FusedVerdict,
}
