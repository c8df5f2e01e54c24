//! Feature Error Types

use thiserror::Error;

/// Errors raised while selecting feature rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Sensor type label was empty
    #[error("Sensor type label is required")]
    MissingSensorType,
}
