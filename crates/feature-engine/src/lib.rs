//! Feature Engineering Engine
//!
//! Computes descriptors of extracted PD point clouds:
//! - amplitude statistics (moments, median, RMS)
//! - circular phase statistics and polarity balance for PRPD data
//! - density-based pattern clustering
//! - pulse shape timing for waveform data
//!
//! and applies the per-sensor "PD detected" threshold rules.

mod circular;
mod clustering;
mod detection;
mod error;
mod features;
mod histogram;
mod prpd;
mod statistics;
mod waveform;

pub use circular::PhaseDistribution;
pub use clustering::{dbscan, ClusterParams, ClusterSummary};
pub use detection::{DetectionThresholds, PatternRule, PrpdRule, PrpdRules, SensorType, WaveformRule, WaveformRules};
pub use error::FeatureError;
pub use features::{FeatureSet, FeatureValue};
pub use histogram::{density_entropy, density_histogram, normalized_entropy, ENTROPY_EPSILON};
pub use prpd::PrpdFeatures;
pub use statistics::StatisticalFeatures;
pub use waveform::WaveformFeatures;
