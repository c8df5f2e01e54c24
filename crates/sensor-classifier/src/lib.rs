//! PD Severity Classification
//!
//! Grades one measurement point's readings for a single sensing method
//! through cascading threshold rules:
//! - TEV: dB level × pulses-per-cycle zone matrix
//! - HFCT: apparent charge, two-wave cluster and unipolar adjustments
//! - Ultrasonic: dBµV × confidence table, pattern flags and probe weighting

mod error;
mod flag;
mod hfct;
mod reading;
mod severity;
mod tev;
mod ultrasonic;

pub use error::InputError;
pub use flag::Flag;
pub use hfct::HfctReading;
pub use reading::{Classify, SensorReading};
pub use severity::{ClassificationVerdict, MethodVerdict, SensingMethod, SeverityLevel, NO_DATA_RECOMMENDATION};
pub use tev::TevReading;
pub use ultrasonic::{UltrasonicProbe, UltrasonicReading};

/// Numeric reading with absent and non-finite values read as zero
pub(crate) fn supplied(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
