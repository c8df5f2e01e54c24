//! Airborne / contact ultrasonic classification

use crate::flag::Flag;
use crate::reading::Classify;
use crate::severity::{ClassificationVerdict, SensingMethod, SeverityLevel};
use crate::supplied;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Ultrasonic probe type; scales the final grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UltrasonicProbe {
    ContactProbe,
    #[default]
    Dish,
    FlexibleMic,
    Unknown,
}

impl UltrasonicProbe {
    /// Parse a probe label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "contact probe" | "contact_probe" => UltrasonicProbe::ContactProbe,
            "dish" | "ultradish" => UltrasonicProbe::Dish,
            "flexible mic" | "flexible_mic" => UltrasonicProbe::FlexibleMic,
            _ => UltrasonicProbe::Unknown,
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            UltrasonicProbe::ContactProbe => 1.2,
            UltrasonicProbe::Dish | UltrasonicProbe::Unknown => 1.0,
            UltrasonicProbe::FlexibleMic => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UltrasonicProbe::ContactProbe => "contact_probe",
            UltrasonicProbe::Dish => "dish",
            UltrasonicProbe::FlexibleMic => "flexible_mic",
            UltrasonicProbe::Unknown => "unknown",
        }
    }
}

impl From<String> for UltrasonicProbe {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<UltrasonicProbe> for String {
    fn from(probe: UltrasonicProbe) -> Self {
        probe.as_str().to_string()
    }
}

impl fmt::Display for UltrasonicProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ultrasonic readings at one measurement point.
///
/// Missing numerics read as zero, so this method always yields a grade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltrasonicReading {
    pub level_dbuv: Option<f64>,
    /// Instrument certainty (%)
    pub confidence_pct: Option<f64>,
    pub two_wave_cluster: Flag,
    /// Characteristic crackling heard on the headset
    pub crackling: Flag,
    pub interpretation: Option<String>,
    pub probe: UltrasonicProbe,
}

/// Grade from the level × confidence table
fn base_level(level: f64, confidence: f64) -> i32 {
    let column = if confidence <= 50.0 {
        0
    } else if confidence <= 70.0 {
        1
    } else {
        2
    };
    let row = if level < 3.0 {
        [0, 0, 1]
    } else if level <= 6.0 {
        [0, 1, 2]
    } else {
        [1, 2, 3]
    };
    row[column]
}

impl UltrasonicReading {
    fn says_noise(&self) -> bool {
        self.interpretation
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("noise"))
    }
}

impl Classify for UltrasonicReading {
    fn method(&self) -> SensingMethod {
        SensingMethod::Ultrasonic
    }

    fn classify(&self) -> ClassificationVerdict {
        let level_dbuv = supplied(self.level_dbuv);
        let confidence = supplied(self.confidence_pct);

        let mut level = SeverityLevel::from_score(base_level(level_dbuv, confidence));

        match self.two_wave_cluster {
            Flag::Present => level = level.shifted(1),
            Flag::Absent => {
                level = if level_dbuv > 6.0 && confidence > 70.0 {
                    level.shifted(-1)
                } else if level_dbuv > 500.0 {
                    SeverityLevel::Medium
                } else {
                    SeverityLevel::Insignificant
                };
            }
            Flag::NotSupplied => {}
        }

        if self.crackling.is_present() {
            level = level.shifted(1);
        }

        if self.says_noise() && level > SeverityLevel::Insignificant {
            level = level.shifted(-1);
        }

        let weighted = (level.score() as f64 * self.probe.weight()).round() as i32;
        let level = SeverityLevel::from_score(weighted);

        debug!(
            "Ultrasonic: {:.1} dBµV at {:.0}% via {} → {}",
            level_dbuv, confidence, self.probe, level
        );
        ClassificationVerdict::graded(level, level.recommendation())
    }
}
