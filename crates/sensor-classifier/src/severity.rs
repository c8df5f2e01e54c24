//! Severity grades and classification verdicts

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommendation attached to a verdict without any usable reading
pub const NO_DATA_RECOMMENDATION: &str = "cannot determine – no data available";

/// Ordinal PD severity grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityLevel {
    Insignificant = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl SeverityLevel {
    /// Grade for an integer score, clamped to [Insignificant, High]
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=0 => SeverityLevel::Insignificant,
            1 => SeverityLevel::Low,
            2 => SeverityLevel::Medium,
            _ => SeverityLevel::High,
        }
    }

    pub fn score(self) -> i32 {
        self as i32
    }

    /// Move by `delta` grades, saturating at both ends
    pub fn shifted(self, delta: i32) -> Self {
        Self::from_score(self.score() + delta)
    }

    /// Maintenance action for this grade
    pub fn recommendation(self) -> &'static str {
        match self {
            SeverityLevel::Insignificant => "Re-survey in 12 months",
            SeverityLevel::Low => "Re-survey in 6 months for trending",
            SeverityLevel::Medium => "Locate and investigate the PD source; repair as soon as practical",
            SeverityLevel::High => "High priority; repair immediately",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Insignificant => "Insignificant",
            SeverityLevel::Low => "Low",
            SeverityLevel::Medium => "Medium",
            SeverityLevel::High => "High",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one sensing method at one measurement point.
///
/// `severity` is `None` when there was no data to grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    #[serde(default)]
    pub severity: Option<SeverityLevel>,
    #[serde(default)]
    pub recommendation: String,
}

impl ClassificationVerdict {
    pub fn no_data() -> Self {
        Self {
            severity: None,
            recommendation: NO_DATA_RECOMMENDATION.to_string(),
        }
    }

    pub fn graded(level: SeverityLevel, recommendation: impl Into<String>) -> Self {
        Self {
            severity: Some(level),
            recommendation: recommendation.into(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.severity.is_none()
    }
}

/// Independent PD sensing method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensingMethod {
    #[serde(rename = "HFCT")]
    Hfct,
    #[serde(rename = "TEV")]
    Tev,
    #[serde(alias = "Ultrasonik")]
    Ultrasonic,
}

impl SensingMethod {
    pub const ALL: [SensingMethod; 3] = [SensingMethod::Hfct, SensingMethod::Tev, SensingMethod::Ultrasonic];

    pub fn as_str(self) -> &'static str {
        match self {
            SensingMethod::Hfct => "HFCT",
            SensingMethod::Tev => "TEV",
            SensingMethod::Ultrasonic => "Ultrasonic",
        }
    }
}

impl FromStr for SensingMethod {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hfct" => Ok(SensingMethod::Hfct),
            "tev" => Ok(SensingMethod::Tev),
            "ultrasonic" | "ultrasonik" => Ok(SensingMethod::Ultrasonic),
            _ => Err(InputError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SensingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict tagged with the method that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodVerdict {
    pub method: SensingMethod,
    #[serde(flatten)]
    pub verdict: ClassificationVerdict,
}

impl MethodVerdict {
    pub fn new(method: SensingMethod, verdict: ClassificationVerdict) -> Self {
        Self { method, verdict }
    }

    pub fn severity(&self) -> Option<SeverityLevel> {
        self.verdict.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamping() {
        assert_eq!(SeverityLevel::from_score(-4), SeverityLevel::Insignificant);
        assert_eq!(SeverityLevel::from_score(2), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(7), SeverityLevel::High);
        assert_eq!(SeverityLevel::High.shifted(2), SeverityLevel::High);
        assert_eq!(SeverityLevel::Low.shifted(-3), SeverityLevel::Insignificant);
    }

    #[test]
    fn test_ordering() {
        assert!(SeverityLevel::High > SeverityLevel::Medium);
        assert!(SeverityLevel::Low > SeverityLevel::Insignificant);
    }

    #[test]
    fn test_method_labels() {
        assert_eq!("tev".parse::<SensingMethod>(), Ok(SensingMethod::Tev));
        assert_eq!("Ultrasonik".parse::<SensingMethod>(), Ok(SensingMethod::Ultrasonic));
        assert!(matches!(
            "acoustic".parse::<SensingMethod>(),
            Err(InputError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_method_verdict_json_is_flat() {
        let verdict = MethodVerdict::new(
            SensingMethod::Hfct,
            ClassificationVerdict::graded(SeverityLevel::High, "x"),
        );
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["method"], "HFCT");
        assert_eq!(json["severity"], "High");
        assert_eq!(json["recommendation"], "x");

        let parsed: MethodVerdict =
            serde_json::from_str(r#"{"method":"TEV","recommendation":"none"}"#).unwrap();
        assert!(parsed.verdict.is_no_data());
    }
}
