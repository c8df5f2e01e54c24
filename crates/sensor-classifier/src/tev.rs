//! Transient Earth Voltage classification

use crate::reading::Classify;
use crate::severity::{ClassificationVerdict, SensingMethod, SeverityLevel};
use crate::supplied;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pulses per cycle at which the noise/EMI caution is added
const VERY_HIGH_PPC: u32 = 50;

/// TEV readings at one measurement point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TevReading {
    pub level_db: Option<f64>,
    pub pulses_per_cycle: Option<u32>,
    /// Instrument interpretation code a–g, overriding the matrix letter
    pub interpretation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelZone {
    D0,
    D1,
    D2,
    D3,
}

impl LevelZone {
    fn of(level_db: f64) -> Self {
        if level_db < 10.0 {
            LevelZone::D0
        } else if level_db < 20.0 {
            LevelZone::D1
        } else if level_db < 30.0 {
            LevelZone::D2
        } else {
            LevelZone::D3
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RateZone {
    P0,
    P1,
    P2,
}

impl RateZone {
    fn of(ppc: u32) -> Self {
        match ppc {
            0..=4 => RateZone::P0,
            5..=19 => RateZone::P1,
            _ => RateZone::P2,
        }
    }

    fn descriptor(self) -> &'static str {
        match self {
            RateZone::P0 => "very low rate / possibly noise",
            RateZone::P1 => "repetitive discharge (low–medium)",
            RateZone::P2 => "significant / surface discharge",
        }
    }
}

/// Interpretation letter and phrase for a zone pair
fn interpretation(d: LevelZone, p: RateZone) -> (char, &'static str) {
    use LevelZone::*;
    use RateZone::*;

    const NO_ATTENTION: &str = "no attention required";
    const SURFACE: &str = "possible surface discharge – check ultrasonic";
    const MID: &str = "possible mid-level PD";
    const HIGH: &str = "possible high-level PD";

    match (d, p) {
        (D0, P0) | (D1, P0) => ('a', NO_ATTENTION),
        (D0, P1) => ('b', "high PPC, probably noise"),
        (D1, P1) => ('c', "possible low-level PD"),
        (D0, P2) | (D1, P2) | (D2, P2) => ('d', SURFACE),
        (D2, P0) | (D2, P1) => ('e', MID),
        (D3, P0) | (D3, P1) => ('f', HIGH),
        (D3, P2) => ('g', "possible floating metal / poor connection (or very high noise)"),
    }
}

fn severity(d: LevelZone, p: RateZone) -> SeverityLevel {
    use LevelZone::*;
    use RateZone::*;

    match (d, p) {
        (D0, P0) | (D1, P0) | (D0, P1) => SeverityLevel::Insignificant,
        (D0, P2) | (D1, P1) | (D1, P2) => SeverityLevel::Low,
        (D2, _) => SeverityLevel::Medium,
        (D3, _) => SeverityLevel::High,
    }
}

impl TevReading {
    fn interpretation_text(&self) -> Option<&str> {
        self.interpretation.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn is_no_data(&self) -> bool {
        supplied(self.level_db) == 0.0
            && self.pulses_per_cycle.unwrap_or(0) == 0
            && self.interpretation_text().is_none()
    }

    /// Single-letter a–g override from the instrument
    fn letter_override(&self) -> Option<char> {
        let text = self.interpretation_text()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if ('a'..='g').contains(&c.to_ascii_lowercase()) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

impl Classify for TevReading {
    fn method(&self) -> SensingMethod {
        SensingMethod::Tev
    }

    fn classify(&self) -> ClassificationVerdict {
        if self.is_no_data() {
            debug!("TEV: no data");
            return ClassificationVerdict::no_data();
        }

        let ppc = self.pulses_per_cycle.unwrap_or(0);
        let d = LevelZone::of(supplied(self.level_db));
        let p = RateZone::of(ppc);

        let (matrix_letter, phrase) = interpretation(d, p);
        let letter = self.letter_override().unwrap_or(matrix_letter);
        let level = severity(d, p);

        let mut text = format!(
            "[{}] {}; {}; {}",
            letter,
            phrase,
            level.recommendation(),
            p.descriptor()
        );
        if p == RateZone::P2 {
            text.push_str("; cross-check with ultrasonic and validate phase/PRPD");
            if ppc >= VERY_HIGH_PPC {
                text.push_str(" | very high PPC: suspect noise/EMI or a loose connection");
            }
        }

        debug!("TEV: zones {:?}/{:?} → {}", d, p, level);
        ClassificationVerdict::graded(level, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(level_db: Option<f64>, ppc: Option<u32>, interpretation: Option<&str>) -> TevReading {
        TevReading {
            level_db,
            pulses_per_cycle: ppc,
            interpretation: interpretation.map(String::from),
        }
    }

    #[test]
    fn test_no_data() {
        let verdict = reading(None, Some(0), Some("  ")).classify();
        assert!(verdict.is_no_data());
        assert_eq!(verdict.recommendation, "cannot determine – no data available");
    }

    #[test]
    fn test_mid_level_pd() {
        let verdict = reading(Some(25.0), Some(3), None).classify();
        assert_eq!(verdict.severity, Some(SeverityLevel::Medium));
        assert!(verdict.recommendation.starts_with("[e] possible mid-level PD"));
        assert!(verdict.recommendation.contains("investigate"));
        assert!(verdict.recommendation.ends_with("very low rate / possibly noise"));
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(LevelZone::of(9.9), LevelZone::D0);
        assert_eq!(LevelZone::of(10.0), LevelZone::D1);
        assert_eq!(LevelZone::of(19.5), LevelZone::D1);
        assert_eq!(LevelZone::of(20.0), LevelZone::D2);
        assert_eq!(LevelZone::of(30.0), LevelZone::D3);
        assert_eq!(RateZone::of(4), RateZone::P0);
        assert_eq!(RateZone::of(5), RateZone::P1);
        assert_eq!(RateZone::of(20), RateZone::P2);
    }

    #[test]
    fn test_surface_discharge_cautions() {
        let verdict = reading(Some(5.0), Some(60), None).classify();
        assert_eq!(verdict.severity, Some(SeverityLevel::Low));
        assert!(verdict.recommendation.starts_with("[d]"));
        assert!(verdict.recommendation.contains("cross-check with ultrasonic"));
        assert!(verdict.recommendation.contains("very high PPC"));

        let verdict = reading(Some(5.0), Some(25), None).classify();
        assert!(verdict.recommendation.contains("cross-check with ultrasonic"));
        assert!(!verdict.recommendation.contains("very high PPC"));
    }

    #[test]
    fn test_floating_metal() {
        let verdict = reading(Some(35.0), Some(20), None).classify();
        assert_eq!(verdict.severity, Some(SeverityLevel::High));
        assert!(verdict.recommendation.starts_with("[g]"));
    }

    #[test]
    fn test_letter_override_changes_text_only() {
        let verdict = reading(Some(25.0), Some(3), Some("F")).classify();
        assert_eq!(verdict.severity, Some(SeverityLevel::Medium));
        assert!(verdict.recommendation.starts_with("[f] possible mid-level PD"));

        // multi-letter interpretation is not an override but counts as data
        let verdict = reading(None, None, Some("noise")).classify();
        assert_eq!(verdict.severity, Some(SeverityLevel::Insignificant));
        assert!(verdict.recommendation.starts_with("[a]"));
    }

    proptest! {
        #[test]
        fn prop_classification_is_idempotent(level in 0.0f64..60.0, ppc in 0u32..100) {
            let r = reading(Some(level), Some(ppc), None);
            prop_assert_eq!(r.classify(), r.classify());
        }

        #[test]
        fn prop_severity_monotonic_in_level(a in 0.0f64..60.0, b in 0.0f64..60.0, ppc in 1u32..100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let low = reading(Some(lo), Some(ppc), None).classify().severity;
            let high = reading(Some(hi), Some(ppc), None).classify().severity;
            prop_assert!(low <= high);
        }
    }
}
