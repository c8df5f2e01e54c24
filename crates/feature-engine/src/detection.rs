//! Per-sensor "PD detected" threshold rules

use crate::error::FeatureError;
use crate::prpd::PrpdFeatures;
use crate::waveform::WaveformFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sensor the plot was captured with, selecting the detection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "TEV")]
    Tev,
    #[serde(rename = "HFCT")]
    Hfct,
    Ultrasonic,
    Generic,
}

impl SensorType {
    /// Parse a sensor label. Unrecognised labels fall back to the generic rule;
    /// a blank label is rejected.
    pub fn from_label(label: &str) -> Result<Self, FeatureError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(FeatureError::MissingSensorType);
        }
        Ok(match label.to_ascii_lowercase().as_str() {
            "tev" => SensorType::Tev,
            "hfct" => SensorType::Hfct,
            "ultrasonic" | "ultrasonik" => SensorType::Ultrasonic,
            _ => SensorType::Generic,
        })
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorType::Tev => write!(f, "TEV"),
            SensorType::Hfct => write!(f, "HFCT"),
            SensorType::Ultrasonic => write!(f, "Ultrasonic"),
            SensorType::Generic => write!(f, "Generic"),
        }
    }
}

/// Joint phase-concentration / cluster-membership clause
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    pub min_concentration: f64,
    pub min_in_cluster_fraction: f64,
}

/// PRPD detection thresholds; any satisfied clause flags PD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrpdRule {
    pub min_pulses_per_cycle: f64,
    pub min_mean_db: f64,
    pub min_energy: Option<f64>,
    pub pattern: Option<PatternRule>,
}

impl Default for PrpdRule {
    fn default() -> Self {
        Self {
            min_pulses_per_cycle: 50.0,
            min_mean_db: 5.0,
            min_energy: None,
            pattern: None,
        }
    }
}

impl PrpdRule {
    pub fn is_detected(&self, features: &PrpdFeatures) -> bool {
        features.pulses_per_cycle() >= self.min_pulses_per_cycle
            || features.intensity.mean >= self.min_mean_db
            || self.pattern.is_some_and(|p| {
                features.phase.concentration >= p.min_concentration
                    && features.clusters.in_cluster_fraction >= p.min_in_cluster_fraction
            })
            || self.min_energy.is_some_and(|e| features.energy_proxy >= e)
    }
}

/// Waveform detection thresholds; any satisfied clause flags PD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformRule {
    pub min_peak_db: f64,
    pub min_rms_db: Option<f64>,
    pub min_energy: Option<f64>,
}

impl Default for WaveformRule {
    fn default() -> Self {
        Self {
            min_peak_db: 15.0,
            min_rms_db: None,
            min_energy: None,
        }
    }
}

impl WaveformRule {
    pub fn is_detected(&self, features: &WaveformFeatures) -> bool {
        features.peak_db >= self.min_peak_db
            || self.min_rms_db.is_some_and(|r| features.rms_db >= r)
            || self.min_energy.is_some_and(|e| features.energy_proxy >= e)
    }
}

/// PRPD rules per sensor type.
///
/// A configured slot only replaces the thresholds it names; the rest keep
/// that sensor's built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PrpdRulesOverride")]
pub struct PrpdRules {
    pub tev: PrpdRule,
    pub hfct: PrpdRule,
    pub ultrasonic: PrpdRule,
    pub generic: PrpdRule,
}

impl Default for PrpdRules {
    fn default() -> Self {
        Self {
            tev: PrpdRule {
                min_pulses_per_cycle: 30.0,
                min_mean_db: 2.0,
                min_energy: Some(5_000.0),
                pattern: None,
            },
            hfct: PrpdRule {
                min_pulses_per_cycle: 100.0,
                min_mean_db: 6.0,
                min_energy: Some(20_000.0),
                pattern: Some(PatternRule {
                    min_concentration: 0.3,
                    min_in_cluster_fraction: 0.25,
                }),
            },
            ultrasonic: PrpdRule {
                min_pulses_per_cycle: 50.0,
                min_mean_db: 8.0,
                min_energy: Some(10_000.0),
                pattern: Some(PatternRule {
                    min_concentration: 0.4,
                    min_in_cluster_fraction: 0.2,
                }),
            },
            generic: PrpdRule::default(),
        }
    }
}

/// Waveform rules per sensor type, layered like [`PrpdRules`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WaveformRulesOverride")]
pub struct WaveformRules {
    pub tev: WaveformRule,
    pub hfct: WaveformRule,
    pub ultrasonic: WaveformRule,
    pub generic: WaveformRule,
}

impl Default for WaveformRules {
    fn default() -> Self {
        Self {
            tev: WaveformRule {
                min_peak_db: 20.0,
                min_rms_db: Some(5.0),
                min_energy: None,
            },
            hfct: WaveformRule {
                min_peak_db: 30.0,
                min_rms_db: None,
                min_energy: Some(10_000.0),
            },
            ultrasonic: WaveformRule::default(),
            generic: WaveformRule::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PrpdRuleOverride {
    min_pulses_per_cycle: Option<f64>,
    min_mean_db: Option<f64>,
    min_energy: Option<f64>,
    pattern: Option<PatternRule>,
}

impl PrpdRuleOverride {
    fn over(self, base: PrpdRule) -> PrpdRule {
        PrpdRule {
            min_pulses_per_cycle: self.min_pulses_per_cycle.unwrap_or(base.min_pulses_per_cycle),
            min_mean_db: self.min_mean_db.unwrap_or(base.min_mean_db),
            min_energy: self.min_energy.or(base.min_energy),
            pattern: self.pattern.or(base.pattern),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PrpdRulesOverride {
    tev: PrpdRuleOverride,
    hfct: PrpdRuleOverride,
    ultrasonic: PrpdRuleOverride,
    generic: PrpdRuleOverride,
}

impl From<PrpdRulesOverride> for PrpdRules {
    fn from(layer: PrpdRulesOverride) -> Self {
        let base = PrpdRules::default();
        Self {
            tev: layer.tev.over(base.tev),
            hfct: layer.hfct.over(base.hfct),
            ultrasonic: layer.ultrasonic.over(base.ultrasonic),
            generic: layer.generic.over(base.generic),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaveformRuleOverride {
    min_peak_db: Option<f64>,
    min_rms_db: Option<f64>,
    min_energy: Option<f64>,
}

impl WaveformRuleOverride {
    fn over(self, base: WaveformRule) -> WaveformRule {
        WaveformRule {
            min_peak_db: self.min_peak_db.unwrap_or(base.min_peak_db),
            min_rms_db: self.min_rms_db.or(base.min_rms_db),
            min_energy: self.min_energy.or(base.min_energy),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaveformRulesOverride {
    tev: WaveformRuleOverride,
    hfct: WaveformRuleOverride,
    ultrasonic: WaveformRuleOverride,
    generic: WaveformRuleOverride,
}

impl From<WaveformRulesOverride> for WaveformRules {
    fn from(layer: WaveformRulesOverride) -> Self {
        let base = WaveformRules::default();
        Self {
            tev: layer.tev.over(base.tev),
            hfct: layer.hfct.over(base.hfct),
            ultrasonic: layer.ultrasonic.over(base.ultrasonic),
            generic: layer.generic.over(base.generic),
        }
    }
}

/// All detection thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    pub prpd: PrpdRules,
    pub waveform: WaveformRules,
}

impl DetectionThresholds {
    pub fn prpd_rule(&self, sensor: SensorType) -> &PrpdRule {
        match sensor {
            SensorType::Tev => &self.prpd.tev,
            SensorType::Hfct => &self.prpd.hfct,
            SensorType::Ultrasonic => &self.prpd.ultrasonic,
            SensorType::Generic => &self.prpd.generic,
        }
    }

    pub fn waveform_rule(&self, sensor: SensorType) -> &WaveformRule {
        match sensor {
            SensorType::Tev => &self.waveform.tev,
            SensorType::Hfct => &self.waveform.hfct,
            SensorType::Ultrasonic => &self.waveform.ultrasonic,
            SensorType::Generic => &self.waveform.generic,
        }
    }

    pub fn detect_prpd(&self, sensor: SensorType, features: &PrpdFeatures) -> bool {
        self.prpd_rule(sensor).is_detected(features)
    }

    pub fn detect_waveform(&self, sensor: SensorType, features: &WaveformFeatures) -> bool {
        self.waveform_rule(sensor).is_detected(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circular::PhaseDistribution;
    use crate::clustering::ClusterSummary;
    use crate::statistics::StatisticalFeatures;

    fn prpd(point_count: usize, mean: f64, energy: f64, r: f64, in_cluster: f64) -> PrpdFeatures {
        PrpdFeatures {
            point_count,
            intensity: StatisticalFeatures {
                mean,
                ..Default::default()
            },
            energy_proxy: energy,
            phase: PhaseDistribution {
                concentration: r,
                ..Default::default()
            },
            clusters: ClusterSummary {
                cluster_count: 1,
                in_cluster_fraction: in_cluster,
            },
        }
    }

    #[test]
    fn test_sensor_labels() {
        assert_eq!(SensorType::from_label("TEV"), Ok(SensorType::Tev));
        assert_eq!(SensorType::from_label(" hfct "), Ok(SensorType::Hfct));
        assert_eq!(SensorType::from_label("Ultrasonik"), Ok(SensorType::Ultrasonic));
        assert_eq!(SensorType::from_label("Umum"), Ok(SensorType::Generic));
        assert_eq!(SensorType::from_label("AE"), Ok(SensorType::Generic));
        assert_eq!(SensorType::from_label("   "), Err(FeatureError::MissingSensorType));
    }

    #[test]
    fn test_tev_prpd_rule() {
        let rules = DetectionThresholds::default();
        assert!(rules.detect_prpd(SensorType::Tev, &prpd(30, 0.0, 0.0, 0.0, 0.0)));
        assert!(rules.detect_prpd(SensorType::Tev, &prpd(5, 2.0, 0.0, 0.0, 0.0)));
        assert!(rules.detect_prpd(SensorType::Tev, &prpd(5, 1.0, 5_000.0, 0.0, 0.0)));
        assert!(!rules.detect_prpd(SensorType::Tev, &prpd(29, 1.9, 4_999.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hfct_pattern_clause() {
        let rules = DetectionThresholds::default();
        assert!(rules.detect_prpd(SensorType::Hfct, &prpd(20, 1.0, 0.0, 0.3, 0.25)));
        assert!(!rules.detect_prpd(SensorType::Hfct, &prpd(20, 1.0, 0.0, 0.3, 0.2)));
        assert!(!rules.detect_prpd(SensorType::Hfct, &prpd(99, 5.9, 19_999.0, 0.29, 0.9)));
    }

    #[test]
    fn test_generic_ignores_energy_and_pattern() {
        let rules = DetectionThresholds::default();
        assert!(!rules.detect_prpd(SensorType::Generic, &prpd(49, 4.9, 1e9, 1.0, 1.0)));
        assert!(rules.detect_prpd(SensorType::Generic, &prpd(50, 0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_waveform_rules() {
        let rules = DetectionThresholds::default();
        let features = WaveformFeatures {
            peak_db: 16.0,
            rms_db: 5.5,
            energy_proxy: 12_000.0,
            ..Default::default()
        };
        assert!(rules.detect_waveform(SensorType::Tev, &features));
        assert!(rules.detect_waveform(SensorType::Hfct, &features));
        assert!(rules.detect_waveform(SensorType::Ultrasonic, &features));

        let quiet = WaveformFeatures {
            peak_db: 14.0,
            rms_db: 4.0,
            energy_proxy: 500.0,
            ..Default::default()
        };
        assert!(!rules.detect_waveform(SensorType::Tev, &quiet));
        assert!(!rules.detect_waveform(SensorType::Hfct, &quiet));
        assert!(!rules.detect_waveform(SensorType::Generic, &quiet));
    }

    #[test]
    fn test_partial_override_keeps_sensor_defaults() {
        let rules: DetectionThresholds = serde_json::from_str(
            r#"{"prpd":{"hfct":{"min_mean_db":7.0}},"waveform":{"tev":{"min_peak_db":25.0}}}"#,
        )
        .unwrap();
        let defaults = DetectionThresholds::default();

        let hfct = rules.prpd_rule(SensorType::Hfct);
        assert_eq!(hfct.min_mean_db, 7.0);
        assert_eq!(hfct.min_pulses_per_cycle, 100.0);
        assert_eq!(hfct.min_energy, Some(20_000.0));
        assert_eq!(hfct.pattern, defaults.prpd.hfct.pattern);
        assert_eq!(rules.prpd.tev, defaults.prpd.tev);

        let tev = rules.waveform_rule(SensorType::Tev);
        assert_eq!(tev.min_peak_db, 25.0);
        assert_eq!(tev.min_rms_db, Some(5.0));
        assert_eq!(rules.waveform.hfct, defaults.waveform.hfct);
    }

    #[test]
    fn test_empty_rules_are_defaults() {
        let rules: DetectionThresholds = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, DetectionThresholds::default());
    }
}
