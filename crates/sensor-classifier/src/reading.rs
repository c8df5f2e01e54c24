//! Uniform classification interface over the three sensing methods

use crate::hfct::HfctReading;
use crate::severity::{ClassificationVerdict, MethodVerdict, SensingMethod};
use crate::tev::TevReading;
use crate::ultrasonic::UltrasonicReading;
use serde::{Deserialize, Serialize};

/// Readings of one sensing method that can be graded
pub trait Classify {
    fn method(&self) -> SensingMethod;

    /// Grade the readings. Pure: the same readings always give the same verdict.
    fn classify(&self) -> ClassificationVerdict;

    fn classify_tagged(&self) -> MethodVerdict {
        MethodVerdict::new(self.method(), self.classify())
    }
}

/// Readings from any sensing method, tagged by `method` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SensorReading {
    #[serde(rename = "TEV")]
    Tev(TevReading),
    #[serde(rename = "HFCT")]
    Hfct(HfctReading),
    #[serde(alias = "Ultrasonik")]
    Ultrasonic(UltrasonicReading),
}

impl SensorReading {
    fn inner(&self) -> &dyn Classify {
        match self {
            SensorReading::Tev(r) => r,
            SensorReading::Hfct(r) => r,
            SensorReading::Ultrasonic(r) => r,
        }
    }

    pub fn method(&self) -> SensingMethod {
        self.inner().method()
    }

    pub fn classify(&self) -> MethodVerdict {
        self.inner().classify_tagged()
    }
}

impl From<TevReading> for SensorReading {
    fn from(reading: TevReading) -> Self {
        SensorReading::Tev(reading)
    }
}

impl From<HfctReading> for SensorReading {
    fn from(reading: HfctReading) -> Self {
        SensorReading::Hfct(reading)
    }
}

impl From<UltrasonicReading> for SensorReading {
    fn from(reading: UltrasonicReading) -> Self {
        SensorReading::Ultrasonic(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Flag;
    use crate::severity::SeverityLevel;
    use crate::ultrasonic::UltrasonicProbe;

    #[test]
    fn test_dispatch_tags_method() {
        let reading = SensorReading::from(TevReading {
            level_db: Some(25.0),
            pulses_per_cycle: Some(3),
            interpretation: None,
        });
        let verdict = reading.classify();
        assert_eq!(verdict.method, SensingMethod::Tev);
        assert_eq!(verdict.severity(), Some(SeverityLevel::Medium));
    }

    #[test]
    fn test_tagged_json() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"method":"HFCT","charge_pc":600,"pulses_per_cycle":10,"two_wave_cluster":"Ada"}"#,
        )
        .unwrap();
        assert_eq!(
            reading,
            SensorReading::Hfct(HfctReading {
                charge_pc: Some(600.0),
                pulses_per_cycle: Some(10),
                unipolar: Flag::NotSupplied,
                two_wave_cluster: Flag::Present,
            })
        );
        assert_eq!(reading.classify().severity(), Some(SeverityLevel::High));
    }

    #[test]
    fn test_ultrasonic_alias_and_probe() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"method":"Ultrasonik","level_dbuv":8,"confidence_pct":80,"two_wave_cluster":"tidak ada","probe":"UltraDish"}"#,
        )
        .unwrap();
        match &reading {
            SensorReading::Ultrasonic(r) => assert_eq!(r.probe, UltrasonicProbe::Dish),
            other => panic!("unexpected variant {:?}", other),
        }
        assert_eq!(reading.classify().severity(), Some(SeverityLevel::Medium));
    }

    #[test]
    fn test_bad_flag_rejected() {
        let parsed = serde_json::from_str::<SensorReading>(r#"{"method":"HFCT","unipolar":"perhaps"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_null_flags_are_not_supplied() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"method":"HFCT","charge_pc":600,"pulses_per_cycle":10,"unipolar":null,"two_wave_cluster":null}"#,
        )
        .unwrap();
        match &reading {
            SensorReading::Hfct(r) => {
                assert_eq!(r.unipolar, Flag::NotSupplied);
                assert_eq!(r.two_wave_cluster, Flag::NotSupplied);
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }
}
