//! High Frequency Current Transformer classification

use crate::flag::Flag;
use crate::reading::Classify;
use crate::severity::{ClassificationVerdict, SensingMethod, SeverityLevel};
use crate::supplied;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HFCT readings at one measurement point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HfctReading {
    /// Apparent charge (pC)
    pub charge_pc: Option<f64>,
    pub pulses_per_cycle: Option<u32>,
    pub unipolar: Flag,
    /// Stable two-wave cluster seen on the PRPD plot
    pub two_wave_cluster: Flag,
}

impl HfctReading {
    fn is_no_data(&self) -> bool {
        supplied(self.charge_pc) == 0.0
            && self.pulses_per_cycle.unwrap_or(0) == 0
            && !self.unipolar.is_supplied()
            && !self.two_wave_cluster.is_supplied()
    }
}

/// Grade from charge alone when a two-wave cluster is seen
fn clustered_base(charge_pc: f64) -> SeverityLevel {
    if charge_pc < 250.0 {
        SeverityLevel::Low
    } else if charge_pc <= 500.0 {
        SeverityLevel::Medium
    } else {
        SeverityLevel::High
    }
}

impl Classify for HfctReading {
    fn method(&self) -> SensingMethod {
        SensingMethod::Hfct
    }

    fn classify(&self) -> ClassificationVerdict {
        if self.is_no_data() {
            debug!("HFCT: no data");
            return ClassificationVerdict::no_data();
        }

        let charge = supplied(self.charge_pc);
        let ppc = self.pulses_per_cycle.unwrap_or(0);
        let clustered = self.two_wave_cluster.is_present();
        let mut caveats: Vec<&str> = Vec::new();

        let mut level = if clustered {
            let base = clustered_base(charge);
            match ppc {
                0..=4 => base,
                5..=20 => base.shifted(1),
                _ => base.shifted(2),
            }
        } else if charge > 500.0 {
            caveats.push("flagged suspect noise (check coupling / other sensors)");
            SeverityLevel::Medium
        } else if ppc > 50 {
            caveats.push("probable noise/EMI – repetitive pattern without cluster");
            SeverityLevel::Insignificant
        } else {
            caveats.push("not significant; probably noise");
            SeverityLevel::Insignificant
        };

        if self.unipolar.is_present() {
            if clustered {
                level = level.shifted(-1).max(SeverityLevel::Low);
                caveats.push("unipolar: weak PD");
            } else {
                level = level.shifted(-1);
                caveats.push("unipolar without cluster: noise-like");
            }
        }

        let mut text = level.recommendation().to_string();
        if !caveats.is_empty() {
            text.push_str(" → ");
            text.push_str(&caveats.join("; "));
        }

        debug!("HFCT: {:.1} pC, ppc={}, cluster={} → {}", charge, ppc, clustered, level);
        ClassificationVerdict::graded(level, text)
    }
}
