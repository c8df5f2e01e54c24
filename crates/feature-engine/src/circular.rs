//! Circular phase statistics for PRPD data

use crate::histogram::{density_entropy, density_histogram};
use serde::{Deserialize, Serialize};

const FULL_CYCLE_DEG: f64 = 360.0;
const HALF_CYCLE_DEG: f64 = 180.0;
const PHASE_BINS: usize = 10;

/// Distribution of discharge phases over the AC cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDistribution {
    /// Mean resultant length R (0 = uniform, 1 = single phase)
    pub concentration: f64,
    /// Circular mean phase in [0, 360)
    pub mean_phase_deg: f64,
    /// Narrowest arc holding 90% of the points
    pub spread_90_deg: f64,
    /// Points in the positive half cycle (phase < 180°)
    pub positive_count: usize,
    /// Points in the negative half cycle (phase ≥ 180°)
    pub negative_count: usize,
    /// positive / negative; +∞ with no negative points, 0 with none at all
    pub polarity_ratio: f64,
    /// Entropy of the 10-bin phase density
    pub entropy: f64,
}

impl Default for PhaseDistribution {
    fn default() -> Self {
        Self {
            concentration: 0.0,
            mean_phase_deg: 0.0,
            spread_90_deg: FULL_CYCLE_DEG,
            positive_count: 0,
            negative_count: 0,
            polarity_ratio: 0.0,
            entropy: 0.0,
        }
    }
}

impl PhaseDistribution {
    /// Compute from phases already sorted ascending
    pub fn compute(sorted_phases: &[f64]) -> Self {
        if sorted_phases.is_empty() {
            return Self::default();
        }

        let (concentration, mean_phase_deg) = mean_resultant(sorted_phases);
        let positive_count = sorted_phases.iter().filter(|&&p| p < HALF_CYCLE_DEG).count();
        let negative_count = sorted_phases.len() - positive_count;

        let density = density_histogram(sorted_phases, PHASE_BINS, 0.0, FULL_CYCLE_DEG);

        Self {
            concentration,
            mean_phase_deg,
            spread_90_deg: coverage_spread(sorted_phases),
            positive_count,
            negative_count,
            polarity_ratio: polarity_ratio(positive_count, negative_count),
            entropy: density_entropy(&density),
        }
    }
}

/// Mean resultant length and circular mean (degrees, [0, 360))
pub fn mean_resultant(phases_deg: &[f64]) -> (f64, f64) {
    if phases_deg.is_empty() {
        return (0.0, 0.0);
    }
    let (c, s) = phases_deg.iter().fold((0.0, 0.0), |(c, s), &p| {
        let theta = p.to_radians();
        (c + theta.cos(), s + theta.sin())
    });
    let r = (c * c + s * s).sqrt() / phases_deg.len() as f64;
    let mean = (s.atan2(c).to_degrees() + FULL_CYCLE_DEG) % FULL_CYCLE_DEG;
    (r, mean)
}

pub fn polarity_ratio(positive: usize, negative: usize) -> f64 {
    match (positive, negative) {
        (0, 0) => 0.0,
        (_, 0) => f64::INFINITY,
        (p, n) => p as f64 / n as f64,
    }
}

/// Narrowest circular arc containing ceil(0.9·N) consecutive sorted phases.
///
/// The sorted array is conceptually doubled with the second copy shifted by
/// one full cycle so windows may wrap past 360°.
pub fn coverage_spread(sorted_phases: &[f64]) -> f64 {
    let n = sorted_phases.len();
    if n == 0 {
        return FULL_CYCLE_DEG;
    }
    let window = (9 * n + 9) / 10;

    let mut min_width = FULL_CYCLE_DEG;
    for i in 0..n {
        let j = i + window - 1;
        let upper = if j < n {
            sorted_phases[j]
        } else {
            sorted_phases[j - n] + FULL_CYCLE_DEG
        };
        min_width = min_width.min(upper - sorted_phases[i]);
    }
    min_width
}
