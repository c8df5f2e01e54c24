//! Waveform trace features

use crate::features::FeatureSet;
use crate::histogram::{data_range, density_histogram, normalized_entropy};
use crate::statistics::StatisticalFeatures;
use plot_extraction::WaveformPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

const AMPLITUDE_BINS: usize = 50;

/// Descriptors of a pulse waveform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformFeatures {
    pub point_count: usize,
    pub peak_db: f64,
    /// Earliest time at which the peak occurs
    pub peak_time_us: f64,
    pub mean_db: f64,
    pub std_db: f64,
    pub rms_db: f64,
    /// Σ amplitude²
    pub energy_proxy: f64,
    /// peak / RMS
    pub crest_factor: f64,
    /// Time span of samples at or above half the peak
    pub pulse_width_us: f64,
    /// First 10% crossing to first 90% crossing
    pub rise_time_us: f64,
    /// Last 90% crossing to last 10% crossing
    pub fall_time_us: f64,
    /// amplitude²-weighted mean time
    pub time_centroid_us: f64,
    pub skewness_db: f64,
    pub kurtosis_db: f64,
    /// Entropy of the 50-bin amplitude histogram
    pub entropy: f64,
}

impl WaveformFeatures {
    /// Compute all descriptors; points need not be sorted
    pub fn compute(points: &[WaveformPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.time_us.total_cmp(&b.time_us));

        let amplitudes: Vec<f64> = sorted.iter().map(|p| p.amplitude_db).collect();
        let stats = StatisticalFeatures::compute(&amplitudes);

        let peak_db = stats.max;
        let peak_time_us = sorted
            .iter()
            .find(|p| p.amplitude_db == peak_db)
            .map_or(0.0, |p| p.time_us);

        let energy_proxy: f64 = amplitudes.iter().map(|a| a * a).sum();
        let crest_factor = if stats.rms > 0.0 { peak_db / stats.rms } else { 0.0 };

        let pulse_width_us = span_at_or_above(&sorted, peak_db * 0.5)
            .map_or(0.0, |(first, last)| last - first);

        // Crossing sets may be empty when the peak is negative
        let ten = span_at_or_above(&sorted, peak_db * 0.1);
        let ninety = span_at_or_above(&sorted, peak_db * 0.9);
        let (rise_time_us, fall_time_us) = match (ten, ninety) {
            (Some((t10_first, t10_last)), Some((t90_first, t90_last))) => {
                (t90_first - t10_first, t10_last - t90_last)
            }
            _ => (0.0, 0.0),
        };

        let time_centroid_us = if energy_proxy > 0.0 {
            sorted
                .iter()
                .map(|p| p.time_us * p.amplitude_db * p.amplitude_db)
                .sum::<f64>()
                / energy_proxy
        } else {
            0.0
        };

        let (lo, hi) = data_range(&amplitudes);
        let entropy = normalized_entropy(&density_histogram(&amplitudes, AMPLITUDE_BINS, lo, hi));

        debug!(
            "Waveform features: N={}, peak={:.2} dB at {:.3} µs",
            sorted.len(),
            peak_db,
            peak_time_us
        );

        Self {
            point_count: sorted.len(),
            peak_db,
            peak_time_us,
            mean_db: stats.mean,
            std_db: stats.std_dev,
            rms_db: stats.rms,
            energy_proxy,
            crest_factor,
            pulse_width_us,
            rise_time_us,
            fall_time_us,
            time_centroid_us,
            skewness_db: stats.skewness,
            kurtosis_db: stats.kurtosis,
            entropy,
        }
    }

    /// Flatten into the ordered, named feature set
    pub fn to_feature_set(&self) -> FeatureSet {
        let mut set = FeatureSet::new();
        set.push("point_count", self.point_count);
        set.push("peak_db", self.peak_db);
        set.push("peak_time_us", self.peak_time_us);
        set.push("mean_db", self.mean_db);
        set.push("std_db", self.std_db);
        set.push("rms_db", self.rms_db);
        set.push("energy_proxy", self.energy_proxy);
        set.push("crest_factor", self.crest_factor);
        set.push("pulse_width_us", self.pulse_width_us);
        set.push("rise_time_us", self.rise_time_us);
        set.push("fall_time_us", self.fall_time_us);
        set.push("time_centroid_us", self.time_centroid_us);
        set.push("skewness_db", self.skewness_db);
        set.push("kurtosis_db", self.kurtosis_db);
        set.push("entropy", self.entropy);
        set
    }
}

/// Earliest and latest time among time-sorted samples with amplitude ≥ level
fn span_at_or_above(sorted: &[WaveformPoint], level: f64) -> Option<(f64, f64)> {
    let first = sorted.iter().find(|p| p.amplitude_db >= level)?;
    let last = sorted.iter().rev().find(|p| p.amplitude_db >= level)?;
    Some((first.time_us, last.time_us))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(samples: &[(f64, f64)]) -> Vec<WaveformPoint> {
        samples
            .iter()
            .map(|&(time_us, amplitude_db)| WaveformPoint {
                time_us,
                amplitude_db,
            })
            .collect()
    }

    /// Triangular pulse peaking at t = 0 with 20 dB
    fn triangle() -> Vec<WaveformPoint> {
        trace(&[
            (-2.0, 0.0),
            (-1.5, 5.0),
            (-1.0, 10.0),
            (-0.5, 15.0),
            (0.0, 20.0),
            (0.5, 15.0),
            (1.0, 10.0),
            (1.5, 5.0),
            (2.0, 0.0),
        ])
    }

    #[test]
    fn test_empty_waveform_all_zero() {
        let features = WaveformFeatures::compute(&[]);
        assert_eq!(features, WaveformFeatures::default());
        assert!(features.to_feature_set().iter().all(|(_, v)| v.as_f64() == 0.0));
    }

    #[test]
    fn test_peak_and_shape() {
        let features = WaveformFeatures::compute(&triangle());
        assert_eq!(features.point_count, 9);
        assert_eq!(features.peak_db, 20.0);
        assert_eq!(features.peak_time_us, 0.0);
        // samples ≥ 10 dB span -1.0..1.0
        assert!((features.pulse_width_us - 2.0).abs() < 1e-12);
        // 10% = 2 dB first reached at -1.5; 90% = 18 dB at 0.0
        assert!((features.rise_time_us - 1.5).abs() < 1e-12);
        assert!((features.fall_time_us - 1.5).abs() < 1e-12);
        // symmetric pulse centres on the peak
        assert!(features.time_centroid_us.abs() < 1e-12);
        assert!(features.crest_factor > 1.0);
        assert!(features.entropy > 0.0);
    }

    #[test]
    fn test_energy_and_rms() {
        let features = WaveformFeatures::compute(&trace(&[(0.0, 3.0), (1.0, 4.0)]));
        assert_eq!(features.energy_proxy, 25.0);
        assert!((features.rms_db - 12.5f64.sqrt()).abs() < 1e-12);
        assert!((features.crest_factor - 4.0 / 12.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_peak_has_no_crossings() {
        let features = WaveformFeatures::compute(&trace(&[(0.0, -8.0), (1.0, -4.0), (2.0, -6.0)]));
        assert_eq!(features.peak_db, -4.0);
        assert_eq!(features.rise_time_us, 0.0);
        assert_eq!(features.fall_time_us, 0.0);
        assert_eq!(features.pulse_width_us, 0.0);
    }

    #[test]
    fn test_silent_trace() {
        let features = WaveformFeatures::compute(&trace(&[(0.0, 0.0), (1.0, 0.0)]));
        assert_eq!(features.crest_factor, 0.0);
        assert_eq!(features.time_centroid_us, 0.0);
        assert_eq!(features.skewness_db, 0.0);
        assert!(features.entropy.is_finite());
    }

    #[test]
    fn test_first_peak_wins() {
        let features = WaveformFeatures::compute(&trace(&[(3.0, 9.0), (1.0, 9.0), (2.0, 1.0)]));
        assert_eq!(features.peak_time_us, 1.0);
    }
}
