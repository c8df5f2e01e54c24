//! PRPD point-cloud features

use crate::circular::PhaseDistribution;
use crate::clustering::{dbscan, ClusterParams, ClusterSummary};
use crate::features::FeatureSet;
use crate::statistics::StatisticalFeatures;
use plot_extraction::PrpdPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Below this many points no clustering is attempted
const MIN_POINTS_FOR_CLUSTERING: usize = 10;

/// Descriptors of a PRPD point cloud
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrpdFeatures {
    /// Number of points (N)
    pub point_count: usize,
    /// Intensity statistics (dB)
    pub intensity: StatisticalFeatures,
    /// Σ (10^(dB/20))²
    pub energy_proxy: f64,
    /// Phase distribution descriptors
    pub phase: PhaseDistribution,
    /// DBSCAN summary over (phase, intensity)
    pub clusters: ClusterSummary,
}

impl PrpdFeatures {
    /// Compute with the default clustering parameters
    pub fn compute(points: &[PrpdPoint]) -> Self {
        Self::compute_with(points, &ClusterParams::default())
    }

    /// Compute all descriptors; points need not be sorted
    pub fn compute_with(points: &[PrpdPoint], params: &ClusterParams) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.phase_deg.total_cmp(&b.phase_deg));

        let n = sorted.len();
        let phases: Vec<f64> = sorted.iter().map(|p| p.phase_deg).collect();
        let intensities: Vec<f64> = sorted.iter().map(|p| p.intensity_db).collect();

        let energy_proxy = intensities
            .iter()
            .map(|db| 10f64.powf(db / 20.0).powi(2))
            .sum();

        let clusters = if n >= MIN_POINTS_FOR_CLUSTERING {
            let pairs: Vec<(f64, f64)> = sorted.iter().map(|p| (p.phase_deg, p.intensity_db)).collect();
            ClusterSummary::from_labels(&dbscan(&pairs, params))
        } else {
            ClusterSummary::default()
        };

        let features = Self {
            point_count: n,
            intensity: StatisticalFeatures::compute(&intensities),
            energy_proxy,
            phase: PhaseDistribution::compute(&phases),
            clusters,
        };
        debug!(
            "PRPD features: N={}, R={:.3}, clusters={}",
            n, features.phase.concentration, features.clusters.cluster_count
        );
        features
    }

    /// Pulses-per-cycle proxy: the number of extracted points
    pub fn pulses_per_cycle(&self) -> f64 {
        self.point_count as f64
    }

    /// Flatten into the ordered, named feature set
    pub fn to_feature_set(&self) -> FeatureSet {
        let mut set = FeatureSet::new();
        set.push("point_count", self.point_count);
        set.push("pulses_per_cycle", self.pulses_per_cycle());
        set.push("mean_db", self.intensity.mean);
        set.push("median_db", self.intensity.median);
        set.push("std_db", self.intensity.std_dev);
        set.push("skewness_db", self.intensity.skewness);
        set.push("kurtosis_db", self.intensity.kurtosis);
        set.push("energy_proxy", self.energy_proxy);
        set.push("phase_concentration", self.phase.concentration);
        set.push("mean_phase_deg", self.phase.mean_phase_deg);
        set.push("phase_spread_90_deg", self.phase.spread_90_deg);
        set.push("positive_count", self.phase.positive_count);
        set.push("negative_count", self.phase.negative_count);
        set.push("polarity_ratio", self.phase.polarity_ratio);
        set.push("cluster_count", self.clusters.cluster_count);
        set.push("in_cluster_fraction", self.clusters.in_cluster_fraction);
        set.push("phase_entropy", self.phase.entropy);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureValue;

    fn point(phase_deg: f64, intensity_db: f64) -> PrpdPoint {
        PrpdPoint {
            phase_deg,
            intensity_db,
        }
    }

    #[test]
    fn test_empty_cloud() {
        let features = PrpdFeatures::compute(&[]);
        let set = features.to_feature_set();
        assert_eq!(set.get("point_count"), Some(FeatureValue::Count(0)));
        assert_eq!(set.value("energy_proxy"), Some(0.0));
        assert_eq!(set.value("phase_spread_90_deg"), Some(360.0));
        assert_eq!(set.value("polarity_ratio"), Some(0.0));
        assert_eq!(set.value("phase_entropy"), Some(0.0));
    }

    #[test]
    fn test_single_point_moments_are_zero() {
        let features = PrpdFeatures::compute(&[point(45.0, 20.0)]);
        assert_eq!(features.intensity.std_dev, 0.0);
        assert_eq!(features.intensity.skewness, 0.0);
        assert_eq!(features.intensity.kurtosis, 0.0);
        assert_eq!(features.intensity.mean, 20.0);
        assert_eq!(features.phase.polarity_ratio, f64::INFINITY);
        assert!((features.energy_proxy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_energy_proxy_from_db() {
        // 0 dB → 1, 20 dB → 10, 40 dB → 100 (linear); squares sum to 10101
        let features = PrpdFeatures::compute(&[point(10.0, 0.0), point(20.0, 20.0), point(30.0, 40.0)]);
        assert!((features.energy_proxy - 10101.0).abs() < 1e-6);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let a = PrpdFeatures::compute(&[point(300.0, 5.0), point(10.0, 6.0), point(20.0, 7.0)]);
        let b = PrpdFeatures::compute(&[point(10.0, 6.0), point(20.0, 7.0), point(300.0, 5.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clustering_needs_ten_points() {
        let few: Vec<PrpdPoint> = (0..9).map(|i| point(90.0 + i as f64 * 0.1, 30.0)).collect();
        assert_eq!(PrpdFeatures::compute(&few).clusters.cluster_count, 0);

        let enough: Vec<PrpdPoint> = (0..10).map(|i| point(90.0 + i as f64 * 0.1, 30.0)).collect();
        let features = PrpdFeatures::compute(&enough);
        assert_eq!(features.clusters.cluster_count, 1);
        assert_eq!(features.clusters.in_cluster_fraction, 1.0);
    }

    #[test]
    fn test_feature_set_has_all_names() {
        let set = PrpdFeatures::compute(&[point(1.0, 1.0)]).to_feature_set();
        assert_eq!(set.len(), 17);
        for name in [
            "mean_db",
            "median_db",
            "phase_concentration",
            "mean_phase_deg",
            "positive_count",
            "negative_count",
            "cluster_count",
            "in_cluster_fraction",
        ] {
            assert!(set.get(name).is_some(), "missing {}", name);
        }
    }
}
