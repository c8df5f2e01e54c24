//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Second moments below this are treated as exact zero variance
const VARIANCE_FLOOR: f64 = 1e-14;

/// Statistical features for a signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFeatures {
    /// Number of samples
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Median value
    pub median: f64,
    /// Population standard deviation (ddof = 0)
    pub std_dev: f64,
    /// Bias-corrected sample skewness (G1)
    pub skewness: f64,
    /// Bias-corrected excess kurtosis (G2)
    pub kurtosis: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Root mean square
    pub rms: f64,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let n = count as f64;

        // Mean
        let mean = values.iter().sum::<f64>() / n;

        // Min/Max
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        // Central moment sums
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;
        let mut sum_sq = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
            sum_sq += v * v;
        }

        let std_dev = if count > 1 { (m2 / n).sqrt() } else { 0.0 };
        let rms = (sum_sq / n).sqrt();
        let flat = m2.abs() < VARIANCE_FLOOR;

        // G1 = sqrt(n(n-1)) / (n-2) * g1
        let skewness = if count > 2 && !flat {
            (n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
        } else {
            0.0
        };

        // G2 = n(n+1)(n-1) M4 / ((n-2)(n-3) M2²) - 3(n-1)² / ((n-2)(n-3))
        let kurtosis = if count > 3 && !flat {
            let denom = (n - 2.0) * (n - 3.0);
            n * (n + 1.0) * (n - 1.0) * m4 / (denom * m2 * m2) - 3.0 * (n - 1.0).powi(2) / denom
        } else {
            0.0
        };

        Self {
            count,
            mean,
            median: median(values),
            std_dev,
            skewness,
            kurtosis,
            min,
            max,
            rms,
        }
    }
}

/// Median of a slice, 0 when empty
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
