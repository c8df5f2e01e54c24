//! Density histograms and entropy

/// Added to every histogram bin so empty bins do not produce ln(0)
pub const ENTROPY_EPSILON: f64 = 1e-12;

/// Histogram over `[lo, hi]` normalised to a probability density.
///
/// Each bin holds `count / (total * bin_width)`; the right edge is included
/// in the last bin and values outside the range are ignored.
pub fn density_histogram(values: &[f64], bins: usize, lo: f64, hi: f64) -> Vec<f64> {
    let mut counts = vec![0usize; bins];
    let span = hi - lo;
    if bins == 0 || !(span > 0.0) {
        return vec![0.0; bins];
    }

    for &v in values {
        if v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; bins];
    }

    let bin_width = span / bins as f64;
    counts
        .iter()
        .map(|&c| c as f64 / (total as f64 * bin_width))
        .collect()
}

/// Range spanned by the data, widened by ±0.5 when all values are equal
pub fn data_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// −Σ (d + ε)·ln(d + ε) taken directly over density values
pub fn density_entropy(density: &[f64]) -> f64 {
    -density
        .iter()
        .map(|&d| {
            let d = d + ENTROPY_EPSILON;
            d * d.ln()
        })
        .sum::<f64>()
}

/// Shannon entropy (nats) of `density + ε` rescaled to sum to one
pub fn normalized_entropy(density: &[f64]) -> f64 {
    let total: f64 = density.iter().map(|&d| d + ENTROPY_EPSILON).sum();
    if !(total > 0.0) {
        return 0.0;
    }
    -density
        .iter()
        .map(|&d| {
            let p = (d + ENTROPY_EPSILON) / total;
            p * p.ln()
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_integrates_to_one() {
        let values = [5.0, 15.0, 15.0, 355.0, 360.0];
        let density = density_histogram(&values, 10, 0.0, 360.0);
        let area: f64 = density.iter().map(|d| d * 36.0).sum();
        assert!((area - 1.0).abs() < 1e-12);
        // right edge lands in the last bin
        assert!((density[9] - 2.0 / (5.0 * 36.0)).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let density = density_histogram(&[-1.0, 400.0], 10, 0.0, 360.0);
        assert!(density.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_uniform_probability_entropy() {
        // four equally likely bins → ln 4
        let density = [0.25, 0.25, 0.25, 0.25];
        assert!((normalized_entropy(&density) - 4f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_single_bin_entropy_near_zero() {
        let mut density = vec![0.0; 50];
        density[3] = 1.0;
        assert!(normalized_entropy(&density).abs() < 1e-8);
    }

    #[test]
    fn test_degenerate_range_widened() {
        assert_eq!(data_range(&[2.0, 2.0]), (1.5, 2.5));
        assert_eq!(data_range(&[1.0, 3.0]), (1.0, 3.0));
    }
}
