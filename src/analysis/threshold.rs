// ThresholdEstimator - reduces frame features to one energy threshold
//
// The segment detector compares every frame energy against a single scalar
// computed once per detection call from the complete feature set. The
// estimator is a seam: anything deterministic over (energy[], zcr[]) works.
//
// Shipped estimators:
// - MeanStdThreshold: mean(energy) + k * stddev(energy)
// - PercentileThreshold: nearest-rank percentile of energy
// - FixedThreshold: constant value
// - any Fn(&[f64], &[u32]) -> f64 closure

/// Computes the energy threshold for one detection call
///
/// Implementations must be deterministic: identical inputs produce the
/// identical threshold. Both slices have one entry per frame.
pub trait ThresholdEstimator: Send + Sync {
    fn estimate(&self, energy: &[f64], zcr: &[u32]) -> f64;
}

impl<F> ThresholdEstimator for F
where
    F: Fn(&[f64], &[u32]) -> f64 + Send + Sync,
{
    fn estimate(&self, energy: &[f64], zcr: &[u32]) -> f64 {
        self(energy, zcr)
    }
}

/// Mean plus `k` population standard deviations of the frame energies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStdThreshold {
    k: f64,
}

impl MeanStdThreshold {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl Default for MeanStdThreshold {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ThresholdEstimator for MeanStdThreshold {
    fn estimate(&self, energy: &[f64], _zcr: &[u32]) -> f64 {
        if energy.is_empty() {
            return 0.0;
        }

        let n = energy.len() as f64;
        let mean = energy.iter().sum::<f64>() / n;
        let variance = energy.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;

        mean + self.k * variance.sqrt()
    }
}

/// Nearest-rank percentile of the frame energies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileThreshold {
    percentile: f64,
}

impl PercentileThreshold {
    /// `percentile` is clamped to [0, 100]
    pub fn new(percentile: f64) -> Self {
        Self {
            percentile: percentile.clamp(0.0, 100.0),
        }
    }
}

impl ThresholdEstimator for PercentileThreshold {
    fn estimate(&self, energy: &[f64], _zcr: &[u32]) -> f64 {
        if energy.is_empty() {
            return 0.0;
        }

        let mut sorted = energy.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Nearest rank: ceil(p/100 * n), 1-based
        let rank = ((self.percentile / 100.0) * sorted.len() as f64).ceil() as usize;
        sorted[rank.clamp(1, sorted.len()) - 1]
    }
}

/// Constant threshold, ignores the features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThreshold(pub f64);

impl ThresholdEstimator for FixedThreshold {
    fn estimate(&self, _energy: &[f64], _zcr: &[u32]) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std_on_constant_energy() {
        let estimator = MeanStdThreshold::new(2.0);
        let threshold = estimator.estimate(&[4.0; 10], &[0; 10]);
        assert_eq!(threshold, 4.0, "zero deviation leaves only the mean");
    }

    #[test]
    fn test_mean_std_known_values() {
        // mean 5, population stddev 2
        let energy = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let threshold = MeanStdThreshold::new(0.5).estimate(&energy, &[0; 8]);
        assert!((threshold - 6.0).abs() < 1e-12, "got {threshold}");
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let energy: Vec<f64> = (1..=10).map(f64::from).collect();
        let zcr = vec![0; energy.len()];

        assert_eq!(PercentileThreshold::new(50.0).estimate(&energy, &zcr), 5.0);
        assert_eq!(PercentileThreshold::new(90.0).estimate(&energy, &zcr), 9.0);
        assert_eq!(PercentileThreshold::new(100.0).estimate(&energy, &zcr), 10.0);
        assert_eq!(PercentileThreshold::new(0.0).estimate(&energy, &zcr), 1.0);
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let zcr = [0; 5];
        let a = PercentileThreshold::new(60.0).estimate(&[5.0, 1.0, 4.0, 2.0, 3.0], &zcr);
        let b = PercentileThreshold::new(60.0).estimate(&[1.0, 2.0, 3.0, 4.0, 5.0], &zcr);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_features_yield_zero() {
        assert_eq!(MeanStdThreshold::default().estimate(&[], &[]), 0.0);
        assert_eq!(PercentileThreshold::new(75.0).estimate(&[], &[]), 0.0);
    }

    #[test]
    fn test_closure_estimator() {
        let max_energy = |energy: &[f64], _zcr: &[u32]| energy.iter().copied().fold(0.0, f64::max);
        assert_eq!(max_energy.estimate(&[1.0, 3.0, 2.0], &[0, 0, 0]), 3.0);
    }

    #[test]
    fn test_boxed_estimator_delegates() {
        let boxed: Box<dyn ThresholdEstimator> = Box::new(FixedThreshold(1.25));
        assert_eq!(boxed.as_ref().estimate(&[9.0], &[1]), 1.25);
    }
}
