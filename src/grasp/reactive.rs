//! Reactive alpha selection.
//!
//! Keeps a probability mass function over a discrete set of alpha values
//! and shifts it toward the values whose solutions score best on average.
//!
//! # Reference
//!
//! Prais, M. & Ribeiro, C. C. (2000). "Reactive GRASP: An application to a
//! matrix decomposition problem in TDMA traffic assignment",
//! *INFORMS Journal on Computing* 12(3), 164-176.

use rand::Rng;

/// Share of the quality spread granted to the worst arm when mean
/// qualities have to be shifted to become positive.
const FLOOR_SHARE: f64 = 0.1;

/// Alpha arms with their sampling distribution and observed quality.
///
/// Quality is the negated solution cost, so higher is better.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaMemory {
    alphas: Vec<f64>,
    pmf: Vec<f64>,
    quality_sum: Vec<f64>,
    count: Vec<u64>,
    prefix: Vec<f64>,
}

impl AlphaMemory {
    /// Creates `arms` alpha values `(i + 1) / arms` with a uniform PMF.
    ///
    /// # Panics
    ///
    /// Panics if `arms` is zero.
    pub fn new(arms: usize) -> Self {
        assert!(arms > 0, "reactive GRASP needs at least one alpha");
        Self {
            alphas: (0..arms).map(|i| (i + 1) as f64 / arms as f64).collect(),
            pmf: vec![1.0 / arms as f64; arms],
            quality_sum: vec![0.0; arms],
            count: vec![0; arms],
            prefix: vec![0.0; arms],
        }
    }

    pub fn arms(&self) -> usize {
        self.alphas.len()
    }

    pub fn alpha(&self, arm: usize) -> f64 {
        self.alphas[arm]
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    /// Current sampling probabilities, one per arm.
    pub fn pmf(&self) -> &[f64] {
        &self.pmf
    }

    /// Number of solutions recorded per arm.
    pub fn counts(&self) -> &[u64] {
        &self.count
    }

    /// Mean observed quality of `arm`, if it has been tried.
    pub fn mean_quality(&self, arm: usize) -> Option<f64> {
        (self.count[arm] > 0).then(|| self.quality_sum[arm] / self.count[arm] as f64)
    }

    /// Draws an arm by inverse-CDF sampling over the PMF.
    pub fn choose<R: Rng>(&mut self, rng: &mut R) -> usize {
        let mut acc = 0.0;
        for (p, &mass) in self.prefix.iter_mut().zip(&self.pmf) {
            acc += mass;
            *p = acc;
        }
        let roll = rng.random::<f64>() * acc;
        self.prefix
            .partition_point(|&p| p <= roll)
            .min(self.alphas.len() - 1)
    }

    /// Records the cost of a solution built with `arm` and reweights.
    pub fn record(&mut self, arm: usize, cost: f64) {
        self.quality_sum[arm] += -cost;
        self.count[arm] += 1;
        self.update_distribution();
    }

    /// Recomputes the PMF proportional to each arm's mean quality.
    ///
    /// Nothing changes until every arm has been tried at least once. An
    /// observation counts even when its quality is exactly zero; the shift
    /// below keeps such arms weighted, so no nonzero-sum gate is needed. When
    /// some mean quality is not positive, means are shifted so the worst arm
    /// keeps a small positive weight. If all means coincide, or the
    /// weights are not finite, the previous PMF is kept.
    fn update_distribution(&mut self) {
        if self.count.iter().any(|&c| c == 0) {
            return;
        }
        let means: Vec<f64> = self
            .quality_sum
            .iter()
            .zip(&self.count)
            .map(|(&s, &c)| s / c as f64)
            .collect();
        let lo = means.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let weights: Vec<f64> = if lo > 0.0 {
            means
        } else {
            let spread = hi - lo;
            if spread <= f64::EPSILON * hi.abs().max(1.0) {
                return;
            }
            means.iter().map(|m| m - lo + FLOOR_SHARE * spread).collect()
        };

        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return;
        }
        for (p, w) in self.pmf.iter_mut().zip(weights) {
            *p = w / total;
        }
    }
}
