//! Tabu Search configuration.

use crate::error::ConfigError;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_grasp::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(10_000)
///     .with_tenure(7)
///     .with_first_improving(true)
///     .with_restart_every(2_000);
/// assert_eq!(config.max_iterations, 10_000);
/// assert_eq!(config.tenure, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of neighborhood moves.
    pub max_iterations: usize,
    /// How many iterations a moved element stays tabu.
    ///
    /// The tabu list holds `2 * tenure` entries: one removal slot and one
    /// insertion slot per iteration.
    pub tenure: usize,
    /// Stop each move category at its first improving move.
    pub first_improving: bool,
    /// Fraction of the candidate list scanned for insertions and exchanges.
    ///
    /// `1.0` scans every candidate; smaller values draw a fresh random
    /// subset each iteration.
    pub sample_fraction: f64,
    /// Rebuild the solution from rarely used elements every this many
    /// iterations. `None` disables restarts.
    pub restart_every: Option<usize>,
    /// Optional wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Stop once the best cost is at or below this value.
    pub target_cost: Option<f64>,
    /// Random seed (None for random).
    pub seed: Option<u64>,
    /// Keep one [`TabuStep`](super::TabuStep) per iteration in the result.
    ///
    /// Off by default: long runs would otherwise grow the trajectory
    /// without bound.
    pub record_trajectory: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tenure: 7,
            first_improving: false,
            sample_fraction: 1.0,
            restart_every: None,
            time_limit_ms: None,
            target_cost: None,
            seed: None,
            record_trajectory: false,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    pub fn with_first_improving(mut self, first_improving: bool) -> Self {
        self.first_improving = first_improving;
        self
    }

    /// Scans a random `fraction` of the candidates each iteration.
    pub fn with_sample_fraction(mut self, fraction: f64) -> Self {
        self.sample_fraction = fraction;
        self
    }

    /// Samples half of the candidate list each iteration.
    pub fn sampled(self) -> Self {
        self.with_sample_fraction(0.5)
    }

    /// Enables frequency-based restarts every `period` iterations.
    pub fn with_restart_every(mut self, period: usize) -> Self {
        self.restart_every = Some(period);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Runs until the best cost reaches `cost`, lifting the iteration budget.
    pub fn with_target_cost(mut self, cost: f64) -> Self {
        self.target_cost = Some(cost);
        self.max_iterations = usize::MAX;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Records the per-iteration move trajectory.
    pub fn with_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidIterations(0));
        }
        if self.tenure == 0 {
            return Err(ConfigError::InvalidTenure(0));
        }
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(ConfigError::InvalidSampleFraction(self.sample_fraction));
        }
        if self.restart_every == Some(0) {
            return Err(ConfigError::InvalidRestartPeriod(0));
        }
        Ok(())
    }
}
