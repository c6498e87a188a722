//! GRASP configuration.

use super::types::ConstructiveHeuristic;
use crate::error::ConfigError;

/// Configuration parameters for GRASP.
///
/// The run stops at whichever comes first: `max_iterations`, the
/// `time_limit_ms` wall-clock budget, or the incumbent reaching
/// `target_cost`.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{ConstructiveHeuristic, GraspConfig};
///
/// let config = GraspConfig::default()
///     .with_heuristic(ConstructiveHeuristic::Reactive { arms: 10 })
///     .with_max_iterations(1000)
///     .with_first_improving(true)
///     .with_seed(42);
/// assert_eq!(config.max_iterations, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Construction used in every iteration.
    pub heuristic: ConstructiveHeuristic,
    /// Maximum number of construct + improve iterations.
    pub max_iterations: usize,
    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked at the start of each iteration, so a run may overshoot by
    /// one iteration's worth of work.
    pub time_limit_ms: Option<u64>,
    /// Stop once the incumbent cost is at or below this value.
    ///
    /// Costs are minimized; for a maximization objective pass the negated
    /// quality bound.
    pub target_cost: Option<f64>,
    /// First-improving (true) or best-improving (false) local search.
    pub first_improving: bool,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            heuristic: ConstructiveHeuristic::default(),
            max_iterations: 1000,
            time_limit_ms: None,
            target_cost: None,
            first_improving: false,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the constructive heuristic.
    pub fn with_heuristic(mut self, heuristic: ConstructiveHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Runs until the incumbent cost reaches `cost`.
    ///
    /// Lifts the iteration budget; pair with a time limit to bound the run.
    pub fn with_target_cost(mut self, cost: f64) -> Self {
        self.target_cost = Some(cost);
        self.max_iterations = usize::MAX;
        self
    }

    pub fn with_first_improving(mut self, first_improving: bool) -> Self {
        self.first_improving = first_improving;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heuristic.validate()?;
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidIterations(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grasp_config_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.heuristic, ConstructiveHeuristic::Basic { alpha: 0.05 });
        assert!(config.time_limit_ms.is_none());
        assert!(config.target_cost.is_none());
        assert!(!config.first_improving);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_target_cost_lifts_iteration_budget() {
        let config = GraspConfig::default()
            .with_target_cost(-1200.0)
            .with_time_limit_ms(500);
        assert_eq!(config.max_iterations, usize::MAX);
        assert_eq!(config.target_cost, Some(-1200.0));
        assert_eq!(config.time_limit_ms, Some(500));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GraspConfig::default().with_max_iterations(0).validate(),
            Err(ConfigError::InvalidIterations(0))
        );
        assert_eq!(
            GraspConfig::default()
                .with_heuristic(ConstructiveHeuristic::SampledGreedy { sample_size: 0 })
                .validate(),
            Err(ConfigError::InvalidSampleSize(0))
        );
    }
}
