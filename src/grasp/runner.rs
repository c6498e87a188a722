//! GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. Build a solution with the configured constructive heuristic
//! 2. Improve it with local search until a local optimum is reached
//! 3. Replace the incumbent if the result is strictly better
//! 4. Repeat until the iteration, time or target-cost budget runs out
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use super::config::GraspConfig;
use super::construct::{construct_sampled, construct_threshold};
use super::reactive::AlphaMemory;
use super::types::ConstructiveHeuristic;
use crate::budget::{Budget, StopReason};
use crate::error::SearchError;
use crate::evaluator::Evaluator;
use crate::local_search::{LocalSearch, NeighborhoodDescent};
use crate::random::create_rng;
use crate::solution::Solution;

/// Result of a GRASP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspResult {
    /// Best solution found.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    /// `(iteration, cost)` for every strict improvement of the incumbent.
    pub improvements: Vec<(usize, f64)>,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Final alpha distribution, for the reactive heuristic.
    pub alpha_pmf: Option<Vec<f64>>,
}

/// The heuristic instance a run dispatches to.
enum Builder {
    Basic { alpha: f64 },
    SampledGreedy { sample_size: usize },
    Reactive { memory: AlphaMemory },
}

impl Builder {
    fn new(heuristic: ConstructiveHeuristic) -> Self {
        match heuristic {
            ConstructiveHeuristic::Basic { alpha } => Builder::Basic { alpha },
            ConstructiveHeuristic::SampledGreedy { sample_size } => {
                Builder::SampledGreedy { sample_size }
            }
            ConstructiveHeuristic::Reactive { arms } => Builder::Reactive {
                memory: AlphaMemory::new(arms),
            },
        }
    }

    fn build<E: Evaluator + ?Sized, R: Rng>(&mut self, evaluator: &E, rng: &mut R) -> Solution {
        match self {
            Builder::Basic { alpha } => construct_threshold(evaluator, *alpha, rng),
            Builder::SampledGreedy { sample_size } => {
                construct_sampled(evaluator, *sample_size, rng)
            }
            Builder::Reactive { memory } => {
                let arm = memory.choose(rng);
                let solution = construct_threshold(evaluator, memory.alpha(arm), rng);
                memory.record(arm, solution.cost);
                solution
            }
        }
    }

    fn pmf(&self) -> Option<Vec<f64>> {
        match self {
            Builder::Reactive { memory } => Some(memory.pmf().to_vec()),
            _ => None,
        }
    }
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Executes GRASP with the insertion/removal/exchange descent as local search.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the evaluator's instance data
    /// is invalid. Nothing is searched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_grasp::grasp::{ConstructiveHeuristic, GraspConfig, GraspRunner};
    /// use u_grasp::qbf::Qbf;
    ///
    /// let qbf = Qbf::new(vec![
    ///     vec![3.0, -4.0, 0.0],
    ///     vec![0.0, 2.0, 1.0],
    ///     vec![0.0, 0.0, -1.0],
    /// ]);
    /// let config = GraspConfig::default()
    ///     .with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.2 })
    ///     .with_max_iterations(20)
    ///     .with_seed(7);
    /// let result = GraspRunner::run(&qbf, &config).unwrap();
    /// assert!(result.best_cost <= -3.0);
    /// ```
    pub fn run<E: Evaluator + ?Sized>(
        evaluator: &E,
        config: &GraspConfig,
    ) -> Result<GraspResult, SearchError> {
        Self::run_with_cancel(evaluator, config, None)
    }

    /// Runs GRASP with an optional cancellation token.
    ///
    /// The flag is checked at the start of each iteration.
    pub fn run_with_cancel<E: Evaluator + ?Sized>(
        evaluator: &E,
        config: &GraspConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GraspResult, SearchError> {
        let local_search = NeighborhoodDescent::new(config.first_improving);
        Self::run_with_local_search(evaluator, config, &local_search, cancel)
    }

    /// Runs GRASP with a caller-supplied improvement phase.
    #[tracing::instrument(level = "debug", name = "GRASP", skip_all)]
    pub fn run_with_local_search<E, L>(
        evaluator: &E,
        config: &GraspConfig,
        local_search: &L,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GraspResult, SearchError>
    where
        E: Evaluator + ?Sized,
        L: LocalSearch,
    {
        config.validate()?;
        evaluator.validate()?;

        let mut rng = create_rng(config.seed);
        let mut builder = Builder::new(config.heuristic);
        let budget = Budget::new(config.time_limit_ms, config.target_cost, cancel);

        let mut best = Solution::empty();
        evaluator.refresh_cost(&mut best);
        let mut best_iteration = 0;
        let mut improvements = Vec::new();
        let mut iterations = 0;
        let mut stop_reason = StopReason::MaxIterations;

        for iteration in 0..config.max_iterations {
            if let Some(reason) = budget.interrupted() {
                stop_reason = reason;
                break;
            }

            let mut current = builder.build(evaluator, &mut rng);
            local_search.improve(evaluator, &mut current, &mut rng);
            iterations += 1;
            tracing::trace!(
                iteration,
                cost = current.cost,
                size = current.len(),
                "GRASP iteration"
            );

            if current.cost < best.cost {
                tracing::debug!(iteration, cost = current.cost, "GRASP: new incumbent");
                best = current;
                best_iteration = iteration;
                improvements.push((iteration, best.cost));
            }

            if budget.target_reached(best.cost) {
                stop_reason = StopReason::TargetReached;
                break;
            }
        }

        tracing::info!(
            iterations,
            best_cost = best.cost,
            reason = ?stop_reason,
            elapsed_ms = budget.elapsed().as_millis() as u64,
            "GRASP finished"
        );

        Ok(GraspResult {
            best_cost: best.cost,
            best,
            iterations,
            best_iteration,
            improvements,
            stop_reason,
            alpha_pmf: builder.pmf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, EvaluatorError};
    use crate::evaluator::testing::Linear;
    use crate::local_search::NoLocalSearch;
    use crate::qbf::Qbf;
    use rand::SeedableRng;

    fn random_qbf(n: usize, seed: u64) -> Qbf {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if j >= i { rng.random_range(-10.0..10.0) } else { 0.0 })
                    .collect()
            })
            .collect();
        let weights = (0..n).map(|_| rng.random_range(1.0..10.0)).collect();
        Qbf::new(matrix).with_knapsack(weights, 5.0 * n as f64 / 2.0)
    }

    #[test]
    fn test_single_greedy_iteration_picks_best_element() {
        // Independent deltas, one slot: greedy construction takes element 3.
        let eval = Linear::new(vec![-3.0, -1.0, -2.0, -5.0, -4.0]).with_max_size(1);
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.0 })
            .with_max_iterations(1)
            .with_seed(0);
        let result =
            GraspRunner::run_with_local_search(&eval, &config, &NoLocalSearch, None).unwrap();
        assert_eq!(result.best.elements(), &[3]);
        assert_eq!(result.best_cost, -5.0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
    }

    #[test]
    fn test_improvements_strictly_decrease() {
        let qbf = random_qbf(20, 3);
        for heuristic in [
            ConstructiveHeuristic::Basic { alpha: 0.3 },
            ConstructiveHeuristic::SampledGreedy { sample_size: 4 },
            ConstructiveHeuristic::Reactive { arms: 5 },
        ] {
            let config = GraspConfig::default()
                .with_heuristic(heuristic)
                .with_max_iterations(60)
                .with_seed(42);
            let result = GraspRunner::run(&qbf, &config).unwrap();
            assert_eq!(result.iterations, 60);
            assert!(!result.improvements.is_empty());
            for window in result.improvements.windows(2) {
                let ((it0, c0), (it1, c1)) = (window[0], window[1]);
                assert!(it1 > it0);
                assert!(c1 < c0, "incumbent got worse: {c1} >= {c0}");
            }
            assert_eq!(
                *result.improvements.last().unwrap(),
                (result.best_iteration, result.best_cost)
            );
            assert!((result.best_cost - qbf.evaluate(&result.best)).abs() < 1e-9);
            assert!(qbf.weight(&result.best) <= qbf.capacity().unwrap());
        }
    }

    #[test]
    fn test_reactive_reports_pmf() {
        let qbf = random_qbf(12, 8);
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Reactive { arms: 4 })
            .with_max_iterations(40)
            .with_seed(1);
        let result = GraspRunner::run(&qbf, &config).unwrap();
        let pmf = result.alpha_pmf.expect("reactive run reports its pmf");
        assert_eq!(pmf.len(), 4);
        assert!((pmf.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        let basic_config = config.with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.1 });
        let basic = GraspRunner::run(&qbf, &basic_config).unwrap();
        assert!(basic.alpha_pmf.is_none());
    }

    #[test]
    fn test_seed_reproducibility() {
        let qbf = random_qbf(15, 11);
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.5 })
            .with_max_iterations(25)
            .with_seed(99);
        let a = GraspRunner::run(&qbf, &config).unwrap();
        let b = GraspRunner::run(&qbf, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.improvements, b.improvements);
    }

    #[test]
    fn test_target_cost_stops_early() {
        let eval = Linear::new(vec![-3.0, -1.0, -2.0]);
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.0 })
            .with_target_cost(-6.0)
            .with_seed(5);
        let result = GraspRunner::run(&eval, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_cost, -6.0);
    }

    #[test]
    fn test_unreachable_target_keeps_memory_bounded() {
        let eval = Linear::new(vec![-3.0, -1.0, -2.0]);
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Basic { alpha: 1.0 })
            .with_target_cost(-1000.0)
            .with_time_limit_ms(100)
            .with_seed(6);
        let result = GraspRunner::run(&eval, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert!(result.iterations > 0);
        // Strict improvements visit distinct costs of the 8 subsets.
        assert!(result.improvements.len() <= 8);
        assert_eq!(result.best_cost, -6.0);
    }

    #[test]
    fn test_time_limit() {
        let qbf = random_qbf(10, 2);
        let config = GraspConfig::default()
            .with_max_iterations(1_000_000)
            .with_time_limit_ms(0)
            .with_seed(1);
        let result = GraspRunner::run(&qbf, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert_eq!(result.iterations, 0);
        assert!(result.best.is_empty());
        assert_eq!(result.best_cost, 0.0);
    }

    #[test]
    fn test_cancellation() {
        let qbf = random_qbf(10, 2);
        let flag = Arc::new(AtomicBool::new(true));
        let config = GraspConfig::default().with_seed(3);
        let result = GraspRunner::run_with_cancel(&qbf, &config, Some(flag)).unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_config_fails_before_search() {
        let eval = Linear::new(vec![-1.0]);
        let config =
            GraspConfig::default().with_heuristic(ConstructiveHeuristic::Basic { alpha: -0.1 });
        assert_eq!(
            GraspRunner::run(&eval, &config).unwrap_err(),
            SearchError::Config(ConfigError::InvalidAlpha(-0.1))
        );
    }

    #[test]
    fn test_invalid_instance_fails_before_search() {
        let qbf = Qbf::new(vec![vec![1.0, 2.0]]);
        let err = GraspRunner::run(&qbf, &GraspConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Evaluator(EvaluatorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_local_search_reaches_known_optimum() {
        // max x'Ax with a single strongly positive pair {0, 2}.
        let qbf = Qbf::new(vec![
            vec![-1.0, 0.0, 6.0, 0.0],
            vec![0.0, -2.0, 0.0, 0.0],
            vec![0.0, 0.0, -1.0, -3.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ]);
        // Pure greedy always opens with element 3 and gets stuck at {3};
        // random construction escapes it.
        let config = GraspConfig::default()
            .with_heuristic(ConstructiveHeuristic::Basic { alpha: 1.0 })
            .with_max_iterations(200)
            .with_seed(17);
        let result = GraspRunner::run(&qbf, &config).unwrap();
        // {0, 2}: -1 - 1 + 6 = 4; adding 3 gives 4 - 3 + 1 = 2.
        assert_eq!(result.best_cost, -4.0);
        let mut elems = result.best.elements().to_vec();
        elems.sort_unstable();
        assert_eq!(elems, vec![0, 2]);

        let greedy = GraspRunner::run(
            &qbf,
            &config.with_heuristic(ConstructiveHeuristic::Basic { alpha: 0.0 }),
        )
        .unwrap();
        assert_eq!(greedy.best.elements(), &[3]);
        assert_eq!(greedy.best_cost, -1.0);
    }
}
