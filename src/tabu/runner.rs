//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build an initial solution greedily (random tie-breaking)
//! 2. At each iteration:
//!    a. Scan removals, exchanges and insertions
//!    b. Take the best move whose elements are not tabu, or a tabu move
//!       that would set a new global best (aspiration)
//!    c. Push the removed and inserted elements onto the tabu list
//!    d. Optionally record element frequencies and restart from rarely
//!       used elements
//!    e. Update the global best if improved
//! 3. Terminate after the iteration, time or target-cost budget
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::config::TabuConfig;
use super::diversify::{diversified_restart, FrequencyMemory};
use super::tabu_list::TabuList;
use crate::budget::{Budget, StopReason};
use crate::candidate::CandidateList;
use crate::error::SearchError;
use crate::evaluator::Evaluator;
use crate::grasp::construct_threshold;
use crate::neighborhood::{best_move, Move};
use crate::random::create_rng;
use crate::solution::Solution;

/// One iteration of a Tabu Search run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuStep {
    /// The applied move, or `None` if nothing was admissible.
    pub applied: Option<Move>,
    /// Current cost after the move (and any restart).
    pub cost: f64,
    /// Best cost before the move was chosen.
    pub best_before: f64,
    /// Whether the solution was rebuilt by a restart this iteration.
    pub restarted: bool,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
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
    /// Moves applied, one entry per iteration. Empty unless
    /// [`TabuConfig::record_trajectory`] is set.
    pub trajectory: Vec<TabuStep>,
    /// Number of diversification restarts.
    pub restarts: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given evaluator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the evaluator's instance data
    /// is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_grasp::qbf::Qbf;
    /// use u_grasp::tabu::{TabuConfig, TabuRunner};
    ///
    /// let qbf = Qbf::new(vec![
    ///     vec![-1.0, 0.0, 6.0],
    ///     vec![0.0, 2.0, -5.0],
    ///     vec![0.0, 0.0, -1.0],
    /// ]);
    /// let config = TabuConfig::default().with_tenure(1).with_max_iterations(50).with_seed(3);
    /// let result = TabuRunner::run(&qbf, &config).unwrap();
    /// assert_eq!(result.best_cost, -4.0);
    /// ```
    pub fn run<E: Evaluator + ?Sized>(
        evaluator: &E,
        config: &TabuConfig,
    ) -> Result<TabuResult, SearchError> {
        Self::run_with_cancel(evaluator, config, None)
    }

    /// Runs Tabu Search with an optional cancellation token.
    #[tracing::instrument(level = "debug", name = "Tabu Search", skip_all)]
    pub fn run_with_cancel<E: Evaluator + ?Sized>(
        evaluator: &E,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult, SearchError> {
        config.validate()?;
        evaluator.validate()?;

        let mut rng = create_rng(config.seed);
        let budget = Budget::new(config.time_limit_ms, config.target_cost, cancel);

        let mut current = construct_threshold(evaluator, 0.0, &mut rng);
        let mut best = current.clone();
        let mut best_iteration = 0;
        tracing::debug!(cost = current.cost, size = current.len(), "Tabu: initial solution");

        let mut tabu = TabuList::new(config.tenure);
        let mut candidates = CandidateList::default();
        let mut frequency = config
            .restart_every
            .map(|_| FrequencyMemory::new(evaluator.domain_size()));

        let mut improvements = Vec::new();
        let mut trajectory = Vec::new();
        let mut iterations = 0;
        let mut restarts = 0;
        let mut stop_reason = StopReason::MaxIterations;

        for iteration in 0..config.max_iterations {
            if let Some(reason) = budget.interrupted() {
                stop_reason = reason;
                break;
            }

            candidates.refresh(evaluator, &current);
            let pool = if config.sample_fraction < 1.0 {
                candidates.sample(config.sample_fraction, &mut rng)
            } else {
                candidates.as_slice().to_vec()
            };

            let best_before = best.cost;
            let current_cost = current.cost;
            let chosen = best_move(
                evaluator,
                &current,
                &pool,
                config.first_improving,
                |mv| {
                    let touches_tabu = mv.removed.is_some_and(|e| tabu.contains(e))
                        || mv.inserted.is_some_and(|e| tabu.contains(e));
                    !touches_tabu || current_cost + mv.delta < best_before
                },
            );

            tabu.push(chosen.and_then(|mv| mv.removed));
            tabu.push(chosen.and_then(|mv| mv.inserted));
            if let Some(mv) = chosen {
                mv.apply(&mut current);
                evaluator.refresh_cost(&mut current);
            }

            let mut restarted = false;
            if let (Some(memory), Some(period)) = (frequency.as_mut(), config.restart_every) {
                memory.record(&current);
                if (iteration + 1) % period == 0 {
                    current = diversified_restart(evaluator, memory);
                    tabu.clear();
                    restarts += 1;
                    restarted = true;
                    tracing::debug!(iteration, cost = current.cost, "Tabu: restart");
                }
            }

            if config.record_trajectory {
                trajectory.push(TabuStep {
                    applied: chosen,
                    cost: current.cost,
                    best_before,
                    restarted,
                });
            }
            iterations += 1;
            tracing::trace!(iteration, cost = current.cost, ?chosen, "Tabu iteration");

            if current.cost < best.cost {
                tracing::debug!(iteration, cost = current.cost, "Tabu: new incumbent");
                best = current.clone();
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
            restarts,
            reason = ?stop_reason,
            elapsed_ms = budget.elapsed().as_millis() as u64,
            "Tabu Search finished"
        );

        Ok(TabuResult {
            best_cost: best.cost,
            best,
            iterations,
            best_iteration,
            improvements,
            trajectory,
            restarts,
            stop_reason,
        })
    }
}
