//! GRASP improvement phase.

use rand::Rng;

use crate::candidate::CandidateList;
use crate::evaluator::{improves, Evaluator};
use crate::neighborhood::best_move;
use crate::solution::Solution;

/// Improves a constructed solution until it reaches a local optimum.
///
/// Implementations must leave `solution.cost` equal to the evaluator's
/// full cost of the returned elements.
pub trait LocalSearch {
    fn improve<E: Evaluator + ?Sized, R: Rng>(
        &self,
        evaluator: &E,
        solution: &mut Solution,
        rng: &mut R,
    );
}

/// Skips the improvement phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalSearch;

impl LocalSearch for NoLocalSearch {
    fn improve<E: Evaluator + ?Sized, R: Rng>(&self, _: &E, _: &mut Solution, _: &mut R) {}
}

/// Descent over insertion, removal and 2-exchange moves.
///
/// Applies improving moves until none is left. With `first_improving` each
/// move category stops at its first improving move; otherwise the best
/// move of the whole neighborhood is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodDescent {
    pub first_improving: bool,
}

impl NeighborhoodDescent {
    pub fn new(first_improving: bool) -> Self {
        Self { first_improving }
    }
}

impl LocalSearch for NeighborhoodDescent {
    fn improve<E: Evaluator + ?Sized, R: Rng>(
        &self,
        evaluator: &E,
        solution: &mut Solution,
        _rng: &mut R,
    ) {
        let mut candidates = CandidateList::default();
        loop {
            candidates.refresh(evaluator, solution);
            let current = solution.cost;
            let mv = best_move(
                evaluator,
                solution,
                candidates.as_slice(),
                self.first_improving,
                |m| improves(current, m.delta),
            );
            let Some(mv) = mv else { break };
            mv.apply(solution);
            evaluator.refresh_cost(solution);
            // Guards against deltas that disagree with the full evaluation.
            if solution.cost >= current {
                break;
            }
        }
    }
}
