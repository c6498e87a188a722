//! Insertion, removal and 2-exchange moves over a subset solution.
//!
//! Both the Tabu engine and the GRASP descent scan the same neighborhood:
//! removals first, then exchanges, then insertions. A move replaces the
//! incumbent choice only when its delta is strictly lower, so ties go to
//! the earliest move in that order.

use crate::evaluator::Evaluator;
use crate::solution::Solution;

/// A single neighborhood move and its cost delta.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Element leaving the solution.
    pub removed: Option<usize>,
    /// Element entering the solution.
    pub inserted: Option<usize>,
    /// Cost change caused by the move.
    pub delta: f64,
}

impl Move {
    pub fn removal(element: usize, delta: f64) -> Self {
        Self {
            removed: Some(element),
            inserted: None,
            delta,
        }
    }

    pub fn insertion(element: usize, delta: f64) -> Self {
        Self {
            removed: None,
            inserted: Some(element),
            delta,
        }
    }

    pub fn exchange(element_in: usize, element_out: usize, delta: f64) -> Self {
        Self {
            removed: Some(element_out),
            inserted: Some(element_in),
            delta,
        }
    }

    /// Applies the move to `solution` without re-evaluating it.
    pub fn apply(&self, solution: &mut Solution) {
        if let Some(out) = self.removed {
            solution.remove(out);
        }
        if let Some(into) = self.inserted {
            solution.insert(into);
        }
    }
}

/// Finds the lowest-delta admissible move.
///
/// `candidates` are the elements allowed to enter the solution. A move is
/// considered only if `admissible` accepts it. With `first_improving`, each
/// category stops scanning at the first move that beats the best delta seen
/// so far.
///
/// Returns `None` when no move is admissible.
pub fn best_move<E, F>(
    evaluator: &E,
    solution: &Solution,
    candidates: &[usize],
    first_improving: bool,
    admissible: F,
) -> Option<Move>
where
    E: Evaluator + ?Sized,
    F: Fn(&Move) -> bool,
{
    let mut best: Option<Move> = None;
    let mut min_delta = f64::INFINITY;

    let mut consider = |mv: Move| -> bool {
        if mv.delta < min_delta && admissible(&mv) {
            min_delta = mv.delta;
            best = Some(mv);
            return true;
        }
        false
    };

    for &out in solution {
        let mv = Move::removal(out, evaluator.removal_cost(out, solution));
        if consider(mv) && first_improving {
            break;
        }
    }

    'exchange: for &into in candidates {
        for &out in solution {
            let mv = Move::exchange(into, out, evaluator.exchange_cost(into, out, solution));
            if consider(mv) && first_improving {
                break 'exchange;
            }
        }
    }

    for &into in candidates {
        let mv = Move::insertion(into, evaluator.insertion_cost(into, solution));
        if consider(mv) && first_improving {
            break;
        }
    }

    best
}
