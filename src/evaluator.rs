//! The objective-function contract consumed by the search engines.

use crate::error::EvaluatorError;
use crate::solution::Solution;

/// Computes full costs and incremental deltas for a subset problem.
///
/// Elements are the integers `0..domain_size()`. Costs are minimized; a
/// maximization objective should return its negated value.
///
/// Delta methods must agree with [`evaluate`](Evaluator::evaluate): for an
/// element `e` not in `sol`, adding `e` changes the full cost by exactly
/// `insertion_cost(e, sol)` (up to rounding), and likewise for removal and
/// exchange.
///
/// Feasibility is the evaluator's business. [`admits`](Evaluator::admits)
/// is a static filter applied when the candidate list is created,
/// [`fits`](Evaluator::fits) is re-checked against the current solution
/// every time the list is updated.
///
/// # Examples
///
/// ```
/// use u_grasp::{Evaluator, Solution};
///
/// /// Independent element values.
/// struct Linear(Vec<f64>);
///
/// impl Evaluator for Linear {
///     fn domain_size(&self) -> usize { self.0.len() }
///     fn evaluate(&self, sol: &Solution) -> f64 { sol.iter().map(|&e| self.0[e]).sum() }
///     fn insertion_cost(&self, e: usize, sol: &Solution) -> f64 {
///         if sol.contains(e) { 0.0 } else { self.0[e] }
///     }
///     fn removal_cost(&self, e: usize, sol: &Solution) -> f64 {
///         if sol.contains(e) { -self.0[e] } else { 0.0 }
///     }
///     fn exchange_cost(&self, e_in: usize, e_out: usize, sol: &Solution) -> f64 {
///         self.insertion_cost(e_in, sol) + self.removal_cost(e_out, sol)
///     }
/// }
/// ```
pub trait Evaluator {
    /// Number of selectable elements.
    fn domain_size(&self) -> usize;

    /// Full cost of `solution`.
    fn evaluate(&self, solution: &Solution) -> f64;

    /// Cost change from adding `element` to `solution`.
    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from removing `element` from `solution`.
    fn removal_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from swapping `element_out` for `element_in`.
    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64;

    /// Whether `element` may ever enter a solution.
    fn admits(&self, _element: usize) -> bool {
        true
    }

    /// Whether `element` can be added to `solution` without breaking feasibility.
    fn fits(&self, _element: usize, _solution: &Solution) -> bool {
        true
    }

    /// Checks the instance data. Called once before a run starts.
    fn validate(&self) -> Result<(), EvaluatorError> {
        Ok(())
    }

    /// Re-evaluates `solution` and stores the result in its `cost`.
    fn refresh_cost(&self, solution: &mut Solution) {
        solution.cost = self.evaluate(solution);
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn domain_size(&self) -> usize {
        (**self).domain_size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        (**self).evaluate(solution)
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        (**self).insertion_cost(element, solution)
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        (**self).removal_cost(element, solution)
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        (**self).exchange_cost(element_in, element_out, solution)
    }

    fn admits(&self, element: usize) -> bool {
        (**self).admits(element)
    }

    fn fits(&self, element: usize, solution: &Solution) -> bool {
        (**self).fits(element, solution)
    }

    fn validate(&self) -> Result<(), EvaluatorError> {
        (**self).validate()
    }
}

/// Returns `true` if adding `delta` to `cost` numerically lowers it.
///
/// Deltas too small to change an `f64` sum do not count as improvements.
#[inline]
pub(crate) fn improves(cost: f64, delta: f64) -> bool {
    cost + delta < cost
}
