//! Greedy randomized construction.
//!
//! Every builder starts from the empty solution and adds one element per
//! step. A step is only taken while the best insertion delta on offer
//! still lowers the running cost; an exhausted candidate list or an empty
//! RCL also ends the build.

use rand::Rng;

use crate::candidate::CandidateList;
use crate::evaluator::{improves, Evaluator};
use crate::solution::Solution;

/// Builds a solution with a threshold-based RCL.
///
/// At each step the RCL holds every candidate whose insertion delta is at
/// most `min + alpha * (max - min)`; one RCL member is committed uniformly
/// at random.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::construct_threshold;
/// use u_grasp::qbf::Qbf;
/// use u_grasp::random::create_rng;
///
/// let qbf = Qbf::new(vec![vec![2.0, -1.0], vec![0.0, 3.0]]);
/// let sol = construct_threshold(&qbf, 0.0, &mut create_rng(Some(1)));
/// assert_eq!(sol.cost, -4.0);
/// ```
pub fn construct_threshold<E, R>(evaluator: &E, alpha: f64, rng: &mut R) -> Solution
where
    E: Evaluator + ?Sized,
    R: Rng,
{
    let mut candidates = CandidateList::make(evaluator);
    let mut rcl = candidates.make_rcl();
    let mut deltas = Vec::with_capacity(candidates.len());
    let mut solution = Solution::empty();
    evaluator.refresh_cost(&mut solution);

    loop {
        candidates.update(evaluator, &solution);
        if candidates.is_empty() {
            break;
        }

        deltas.clear();
        let mut min_cost = f64::INFINITY;
        let mut max_cost = f64::NEG_INFINITY;
        for &c in candidates.iter() {
            let delta = evaluator.insertion_cost(c, &solution);
            min_cost = min_cost.min(delta);
            max_cost = max_cost.max(delta);
            deltas.push(delta);
        }

        if !improves(solution.cost, min_cost) {
            break;
        }

        fill_rcl(&mut rcl, candidates.as_slice(), &deltas, min_cost, max_cost, alpha);
        if rcl.is_empty() {
            break;
        }

        let chosen = rcl[rng.random_range(0..rcl.len())];
        candidates.remove(chosen);
        solution.insert(chosen);
        evaluator.refresh_cost(&mut solution);
        rcl.clear();
    }

    solution
}

/// Builds a solution by sampling at most `sample_size` candidates per step
/// and committing the one with the lowest insertion delta.
///
/// Candidates sampled but not chosen go back to the candidate list.
pub fn construct_sampled<E, R>(evaluator: &E, sample_size: usize, rng: &mut R) -> Solution
where
    E: Evaluator + ?Sized,
    R: Rng,
{
    let mut candidates = CandidateList::make(evaluator);
    let mut sample = candidates.make_rcl();
    let mut solution = Solution::empty();
    evaluator.refresh_cost(&mut solution);

    loop {
        candidates.update(evaluator, &solution);

        let k = sample_size.min(candidates.len());
        let mut best: Option<(usize, f64)> = None;
        for _ in 0..k {
            let Some(e) = candidates.take_random(rng) else {
                break;
            };
            sample.push(e);
            let delta = evaluator.insertion_cost(e, &solution);
            if best.is_none_or(|(_, d)| delta < d) {
                best = Some((e, delta));
            }
        }

        let Some((chosen, delta)) = best else {
            break;
        };
        if !improves(solution.cost, delta) {
            candidates.extend(sample.drain(..));
            break;
        }

        solution.insert(chosen);
        candidates.extend(sample.drain(..).filter(|&e| e != chosen));
        evaluator.refresh_cost(&mut solution);
    }

    solution
}

/// Collects the candidates whose delta is within the `alpha` threshold.
pub(crate) fn fill_rcl(
    rcl: &mut Vec<usize>,
    candidates: &[usize],
    deltas: &[f64],
    min_cost: f64,
    max_cost: f64,
    alpha: f64,
) {
    let threshold = min_cost + alpha * (max_cost - min_cost);
    rcl.extend(
        candidates
            .iter()
            .zip(deltas)
            .filter(|&(_, &d)| d <= threshold)
            .map(|(&c, _)| c),
    );
}
