//! Long-term frequency memory and restart diversification.

use crate::evaluator::Evaluator;
use crate::solution::Solution;

/// Per-element count of how often each element sat in the current solution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyMemory {
    counts: Vec<u64>,
}

impl FrequencyMemory {
    pub fn new(domain_size: usize) -> Self {
        Self {
            counts: vec![0; domain_size],
        }
    }

    /// Increments the counter of every element in `solution`.
    pub fn record(&mut self, solution: &Solution) {
        for &e in solution {
            self.counts[e] += 1;
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Elements sorted by ascending frequency, ties by index.
    pub fn least_used_first(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.counts.len()).collect();
        order.sort_by_key(|&e| self.counts[e]);
        order
    }

    pub fn reset(&mut self) {
        self.counts.fill(0);
    }
}

/// Builds a fresh solution from the least frequently used elements.
///
/// Walks the elements in ascending frequency and adds each one that the
/// evaluator admits and that still fits, until nothing else fits. The
/// memory is reset afterwards.
pub fn diversified_restart<E: Evaluator + ?Sized>(
    evaluator: &E,
    memory: &mut FrequencyMemory,
) -> Solution {
    let mut solution = Solution::empty();
    for e in memory.least_used_first() {
        if evaluator.admits(e) && evaluator.fits(e, &solution) {
            solution.insert(e);
        }
    }
    evaluator.refresh_cost(&mut solution);
    memory.reset();
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qbf::Qbf;

    fn knapsack() -> Qbf {
        Qbf::new(vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 2.0, 0.0, 0.0],
            vec![0.0, 0.0, 3.0, 0.0],
            vec![0.0, 0.0, 0.0, 4.0],
        ])
        .with_knapsack(vec![3.0, 2.0, 2.0, 1.0], 4.0)
    }

    #[test]
    fn test_record_and_order() {
        let mut memory = FrequencyMemory::new(4);
        memory.record(&Solution::from_elements([0, 1]));
        memory.record(&Solution::from_elements([0, 3]));
        assert_eq!(memory.counts(), &[2, 1, 0, 1]);
        assert_eq!(memory.least_used_first(), vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_restart_uses_rare_elements_and_resets() {
        let qbf = knapsack();
        let mut memory = FrequencyMemory::new(4);
        for _ in 0..5 {
            memory.record(&Solution::from_elements([0, 3]));
        }
        memory.record(&Solution::from_elements([1]));

        // Order: 2 (0), 1 (1), 0 (5), 3 (5). 2 + 1 fill the capacity of 4.
        let sol = diversified_restart(&qbf, &mut memory);
        assert_eq!(sol.elements(), &[2, 1]);
        assert_eq!(sol.cost, qbf.evaluate(&sol));
        assert!(memory.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_restart_solution_is_maximal_and_feasible() {
        let qbf = knapsack();
        let mut memory = FrequencyMemory::new(4);
        memory.record(&Solution::from_elements([1, 2]));
        let sol = diversified_restart(&qbf, &mut memory);
        assert!(qbf.weight(&sol) <= 4.0);
        for e in 0..4 {
            if !sol.contains(e) {
                assert!(!qbf.fits(e, &sol), "element {e} still fits into {sol}");
            }
        }
    }
}
