//! Candidate list management.
//!
//! The candidate list (CL) holds the elements that are outside the current
//! solution and may still be added to it. The restricted candidate list
//! (RCL) is a plain `Vec<usize>` rebuilt at every constructive step.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::evaluator::Evaluator;
use crate::solution::Solution;

/// Elements eligible to enter a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    elements: Vec<usize>,
}

impl CandidateList {
    /// Every domain element the evaluator admits (makeCL).
    pub fn make<E: Evaluator + ?Sized>(evaluator: &E) -> Self {
        Self {
            elements: (0..evaluator.domain_size())
                .filter(|&e| evaluator.admits(e))
                .collect(),
        }
    }

    /// Builds a list from explicit elements, preserving their order.
    pub fn from_elements(elements: Vec<usize>) -> Self {
        Self { elements }
    }

    /// An empty restricted candidate list sized for this list (makeRCL).
    pub fn make_rcl(&self) -> Vec<usize> {
        Vec::with_capacity(self.elements.len())
    }

    /// Drops candidates that no longer fit into `solution` (updateCL).
    pub fn update<E: Evaluator + ?Sized>(&mut self, evaluator: &E, solution: &Solution) {
        self.elements.retain(|&e| evaluator.fits(e, solution));
    }

    /// Rebuilds the list as the admitted, fitting complement of `solution`.
    pub fn refresh<E: Evaluator + ?Sized>(&mut self, evaluator: &E, solution: &Solution) {
        let n = evaluator.domain_size();
        let selected = solution.mask(n);
        self.elements.clear();
        self.elements.extend(
            (0..n).filter(|&e| !selected[e] && evaluator.admits(e) && evaluator.fits(e, solution)),
        );
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: usize) -> bool {
        self.elements.contains(&element)
    }

    /// Appends `element` unless already present.
    pub fn push(&mut self, element: usize) {
        if !self.contains(element) {
            self.elements.push(element);
        }
    }

    /// Removes `element`. Returns `false` if it was absent.
    pub fn remove(&mut self, element: usize) -> bool {
        match self.elements.iter().position(|&e| e == element) {
            Some(pos) => {
                self.elements.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes and returns a uniformly random candidate.
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.elements.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.elements.len());
        Some(self.elements.swap_remove(idx))
    }

    /// Returns elements to the list.
    pub fn extend<I: IntoIterator<Item = usize>>(&mut self, elements: I) {
        for e in elements {
            self.push(e);
        }
    }

    /// A random subset of `round(len * fraction)` candidates.
    pub fn sample<R: Rng>(&self, fraction: f64, rng: &mut R) -> Vec<usize> {
        let k = ((self.elements.len() as f64) * fraction).round() as usize;
        let mut pool = self.elements.clone();
        pool.shuffle(rng);
        pool.truncate(k.min(pool.len()));
        pool
    }
}
