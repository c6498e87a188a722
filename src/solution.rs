//! Subset solutions.

use std::fmt;

/// A selection of domain elements together with its cost.
///
/// Elements keep their insertion order (used only for display); membership
/// is a set, so an element appears at most once. `cost` holds the value the
/// evaluator last computed for the current elements.
///
/// # Examples
///
/// ```
/// use u_grasp::Solution;
///
/// let mut sol = Solution::empty();
/// assert!(sol.insert(3));
/// assert!(!sol.insert(3));
/// assert_eq!(sol.elements(), &[3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    elements: Vec<usize>,
    /// Cost of the current elements (lower is better).
    pub cost: f64,
}

impl Default for Solution {
    fn default() -> Self {
        Self::empty()
    }
}

impl Solution {
    /// Creates a solution with no elements and an infinite cost.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// Creates a solution from the given elements, dropping duplicates.
    ///
    /// The cost is left at infinity until evaluated.
    pub fn from_elements<I: IntoIterator<Item = usize>>(elements: I) -> Self {
        let mut sol = Self::empty();
        for e in elements {
            sol.insert(e);
        }
        sol
    }

    /// Selected elements in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Iterates over the selected elements.
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

    /// Adds `element`. Returns `false` if it was already selected.
    pub fn insert(&mut self, element: usize) -> bool {
        if self.contains(element) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Removes `element`. Returns `false` if it was not selected.
    pub fn remove(&mut self, element: usize) -> bool {
        match self.elements.iter().position(|&e| e == element) {
            Some(pos) => {
                self.elements.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes every element and resets the cost to infinity.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.cost = f64::INFINITY;
    }

    /// Membership mask over a domain of `domain_size` elements.
    pub(crate) fn mask(&self, domain_size: usize) -> Vec<bool> {
        let mut mask = vec![false; domain_size];
        for &e in &self.elements {
            if e < domain_size {
                mask[e] = true;
            }
        }
        mask
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution: cost=[{}], size=[{}], elements={:?}",
            self.cost,
            self.elements.len(),
            self.elements
        )
    }
}
