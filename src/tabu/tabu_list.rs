//! Fixed-capacity tabu memory.

/// A FIFO ring of recently moved elements.
///
/// Holds `2 * tenure` slots. Each iteration pushes two entries, the removed
/// element then the inserted one, with `None` standing in for a move that
/// had no removal or no insertion. Every push overwrites the oldest slot.
///
/// # Examples
///
/// ```
/// use u_grasp::tabu::TabuList;
///
/// let mut tl = TabuList::new(1);
/// tl.push(Some(4));
/// tl.push(None);
/// assert!(tl.contains(4));
/// tl.push(None);
/// assert!(!tl.contains(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuList {
    slots: Vec<Option<usize>>,
    head: usize,
}

impl TabuList {
    /// Creates a list for the given tenure, filled with sentinels.
    ///
    /// # Panics
    ///
    /// Panics if `tenure` is zero.
    pub fn new(tenure: usize) -> Self {
        assert!(tenure > 0, "tabu tenure must be positive");
        Self {
            slots: vec![None; 2 * tenure],
            head: 0,
        }
    }

    /// Number of slots (`2 * tenure`).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes `entry` over the oldest slot and returns what was evicted.
    pub fn push(&mut self, entry: Option<usize>) -> Option<usize> {
        let evicted = std::mem::replace(&mut self.slots[self.head], entry);
        self.head = (self.head + 1) % self.slots.len();
        evicted
    }

    pub fn contains(&self, element: usize) -> bool {
        self.slots.contains(&Some(element))
    }

    /// Resets every slot to the sentinel.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.head = 0;
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer).copied()
    }
}
