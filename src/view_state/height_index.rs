//! HeightIndex - O(log n) prefix sums and lower_bound via Fenwick tree
//!
//! Maps between entry indices and display rows of a list pane whose entries
//! fold to different heights.
//!
//! # Complexity
//!
//! - `from_heights`: O(n log n)
//! - `prefix_sum`, `start_of`: O(log n)
//! - `lower_bound`: O(log² n)

/// Cumulative heights of a sequence of folded entries.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, but we expose 0-indexed API)
    tree: Vec<isize>,
}

impl HeightIndex {
    /// Build an index over the given per-entry heights.
    ///
    /// # Examples
    ///
    /// ```
    /// # use panekit::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights(&[3, 4, 5]);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.total(), 12);
    /// ```
    pub fn from_heights(heights: &[usize]) -> Self {
        let mut tree = vec![0; heights.len()];
        for (i, &height) in heights.iter().enumerate() {
            fenwick::array::update(&mut tree, i, height as isize);
        }
        Self { tree }
    }

    /// Cumulative height up to and including `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// ```
    /// # use panekit::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights(&[3, 4, 5]);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// First row occupied by entry `index`.
    pub fn start_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Height of entry `index`.
    pub fn height_of(&self, index: usize) -> usize {
        self.prefix_sum(index) - self.start_of(index)
    }

    /// Entry containing display row `row`, or `None` past the end.
    ///
    /// ```
    /// # use panekit::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights(&[10, 20, 15]);
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(44), Some(2));
    /// assert_eq!(index.lower_bound(45), None);
    /// ```
    pub fn lower_bound(&self, row: usize) -> Option<usize> {
        // Entry i covers [prefix_sum(i-1), prefix_sum(i))
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > row {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Total height of all entries.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
