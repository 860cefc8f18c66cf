//! Cursor offsets that sit on a digit or prefix boundary.
//!
//! A [`ValidSelectionSet`] belongs to exactly one formatted string. It is
//! rebuilt from scratch on every reformat and never carried over.
//!
//! # Invariants
//!
//! 1. Offsets are strictly increasing (sorted, no duplicates).
//! 2. [`ValidSelectionSet::clamp`] returns a member whenever the set is
//!    non-empty, and returns the input unchanged when it is empty.

use smallvec::SmallVec;

/// Sorted set of valid cursor offsets (in chars).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidSelectionSet {
    offsets: SmallVec<[usize; 24]>,
}

impl ValidSelectionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single offset.
    #[must_use]
    pub fn single(offset: usize) -> Self {
        let mut set = Self::new();
        set.insert(offset);
        set
    }

    /// Insert an offset, keeping the set sorted.
    pub fn insert(&mut self, offset: usize) {
        // The formatter records offsets in non-decreasing order, so the
        // common case is a push.
        match self.offsets.last() {
            Some(&last) if last == offset => {}
            Some(&last) if last < offset => self.offsets.push(offset),
            None => self.offsets.push(offset),
            Some(_) => {
                if let Err(idx) = self.offsets.binary_search(&offset) {
                    self.offsets.insert(idx, offset);
                }
            }
        }
    }

    /// Whether `offset` is a valid cursor position.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.binary_search(&offset).is_ok()
    }

    /// Snap `offset` onto the set.
    ///
    /// Returns `offset` if it is valid, otherwise the next valid offset after
    /// it, otherwise the last valid offset. An empty set leaves `offset`
    /// untouched.
    #[must_use]
    pub fn clamp(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(_) => offset,
            Err(idx) => match self.offsets.get(idx) {
                Some(&next) => next,
                None => self.offsets.last().copied().unwrap_or(offset),
            },
        }
    }

    /// Smallest valid offset.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.offsets.first().copied()
    }

    /// Largest valid offset.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.offsets.last().copied()
    }

    /// Iterate offsets in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }

    /// Offsets as a sorted slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Remove every offset.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}

impl FromIterator<usize> for ValidSelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for offset in iter {
            set.insert(offset);
        }
        set
    }
}
