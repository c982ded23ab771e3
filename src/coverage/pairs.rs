//! General pair set: the unit of agreement is any ordered position pair.

use crate::coverage::mask::PositionMask;

/// Counts ordered position pairs `(i, j)` with `i <= j` (self-pairs
/// included) whose endpoints are both covered.
///
/// A sequence of length `n` has `n(n+1)/2` pairs in total; with `m` covered
/// positions, `m(m+1)/2` of them are covered.
#[derive(Debug, Clone)]
pub struct PairSet {
    mask: PositionMask,
}

impl PairSet {
    pub fn new(len: usize) -> Self {
        Self {
            mask: PositionMask::new(len),
        }
    }

    /// See [`PositionMask::add_interval`].
    pub fn add_interval(&mut self, start: usize, end: usize, excluded: &[usize]) {
        self.mask.add_interval(start, end, excluded);
    }

    /// Number of pairs with both endpoints covered.
    pub fn count(&self) -> usize {
        let m = self.mask.count();
        m * (m + 1) / 2
    }

    /// Theoretical number of pairs in a sequence of length `len`.
    pub fn total_units(len: usize) -> usize {
        len * (len + 1) / 2
    }
}
