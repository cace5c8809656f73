use std::ops::{Index, IndexMut};

use itertools::Itertools;

/// A collection of counts, indexed by position.  Used to track how many times each value of a
/// [`Bank`](crate::Bank) has been used so far.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Counts(Vec<usize>);

impl Counts {
    /// Creates a set of `Counts` where every count is 0.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Sum of every count
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Returns `true` if the count at `idx` is strictly below `limit`
    pub fn is_below(&self, idx: usize, limit: usize) -> bool {
        self.0[idx] < limit
    }

    /// Returns `true` if no count exceeds the corresponding entry of `limits`
    pub fn all_within(&self, limits: &[usize]) -> bool {
        self.0.iter().zip_eq(limits).all(|(c, l)| c <= l)
    }
}

impl Index<usize> for Counts {
    type Output = usize;

    fn index(&self, idx: usize) -> &usize {
        &self.0[idx]
    }
}

impl IndexMut<usize> for Counts {
    fn index_mut(&mut self, idx: usize) -> &mut usize {
        &mut self.0[idx]
    }
}
