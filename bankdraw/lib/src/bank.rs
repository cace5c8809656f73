//! The [`Bank`] of values which sequences are drawn from, and the per-attempt [`Usage`] which
//! records how much of the bank has been used so far.

use std::fmt::{Debug, Formatter};

use itertools::Itertools;

use crate::utils::counts::Counts;

/// A multiset of values, stored as a mapping from each value to the maximum number of times it
/// can appear in a generated sequence.
///
/// Values are kept in ascending order, so every value has a fixed index (which is what
/// [`Usage`] counts against).  Values with a limit of 0 are kept: they can still be drawn by
/// [`generate_random`](crate::generate_random), but will never be accepted.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Bank {
    values: Vec<i64>,
    limits: Vec<usize>,
}

impl Bank {
    /// Creates a `Bank` where every value in `values` has the same `limit`.
    pub fn uniform(values: impl IntoIterator<Item = i64>, limit: usize) -> Self {
        values.into_iter().map(|v| (v, limit)).collect()
    }

    /// The number of distinct values in this `Bank`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The distinct values in this `Bank`, in ascending order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The maximum number of times `value` can be used, or `0` if `value` isn't in this `Bank`
    pub fn limit(&self, value: i64) -> usize {
        self.index_of(value).map_or(0, |idx| self.limits[idx])
    }

    /// Returns `true` if `value` is one of this `Bank`'s values (even if its limit is 0)
    pub fn contains(&self, value: i64) -> bool {
        self.index_of(value).is_some()
    }

    /// The total number of values which could be drawn from this `Bank` before it runs out
    /// (saturating at `usize::MAX`)
    pub fn capacity(&self) -> usize {
        self.limits
            .iter()
            .fold(0, |total: usize, &limit| total.saturating_add(limit))
    }

    /// Iterate over every `(value, limit)` pair, in ascending order of value
    pub fn iter(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.values.iter().copied().zip_eq(self.limits.iter().copied())
    }

    pub(crate) fn index_of(&self, value: i64) -> Option<usize> {
        self.values.binary_search(&value).ok()
    }

    pub(crate) fn value_at(&self, idx: usize) -> i64 {
        self.values[idx]
    }

    pub(crate) fn limit_at(&self, idx: usize) -> usize {
        self.limits[idx]
    }
}

impl FromIterator<(i64, usize)> for Bank {
    /// Collect `(value, limit)` pairs into a `Bank`.  If a value appears more than once, the last
    /// limit wins.
    fn from_iter<T: IntoIterator<Item = (i64, usize)>>(iter: T) -> Self {
        let mut pairs = iter.into_iter().collect_vec();
        // Stable sort, so that duplicated values stay in the order they were given
        pairs.sort_by_key(|(value, _)| *value);
        let mut bank = Bank::default();
        for (value, limit) in pairs {
            match bank.limits.last_mut() {
                Some(last_limit) if bank.values.last() == Some(&value) => *last_limit = limit,
                _ => {
                    bank.values.push(value);
                    bank.limits.push(limit);
                }
            }
        }
        bank
    }
}

impl Debug for Bank {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Records how many times each value of a [`Bank`] has been used by one generation attempt.
#[derive(Debug, Clone)]
pub struct Usage<'bank> {
    bank: &'bank Bank,
    counts: Counts,
}

impl<'bank> Usage<'bank> {
    /// Creates a `Usage` where nothing has been used yet
    pub fn new(bank: &'bank Bank) -> Self {
        Self {
            bank,
            counts: Counts::zeros(bank.len()),
        }
    }

    /// The number of times `value` has been used so far
    pub fn count(&self, value: i64) -> usize {
        self.bank.index_of(value).map_or(0, |idx| self.counts[idx])
    }

    /// Returns `true` if `value` is in the [`Bank`] and can be used at least once more
    pub fn is_available(&self, value: i64) -> bool {
        self.bank
            .index_of(value)
            .is_some_and(|idx| self.is_available_at(idx))
    }

    /// The total number of values used so far
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    /// Returns `true` if no value has been used more times than the [`Bank`] allows
    pub fn is_within_limits(&self) -> bool {
        self.counts.all_within(&self.bank.limits)
    }

    /// Records one more use of `value`.  Returns `false` (and records nothing) if `value` isn't
    /// available.
    pub fn push(&mut self, value: i64) -> bool {
        match self.bank.index_of(value) {
            Some(idx) if self.is_available_at(idx) => {
                self.push_at(idx);
                true
            }
            _ => false,
        }
    }

    /// Undoes one use of `value`, returning `false` if it hasn't been used
    pub fn pop(&mut self, value: i64) -> bool {
        match self.bank.index_of(value) {
            Some(idx) if self.counts[idx] > 0 => {
                self.pop_at(idx);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_available_at(&self, idx: usize) -> bool {
        self.counts.is_below(idx, self.bank.limit_at(idx))
    }

    pub(crate) fn push_at(&mut self, idx: usize) {
        debug_assert!(self.is_available_at(idx));
        self.counts[idx] += 1;
    }

    pub(crate) fn pop_at(&mut self, idx: usize) {
        debug_assert!(self.counts[idx] > 0);
        self.counts[idx] -= 1;
    }
}
