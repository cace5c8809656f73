//! Rules which compare the candidate against the sequence built so far.  Rules which compare
//! against the previous value accept anything at the start of the sequence.

use super::{last, value::is_even, Rule};

/// Rejects a value equal to the one immediately before it
#[derive(Debug, Clone, Copy)]
pub struct NoConsecutiveRepeats;

/// Accepts values which have appeared fewer than `n` times so far
#[derive(Debug, Clone, Copy)]
pub struct MaxOccurrences(pub usize);

#[derive(Debug, Clone, Copy)]
pub struct NoDuplicates;

/// Rejects values which appear in the last `n` values of the sequence
#[derive(Debug, Clone, Copy)]
pub struct NoRepeatInLast(pub usize);

/// Accepts if the sum of the sequence (including the candidate) is strictly below the bound
#[derive(Debug, Clone, Copy)]
pub struct SumLessThan(pub i64);

/// Accepts if the sum of the sequence (including the candidate) is strictly above the bound
#[derive(Debug, Clone, Copy)]
pub struct SumGreaterThan(pub i64);

/// Accepts if the mean of the sequence (including the candidate) is in `min..=max`
#[derive(Debug, Clone, Copy)]
pub struct AverageInRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Ascending;

#[derive(Debug, Clone, Copy)]
pub struct Descending;

/// Like [`Ascending`], but every row starts afresh.  Without a row size, the whole sequence is one
/// row.
#[derive(Debug, Clone, Copy)]
pub struct AscendingInRow;

#[derive(Debug, Clone, Copy)]
pub struct AlternateEvenOdd;

/// Accepts if the candidate is within `n` of the previous value
#[derive(Debug, Clone, Copy)]
pub struct MaxDifference(pub u64);

/// Accepts if the candidate is at least `n` away from the previous value
#[derive(Debug, Clone, Copy)]
pub struct MinDifference(pub u64);

/// Accepts if the numbers of even and odd values (including the candidate) differ by at most `n`
#[derive(Debug, Clone, Copy)]
pub struct BalanceEvenOdd(pub usize);

pub fn no_consecutive_repeats() -> NoConsecutiveRepeats {
    NoConsecutiveRepeats
}

/// Alias of [`no_consecutive_repeats`]: the candidate must differ from the previous value
pub fn different() -> NoConsecutiveRepeats {
    NoConsecutiveRepeats
}

pub fn max_occurrences(n: usize) -> MaxOccurrences {
    MaxOccurrences(n)
}

pub fn no_duplicates() -> NoDuplicates {
    NoDuplicates
}

pub fn no_repeat_in_last(n: usize) -> NoRepeatInLast {
    NoRepeatInLast(n)
}

pub fn sum_less_than(max: i64) -> SumLessThan {
    SumLessThan(max)
}

pub fn sum_greater_than(min: i64) -> SumGreaterThan {
    SumGreaterThan(min)
}

pub fn average_in_range(min: f64, max: f64) -> AverageInRange {
    AverageInRange { min, max }
}

pub fn ascending() -> Ascending {
    Ascending
}

pub fn descending() -> Descending {
    Descending
}

pub fn ascending_in_row() -> AscendingInRow {
    AscendingInRow
}

pub fn alternate_even_odd() -> AlternateEvenOdd {
    AlternateEvenOdd
}

pub fn max_difference(n: u64) -> MaxDifference {
    MaxDifference(n)
}

pub fn min_difference(n: u64) -> MinDifference {
    MinDifference(n)
}

pub fn balance_even_odd(n: usize) -> BalanceEvenOdd {
    BalanceEvenOdd(n)
}

impl Rule for NoConsecutiveRepeats {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built) != Some(candidate)
    }
}

impl Rule for MaxOccurrences {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        built.iter().filter(|v| **v == candidate).count() < self.0
    }
}

impl Rule for NoDuplicates {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        !built.contains(&candidate)
    }
}

impl Rule for NoRepeatInLast {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        let window_start = built.len().saturating_sub(self.0);
        !built[window_start..].contains(&candidate)
    }
}

impl Rule for SumLessThan {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        sum_with(candidate, built) < self.0 as i128
    }
}

impl Rule for SumGreaterThan {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        sum_with(candidate, built) > self.0 as i128
    }
}

impl Rule for AverageInRange {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        let avg = sum_with(candidate, built) as f64 / (built.len() + 1) as f64;
        // NaN bounds reject everything
        self.min <= avg && avg <= self.max
    }
}

impl Rule for Ascending {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built).map_or(true, |l| candidate > l)
    }
}

impl Rule for Descending {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built).map_or(true, |l| candidate < l)
    }
}

impl Rule for AscendingInRow {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        let starts_row = match row_size {
            Some(0) => true,
            Some(cols) => built.len() % cols == 0,
            None => built.is_empty(),
        };
        starts_row || Ascending.accept(candidate, built, row_size)
    }
}

impl Rule for AlternateEvenOdd {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built).map_or(true, |l| is_even(l) != is_even(candidate))
    }
}

impl Rule for MaxDifference {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built).map_or(true, |l| candidate.abs_diff(l) <= self.0)
    }
}

impl Rule for MinDifference {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        last(built).map_or(true, |l| candidate.abs_diff(l) >= self.0)
    }
}

impl Rule for BalanceEvenOdd {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        let evens = built.iter().filter(|v| is_even(**v)).count() + is_even(candidate) as usize;
        let odds = built.len() + 1 - evens;
        evens.abs_diff(odds) <= self.0
    }
}

/// Sum of `built` and `candidate`.  Computed as `i128` so that it can't overflow for any
/// realistic sequence length.
fn sum_with(candidate: i64, built: &[i64]) -> i128 {
    built.iter().map(|v| *v as i128).sum::<i128>() + candidate as i128
}
