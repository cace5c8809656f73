//! Rules which depend on the position of the candidate (i.e. the length of the sequence built so
//! far).

use std::collections::{BTreeMap, BTreeSet};

use super::{BoxedRule, Rule};

/// Applies a different rule at each listed position.  Unlisted positions accept everything.
#[derive(Debug)]
pub struct ByPosition(pub BTreeMap<usize, BoxedRule>);

/// Applies the sub-rule at even positions (0, 2, 4, ...), accepting everything elsewhere
#[derive(Debug)]
pub struct OnEvenPositions(pub BoxedRule);

/// Applies the sub-rule at odd positions (1, 3, 5, ...), accepting everything elsewhere
#[derive(Debug)]
pub struct OnOddPositions(pub BoxedRule);

/// Forces `value` at each of `positions`
#[derive(Debug, Clone)]
pub struct ValueAtPositions {
    pub positions: BTreeSet<usize>,
    pub value: i64,
}

pub fn by_position(rules: impl IntoIterator<Item = (usize, BoxedRule)>) -> ByPosition {
    ByPosition(rules.into_iter().collect())
}

pub fn on_even_positions(rule: impl Rule + 'static) -> OnEvenPositions {
    OnEvenPositions(rule.boxed())
}

pub fn on_odd_positions(rule: impl Rule + 'static) -> OnOddPositions {
    OnOddPositions(rule.boxed())
}

pub fn value_at_positions(positions: impl IntoIterator<Item = usize>, value: i64) -> ValueAtPositions {
    ValueAtPositions {
        positions: positions.into_iter().collect(),
        value,
    }
}

impl Rule for ByPosition {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        match self.0.get(&built.len()) {
            Some(rule) => rule.accept(candidate, built, row_size),
            None => true,
        }
    }
}

impl Rule for OnEvenPositions {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        built.len() % 2 == 1 || self.0.accept(candidate, built, row_size)
    }
}

impl Rule for OnOddPositions {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        built.len() % 2 == 0 || self.0.accept(candidate, built, row_size)
    }
}

impl Rule for ValueAtPositions {
    fn accept(&self, candidate: i64, built: &[i64], _row_size: Option<usize>) -> bool {
        !self.positions.contains(&built.len()) || candidate == self.value
    }
}
