//! Rules which only look at the candidate value, ignoring the sequence built so far.

use super::Rule;

#[derive(Debug, Clone, Copy)]
pub struct OnlyEven;

#[derive(Debug, Clone, Copy)]
pub struct OnlyOdd;

/// Accepts values in `min..=max`
#[derive(Debug, Clone, Copy)]
pub struct InRange {
    pub min: i64,
    pub max: i64,
}

/// Accepts values outside `min..=max`
#[derive(Debug, Clone, Copy)]
pub struct NotInRange {
    pub min: i64,
    pub max: i64,
}

/// Accepts multiples of `divisor`.  Nothing is a multiple of 0.
#[derive(Debug, Clone, Copy)]
pub struct DivisibleBy(pub i64);

/// Accepts anything which isn't a multiple of `divisor`
#[derive(Debug, Clone, Copy)]
pub struct NotDivisibleBy(pub i64);

#[derive(Debug, Clone, Copy)]
pub struct OnlyPrimes;

/// Accepts perfect squares (including 0)
#[derive(Debug, Clone, Copy)]
pub struct OnlySquares;

pub fn only_even() -> OnlyEven {
    OnlyEven
}

pub fn only_odd() -> OnlyOdd {
    OnlyOdd
}

pub fn in_range(min: i64, max: i64) -> InRange {
    InRange { min, max }
}

pub fn not_in_range(min: i64, max: i64) -> NotInRange {
    NotInRange { min, max }
}

pub fn divisible_by(divisor: i64) -> DivisibleBy {
    DivisibleBy(divisor)
}

pub fn not_divisible_by(divisor: i64) -> NotDivisibleBy {
    NotDivisibleBy(divisor)
}

pub fn only_primes() -> OnlyPrimes {
    OnlyPrimes
}

pub fn only_squares() -> OnlySquares {
    OnlySquares
}

impl Rule for OnlyEven {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        is_even(candidate)
    }
}

impl Rule for OnlyOdd {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        !is_even(candidate)
    }
}

impl Rule for InRange {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        (self.min..=self.max).contains(&candidate)
    }
}

impl Rule for NotInRange {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        !(self.min..=self.max).contains(&candidate)
    }
}

impl Rule for DivisibleBy {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        is_multiple(candidate, self.0)
    }
}

impl Rule for NotDivisibleBy {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        !is_multiple(candidate, self.0)
    }
}

impl Rule for OnlyPrimes {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        is_prime(candidate)
    }
}

impl Rule for OnlySquares {
    fn accept(&self, candidate: i64, _built: &[i64], _row_size: Option<usize>) -> bool {
        is_square(candidate)
    }
}

pub(super) fn is_even(v: i64) -> bool {
    v.rem_euclid(2) == 0
}

fn is_multiple(v: i64, divisor: i64) -> bool {
    // `i128` so that `i64::MIN % -1` can't overflow
    divisor != 0 && (v as i128) % (divisor as i128) == 0
}

fn is_prime(v: i64) -> bool {
    if v < 2 {
        return false;
    }
    let mut d = 2;
    // `d <= v / d` rather than `d * d <= v` to avoid overflow
    while d <= v / d {
        if v % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

fn is_square(v: i64) -> bool {
    if v < 0 {
        return false;
    }
    // The float root can be off by one for large `v`, so check its neighbours too
    let approx = (v as f64).sqrt() as i64;
    (approx.saturating_sub(1)..=approx.saturating_add(1))
        .any(|r| r.checked_mul(r) == Some(v))
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[track_caller]
    fn check(rule: impl Rule, accepted: &[i64], rejected: &[i64]) {
        for &c in accepted {
            assert!(rule.accept(c, &[], None), "{:?} should accept {}", rule, c);
        }
        for &c in rejected {
            assert!(!rule.accept(c, &[], None), "{:?} should reject {}", rule, c);
        }
    }

    #[test]
    fn parity() {
        check(only_even(), &[-4, 0, 2, 10], &[-3, 1, 7]);
        check(only_odd(), &[-3, 1, 7], &[-4, 0, 2, 10]);
    }

    #[test]
    fn ranges() {
        check(in_range(2, 8), &[2, 5, 8], &[1, 9, -2]);
        check(not_in_range(2, 8), &[1, 9, -2], &[2, 5, 8]);
        check(in_range(5, 1), &[], &[1, 3, 5]);
    }

    #[test]
    fn divisibility() {
        check(divisible_by(3), &[-6, 0, 3, 9], &[1, 4, -5]);
        check(not_divisible_by(3), &[1, 4, -5], &[-6, 0, 3, 9]);
        check(divisible_by(0), &[], &[0, 1, 5]);
        check(not_divisible_by(0), &[0, 1, 5], &[]);
        check(divisible_by(-1), &[i64::MIN, 7], &[]);
    }

    #[test]
    fn primes() {
        check(
            only_primes(),
            &[2, 3, 5, 7, 11, 13, 97, 7919],
            &[i64::MIN, -7, 0, 1, 4, 9, 91, 7917],
        );
    }

    #[test]
    fn squares() {
        check(
            only_squares(),
            &[0, 1, 4, 9, 144, 3_037_000_499 * 3_037_000_499],
            &[-4, 2, 3, 8, 145, i64::MAX],
        );
    }

    #[quickcheck]
    fn value_rules_dont_panic(candidate: i64, divisor: i64) -> bool {
        let _ = only_primes().accept(candidate.rem_euclid(1 << 20), &[], None);
        let _ = only_squares().accept(candidate, &[], None);
        let _ = divisible_by(divisor).accept(candidate, &[], None);
        only_even().accept(candidate, &[], None) != only_odd().accept(candidate, &[], None)
    }
}
