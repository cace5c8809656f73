//! [`Rule`]s decide whether or not a candidate value can be appended to a partially built
//! sequence.
//!
//! Every rule is a plain value implementing [`Rule`].  The constructors in this module build the
//! standard rules, and [`and`], [`or`] and [`not`] combine them into larger rules:
//!
//! ```
//! use bankdraw::{rules, Rule};
//!
//! let rule = rules::and(vec![rules::only_even().boxed(), rules::in_range(2, 8).boxed()]);
//! assert!(rule.accept(4, &[], None));
//! assert!(!rule.accept(3, &[], None)); // odd
//! assert!(!rule.accept(10, &[], None)); // out of range
//! ```

use std::fmt::{Debug, Formatter};

mod history;
mod position;
mod value;

pub use history::*;
pub use position::*;
pub use value::*;

/// A constraint on which values can be appended to a sequence.
///
/// Rules must be pure functions of their arguments: the generators call them many times over
/// (possibly with the same arguments) whilst retrying and backtracking.
pub trait Rule: Debug + Send + Sync {
    /// Decide whether `candidate` can be appended to `built`.  `row_size` is `Some(cols)` when a
    /// matrix is being generated, and `None` for flat sequences.  The position of `candidate`
    /// in the final sequence is always `built.len()`.
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool;

    /// Convert `self` into a [`BoxedRule`], so that it can be combined with rules of other types
    fn boxed(self) -> BoxedRule
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// A [`Rule`] of any type
pub type BoxedRule = Box<dyn Rule>;

impl<R: Rule + ?Sized> Rule for &R {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        (**self).accept(candidate, built, row_size)
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        (**self).accept(candidate, built, row_size)
    }
}

/////////////////
// COMBINATORS //
/////////////////

/// Accepts iff every sub-rule accepts.  An empty `And` accepts everything.
#[derive(Debug)]
pub struct And(pub Vec<BoxedRule>);

/// Accepts iff at least one sub-rule accepts.  An empty `Or` rejects everything.
#[derive(Debug)]
pub struct Or(pub Vec<BoxedRule>);

/// Accepts iff the sub-rule rejects.
#[derive(Debug)]
pub struct Not(pub BoxedRule);

pub fn and(rules: impl IntoIterator<Item = BoxedRule>) -> And {
    And(rules.into_iter().collect())
}

pub fn or(rules: impl IntoIterator<Item = BoxedRule>) -> Or {
    Or(rules.into_iter().collect())
}

pub fn not(rule: impl Rule + 'static) -> Not {
    Not(rule.boxed())
}

impl Rule for And {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        self.0.iter().all(|r| r.accept(candidate, built, row_size))
    }
}

impl Rule for Or {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        self.0.iter().any(|r| r.accept(candidate, built, row_size))
    }
}

impl Rule for Not {
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        !self.0.accept(candidate, built, row_size)
    }
}

//////////////////
// CUSTOM RULES //
//////////////////

/// A [`Rule`] backed by an arbitrary closure.  The name is only used for `Debug` output.
pub struct FnRule<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a [`Rule`].  The closure must be pure, just like any other [`Rule`].
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnRule<F>
where
    F: Fn(i64, &[i64], Option<usize>) -> bool + Send + Sync,
{
    FnRule {
        name: name.into(),
        f,
    }
}

impl<F> Debug for FnRule<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnRule({:?})", self.name)
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(i64, &[i64], Option<usize>) -> bool + Send + Sync,
{
    fn accept(&self, candidate: i64, built: &[i64], row_size: Option<usize>) -> bool {
        (self.f)(candidate, built, row_size)
    }
}

/// The last value of `built`, if any
fn last(built: &[i64]) -> Option<i64> {
    built.last().copied()
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn and_of_even_and_range() {
        let rule = and(vec![only_even().boxed(), in_range(2, 8).boxed()]);
        assert!(!rule.accept(10, &[], None));
        assert!(!rule.accept(3, &[], None));
        assert!(rule.accept(4, &[], None));
    }

    #[test]
    fn or_of_rules() {
        let rule = or(vec![only_odd().boxed(), in_range(10, 12).boxed()]);
        assert!(rule.accept(3, &[], None));
        assert!(rule.accept(10, &[], None));
        assert!(!rule.accept(4, &[], None));
    }

    #[test]
    fn nested_combinators() {
        // Even values, except those divisible by 4
        let rule = and(vec![
            only_even().boxed(),
            not(divisible_by(4)).boxed(),
        ]);
        assert!(rule.accept(6, &[], None));
        assert!(!rule.accept(8, &[], None));
        assert!(!rule.accept(7, &[], None));
    }

    #[test]
    fn custom_rule() {
        let rule = from_fn("below last", |c, built: &[i64], _| {
            built.last().map_or(true, |l| c < *l)
        });
        assert!(rule.accept(5, &[], None));
        assert!(rule.accept(5, &[7], None));
        assert!(!rule.accept(8, &[7], None));
        assert_eq!(format!("{:?}", rule), "FnRule(\"below last\")");
    }

    #[test]
    fn references_and_boxes_are_rules() {
        fn accepts_three(rule: impl Rule) -> bool {
            rule.accept(3, &[], None)
        }

        let rule = only_odd();
        let by_ref: &dyn Rule = &rule;
        assert!(by_ref.accept(3, &[], None));
        assert!(accepts_three(&rule));
        assert!(!accepts_three(not(rule)));
    }

    #[quickcheck]
    fn empty_and_accepts(candidate: i64, built: Vec<i64>) -> bool {
        and(vec![]).accept(candidate, &built, None)
    }

    #[quickcheck]
    fn empty_or_rejects(candidate: i64, built: Vec<i64>) -> bool {
        !or(vec![]).accept(candidate, &built, Some(3))
    }

    #[quickcheck]
    fn double_negation(candidate: i64, built: Vec<i64>) -> bool {
        let built = &built[..built.len().min(8)];
        let inner = || {
            and(vec![
                in_range(-50, 50).boxed(),
                not_divisible_by(3).boxed(),
                no_repeat_in_last(2).boxed(),
            ])
        };
        not(not(inner())).accept(candidate, built, None) == inner().accept(candidate, built, None)
    }

    #[quickcheck]
    fn combinators_are_deterministic(candidate: i64, built: Vec<i64>) -> bool {
        let rule = or(vec![ascending().boxed(), sum_less_than(100).boxed()]);
        rule.accept(candidate, &built, None) == rule.accept(candidate, &built, None)
    }
}
