//! The TOML job file format, and the code which lowers it into the values used by [`bankdraw`].

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use bankdraw::{rules, Bank, BoxedRule, Config, Dims, Rule};
use serde::Deserialize;

use crate::utils::{parse_toml, read_file_to_string};

/// A single generation job.  The [`Job`] type is parsed directly from the TOML, and can be thought
/// of as an AST representation of the TOML file.  Like ASTs, this can describe things which can't
/// be run (e.g. `dims = [1, 2, 3]` or a bank key of `"seven"`), so lowering can also fail.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /* GENERAL */
    /// Which generator to run.  Defaults to `random`.
    #[serde(default)]
    pub strategy: Strategy,
    /// Either `[len]` or `[rows, cols]`
    dims: Vec<usize>,
    /// Seed for the RNG.  If unset (and no `--seed` is given), the RNG is seeded from entropy.
    pub seed: Option<u64>,

    /* CONFIG OVERRIDES */
    draw_limit: Option<usize>,
    restart_limit: Option<usize>,
    step_limit: Option<usize>,

    /* BANK */
    /// Explicit `value -> limit` pairs.  TOML keys are always strings, so these are parsed as
    /// integers during lowering.  These override any matching values from `bank_range`.
    #[serde(default)]
    bank: BTreeMap<String, usize>,
    /// Adds every value in `min..=max`, each with the same limit
    bank_range: Option<BankRange>,

    /* RULES */
    /// If unset, every value is accepted
    rule: Option<TomlRule>,
}

/// Which generator a [`Job`] should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// [`bankdraw::generate_random`]
    #[default]
    Random,
    /// [`bankdraw::generate_ordered`]
    Ordered,
}

/// The most values which a single `bank_range` can add to the bank
const MAX_BANK_RANGE_WIDTH: i128 = 1_000_000;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct BankRange {
    min: i64,
    max: i64,
    limit: usize,
}

impl Job {
    /// Read and parse a [`Job`] from a TOML file
    pub fn read_from_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_toml(&read_file_to_string(path)?)
    }

    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        parse_toml(s)
    }

    pub fn dims(&self) -> anyhow::Result<Dims> {
        Dims::from_slice(&self.dims).context("Invalid `dims`")
    }

    /// The default [`Config`], with any limits from the job file applied on top
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(limit) = self.draw_limit {
            config.draw_limit = limit;
        }
        if let Some(limit) = self.restart_limit {
            config.restart_limit = limit;
        }
        if self.step_limit.is_some() {
            config.step_limit = self.step_limit;
        }
        config
    }

    /// Combine `bank_range` and `bank` into a single [`Bank`]
    pub fn bank(&self) -> anyhow::Result<Bank> {
        let mut entries = Vec::new();
        if let Some(BankRange { min, max, limit }) = self.bank_range {
            if min > max {
                log::warn!("`bank_range` is empty ({} > {})", min, max);
            }
            let width = i128::from(max) - i128::from(min) + 1;
            if width > MAX_BANK_RANGE_WIDTH {
                anyhow::bail!(
                    "`bank_range` covers {} values, but can cover at most {}",
                    width,
                    MAX_BANK_RANGE_WIDTH
                );
            }
            entries.extend((min..=max).map(|v| (v, limit)));
        }
        for (key, &limit) in &self.bank {
            let value = key
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Bank key {:?} isn't an integer", key))?;
            entries.push((value, limit));
        }

        let bank = entries.into_iter().collect::<Bank>();
        if bank.is_empty() {
            log::warn!("Bank is empty; nothing can be generated");
        }
        Ok(bank)
    }

    /// Lower the `rule` field into a [`BoxedRule`], if it's set
    pub fn rule(&self) -> Option<BoxedRule> {
        self.rule.as_ref().map(TomlRule::lower)
    }
}

/// A [`Rule`], as written in a job file.  Rules without parameters are written as strings
/// (`rule = "only_even"`), and everything else as a single-key table (`{ in_range = [2, 8] }`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
enum TomlRule {
    /* COMBINATORS */
    All(Vec<TomlRule>),
    Any(Vec<TomlRule>),
    Not(Box<TomlRule>),

    /* VALUES */
    OnlyEven,
    OnlyOdd,
    InRange(i64, i64),
    NotInRange(i64, i64),
    DivisibleBy(i64),
    NotDivisibleBy(i64),
    OnlyPrimes,
    OnlySquares,

    /* HISTORY */
    NoConsecutiveRepeats,
    Different,
    MaxOccurrences(usize),
    NoDuplicates,
    NoRepeatInLast(usize),
    SumLessThan(i64),
    SumGreaterThan(i64),
    AverageInRange(f64, f64),
    Ascending,
    Descending,
    AscendingInRow,
    AlternateEvenOdd,
    MaxDifference(u64),
    MinDifference(u64),
    BalanceEvenOdd(usize),

    /* POSITIONS */
    ByPosition(Vec<PositionRule>),
    OnEvenPositions(Box<TomlRule>),
    OnOddPositions(Box<TomlRule>),
    ValueAtPositions { positions: Vec<usize>, value: i64 },
}

/// One entry of a `by_position` rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PositionRule {
    position: usize,
    rule: TomlRule,
}

impl TomlRule {
    fn lower(&self) -> BoxedRule {
        match self {
            Self::All(rs) => rules::and(rs.iter().map(Self::lower)).boxed(),
            Self::Any(rs) => rules::or(rs.iter().map(Self::lower)).boxed(),
            Self::Not(r) => rules::not(r.lower()).boxed(),

            Self::OnlyEven => rules::only_even().boxed(),
            Self::OnlyOdd => rules::only_odd().boxed(),
            Self::InRange(min, max) => rules::in_range(*min, *max).boxed(),
            Self::NotInRange(min, max) => rules::not_in_range(*min, *max).boxed(),
            Self::DivisibleBy(n) => rules::divisible_by(*n).boxed(),
            Self::NotDivisibleBy(n) => rules::not_divisible_by(*n).boxed(),
            Self::OnlyPrimes => rules::only_primes().boxed(),
            Self::OnlySquares => rules::only_squares().boxed(),

            Self::NoConsecutiveRepeats => rules::no_consecutive_repeats().boxed(),
            Self::Different => rules::different().boxed(),
            Self::MaxOccurrences(n) => rules::max_occurrences(*n).boxed(),
            Self::NoDuplicates => rules::no_duplicates().boxed(),
            Self::NoRepeatInLast(n) => rules::no_repeat_in_last(*n).boxed(),
            Self::SumLessThan(max) => rules::sum_less_than(*max).boxed(),
            Self::SumGreaterThan(min) => rules::sum_greater_than(*min).boxed(),
            Self::AverageInRange(min, max) => rules::average_in_range(*min, *max).boxed(),
            Self::Ascending => rules::ascending().boxed(),
            Self::Descending => rules::descending().boxed(),
            Self::AscendingInRow => rules::ascending_in_row().boxed(),
            Self::AlternateEvenOdd => rules::alternate_even_odd().boxed(),
            Self::MaxDifference(n) => rules::max_difference(*n).boxed(),
            Self::MinDifference(n) => rules::min_difference(*n).boxed(),
            Self::BalanceEvenOdd(n) => rules::balance_even_odd(*n).boxed(),

            Self::ByPosition(entries) => {
                rules::by_position(entries.iter().map(|e| (e.position, e.rule.lower()))).boxed()
            }
            Self::OnEvenPositions(r) => rules::on_even_positions(r.lower()).boxed(),
            Self::OnOddPositions(r) => rules::on_odd_positions(r.lower()).boxed(),
            Self::ValueAtPositions { positions, value } => {
                rules::value_at_positions(positions.iter().copied(), *value).boxed()
            }
        }
    }
}
