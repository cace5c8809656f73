use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::{Bank, Dims, Rule, Usage};

use super::{reserved_len, Config, Generation, Outcome};

/// Generate a sequence where every row is strictly ascending, using a randomised depth-first
/// search.
///
/// Rows are `cols` long for matrices; a flat sequence is treated as one long row.  The first value
/// of each row can be anything left in the bank, and every other value must be strictly larger
/// than the one before it (which also means values can't repeat within a row).  The order in which
/// candidates are tried is shuffled, so repeated calls produce different solutions.
///
/// Each attempt runs until it either finds a full sequence or exhausts its search space (or hits
/// [`Config::step_limit`]).  Up to [`Config::restart_limit`] attempts are made, each starting from
/// scratch.  If none of them succeed, an empty sequence is returned with
/// [`Outcome::Unsatisfiable`].  An attempt which exhausts its search space proves that no
/// sequence exists, so no more attempts are made after it.  Requests for more values than the bank
/// holds are rejected without making any attempts.
pub fn generate_ordered(
    bank: &Bank,
    dims: Dims,
    rule: Option<&dyn Rule>,
    config: &Config,
    rng: &mut impl Rng,
) -> Generation {
    let total = dims.total();
    if total == 0 {
        return Generation {
            values: dims.empty(),
            outcome: Outcome::Complete,
        };
    }

    if total > bank.capacity() {
        log::warn!(
            "Bank only has {} values, so can't fill {} positions",
            bank.capacity(),
            total
        );
        return unsatisfiable(dims, 0);
    }

    let search = Search {
        bank,
        total,
        row_len: dims.ordering_row_len(),
        row_size: dims.row_size(),
        rule,
        step_limit: config.step_limit,
    };
    for attempt in 1..=config.restart_limit {
        match search.run(rng) {
            Attempt::Found(flat) => {
                log::debug!("Found ordered sequence on attempt {}", attempt);
                return Generation {
                    values: dims.shape(flat),
                    outcome: Outcome::Complete,
                };
            }
            // Attempts only differ in the order candidates are tried
            Attempt::Exhausted => {
                log::debug!("Attempt {} searched every possible sequence", attempt);
                log::warn!("No ordered sequence of {} values exists", total);
                return unsatisfiable(dims, attempt);
            }
            Attempt::Abandoned => log::debug!("Attempt {} hit the step limit", attempt),
        }
    }

    log::warn!(
        "No ordered sequence of {} values found in {} attempts",
        total,
        config.restart_limit
    );
    unsatisfiable(dims, config.restart_limit)
}

fn unsatisfiable(dims: Dims, attempts: usize) -> Generation {
    Generation {
        values: dims.empty(),
        outcome: Outcome::Unsatisfiable { attempts },
    }
}

/// How one attempt at the search finished
enum Attempt {
    Found(Vec<i64>),
    /// Every candidate was tried without finding a full sequence
    Exhausted,
    /// [`Config::step_limit`] was reached
    Abandoned,
}

/// Static data shared by every attempt of one call to [`generate_ordered`]
struct Search<'a> {
    bank: &'a Bank,
    total: usize,
    /// Number of values in each ascending row
    row_len: usize,
    /// Row size passed to the [`Rule`]
    row_size: Option<usize>,
    rule: Option<&'a dyn Rule>,
    step_limit: Option<usize>,
}

/// A choice point in the search: the candidates (as indices into the [`Bank`]) for one position,
/// in the order they'll be tried.
struct Frame {
    candidates: Vec<usize>,
    next: usize,
}

impl Frame {
    fn next_candidate(&mut self) -> Option<usize> {
        let idx = self.candidates.get(self.next).copied();
        self.next += 1;
        idx
    }
}

impl Search<'_> {
    /// Run one attempt at the search, stopping at the first full-length sequence found.
    ///
    /// Each stack frame corresponds to one position of the sequence, so `stack.len() ==
    /// built.len() + 1` whenever a frame is being expanded.
    fn run(&self, rng: &mut impl Rng) -> Attempt {
        let mut usage = Usage::new(self.bank);
        let reserved = reserved_len(self.bank, self.total);
        let mut built = Vec::<i64>::with_capacity(reserved);
        // Bank indices of the values in `built`, used to undo choices
        let mut chosen = Vec::<usize>::with_capacity(reserved);
        let mut stack = vec![self.frame(&usage, &built, rng)];
        let mut steps = 0usize;

        while let Some(frame) = stack.last_mut() {
            match frame.next_candidate() {
                Some(idx) => {
                    steps += 1;
                    if self.step_limit.is_some_and(|limit| steps > limit) {
                        log::trace!("Abandoning attempt after {} steps", steps - 1);
                        return Attempt::Abandoned;
                    }
                    let value = self.bank.value_at(idx);
                    if !self.accepts(value, &built) {
                        continue;
                    }
                    // Descend into the next position
                    usage.push_at(idx);
                    built.push(value);
                    chosen.push(idx);
                    if built.len() == self.total {
                        debug_assert!(usage.is_within_limits());
                        return Attempt::Found(built);
                    }
                    stack.push(self.frame(&usage, &built, rng));
                }
                None => {
                    // Every candidate for this position has failed, so backtrack and undo the
                    // choice which led here
                    stack.pop();
                    if let Some(idx) = chosen.pop() {
                        usage.pop_at(idx);
                        built.pop();
                    }
                }
            }
        }
        Attempt::Exhausted
    }

    /// Create the [`Frame`] for the position after `built`
    fn frame(&self, usage: &Usage, built: &[i64], rng: &mut impl Rng) -> Frame {
        let starts_row = built.len() % self.row_len == 0;
        let min = if starts_row { None } else { built.last().copied() };
        let mut candidates = (0..self.bank.len())
            .filter(|&idx| usage.is_available_at(idx))
            .filter(|&idx| min.map_or(true, |m| self.bank.value_at(idx) > m))
            .collect_vec();
        candidates.shuffle(rng);
        Frame {
            candidates,
            next: 0,
        }
    }

    fn accepts(&self, value: i64, built: &[i64]) -> bool {
        self.rule
            .map_or(true, |r| r.accept(value, built, self.row_size))
    }
}
