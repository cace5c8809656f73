//! The two generators, and the types they share.

mod ordered;
mod random;

pub use ordered::generate_ordered;
pub use random::generate_random;

use crate::{Bank, Shaped};

/// The most values a generator will reserve space for up-front
const MAX_RESERVED: usize = 1 << 16;

/// Configuration for _how_ sequences are generated.  All limits are iteration counts, not
/// timeouts.
#[derive(Debug, Clone)]
pub struct Config {
    /// How many values [`generate_random`] will draw for a single position before giving up.
    /// Defaults to 1000.
    pub draw_limit: usize,
    /// How many times [`generate_ordered`] will restart its search from scratch before giving up.
    /// Defaults to 50.
    pub restart_limit: usize,
    /// If set, the maximum number of candidates [`generate_ordered`] will try in a single
    /// attempt before abandoning it and restarting.  If `None` (the default), every attempt runs
    /// until the search space is exhausted.
    pub step_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            draw_limit: 1000,
            restart_limit: 50,
            step_limit: None,
        }
    }
}

/// How many values to reserve space for when generating `total` values from `bank`.  Neither
/// generator can produce more values than the bank holds, and very large requests grow their
/// buffers as they go.
fn reserved_len(bank: &Bank, total: usize) -> usize {
    total.min(bank.capacity()).min(MAX_RESERVED)
}

/// The result of running a generator: the values generated so far, and whether or not the full
/// request was met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub values: Shaped,
    pub outcome: Outcome,
}

impl Generation {
    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Complete
    }
}

/// How a generator finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested value was generated
    Complete,
    /// [`generate_random`] drew `draws` values for `position` (0-indexed) without any being
    /// accepted, so stopped early.  All values before `position` were still returned.
    Exhausted { position: usize, draws: usize },
    /// [`generate_ordered`] failed to find a full sequence, and returned nothing.  `attempts` is
    /// the number of attempts made: [`Config::restart_limit`] if every attempt hit the step
    /// limit, fewer if an attempt searched every possible sequence, and 0 if the bank holds
    /// fewer values than were requested.
    Unsatisfiable { attempts: usize },
}
