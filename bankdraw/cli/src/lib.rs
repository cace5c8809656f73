//! Crate for loading and running Bankdraw's job files.  The CLI itself is a very thin wrapper
//! around this crate, parsing CLI args and immediately calling into it.  This crate is also used by
//! the integration test runner, making sure that the tests run jobs in exactly the same way as the
//! CLI does.

pub mod args;
mod job;
mod utils;

use std::{
    collections::BTreeMap,
    path::Path,
    str::FromStr,
    time::{Duration, Instant},
};

use bankdraw::{Generation, Outcome};
use colored::Colorize;
use itertools::Itertools;
use log::LevelFilter;
use rand::{rngs::StdRng, SeedableRng};
use simple_logger::SimpleLogger;

pub use args::Options;
pub use job::{Job, Strategy};

pub fn init_logging(log_level: LevelFilter) -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_colors(true)
        .with_level(log_level)
        .init()?;
    Ok(())
}

/// Load and run the job in `input_file`.  Returns `Ok(None)` if a [`DebugOption`] stopped the job
/// before anything was generated.
pub fn run(input_file: &Path, options: &Options) -> anyhow::Result<Option<JobResult>> {
    let start_time = Instant::now();

    /// If the user specifies a [`DebugOption`] flag with e.g. `-D bank`, then debug print the
    /// corresponding value and exit.
    macro_rules! debug_print {
        ($variant: ident, $val: expr) => {
            if options.debug_option == Some(DebugOption::$variant) {
                dbg!($val);
                return Ok(None);
            }
        };
    }

    let job = Job::read_from_file(input_file)?;
    debug_print!(Job, &job);
    let bank = job.bank()?;
    debug_print!(Bank, &bank);
    let rule = job.rule();
    debug_print!(Rule, &rule);

    let dims = job.dims()?;
    let config = job.config();
    let mut rng = match options.seed.or(job.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "Generating {} values ({:?}) from a bank of {} values",
        dims.total(),
        job.strategy,
        bank.capacity()
    );
    let generation = match job.strategy {
        Strategy::Random => {
            bankdraw::generate_random(&bank, dims, rule.as_deref(), &config, &mut rng)
        }
        Strategy::Ordered => {
            bankdraw::generate_ordered(&bank, dims, rule.as_deref(), &config, &mut rng)
        }
    };
    Ok(Some(JobResult {
        generation,
        total: dims.total(),
        duration: start_time.elapsed(),
    }))
}

/// The result of running a [`Job`]
#[derive(Debug, Clone)]
pub struct JobResult {
    pub generation: Generation,
    /// The number of values which were requested
    pub total: usize,
    pub duration: Duration,
}

impl JobResult {
    /// Print every row to stdout, followed by a status line on stderr
    pub fn print(&self) {
        for row in self.generation.values.rows() {
            println!("{}", row.iter().join(" "));
        }
        let status = match self.generation.outcome {
            Outcome::Complete => self.status().green(),
            Outcome::Exhausted { .. } => self.status().yellow(),
            Outcome::Unsatisfiable { .. } => self.status().red(),
        };
        eprintln!("{} in {:.2?}", status.bold(), self.duration);
    }

    /// `complete`, `partial (n/total)` or `no solution`
    pub fn status(&self) -> String {
        match self.generation.outcome {
            Outcome::Complete => "complete".to_owned(),
            Outcome::Exhausted { .. } => {
                format!("partial ({}/{})", self.generation.values.len(), self.total)
            }
            Outcome::Unsatisfiable { .. } => "no solution".to_owned(),
        }
    }

    /// How many times each value was generated
    pub fn value_counts(&self) -> BTreeMap<i64, usize> {
        self.generation
            .values
            .flatten()
            .into_iter()
            .counts()
            .into_iter()
            .collect()
    }

    /// A one-line description of this result which doesn't depend on the order of the generated
    /// values, e.g. `complete; 1x2 4x1`.
    pub fn summary(&self) -> String {
        let counts = self.value_counts();
        let counts_str = if counts.is_empty() {
            "empty".to_owned()
        } else {
            counts
                .iter()
                .map(|(value, count)| format!("{}x{}", value, count))
                .join(" ")
        };
        format!("{}; {}", self.status(), counts_str)
    }
}

/// What item should be debug printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugOption {
    Job,
    Bank,
    Rule,
}

impl FromStr for DebugOption {
    type Err = String;

    fn from_str(v: &str) -> Result<Self, String> {
        Ok(match v.to_lowercase().as_str() {
            "job" => Self::Job,
            "bank" => Self::Bank,
            "rule" => Self::Rule,
            _ => {
                return Err(format!(
                    "Unknown value {:?}. Expected `job`, `bank` or `rule`.",
                    v
                ))
            }
        })
    }
}
