use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use crate::DebugOption;

/// A struct storing the CLI args taken by Bankdraw.  `StructOpt` will generate the argument
/// parsing/help code for us.
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "Bankdraw", about = "Constrained sequence generator")]
pub struct CliArgs {
    /// The job file to run (`*.toml`)
    #[structopt(parse(from_os_str))]
    pub input_file: PathBuf,

    #[structopt(flatten)]
    pub options: Options,

    /// Makes Bankdraw print more output (`-vv` will produce all output).
    #[structopt(short, long = "verbose", parse(from_occurrences))]
    pub verbosity: usize,
    /// Makes Bankdraw print less output (`-qq` will only produce errors).
    #[structopt(short, long = "quiet", parse(from_occurrences))]
    pub quietness: usize,
}

// Parameters passed directly into `bankdraw_cli::run`.  This isn't a doc-comment because doc
// comments override `#[structopt(about = "...")]`.
#[derive(Default, Debug, Clone, StructOpt)]
pub struct Options {
    /// Seed for the random number generator.  Overrides any `seed` given in the job file.
    #[structopt(long)]
    pub seed: Option<u64>,
    /// Debug options.  `job`, `bank` and `rule` print the corresponding data structures and exit
    /// without generating anything.
    #[structopt(short = "D", long = "debug")]
    pub debug_option: Option<DebugOption>,
}

impl CliArgs {
    /// Parse the `-q`/`-v` args into the [`LevelFilter`] to give to the `log` library
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity as isize - self.quietness as isize {
            x if x < -2 => LevelFilter::Off, // -qqq (or more `q`s)
            -2 => LevelFilter::Error,        // -qq
            -1 => LevelFilter::Warn,         // -q
            0 => LevelFilter::Info,          // <none of -q or -v>
            1 => LevelFilter::Debug,         // -v
            _ => LevelFilter::Trace,         // -vv (or more `v`s)
        }
    }
}
