//! Runner for the job files in `test/cases/`.  Every case is run through `bankdraw_cli::run` and a
//! summary of its output is compared against `test/results.toml`.
//!
//! Run with `cargo test --test integration`.  `cargo test --test integration -- bless` will
//! overwrite the expected results with the output of the last run.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context;
use bankdraw_cli::Options;
use colored::{Color, ColoredString, Colorize};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use walkdir::WalkDir;

// NOTE: Cargo runs custom test code in the same directory as the `Cargo.toml` for that crate (in
// our case `bankdraw/cli/Cargo.toml`), so all paths are relative to that directory
const CASES_DIR: &str = "../test/cases/";
const EXPECTED_RESULTS_PATH: &str = "../test/results.toml";
const ACTUAL_RESULTS_PATH: &str = "../test/.last-results.toml";

///////////////////
// MAIN FUNCTION //
///////////////////

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip the first arg, which is always the path to the test's binary
    if args.next().as_deref() == Some("bless") {
        bless_tests()
    } else {
        match run()? {
            Outcome::Fail => Err(anyhow::Error::msg("Tests failed")),
            Outcome::Pass => Ok(()),
        }
    }
}

///////////////////////////
// TOP-LEVEL RUNNER CODE //
///////////////////////////

/// Run every test case
fn run() -> anyhow::Result<Outcome> {
    bankdraw_cli::init_logging(log::LevelFilter::Error)?; // Equivalent to '-qq'

    let start = Instant::now();
    let cases = load_cases()?;
    println!("running {} tests", cases.len());
    let completed_cases: Vec<RunTestCase> = cases.into_par_iter().map(run_test).collect();
    report_failures(&completed_cases);
    let outcome = print_summary_string(&completed_cases, start.elapsed());
    // Save current results file, used when blessing results
    write_results(
        &completed_cases
            .into_iter()
            .map(|case| (case.base.name, case.actual_output))
            .collect::<ResultsFile>(),
        ACTUAL_RESULTS_PATH,
    )?;
    Ok(outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
enum Outcome {
    /// All tests passed
    Pass,
    /// Some tests failed or were unspecified
    Fail,
}

/// Replace the expected results with the results of the last run
fn bless_tests() -> anyhow::Result<()> {
    let expected_results = load_results(EXPECTED_RESULTS_PATH)?;
    let actual_results = load_results(ACTUAL_RESULTS_PATH)?;
    let mut num_changed = 0;
    for (name, actual) in &actual_results {
        match expected_results.get(name) {
            Some(expected) if expected == actual => {}
            Some(_) => println!("    (fail) {}", fail_str(name)),
            None => println!("     (new) {}", unspecified_str(name)),
        }
        num_changed += usize::from(expected_results.get(name) != Some(actual));
    }
    for name in expected_results.keys() {
        if !actual_results.contains_key(name) {
            println!(" (removed) {}", name.yellow().bold());
            num_changed += 1;
        }
    }
    println!("{} test cases blessed", num_changed);
    write_results(&actual_results, EXPECTED_RESULTS_PATH)
}

////////////////////////
// LOADING TEST CASES //
////////////////////////

/// Find every `*.toml` file in [`CASES_DIR`], paired with its expected output
fn load_cases() -> anyhow::Result<Vec<UnrunTestCase>> {
    let mut results = load_results(EXPECTED_RESULTS_PATH)?;
    let mut cases = Vec::new();
    for entry in WalkDir::new(CASES_DIR).sort_by_file_name() {
        let entry = entry.context("Error walking test case directory")?;
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "toml") {
            continue;
        }
        let name = case_name(path)?;
        cases.push(UnrunTestCase {
            expected_output: results.remove(&name),
            path: path.to_owned(),
            name,
        });
    }
    Ok(cases)
}

/// The name of a case, which is its path relative to [`CASES_DIR`] (always using `/`)
fn case_name(path: &Path) -> anyhow::Result<String> {
    let relative_path = path
        .strip_prefix(CASES_DIR)
        .with_context(|| format!("{:?} isn't in the test case directory", path))?;
    Ok(relative_path.to_string_lossy().replace('\\', "/"))
}

//////////////////
// RESULT FILES //
//////////////////

/// The contents of a results file.  We use a [`BTreeMap`] so that the test cases are always
/// written in the same (alphabetical) order, keeping diffs small.
type ResultsFile = BTreeMap<String, String>;

fn load_results(path: &str) -> anyhow::Result<ResultsFile> {
    let toml = std::fs::read_to_string(path)
        .with_context(|| format!("Error loading results file ({:?})", path))?;
    toml::from_str(&toml).with_context(|| format!("Error parsing results file ({:?})", path))
}

fn write_results(results: &ResultsFile, path: &str) -> anyhow::Result<()> {
    let toml = toml::to_string_pretty(results)
        .with_context(|| format!("Error serialising results file {:?}", path))?;
    std::fs::write(path, toml.as_bytes())
        .with_context(|| format!("Error writing results to {:?}", path))
}

////////////////////////
// RUNNING TEST CASES //
////////////////////////

/// Run a test case, printing a status line once it's finished
fn run_test(case: UnrunTestCase) -> RunTestCase {
    let actual_output = match bankdraw_cli::run(&case.path, &Options::default()) {
        Ok(Some(result)) => result.summary(),
        Ok(None) => "no output".to_owned(),
        Err(e) => format!("error: {:#}", e),
    };
    let run_case = RunTestCase {
        base: case,
        actual_output,
    };
    println!(
        "{} ... {}",
        run_case.base.name,
        run_case.outcome().colored_string()
    );
    run_case
}

////////////////////////////
// PRINT ERRORS & SUMMARY //
////////////////////////////

/// Print reports for the unspecified and failed tests
fn report_failures(run_cases: &[RunTestCase]) {
    for case in run_cases {
        match case.outcome() {
            CaseOutcome::Ok => {}
            CaseOutcome::Unspecified => {
                println!();
                println!(
                    "Unspecified results for {}.  This is the output:",
                    unspecified_str(&case.base.name)
                );
                println!("    {}", case.actual_output);
            }
            CaseOutcome::Fail => {
                println!();
                println!("{} produced the wrong output:", fail_str(&case.base.name));
                if let Some(expected) = &case.base.expected_output {
                    println!("    expected: {}", expected.green());
                }
                println!("      actual: {}", case.actual_output.red());
            }
        }
    }
}

/// Print a summary line for the tests, returning the [`Outcome`] of the whole suite
fn print_summary_string(completed_cases: &[RunTestCase], duration: Duration) -> Outcome {
    let mut num_ok = 0;
    let mut num_failures = 0;
    let mut num_unspecified = 0;
    for case in completed_cases {
        match case.outcome() {
            CaseOutcome::Ok => num_ok += 1,
            CaseOutcome::Unspecified => num_unspecified += 1,
            CaseOutcome::Fail => num_failures += 1,
        }
    }

    let outcome = if num_failures == 0 && num_unspecified == 0 {
        Outcome::Pass
    } else {
        Outcome::Fail
    };
    let outcome_str = match outcome {
        Outcome::Pass => ok_string(),
        Outcome::Fail => fail_string(),
    };
    println!();
    println!(
        "test result: {}. {} passed; {} unspecified; {} failed in {:.2?}",
        outcome_str, num_ok, num_unspecified, num_failures, duration
    );
    if num_unspecified + num_failures > 0 {
        println!(
            "{}: if the new output is correct, run `{}` to 'bless' it.",
            "note".white().bold(),
            "cargo test --test integration -- bless".bright_white()
        );
    }
    outcome
}

/////////////////////
// TEST CASE TYPES //
/////////////////////

#[derive(Debug)]
struct UnrunTestCase {
    name: String,
    path: PathBuf,
    expected_output: Option<String>,
}

#[derive(Debug)]
struct RunTestCase {
    base: UnrunTestCase,
    actual_output: String,
}

impl RunTestCase {
    fn outcome(&self) -> CaseOutcome {
        match &self.base.expected_output {
            None => CaseOutcome::Unspecified,
            Some(exp) if *exp == self.actual_output => CaseOutcome::Ok,
            Some(_) => CaseOutcome::Fail,
        }
    }
}

/// The outcomes of a test, corresponding to what's printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseOutcome {
    Ok,
    Unspecified,
    Fail,
}

impl CaseOutcome {
    fn colored_string(self) -> ColoredString {
        match self {
            Self::Ok => ok_string(),
            Self::Unspecified => "unspecified".color(UNSPECIFIED_COLOR),
            Self::Fail => fail_string(),
        }
    }
}

///////////
// UTILS //
///////////

fn unspecified_str(s: &str) -> ColoredString {
    s.color(UNSPECIFIED_COLOR).bold()
}

fn fail_str(s: &str) -> ColoredString {
    s.color(FAIL_COLOR).bold()
}

fn ok_string() -> ColoredString {
    "ok".color(Color::Green)
}

fn fail_string() -> ColoredString {
    "fail".color(FAIL_COLOR)
}

const FAIL_COLOR: Color = Color::BrightRed;
const UNSPECIFIED_COLOR: Color = Color::BrightBlue;
