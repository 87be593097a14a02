#[macro_use]
extern crate log;

use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{value_t, App, Arg, ArgMatches};

use picrate::parser::{parse_instructions, ParseError};
use picrate::render::{Renderer, ShellRenderer};
use picrate::solver::propagation::PropagationStrategy;
use picrate::solver::{self, SolveError, Strategy};

fn main() {
    #[cfg(feature = "logger")]
    env_logger::init();

    let matches = App::new("picrate")
        .version("0.1.0")
        .about("Nonogram (picross) line solver and backtracking search engine")
        .arg(
            Arg::with_name("INPUT")
                .help("Instruction file to solve")
                .index(1)
                .required(true),
        )
        .args_from_usage(
            "-s, --strategy=[STRATEGY] 'Guess locator to fall back on: by-order (default) or most-info'
             -p, --propagator=[PROPAGATOR] 'Board propagator: full-sweep (default) or dirty-set'
             -t, --timeout=[SECONDS] 'Give up and exit 2 after this many seconds'",
        )
        .get_matches();

    match run(&matches) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(Outcome::Unsatisfiable(message)) => {
            warn!("{}", message);
            process::exit(1);
        }
        Err(Outcome::Timeout(message)) => {
            warn!("{}", message);
            process::exit(2);
        }
        Err(Outcome::Parse(err)) => {
            eprintln!("{}", err);
            process::exit(2);
        }
    }
}

enum Outcome {
    Parse(ParseError),
    /// The board is unsatisfiable: some row or column's instructions
    /// already admit no placement, found before any guess was made.
    Unsatisfiable(String),
    Timeout(String),
}

impl From<ParseError> for Outcome {
    fn from(err: ParseError) -> Self {
        Outcome::Parse(err)
    }
}

impl From<SolveError> for Outcome {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Contradiction(message) => Outcome::Unsatisfiable(message),
            SolveError::Timeout(message) => Outcome::Timeout(message),
        }
    }
}

fn run(matches: &ArgMatches) -> Result<bool, Outcome> {
    let input = matches.value_of("INPUT").expect("INPUT is required");
    let strategy = strategy_from_args(matches);
    let propagator = propagator_from_args(matches);
    let timeout = parse_arg::<u64>(matches, "timeout").map(Duration::from_secs);

    let mut board = parse_instructions(&PathBuf::from(input))?;

    let report = solver::run(&mut board, strategy, propagator, timeout)?;

    println!("{}", ShellRenderer::render(&board));
    info!(
        "steps={} guesses={} solved={}",
        report.steps, report.guesses, report.solved
    );

    Ok(report.solved)
}

fn strategy_from_args(matches: &ArgMatches) -> Strategy {
    match matches.value_of("strategy") {
        Some("most-info") => Strategy::MostInfo,
        _ => Strategy::ByOrder,
    }
}

fn propagator_from_args(matches: &ArgMatches) -> PropagationStrategy {
    match matches.value_of("propagator") {
        Some("dirty-set") => PropagationStrategy::DirtySet,
        _ => PropagationStrategy::FullSweep,
    }
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Option<T>
where
    T: FromStr,
{
    if matches.is_present(name) {
        let value = value_t!(matches, name, T).unwrap_or_else(|e| e.exit());
        return Some(value);
    }
    None
}
