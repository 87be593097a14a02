//! The solving pipeline: line analyzer, info-adder, board propagator,
//! guess locator and backtracking search, composed the way the teacher
//! crate's top-level `src/solver.rs::run` composes its own propagation
//! and backtracking solvers.

pub mod analyzer;
pub mod backtracking;
pub mod guess;
pub mod info;
pub mod propagation;

use std::fmt;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::cache::LineCache;
use guess::{ByOrder, GuessLocator, MostInfo};
use propagation::PropagationStrategy;

/// Why `run` gave up without a verdict: the two causes are distinct
/// outcomes for a caller (an unsatisfiable board is not a timeout), so
/// unlike `backtracking::solve`'s single "deadline exceeded" `Err`, this
/// keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Some row or column's instructions already admit no placement,
    /// found before any guess was made.
    Contradiction(String),
    /// The deadline elapsed before backtracking reached a verdict.
    Timeout(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::Contradiction(message) | SolveError::Timeout(message) => write!(f, "{}", message),
        }
    }
}

/// Diagnostics surfaced alongside a solved (or given-up-on) board,
/// mirroring `game/board/board.py::get_steps` and
/// `game/solver/solver.py`'s guess counter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub steps: u64,
    pub guesses: u64,
    pub solved: bool,
}

/// Which guess locator to use once propagation alone stalls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    ByOrder,
    MostInfo,
}

/// Propagates the board to a fixed point and, if that alone doesn't
/// finish it, falls back to guess-and-check backtracking. Returns
/// `Err` only when the deadline elapses before a verdict is reached, or
/// when the starting board is itself contradictory.
///
/// `propagator` picks which of the two confluent board-propagator
/// variants (`PropagationStrategy::FullSweep`/`DirtySet`) is used both for
/// this initial pass and for every propagation step backtracking runs.
pub fn run(
    board: &mut Board,
    strategy: Strategy,
    propagator: PropagationStrategy,
    deadline: Option<Duration>,
) -> Result<SolveReport, SolveError> {
    let deadline = deadline.map(|d| Instant::now() + d);
    let mut cache = LineCache::new();

    if propagation::propagate(board, &mut cache, propagator).is_err() {
        return Err(SolveError::Contradiction(
            "board is contradictory before any guess is made".to_string(),
        ));
    }

    if board.is_solved() {
        return Ok(SolveReport {
            steps: board.steps(),
            guesses: board.guesses(),
            solved: true,
        });
    }

    warn!("propagation alone did not finish the board, backtracking");
    let solved = match strategy {
        Strategy::ByOrder => backtracking::solve(board, &mut cache, &ByOrder, propagator, deadline).map_err(SolveError::Timeout)?,
        Strategy::MostInfo => backtracking::solve(board, &mut cache, &MostInfo, propagator, deadline).map_err(SolveError::Timeout)?,
    };

    Ok(SolveReport {
        steps: board.steps(),
        guesses: board.guesses(),
        solved,
    })
}
