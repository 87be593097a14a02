//! Depth-first guess-and-check search: propagate to a fixed point, pick
//! an unset cell, try one state, recurse; on failure try the other
//! state; on failure of both, the position the caller passed in has no
//! solution.
//!
//! Grounded on the teacher's depth-first `Solver` shape
//! (`examples/tsionyx-nonogrid/src/solver/backtracking.rs`) and on
//! `examples/original_source/game/solver/analyze_the_guess_solver.py`
//! (`AnalyzeThenGuessSolver.solve_`: apply forced info, recurse on a
//! guess, undo on failure), simplified to single-solution search per
//! this crate's Non-goals. Undo uses a whole-board snapshot/restore
//! (`Board::snapshot`/`Board::restore`) rather than a per-cell change
//! log; at this board size that is simpler and just as correct.

use std::time::Instant;

use crate::board::Board;
use crate::cache::LineCache;
use crate::cell::CellState;
use crate::solver::guess::GuessLocator;
use crate::solver::propagation::{self, PropagationStrategy};

fn flip(state: CellState) -> CellState {
    match state {
        CellState::Fill => CellState::Empty,
        CellState::Empty => CellState::Fill,
        CellState::Unset => unreachable!("a guess is always Fill or Empty"),
    }
}

fn deadline_exceeded(deadline: Option<Instant>) -> bool {
    deadline.map_or(false, |d| Instant::now() >= d)
}

/// Solves `board` in place. `Ok(true)` means `board` now holds a
/// solution; `Ok(false)` means the position `board` started at has none,
/// and `board` is restored to exactly that starting state. `Err` means
/// the deadline was hit before a verdict was reached; `board` is
/// likewise restored.
pub fn solve<G: GuessLocator>(
    board: &mut Board,
    cache: &mut LineCache,
    locator: &G,
    propagator: PropagationStrategy,
    deadline: Option<Instant>,
) -> Result<bool, String> {
    let entry_snapshot = board.snapshot();

    if deadline_exceeded(deadline) {
        return Err("solver deadline exceeded".to_string());
    }

    if propagation::propagate(board, cache, propagator).is_err() {
        board.restore(&entry_snapshot);
        return Ok(false);
    }

    if board.is_solved() {
        return Ok(true);
    }

    let guess = match locator.next_guess(board, cache) {
        // No unset cell left for the locator to branch on, and the
        // `is_solved` check above already found the board lacking: the
        // line instructions aren't all satisfied, so this position fails.
        None => {
            board.restore(&entry_snapshot);
            return Ok(false);
        }
        Some(guess) => guess,
    };

    for &state in &[guess.state, flip(guess.state)] {
        if deadline_exceeded(deadline) {
            board.restore(&entry_snapshot);
            return Err("solver deadline exceeded".to_string());
        }

        let pre_guess = board.snapshot();
        board.set(guess.point.row, guess.point.column, state);
        board.record_guess();
        debug!("guessing {:?} = {:?}", guess.point, state);

        match solve(board, cache, locator, propagator, deadline) {
            Ok(true) => return Ok(true),
            Ok(false) => {
                board.restore(&pre_guess);
            }
            Err(message) => {
                board.restore(&entry_snapshot);
                return Err(message);
            }
        }
    }

    warn!("no solution through {:?}", guess.point);
    board.restore(&entry_snapshot);
    Ok(false)
}
