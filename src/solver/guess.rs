//! Guess locators: choosing which unset cell to branch on next.
//!
//! Grounded on
//! `examples/original_source/game/solver/solvertools/guesslocator.py`
//! (`Guess`, `ByOrderGuessLocator`, `MostInfoGuessLocator`).

use crate::board::{Board, Point};
use crate::cache::LineCache;
use crate::cell::CellState;
use crate::solver::propagation;

/// A candidate assignment to try: set `point` to `state` and see if the
/// board still has a solution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Guess {
    pub point: Point,
    pub state: CellState,
}

pub trait GuessLocator {
    /// The next cell/state pair to branch on, or `None` if every cell is
    /// already set (the board is either solved or already contradictory).
    fn next_guess(&self, board: &mut Board, cache: &mut LineCache) -> Option<Guess>;
}

/// Picks the first unset cell in row-major order and guesses `Fill`.
/// Cheap, grounded on `ByOrderGuessLocator`.
#[derive(Debug, Copy, Clone, Default)]
pub struct ByOrder;

impl GuessLocator for ByOrder {
    fn next_guess(&self, board: &mut Board, _cache: &mut LineCache) -> Option<Guess> {
        for row in 0..board.height() {
            for column in 0..board.width() {
                if board.get(row, column) == CellState::Unset {
                    return Some(Guess {
                        point: Point::new(row, column),
                        state: CellState::Fill,
                    });
                }
            }
        }
        None
    }
}

/// Tries every unset cell under both candidate states, runs a full
/// propagation pass for each, and picks whichever assignment forces the
/// most additional cells, grounded on `MostInfoGuessLocator`.
///
/// Every trial assignment is undone before the next is tried; the board
/// is left byte-identical to how it was found (asserted in debug
/// builds), matching the scoped-transaction purity this locator needs.
#[derive(Debug, Copy, Clone, Default)]
pub struct MostInfo;

impl GuessLocator for MostInfo {
    fn next_guess(&self, board: &mut Board, cache: &mut LineCache) -> Option<Guess> {
        let baseline = board.snapshot();
        let mut best: Option<(Guess, usize)> = None;

        for row in 0..board.height() {
            for column in 0..board.width() {
                if board.get(row, column) != CellState::Unset {
                    continue;
                }

                for &state in &[CellState::Fill, CellState::Empty] {
                    board.set(row, column, state);
                    let info_added = match propagation::propagate_full_sweep(board, cache) {
                        Ok(_) => {
                            let after = board.snapshot();
                            after.iter().zip(&baseline).filter(|(a, b)| a != b).count().saturating_sub(1)
                        }
                        // This trial assignment is itself a contradiction,
                        // meaning the other state is forced: the strongest
                        // info signal a candidate guess can produce.
                        Err(_) => board.width() * board.height(),
                    };

                    if best.as_ref().map_or(true, |&(_, count)| info_added > count) {
                        best = Some((
                            Guess {
                                point: Point::new(row, column),
                                state,
                            },
                            info_added,
                        ));
                    }

                    board.restore(&baseline);
                }
            }
        }

        debug_assert_eq!(
            board.snapshot(),
            baseline,
            "MostInfo guess locator must leave the board unchanged"
        );

        best.map(|(guess, _)| guess)
    }
}
