//! The board-wide propagator: repeatedly runs the line analyzer and
//! info-adder over rows and columns until nothing changes.
//!
//! Two variants are provided, both grounded on the teacher crate's job
//! queue (`examples/tsionyx-nonogrid/src/solver/propagation.rs`,
//! `SmallJobQueue`/`LongJobQueue`): a full-sweep pass that mirrors
//! `game/solver/analyze_the_guess_solver.py`'s "while changed, re-run
//! every row and column" loop, and a dirty-set pass that only re-visits
//! lines crossing a cell that actually changed. Both must reach the same
//! fixed point on the same board (tested in `tests/solving.rs`).

use hashbrown::HashSet;

use crate::board::Board;
use crate::cache::LineCache;
use crate::cell::CellState;
use crate::line::Line;
use crate::solver::{analyzer, info};

/// Returned by `propagate_*` on success: how many lines were actually
/// re-solved (diagnostic, mirrors `game/board/board.py::get_steps`).
pub type LinesSolved = u64;

/// Which of the two confluent propagator variants to run. Both reach the
/// same fixed point (tested in `tests/solving.rs::confluence_of_both_propagators`);
/// this only affects how much work is redone between changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropagationStrategy {
    FullSweep,
    DirtySet,
}

impl Default for PropagationStrategy {
    fn default() -> Self {
        PropagationStrategy::FullSweep
    }
}

/// Dispatches to whichever propagator variant `strategy` names.
pub fn propagate(board: &mut Board, cache: &mut LineCache, strategy: PropagationStrategy) -> Result<LinesSolved, String> {
    match strategy {
        PropagationStrategy::FullSweep => propagate_full_sweep(board, cache),
        PropagationStrategy::DirtySet => propagate_dirty_set(board, cache),
    }
}

fn run_line<L: Line + ?Sized>(line: &mut L, instructions: &crate::instructions::RunInstructions) -> Result<(), String> {
    let placements = analyzer::analyze(line, instructions)
        .ok_or_else(|| format!("no placement satisfies instructions [{}] on a line of length {}", instructions, line.len()))?;
    info::add_info(line, &placements);
    Ok(())
}

/// Solves one row or column against the cache, writes the result back
/// into the board, and returns the line-relative offsets that changed.
fn solve_line(
    board: &mut Board,
    cache: &mut LineCache,
    is_column: bool,
    index: usize,
) -> Result<Vec<usize>, String> {
    let len = if is_column { board.height() } else { board.width() };
    let before: Vec<CellState> = (0..len).map(|i| board.cell_in_line(is_column, index, i)).collect();

    if before.iter().all(|state| state.is_set()) {
        return Ok(vec![]);
    }

    let key = (is_column, index, before.clone());
    if let Some(cached) = cache.get(&key).cloned() {
        return match cached {
            None => Err(format!(
                "{} {} is a known contradiction",
                if is_column { "column" } else { "row" },
                index
            )),
            Some(after) => Ok(apply_and_diff(board, is_column, index, &before, &after)),
        };
    }

    let instructions = board.instructions(is_column, index).clone();
    let outcome = if is_column {
        let mut view = board.column_mut(index);
        run_line(&mut view, &instructions)
    } else {
        let mut view = board.row_mut(index);
        run_line(&mut view, &instructions)
    };

    match outcome {
        Err(message) => {
            cache.insert(key, None);
            Err(message)
        }
        Ok(()) => {
            let after: Vec<CellState> = (0..len).map(|i| board.cell_in_line(is_column, index, i)).collect();
            cache.insert(key, Some(after.clone()));
            Ok(diff(&before, &after))
        }
    }
}

fn apply_and_diff(board: &mut Board, is_column: bool, index: usize, before: &[CellState], after: &[CellState]) -> Vec<usize> {
    for (offset, &state) in after.iter().enumerate() {
        board.set_in_line(is_column, index, offset, state);
    }
    diff(before, after)
}

fn diff(before: &[CellState], after: &[CellState]) -> Vec<usize> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter_map(|(i, (b, a))| if b != a { Some(i) } else { None })
        .collect()
}

/// Re-solves every row and column, then every row and column again,
/// until a full pass changes nothing.
pub fn propagate_full_sweep(board: &mut Board, cache: &mut LineCache) -> Result<LinesSolved, String> {
    let mut lines_solved = 0;
    loop {
        let mut changed_any = false;

        for row in 0..board.height() {
            let changed = solve_line(board, cache, false, row)?;
            if !changed.is_empty() {
                changed_any = true;
                lines_solved += 1;
            }
        }
        for column in 0..board.width() {
            let changed = solve_line(board, cache, true, column)?;
            if !changed.is_empty() {
                changed_any = true;
                lines_solved += 1;
            }
        }

        // `is_solved_full` here is only a loop-termination heuristic: once
        // nothing is `Unset`, `solve_line`'s own early-return skips every
        // line anyway, so another pass can't change anything. It is not
        // the board-is-actually-solved verdict — callers use
        // `Board::is_solved` for that.
        if !changed_any || board.is_solved_full() {
            break;
        }
    }
    info!("full-sweep propagation: {} lines solved", lines_solved);
    Ok(lines_solved)
}

type Job = (bool, usize);

struct DirtyQueue {
    vec: Vec<Job>,
    queued: HashSet<Job>,
}

impl DirtyQueue {
    fn seeded(rows: usize, columns: usize) -> Self {
        let mut vec = Vec::with_capacity(rows + columns);
        vec.extend((0..columns).map(|c| (true, c)));
        vec.extend((0..rows).map(|r| (false, r)));
        let queued = vec.iter().copied().collect();
        Self { vec, queued }
    }

    fn push(&mut self, job: Job) {
        if self.queued.insert(job) {
            self.vec.push(job);
        }
    }

    fn pop(&mut self) -> Option<Job> {
        let job = self.vec.pop()?;
        self.queued.remove(&job);
        Some(job)
    }
}

/// Only re-visits lines crossing a cell that actually changed on a
/// previous pass, grounded on the teacher's `LongJobQueue`.
pub fn propagate_dirty_set(board: &mut Board, cache: &mut LineCache) -> Result<LinesSolved, String> {
    let mut queue = DirtyQueue::seeded(board.height(), board.width());
    let mut lines_solved = 0;

    while let Some((is_column, index)) = queue.pop() {
        debug!(
            "solving {} {}",
            if is_column { "column" } else { "row" },
            index
        );
        let changed = solve_line(board, cache, is_column, index)?;
        if changed.is_empty() {
            continue;
        }
        lines_solved += 1;
        for offset in changed {
            queue.push((!is_column, offset));
        }
    }

    info!("dirty-set propagation: {} lines solved", lines_solved);
    Ok(lines_solved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::RunInstructions;

    fn letter_l_board() -> Board {
        // A 3x3 board shaped like the letter L:
        // # . .
        // # . .
        // # # #
        Board::new(
            vec![
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![3]),
            ],
            vec![
                RunInstructions::new(vec![3]),
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![1]),
            ],
        )
    }

    #[test]
    fn full_sweep_solves_letter_l() {
        let mut board = letter_l_board();
        let mut cache = LineCache::new();
        propagate_full_sweep(&mut board, &mut cache).unwrap();
        assert!(board.is_solved_full());
        assert_eq!(board.get(2, 1), CellState::Fill);
        assert_eq!(board.get(0, 1), CellState::Empty);
    }

    #[test]
    fn dirty_set_solves_letter_l() {
        let mut board = letter_l_board();
        let mut cache = LineCache::new();
        propagate_dirty_set(&mut board, &mut cache).unwrap();
        assert!(board.is_solved_full());
    }

    #[test]
    fn full_sweep_and_dirty_set_agree() {
        let mut full = letter_l_board();
        let mut dirty = letter_l_board();
        propagate_full_sweep(&mut full, &mut LineCache::new()).unwrap();
        propagate_dirty_set(&mut dirty, &mut LineCache::new()).unwrap();
        assert_eq!(full.snapshot(), dirty.snapshot());
    }

    #[test]
    fn contradiction_is_reported() {
        let mut board = Board::new(
            vec![RunInstructions::new(vec![3])],
            vec![
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![1]),
            ],
        );
        board.set(0, 1, CellState::Empty);
        let mut cache = LineCache::new();
        assert!(propagate_full_sweep(&mut board, &mut cache).is_err());
    }
}
