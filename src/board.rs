//! The rectangular grid of cells plus its row and column run instructions.
//!
//! Grounded on `game/board/board.py` (`Board`, `CellTable`,
//! `is_there_mistake`, `get_steps`) from the original Python
//! implementation, and on the teacher crate's `Board`/`Point` storage
//! shape (`src/board.rs`), simplified from multicolor to the binary
//! `CellState` model this spec uses.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::instructions::RunInstructions;
use crate::line::Line;

/// A `(row, column)` coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The full puzzle: a grid plus one `RunInstructions` per row and column.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    row_instructions: Vec<RunInstructions>,
    column_instructions: Vec<RunInstructions>,
    /// An optional known-good solution, used only to detect a mistake
    /// early (mirrors `Board.is_there_mistake` in the original); never
    /// consulted by the solver itself.
    reference_solution: Option<Vec<CellState>>,
    steps: u64,
    guesses: u64,
}

impl Board {
    pub fn new(row_instructions: Vec<RunInstructions>, column_instructions: Vec<RunInstructions>) -> Self {
        let height = row_instructions.len();
        let width = column_instructions.len();
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            row_instructions,
            column_instructions,
            reference_solution: None,
            steps: 0,
            guesses: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_instructions(&self, row: usize) -> &RunInstructions {
        &self.row_instructions[row]
    }

    pub fn column_instructions(&self, column: usize) -> &RunInstructions {
        &self.column_instructions[column]
    }

    /// Instructions for the row or column, chosen by the same
    /// `is_column` flag the propagator uses for both axes uniformly.
    pub fn instructions(&self, is_column: bool, index: usize) -> &RunInstructions {
        if is_column {
            self.column_instructions(index)
        } else {
            self.row_instructions(index)
        }
    }

    fn index_of(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.height && column < self.width);
        row * self.width + column
    }

    pub fn get(&self, row: usize, column: usize) -> CellState {
        self.cells[self.index_of(row, column)].state()
    }

    pub fn set(&mut self, row: usize, column: usize, state: CellState) {
        let index = self.index_of(row, column);
        if self.cells[index].state() != state {
            self.cells[index].set_state(state);
            self.steps += 1;
        }
    }

    /// Reads a cell addressed by the propagator's `(is_column, index,
    /// offset)` scheme: `offset` runs along the line, `index` picks which
    /// row/column.
    pub fn cell_in_line(&self, is_column: bool, index: usize, offset: usize) -> CellState {
        if is_column {
            self.get(offset, index)
        } else {
            self.get(index, offset)
        }
    }

    pub fn set_in_line(&mut self, is_column: bool, index: usize, offset: usize, state: CellState) {
        if is_column {
            self.set(offset, index, state)
        } else {
            self.set(index, offset, state)
        }
    }

    pub fn row_mut(&mut self, row: usize) -> RowView<'_> {
        RowView { board: self, row }
    }

    pub fn column_mut(&mut self, column: usize) -> ColumnView<'_> {
        ColumnView { board: self, column }
    }

    /// True once every cell has a state, regardless of whether that state
    /// actually satisfies the row/column instructions. A cheap occupancy
    /// check, useful as a loop-termination heuristic (nothing further can
    /// be deduced once nothing is `Unset`), but **not** a completion
    /// verdict on its own: see `is_solved`.
    pub fn is_solved_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.state().is_set())
    }

    /// The real completion check: every cell is set *and* every row and
    /// every column's actual fill pattern matches its `RunInstructions`
    /// exactly, mirroring `game/board/board.py::is_board_solved`/
    /// `is_row_solved` from the original implementation.
    ///
    /// `is_solved_full` alone is not enough to conclude a board is solved:
    /// `solver/propagation.rs::solve_line` skips re-running the line
    /// analyzer on a line once every one of its cells is already set (the
    /// same skip `info_adders.py::add_row_info_` makes on
    /// `row.is_fully_set()`), so a line can become fully set purely
    /// through neighbor-forced writes without its own instructions ever
    /// having been checked against the result.
    pub fn is_solved(&self) -> bool {
        self.is_solved_full()
            && (0..self.height).all(|row| self.row_matches_instructions(row))
            && (0..self.width).all(|column| self.column_matches_instructions(column))
    }

    fn row_matches_instructions(&self, row: usize) -> bool {
        let runs = run_lengths((0..self.width).map(|column| self.get(row, column)));
        runs == self.row_instructions[row].as_slice()
    }

    fn column_matches_instructions(&self, column: usize) -> bool {
        let runs = run_lengths((0..self.height).map(|row| self.get(row, column)));
        runs == self.column_instructions[column].as_slice()
    }

    pub fn set_reference_solution(&mut self, solution: Vec<CellState>) {
        debug_assert_eq!(solution.len(), self.width * self.height);
        self.reference_solution = Some(solution);
    }

    /// True as soon as any set cell disagrees with the reference
    /// solution, mirroring `game/board/board.py::is_there_mistake`.
    pub fn is_there_mistake(&self) -> bool {
        match &self.reference_solution {
            None => false,
            Some(reference) => self
                .cells
                .iter()
                .zip(reference)
                .any(|(cell, &expected)| cell.state().is_set() && cell.state() != expected),
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn guesses(&self) -> u64 {
        self.guesses
    }

    pub fn record_guess(&mut self) {
        self.guesses += 1;
    }

    /// A full snapshot of cell states, for backtracking's save/restore.
    pub fn snapshot(&self) -> Vec<CellState> {
        self.cells.iter().map(Cell::state).collect()
    }

    pub fn restore(&mut self, snapshot: &[CellState]) {
        debug_assert_eq!(snapshot.len(), self.cells.len());
        for (cell, &state) in self.cells.iter_mut().zip(snapshot) {
            if cell.state() != state {
                cell.set_state(state);
            }
        }
    }
}

/// Run-length encodes a sequence of cell states into the lengths of its
/// maximal `Fill` runs (an `Unset` cell counts as a break, same as
/// `Empty`), for comparing against a line's `RunInstructions`.
fn run_lengths<I: Iterator<Item = CellState>>(cells: I) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for state in cells {
        if state == CellState::Fill {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height {
            for column in 0..self.width {
                write!(f, "{}", self.get(row, column))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A mutable, zero-copy view of one board row as a `Line`.
#[derive(Debug)]
pub struct RowView<'a> {
    board: &'a mut Board,
    row: usize,
}

impl<'a> Line for RowView<'a> {
    fn len(&self) -> usize {
        self.board.width()
    }

    fn get(&self, index: usize) -> CellState {
        self.board.get(self.row, index)
    }

    fn set(&mut self, index: usize, state: CellState) {
        self.board.set(self.row, index, state)
    }
}

/// A mutable, zero-copy view of one board column as a `Line`.
#[derive(Debug)]
pub struct ColumnView<'a> {
    board: &'a mut Board,
    column: usize,
}

impl<'a> Line for ColumnView<'a> {
    fn len(&self) -> usize {
        self.board.height()
    }

    fn get(&self, index: usize) -> CellState {
        self.board.get(index, self.column)
    }

    fn set(&mut self, index: usize, state: CellState) {
        self.board.set(index, self.column, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::new(
            vec![RunInstructions::new(vec![2]), RunInstructions::new(vec![1])],
            vec![RunInstructions::new(vec![1]), RunInstructions::new(vec![2])],
        )
    }

    #[test]
    fn new_board_is_all_unset() {
        let board = small_board();
        assert!(!board.is_solved_full());
        for r in 0..board.height() {
            for c in 0..board.width() {
                assert_eq!(board.get(r, c), CellState::Unset);
            }
        }
    }

    #[test]
    fn is_solved_true_for_matching_pattern() {
        let mut board = small_board();
        board.set(0, 0, CellState::Fill);
        board.set(0, 1, CellState::Fill);
        board.set(1, 0, CellState::Empty);
        board.set(1, 1, CellState::Fill);
        assert!(board.is_solved_full());
        assert!(board.is_solved());
    }

    // A board can be fully set (every cell occupied) while some row or
    // column's actual fill pattern still disagrees with its
    // instructions; `is_solved_full` alone must not call that solved.
    #[test]
    fn is_solved_full_does_not_imply_is_solved() {
        let mut board = small_board();
        board.set(0, 0, CellState::Empty);
        board.set(0, 1, CellState::Fill);
        board.set(1, 0, CellState::Fill);
        board.set(1, 1, CellState::Empty);
        assert!(board.is_solved_full());
        assert!(!board.is_solved());
    }

    #[test]
    fn set_bumps_steps_only_on_change() {
        let mut board = small_board();
        board.set(0, 0, CellState::Fill);
        assert_eq!(board.steps(), 1);
        board.set(0, 0, CellState::Fill);
        assert_eq!(board.steps(), 1);
        board.set(0, 0, CellState::Empty);
        assert_eq!(board.steps(), 2);
    }

    #[test]
    fn row_and_column_views_share_storage() {
        let mut board = small_board();
        {
            let mut row = board.row_mut(0);
            row.set(1, CellState::Fill);
        }
        assert_eq!(board.get(0, 1), CellState::Fill);
        {
            let col = board.column_mut(1);
            assert_eq!(col.get(0), CellState::Fill);
        }
    }

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut board = small_board();
        board.set(0, 0, CellState::Fill);
        let snapshot = board.snapshot();
        board.set(0, 1, CellState::Empty);
        assert_ne!(board.snapshot(), snapshot);
        board.restore(&snapshot);
        assert_eq!(board.snapshot(), snapshot);
    }

    #[test]
    fn mistake_detection_against_reference() {
        let mut board = small_board();
        board.set_reference_solution(vec![CellState::Fill; 4]);
        assert!(!board.is_there_mistake());
        board.set(0, 0, CellState::Empty);
        assert!(board.is_there_mistake());
    }
}
