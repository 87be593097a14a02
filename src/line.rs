//! A single row or column as an abstract, reversible sequence of cells.
//!
//! The `Line` trait lets the analyzer and info-adder work identically on
//! rows and columns, and on a line read right-to-left, without ever
//! copying cells into a temporary buffer. Grounded on
//! `examples/original_source/game/solver/solvertools/ranges.py`
//! (`RangesManager`, block/gap extraction) and on the teacher crate's
//! habit of deriving a reversed view instead of allocating one
//! (`src/block/binary.rs`).

use crate::cell::CellState;

/// A mutable, indexable sequence of cell states.
pub trait Line {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> CellState;

    fn set(&mut self, index: usize, state: CellState);

    fn is_fully_set(&self) -> bool {
        (0..self.len()).all(|i| self.get(i).is_set())
    }

    /// A zero-copy view of this line read back to front.
    fn reversed(&mut self) -> ReverseLine<'_, Self>
    where
        Self: Sized,
    {
        ReverseLine { inner: self }
    }
}

/// A line viewed back to front. Index `i` here is index `len - 1 - i` in
/// the wrapped line; a second reversal is itself a `Line` and hands back
/// the original order.
#[derive(Debug)]
pub struct ReverseLine<'a, L: ?Sized> {
    inner: &'a mut L,
}

impl<'a, L: Line + ?Sized> ReverseLine<'a, L> {
    fn flip(&self, index: usize) -> usize {
        self.inner.len() - 1 - index
    }
}

impl<'a, L: Line + ?Sized> Line for ReverseLine<'a, L> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> CellState {
        self.inner.get(self.flip(index))
    }

    fn set(&mut self, index: usize, state: CellState) {
        let real = self.flip(index);
        self.inner.set(real, state);
    }
}

/// A plain owned line, useful for standalone line-analyzer tests and as
/// the return type of `Line::to_owned`-style snapshotting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnedLine {
    cells: Vec<CellState>,
}

impl OwnedLine {
    pub fn new(cells: Vec<CellState>) -> Self {
        Self { cells }
    }

    pub fn unset(len: usize) -> Self {
        Self {
            cells: vec![CellState::Unset; len],
        }
    }

    pub fn as_slice(&self) -> &[CellState] {
        &self.cells
    }
}

impl Line for OwnedLine {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn get(&self, index: usize) -> CellState {
        self.cells[index]
    }

    fn set(&mut self, index: usize, state: CellState) {
        self.cells[index] = state;
    }
}

/// A maximal run of `Fill` cells, `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A maximal run of not-`Empty` cells (`Unset` or `Fill`), `[start, end)`:
/// the widest range a run could still be placed in without crossing a
/// cell already known empty.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
}

impl Gap {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Extracts every `Block` and `Gap` of a line in a single left-to-right
/// pass, grounded on `RangesManager`'s incremental scan. Feeds
/// `solver::analyzer::leftmost_range_from`, which confines a candidate
/// run placement to one `Gap` at a time.
pub fn blocks_and_gaps<L: Line + ?Sized>(line: &L) -> (Vec<Block>, Vec<Gap>) {
    let mut blocks = Vec::new();
    let mut gaps = Vec::new();

    let mut block_start: Option<usize> = None;
    let mut gap_start: Option<usize> = None;

    for i in 0..line.len() {
        match line.get(i) {
            CellState::Fill => {
                if block_start.is_none() {
                    block_start = Some(i);
                }
                if gap_start.is_none() {
                    gap_start = Some(i);
                }
            }
            CellState::Unset => {
                if let Some(start) = block_start.take() {
                    blocks.push(Block { start, end: i });
                }
                if gap_start.is_none() {
                    gap_start = Some(i);
                }
            }
            CellState::Empty => {
                if let Some(start) = block_start.take() {
                    blocks.push(Block { start, end: i });
                }
                if let Some(start) = gap_start.take() {
                    gaps.push(Gap { start, end: i });
                }
            }
        }
    }

    if let Some(start) = block_start {
        blocks.push(Block {
            start,
            end: line.len(),
        });
    }
    if let Some(start) = gap_start {
        gaps.push(Gap {
            start,
            end: line.len(),
        });
    }

    (blocks, gaps)
}
