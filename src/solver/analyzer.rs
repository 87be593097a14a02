//! The line analyzer: given a partially-filled line and its run
//! instructions, find the leftmost and rightmost placement for every run
//! consistent with the cells already known.
//!
//! A direct, recursive search over candidate start positions, grounded on
//! `examples/original_source/game/solver/solvertools/row_analyzer.py`
//! (`RowAnalyzer.can_solution_be_found_with_mapping_`,
//! `find_left_most_range_for_instruction`). The rightmost search reuses
//! the leftmost routine on a reversed view, exactly as
//! `RowAnalyzer.get_right_most_ranges` does.

use crate::cell::CellState;
use crate::instructions::RunInstructions;
use crate::line::{blocks_and_gaps, Line};

/// A half-open cell range `[start, end)` occupied by one run.
pub type Range = (usize, usize);

/// The leftmost and rightmost interval a single run could occupy, given
/// the rest of the line's current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InstructionPlacement {
    pub left_most: Range,
    pub right_most: Range,
}

/// Finds, starting the search no earlier than `index`, the leftmost
/// interval of length `length` that could hold a run without
/// contradicting an already-`Empty` cell, and without leaving an
/// already-`Fill` cell outside the run when that cell could only belong
/// to this run.
///
/// Candidate positions are confined to one `Gap` at a time (a maximal
/// run of not-`Empty` cells, from `line::blocks_and_gaps`): a run can
/// never cross an already-`Empty` cell, so there is no point considering
/// a start position that would.
fn leftmost_range_from<L: Line + ?Sized>(line: &L, index: usize, length: usize) -> Option<Range> {
    let len = line.len();
    let (_, gaps) = blocks_and_gaps(line);

    for gap in gaps {
        if gap.end <= index {
            continue;
        }

        let start_index = index.max(gap.start);
        if start_index + length > gap.end {
            if (start_index..gap.end).any(|i| line.get(i) == CellState::Fill) {
                return None;
            }
            continue;
        }

        let mut start = start_index;
        let mut end = start + length;
        loop {
            if end < len && line.get(end) == CellState::Fill {
                if line.get(start) == CellState::Fill {
                    return None;
                }
                start += 1;
                end += 1;
                if end > gap.end {
                    return None;
                }
                continue;
            }
            return Some((start, end));
        }
    }
    None
}

fn has_fill_from<L: Line + ?Sized>(line: &L, index: usize) -> bool {
    (index..line.len()).any(|i| line.get(i) == CellState::Fill)
}

/// Recursively assigns each run in `runs` the leftmost interval
/// consistent with a full solution existing for the remaining runs.
fn search_leftmost<L: Line + ?Sized>(
    line: &L,
    runs: &[usize],
    location_index: usize,
    placements: &mut Vec<Range>,
) -> bool {
    let len = line.len();

    let length = match runs.first() {
        None => return !has_fill_from(line, location_index),
        Some(&length) => length,
    };

    let mut start_index = location_index;
    while start_index + length <= len {
        if line.get(start_index) == CellState::Empty {
            start_index += 1;
            continue;
        }

        let range = match leftmost_range_from(line, start_index, length) {
            None => return false,
            Some(range) => range,
        };

        placements.push(range);
        if search_leftmost(line, &runs[1..], range.1 + 1, placements) {
            return true;
        }
        placements.pop();

        if line.get(range.0) == CellState::Fill {
            return false;
        }
        start_index += 1;
    }
    false
}

/// Leftmost placement of every run, or `None` if the line as currently
/// filled admits no solution at all.
pub fn leftmost_ranges<L: Line + ?Sized>(line: &L, instructions: &RunInstructions) -> Option<Vec<Range>> {
    let runs = instructions.as_slice();
    let mut placements = Vec::with_capacity(runs.len());
    if search_leftmost(line, runs, 0, &mut placements) {
        Some(placements)
    } else {
        None
    }
}

fn flip_range(range: Range, len: usize) -> Range {
    (len - range.1, len - range.0)
}

/// Rightmost placement of every run, found by running the leftmost
/// search on a reversed view of the line with reversed instructions,
/// then flipping the resulting ranges back into original coordinates.
pub fn rightmost_ranges<L: Line>(line: &mut L, instructions: &RunInstructions) -> Option<Vec<Range>> {
    let len = line.len();
    let reversed_instructions = instructions.reversed();
    let mut reversed_line = line.reversed();
    let reversed_placements = leftmost_ranges(&mut reversed_line, &reversed_instructions)?;

    let mut placements: Vec<Range> = reversed_placements
        .into_iter()
        .map(|range| flip_range(range, len))
        .collect();
    placements.reverse();
    Some(placements)
}

/// Runs both searches and pairs them up per run. `None` if the line is
/// already contradictory.
pub fn analyze<L: Line>(line: &mut L, instructions: &RunInstructions) -> Option<Vec<InstructionPlacement>> {
    let left = leftmost_ranges(line, instructions)?;
    let right = rightmost_ranges(line, instructions)?;
    debug_assert_eq!(left.len(), right.len());

    let placements: Vec<_> = left
        .into_iter()
        .zip(right)
        .map(|(left_most, right_most)| InstructionPlacement {
            left_most,
            right_most,
        })
        .collect();

    debug_assert!(placements
        .iter()
        .all(|p| p.left_most.0 <= p.right_most.0 && p.left_most.1 <= p.right_most.1));
    debug_assert!(placements.windows(2).all(|w| w[0].left_most.1 < w[1].left_most.0));
    debug_assert!(placements.windows(2).all(|w| w[0].right_most.1 < w[1].right_most.0));

    Some(placements)
}
