//! The line info-adder: turns a line's leftmost/rightmost run placements
//! into concrete cell writes.
//!
//! Three rules, grounded on
//! `examples/original_source/game/solver/solvertools/info_adders.py`
//! (`RowInfoAdder.add_fill_info_`, `are_mutual_ranges_blocked`,
//! `add_no_fill_info_`).

use crate::cell::CellState;
use crate::line::Line;
use crate::solver::analyzer::{InstructionPlacement, Range};

fn fill_intersection<L: Line + ?Sized>(line: &mut L, a: Range, b: Range) -> usize {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    let mut changed = 0;
    for index in start..end {
        if line.get(index) == CellState::Unset {
            line.set(index, CellState::Fill);
            changed += 1;
        }
    }
    changed
}

/// True when the gap between two adjacent runs' reachable ranges is
/// pinched shut by a neighboring `Empty`/`Fill` pair, forcing the runs'
/// possible ranges to overlap even though they wouldn't otherwise.
fn are_mutual_ranges_blocked<L: Line + ?Sized>(line: &L, left_rng: Range, right_rng: Range) -> bool {
    let len = line.len();
    (right_rng.1 < len
        && line.get(right_rng.1) == CellState::Empty
        && line.get(right_rng.1 - 1) == CellState::Fill)
        || (left_rng.0 > 0
            && line.get(left_rng.0 - 1) == CellState::Empty
            && line.get(left_rng.0) == CellState::Fill)
}

/// Applies all three info-adder rules to `line` given the placements an
/// analyzer pass already found. Returns the number of cells newly set.
pub fn add_info<L: Line + ?Sized>(line: &mut L, placements: &[InstructionPlacement]) -> usize {
    let mut changed = 0;

    // Rule 1: a cell inside both a run's leftmost and rightmost range is
    // filled under every valid placement of that run.
    for placement in placements {
        changed += fill_intersection(line, placement.left_most, placement.right_most);
    }

    // Rule 2: when an Empty/Fill pair pinches the gap between two
    // adjacent runs shut, their ranges are forced to overlap too.
    for window in placements.windows(2) {
        let left_most_next = window[1].left_most;
        let right_most_prev = window[0].right_most;
        if are_mutual_ranges_blocked(line, left_most_next, right_most_prev) {
            changed += fill_intersection(line, left_most_next, right_most_prev);
        }
    }

    // Rule 3: a cell no run's range can reach is empty under every
    // solution. Includes the margins before the first run and after the
    // last, via the 0/len sentinels in the zipped iterators.
    let lefts = placements
        .iter()
        .map(|p| p.left_most.0)
        .chain(std::iter::once(line.len()));
    let rights = std::iter::once(0).chain(placements.iter().map(|p| p.right_most.1));

    for (right_stop, left_start) in rights.zip(lefts) {
        for index in right_stop..left_start {
            if line.get(index) != CellState::Empty {
                debug_assert_ne!(line.get(index), CellState::Fill);
                line.set(index, CellState::Empty);
                changed += 1;
            }
        }
    }

    changed
}
