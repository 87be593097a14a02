//! End-to-end scenarios and cross-cutting properties: the analyzer on
//! isolated lines, full-board propagation, backtracking, and the
//! confluence between the two propagator variants.

use picrate::board::Board;
use picrate::cache::LineCache;
use picrate::cell::CellState;
use picrate::instructions::RunInstructions;
use picrate::line::{Line, OwnedLine};
use picrate::solver::{analyzer, backtracking, guess::ByOrder, info, propagation, propagation::PropagationStrategy, run, Strategy};

fn line_of(symbols: &str) -> OwnedLine {
    let cells = symbols
        .chars()
        .map(|c| match c {
            '#' => CellState::Fill,
            '.' => CellState::Empty,
            _ => CellState::Unset,
        })
        .collect();
    OwnedLine::new(cells)
}

// Scenario 1: a 5-cell blank line with a single run spanning the whole
// line is fully forced.
#[test]
fn scenario_1_single_run_fills_whole_line() {
    let mut line = line_of("_____");
    let ins = RunInstructions::new(vec![5]);
    let placements = analyzer::analyze(&mut line, &ins).unwrap();
    info::add_info(&mut line, &placements);
    assert!(line.is_fully_set());
    for i in 0..5 {
        assert_eq!(line.get(i), CellState::Fill);
    }
}

// Scenario 2: [1, 2] on a blank 5-cell line forces exactly cell 3.
#[test]
fn scenario_2_two_runs_force_single_cell() {
    let mut line = line_of("_____");
    let ins = RunInstructions::new(vec![1, 2]);
    let placements = analyzer::analyze(&mut line, &ins).unwrap();
    assert_eq!(placements[0].left_most, (0, 1));
    assert_eq!(placements[1].left_most, (2, 4));
    assert_eq!(placements[0].right_most, (0, 1));
    assert_eq!(placements[1].right_most, (3, 5));

    info::add_info(&mut line, &placements);
    assert_eq!(line.get(3), CellState::Fill);
    assert_eq!(line.get(0), CellState::Unset);
    assert_eq!(line.get(1), CellState::Unset);
    assert_eq!(line.get(4), CellState::Unset);
}

// Scenario 3: a Fill cell that can belong to neither candidate run makes
// the line unsatisfiable.
#[test]
fn scenario_3_unplaceable_fill_is_unsatisfiable() {
    let line = line_of("______#.___");
    let ins = RunInstructions::new(vec![2, 3]);
    assert_eq!(analyzer::leftmost_ranges(&line, &ins), None);
}

// Scenario 4: a central Empty cell splits [1, 1] so neither run is
// forced anywhere.
#[test]
fn scenario_4_split_line_forces_nothing() {
    let mut line = line_of("__.__");
    let ins = RunInstructions::new(vec![1, 1]);
    let placements = analyzer::analyze(&mut line, &ins).unwrap();
    assert_eq!(placements[0].left_most, (0, 1));
    assert_eq!(placements[1].left_most, (3, 4));
    assert_eq!(placements[0].right_most, (1, 2));
    assert_eq!(placements[1].right_most, (4, 5));

    let changed = info::add_info(&mut line, &placements);
    assert_eq!(changed, 0);
}

// Scenario 5: a hand-authored 10x10 letter-N puzzle (no image fixtures
// ship with this crate's test data, so the instructions are encoded
// directly): left and right vertical strokes at columns 0 and 9, plus a
// diagonal cross-stroke from the top-left to the bottom-right corner.
#[test]
fn scenario_5_letter_n_full_board() {
    let row_instructions = vec![
        RunInstructions::new(vec![1, 1]),
        RunInstructions::new(vec![2, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 1, 1]),
        RunInstructions::new(vec![1, 2]),
        RunInstructions::new(vec![1, 1]),
    ];
    let mut column_instructions = vec![RunInstructions::new(vec![1]); 10];
    column_instructions[0] = RunInstructions::new(vec![10]);
    column_instructions[9] = RunInstructions::new(vec![10]);

    let mut board = Board::new(row_instructions, column_instructions);

    let mut expected = vec![CellState::Empty; 100];
    for r in 0..10 {
        expected[r * 10] = CellState::Fill;
        expected[r * 10 + 9] = CellState::Fill;
        expected[r * 10 + r] = CellState::Fill;
    }
    board.set_reference_solution(expected.clone());

    let report = run(&mut board, Strategy::ByOrder, PropagationStrategy::FullSweep, None).unwrap();
    assert!(report.solved);
    assert!(!board.is_there_mistake());

    for r in 0..10 {
        for c in 0..10 {
            assert_eq!(
                board.get(r, c),
                expected[r * 10 + c],
                "mismatch at ({}, {})",
                r,
                c
            );
        }
    }
}

// Scenario 6: the envelope a run could occupy (min_start/max_stop in
// the min/max-propagation formulation) equals this crate's
// left_most[i].start / right_most[i].end under the direct-search
// formulation, per the Open Question resolution in DESIGN.md.
#[test]
fn scenario_6_run_envelope_matches_min_max_formulation() {
    let mut cells = vec![CellState::Unset; 30];
    cells[4] = CellState::Fill;
    cells[8] = CellState::Fill;
    cells[24] = CellState::Fill;
    let mut line = OwnedLine::new(cells);
    let ins = RunInstructions::new(vec![13, 3]);

    let placements = analyzer::analyze(&mut line, &ins).unwrap();
    assert_eq!(placements[0].left_most.0, 0);
    assert_eq!(placements[0].right_most.1, 17);
    assert_eq!(placements[1].left_most.0, 22);
    assert_eq!(placements[1].right_most.1, 27);
}

// Confluence: the dirty-set and full-sweep propagators reach the same
// grid from the same starting board.
#[test]
fn confluence_of_both_propagators() {
    fn fresh_board() -> Board {
        Board::new(
            vec![
                RunInstructions::new(vec![1]),
                RunInstructions::new(vec![3]),
                RunInstructions::new(vec![1, 1]),
            ],
            vec![
                RunInstructions::new(vec![2]),
                RunInstructions::new(vec![1, 1]),
                RunInstructions::new(vec![2]),
            ],
        )
    }

    let mut full = fresh_board();
    let mut dirty = fresh_board();
    propagation::propagate_full_sweep(&mut full, &mut LineCache::new()).unwrap();
    propagation::propagate_dirty_set(&mut dirty, &mut LineCache::new()).unwrap();
    assert_eq!(full.snapshot(), dirty.snapshot());
}

// The end-to-end pipeline reaches the same solution whichever propagator
// strategy it's told to use.
#[test]
fn run_agrees_across_propagation_strategies() {
    fn ambiguous_board() -> Board {
        Board::new(
            vec![RunInstructions::new(vec![1]), RunInstructions::new(vec![1])],
            vec![RunInstructions::new(vec![1]), RunInstructions::new(vec![1])],
        )
    }

    let mut full = ambiguous_board();
    let mut dirty = ambiguous_board();
    let full_report = run(&mut full, Strategy::ByOrder, PropagationStrategy::FullSweep, None).unwrap();
    let dirty_report = run(&mut dirty, Strategy::ByOrder, PropagationStrategy::DirtySet, None).unwrap();
    assert!(full_report.solved && dirty_report.solved);
    assert_eq!(full.snapshot(), dirty.snapshot());
}

// Backtracking correctness: a failing branch always leaves the board
// exactly as it found it.
#[test]
fn backtracking_restores_board_on_failure() {
    let mut board = Board::new(
        vec![RunInstructions::new(vec![4])],
        vec![
            RunInstructions::new(vec![1]),
            RunInstructions::new(vec![1]),
            RunInstructions::new(vec![1]),
        ],
    );
    let entry = board.snapshot();
    let mut cache = LineCache::new();
    let solved = backtracking::solve(&mut board, &mut cache, &ByOrder, PropagationStrategy::FullSweep, None).unwrap();
    assert!(!solved);
    assert_eq!(board.snapshot(), entry);
}
