//! Integration tests for the file-based instruction loader: the public
//! entry point a caller reaches for instead of constructing a `Board`
//! by hand, exercised end to end against real temp files.

use std::fs;
use std::io::Write;

use picrate::cell::CellState;
use picrate::parser::parse_instructions;

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("picrate-infer-{}.txt", name));
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// A loaded board starts out entirely unset: parsing instructions never
// infers cell states on its own, only the solver does.
#[test]
fn loaded_board_starts_fully_unset() {
    let path = write_temp("blank", "3\nCOL\n1\n1\n1\n");
    let board = parse_instructions(&path).unwrap();
    for row in 0..board.height() {
        for column in 0..board.width() {
            assert_eq!(board.get(row, column), CellState::Unset);
        }
    }
    fs::remove_file(path).ok();
}

// A row or column line with no tokens at all is a legitimate zero-run
// instruction (an all-empty line), not something to skip.
#[test]
fn blank_instruction_line_means_zero_runs() {
    let path = write_temp("zero-run", "\n2\nCOL\n1\n1\n");
    let board = parse_instructions(&path).unwrap();
    assert_eq!(board.row_instructions(0).as_slice(), &[] as &[usize]);
    assert_eq!(board.row_instructions(1).as_slice(), &[2]);
    fs::remove_file(path).ok();
}

// The row/column counts implied by the file become the board's actual
// dimensions, not some fixed default.
#[test]
fn dimensions_come_from_instruction_counts() {
    let path = write_temp("dims", "1\n1\n1\n1\nCOL\n4\n");
    let board = parse_instructions(&path).unwrap();
    assert_eq!(board.height(), 4);
    assert_eq!(board.width(), 1);
    fs::remove_file(path).ok();
}

// A board loaded straight from a file is immediately solvable through
// the normal solving pipeline, same as one built with `Board::new`.
#[test]
fn loaded_board_solves_via_the_normal_pipeline() {
    let path = write_temp("solve", "1\n1\n1\nCOL\n1\n1\n1\n");
    let mut board = parse_instructions(&path).unwrap();
    let report = picrate::solver::run(
        &mut board,
        picrate::solver::Strategy::ByOrder,
        picrate::solver::propagation::PropagationStrategy::FullSweep,
        None,
    )
    .unwrap();
    assert!(report.solved);
    for i in 0..3 {
        assert_eq!(board.get(i, i), CellState::Fill);
    }
    fs::remove_file(path).ok();
}

// Whitespace around tokens, and blank trailing lines, don't change the
// parse.
#[test]
fn tolerates_extra_whitespace() {
    let path = write_temp("whitespace", "  2  1 \nCOL\n1\n1\n1\n1\n");
    let board = parse_instructions(&path).unwrap();
    assert_eq!(board.row_instructions(0).as_slice(), &[2, 1]);
    fs::remove_file(path).ok();
}

#[cfg(feature = "image-io")]
mod image_io_tests {
    use picrate::cell::CellState;
    use picrate::parser::{board_from_image, board_to_image};

    // A 2x2 checkerboard round-trips through PNG encode/decode with its
    // run instructions intact.
    #[test]
    fn checkerboard_round_trips_through_png() {
        let mut path = std::env::temp_dir();
        path.push("picrate-infer-checkerboard.png");

        let mut board = picrate::board::Board::new(
            vec![
                picrate::instructions::RunInstructions::new(vec![1]),
                picrate::instructions::RunInstructions::new(vec![1]),
            ],
            vec![
                picrate::instructions::RunInstructions::new(vec![1]),
                picrate::instructions::RunInstructions::new(vec![1]),
            ],
        );
        board.set(0, 0, CellState::Fill);
        board.set(0, 1, CellState::Empty);
        board.set(1, 0, CellState::Empty);
        board.set(1, 1, CellState::Fill);

        board_to_image(&board, &path).unwrap();
        let reloaded = board_from_image(&path).unwrap();

        assert_eq!(reloaded.get(0, 0), CellState::Fill);
        assert_eq!(reloaded.get(0, 1), CellState::Empty);
        assert_eq!(reloaded.get(1, 0), CellState::Empty);
        assert_eq!(reloaded.get(1, 1), CellState::Fill);
        assert_eq!(reloaded.row_instructions(0).as_slice(), &[1]);

        std::fs::remove_file(path).ok();
    }
}
