//! ASCII rendering of a board: a shell-friendly dump with row/column clue
//! gutters.
//!
//! Grounded on the teacher's `ShellRenderer`
//! (`examples/tsionyx-nonogrid/src/render.rs`, header/side/grid line
//! assembly via `pad`/`pad_with`/`transpose`), simplified from
//! multicolor `Description`/`ColorDesc` rendering to this crate's binary
//! `CellState`, and on `game/board/board.py::print_table`.

use crate::board::Board;
use crate::instructions::RunInstructions;
use crate::utils::{pad, pad_with, transpose};

pub trait Renderer {
    fn render(board: &Board) -> String;

    /// Just the grid, no clue gutters: one character per cell, one line
    /// per row.
    fn render_simple(board: &Board) -> String;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ShellRenderer;

impl Renderer for ShellRenderer {
    fn render(board: &Board) -> String {
        let side = side_lines(board);
        let side_width = side.first().map_or(0, Vec::len);

        let mut header = header_lines(board);
        let full_width = side_width + board.width();
        for row in &mut header {
            pad_with(row, "#".to_string(), full_width, false);
        }

        let grid = grid_lines(board);
        let body = side.into_iter().zip(grid).map(|(mut s, g)| {
            s.extend(g);
            s
        });

        header
            .into_iter()
            .chain(body)
            .map(|row| {
                row.iter()
                    .map(|symbol| {
                        let mut symbol = symbol.clone();
                        pad(&mut symbol, 2, true);
                        symbol
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_simple(board: &Board) -> String {
        (0..board.height())
            .map(|row| {
                (0..board.width())
                    .map(|column| board.get(row, column).to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn instructions_width(instructions: &[RunInstructions]) -> usize {
    instructions.iter().map(RunInstructions::len).max().unwrap_or(0)
}

fn instructions_to_matrix(instructions: &[RunInstructions]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = instructions
        .iter()
        .map(|ins| ins.as_slice().iter().map(ToString::to_string).collect())
        .collect();

    let width = instructions_width(instructions);
    for row in &mut rows {
        pad_with(row, String::new(), width, false);
    }
    rows
}

fn side_lines(board: &Board) -> Vec<Vec<String>> {
    let rows: Vec<_> = (0..board.height()).map(|r| board.row_instructions(r).clone()).collect();
    instructions_to_matrix(&rows)
}

fn header_lines(board: &Board) -> Vec<Vec<String>> {
    let columns: Vec<_> = (0..board.width()).map(|c| board.column_instructions(c).clone()).collect();
    transpose(&instructions_to_matrix(&columns)).expect("column clue matrix is never jagged")
}

fn grid_lines(board: &Board) -> Vec<Vec<String>> {
    (0..board.height())
        .map(|row| {
            (0..board.width())
                .map(|column| board.get(row, column).to_string())
                .collect()
        })
        .collect()
}
