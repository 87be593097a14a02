//! Loading a board's run instructions from a text file, and (behind the
//! `image-io` feature) from a black-and-white image.
//!
//! Grounded on `game/board/instructions_utils.py::instructions_from_file`
//! (the `COL` token switching from row to column parsing) and
//! `game/board/image_utils.py` (`image_to_array`/`array_to_image`) from
//! the original Python implementation, and on the teacher's
//! `ParseError`/`LocalReader` shape (`src/parser.rs`).

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::board::Board;
use crate::cell::CellState;
use crate::instructions::RunInstructions;

/// A loader-boundary failure: bad I/O, or an instruction file that
/// doesn't parse into a rectangular, non-contradictory board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self(format!("{:?}", err))
    }
}

fn line_to_runs(line: &str) -> Result<Vec<usize>, ParseError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| ParseError(format!("not a run length: {:?}", token)))
        })
        .collect()
}

/// Parses an instruction file: one line of whitespace-separated run
/// lengths per row, a line containing `COL` switching to column
/// instructions, one line per column afterwards.
pub fn parse_instructions(path: &Path) -> Result<Board, ParseError> {
    let content = fs::read_to_string(path)?;

    let mut row_runs = Vec::new();
    let mut column_runs = Vec::new();
    let mut parsing_rows = true;

    for line in content.lines() {
        if parsing_rows && line.contains("COL") {
            parsing_rows = false;
            continue;
        }
        let runs = line_to_runs(line)?;
        if parsing_rows {
            row_runs.push(runs);
        } else {
            column_runs.push(runs);
        }
    }

    if row_runs.is_empty() || column_runs.is_empty() {
        return Err(ParseError(
            "instruction file must list both row and column instructions".to_string(),
        ));
    }

    let row_instructions: Vec<_> = row_runs.into_iter().map(RunInstructions::new).collect();
    let column_instructions: Vec<_> = column_runs.into_iter().map(RunInstructions::new).collect();

    validate_instructions(&row_instructions, column_instructions.len())?;
    validate_instructions(&column_instructions, row_instructions.len())?;

    Ok(Board::new(row_instructions, column_instructions))
}

fn validate_instructions(instructions: &[RunInstructions], cross_length: usize) -> Result<(), ParseError> {
    for (index, ins) in instructions.iter().enumerate() {
        if ins.as_slice().iter().any(|&run| run == 0) {
            return Err(ParseError(format!("line {} contains a zero-length run", index)));
        }
        if ins.min_length() > cross_length {
            return Err(ParseError(format!(
                "line {} needs at least {} cells but the board is only {} long",
                index,
                ins.min_length(),
                cross_length
            )));
        }
    }
    Ok(())
}

#[cfg(feature = "image-io")]
mod image_io {
    use super::{Board, CellState, ParseError};
    use image::{DynamicImage, GenericImageView, Luma};
    use std::path::Path;

    /// Loads a black-and-white image and derives both its cell grid and
    /// run instructions from the dark pixels, grounded on
    /// `image_to_array`.
    pub fn board_from_image(path: &Path) -> Result<Board, ParseError> {
        let image = image::open(path).map_err(|err| ParseError(format!("{:?}", err)))?;
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);

        let cells: Vec<CellState> = luminance_grid(&image)
            .into_iter()
            .map(|dark| if dark { CellState::Fill } else { CellState::Empty })
            .collect();

        let row_instructions = (0..height)
            .map(|row| super::RunInstructions::new(runs_of(&cells, row * width, width, 1)))
            .collect();
        let column_instructions = (0..width)
            .map(|column| super::RunInstructions::new(runs_of(&cells, column, height, width)))
            .collect();

        let mut board = Board::new(row_instructions, column_instructions);
        for row in 0..height {
            for column in 0..width {
                board.set(row, column, cells[row * width + column]);
            }
        }
        board.set_reference_solution(cells);
        Ok(board)
    }

    fn luminance_grid(image: &DynamicImage) -> Vec<bool> {
        let gray = image.to_luma8();
        gray.pixels().map(|Luma([value])| *value < 128).collect()
    }

    fn runs_of(cells: &[CellState], start: usize, len: usize, stride: usize) -> Vec<usize> {
        let mut runs = Vec::new();
        let mut current = 0usize;
        for i in 0..len {
            if cells[start + i * stride] == CellState::Fill {
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

    /// Dumps a solved board back out as a black-and-white PNG, grounded
    /// on `array_to_image`.
    pub fn board_to_image(board: &Board, path: &Path) -> Result<(), ParseError> {
        let mut buffer = image::GrayImage::new(board.width() as u32, board.height() as u32);
        for row in 0..board.height() {
            for column in 0..board.width() {
                let value = if board.get(row, column) == CellState::Fill { 0 } else { 255 };
                buffer.put_pixel(column as u32, row as u32, Luma([value]));
            }
        }
        buffer.save(path).map_err(|err| ParseError(format!("{:?}", err)))
    }
}

#[cfg(feature = "image-io")]
pub use image_io::{board_from_image, board_to_image};
