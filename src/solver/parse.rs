#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for textual puzzle descriptions.
//!
//! A puzzle is 81 cells in row-major order. Cells are the digits `1`-`9`;
//! `0`, `.` and `_` all mean an empty cell. Whitespace between cells is
//! insignificant and lines starting with `#` are comments, so one row per
//! line:
//!
//! ```text
//! # classic example
//! 530070000
//! 600195000
//! ...
//! ```
//!
//! and the whole puzzle on a single 81-character line both parse.
//!
//! Parsing is the boundary where malformed input is rejected; the engine
//! itself assumes well-formed grids.

use crate::solver::grid::{Digit, Grid, EMPTY, SIZE};
use core::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Why a puzzle description was rejected.
#[derive(Debug)]
pub enum ParseError {
    /// Reading the input failed.
    Io(io::Error),
    /// A character that is not a digit, an empty-cell marker, whitespace
    /// or part of a comment.
    BadCell {
        /// 1-based input line.
        line: usize,
        /// The offending character.
        found: char,
    },
    /// The input did not contain exactly 81 cells.
    WrongCellCount(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::BadCell { line, found } => {
                write!(f, "line {line}: unexpected character {found:?} in puzzle")
            }
            Self::WrongCellCount(count) => {
                write!(f, "expected {} cells, found {count}", SIZE * SIZE)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a puzzle from a buffered reader.
///
/// # Errors
///
/// Returns a [`ParseError`] on I/O failure, on any unexpected character,
/// or when the input does not hold exactly 81 cells.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Grid, ParseError> {
    let mut cells: Vec<Digit> = Vec::with_capacity(SIZE * SIZE);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        for ch in content.chars() {
            match ch {
                '1'..='9' => cells.push(ch as Digit - b'0'),
                '0' | '.' | '_' => cells.push(EMPTY),
                c if c.is_whitespace() => {}
                _ => {
                    return Err(ParseError::BadCell {
                        line: index + 1,
                        found: ch,
                    });
                }
            }
        }
    }

    if cells.len() != SIZE * SIZE {
        return Err(ParseError::WrongCellCount(cells.len()));
    }

    let mut grid = Grid::new();
    for (i, digit) in cells.into_iter().enumerate() {
        grid.set(i / SIZE, i % SIZE, digit);
    }
    Ok(grid)
}

/// Parses a puzzle held in a string.
///
/// # Errors
///
/// See [`parse_puzzle`].
pub fn parse_str(input: &str) -> Result<Grid, ParseError> {
    parse_puzzle(input.as_bytes())
}

/// Parses a puzzle file.
///
/// # Errors
///
/// See [`parse_puzzle`]; opening the file may also fail.
pub fn parse_file(path: &Path) -> Result<Grid, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_puzzle(io::BufReader::new(file))
}
