//! Board coordinates and the 1..=32 cell numbering used by move notation.

use std::fmt;

use thiserror::Error;

use crate::constants::{CELLS_PER_ROW, COLS, DARK_CELLS, ROWS};

/// Error parsing a cell number or a move token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Cell number outside 1..=32
    #[error("cell number {0} out of range (must be 1-{max})", max = DARK_CELLS)]
    OutOfRange(i64),
    /// Token is not of the form `<from>-<to>`
    #[error("malformed move token '{0}'")]
    Malformed(String),
}

/// A (row, col) coordinate on the board, 0-indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether signed coordinates fall on the board.
    #[inline]
    pub fn contains(row: isize, col: isize) -> bool {
        row >= 0 && row < ROWS as isize && col >= 0 && col < COLS as isize
    }

    /// The cell `(drow, dcol)` away, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Cell> {
        let row = self.row as isize + drow;
        let col = self.col as isize + dcol;
        Cell::contains(row, col).then(|| Cell::new(row as usize, col as usize))
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Dark cells are the only ones pieces ever stand on.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Positional value in 1..=4, highest on the edge of the board.
    pub fn value(self) -> i32 {
        let ring = |i: usize| i.min(ROWS - 1 - i);
        4 - ring(self.row).min(ring(self.col)) as i32
    }

    /// The 1-based cell number of a dark cell.
    pub fn cell_number(self) -> u8 {
        (self.row * CELLS_PER_ROW + self.col / 2 + 1) as u8
    }

    /// Convert a cell number (1..=32) back to its dark cell.
    pub fn from_cell_number(n: i64) -> Result<Cell, NotationError> {
        if n < 1 || n > DARK_CELLS as i64 {
            return Err(NotationError::OutOfRange(n));
        }
        let idx = (n - 1) as usize;
        let row = idx / CELLS_PER_ROW;
        let mut col = 2 * (idx % CELLS_PER_ROW);
        if row % 2 == 0 {
            col += 1;
        }
        Ok(Cell::new(row, col))
    }

    /// Parse a decimal cell number.
    pub fn parse_cell_number(s: &str) -> Result<Cell, NotationError> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| NotationError::Malformed(s.to_string()))?;
        Cell::from_cell_number(n)
    }

    /// All 32 dark cells in row-major order (cell number order).
    pub fn dark_cells() -> impl Iterator<Item = Cell> {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| Cell::new(row, col)))
            .filter(|c| c.is_dark())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
