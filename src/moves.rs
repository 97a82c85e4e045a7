//! Moves and their `"<from>-<to>"` notation.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, NotationError};
use crate::piece::Piece;

/// A piece plus the cell it moves to.
///
/// The piece is a snapshot taken when the move was generated; its `cell` is
/// the origin of the move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub to: Cell,
}

impl Move {
    pub fn new(piece: Piece, to: Cell) -> Self {
        Self { piece, to }
    }

    #[inline]
    pub fn from(&self) -> Cell {
        self.piece.cell
    }

    /// A capture jumps two rows; a step moves one.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.from().row.abs_diff(self.to.row) == 2
    }

    /// The cell jumped over by a capture.
    pub fn jumped(&self) -> Option<Cell> {
        let from = self.from();
        self.is_capture()
            .then(|| Cell::new((from.row + self.to.row) / 2, (from.col + self.to.col) / 2))
    }

    pub fn notation(&self) -> Notation {
        Notation {
            from: self.from(),
            to: self.to,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.notation().fmt(f)
    }
}

/// A move written as two cell numbers, e.g. `22-18`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Notation {
    pub from: Cell,
    pub to: Cell,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from.cell_number(), self.to.cell_number())
    }
}

impl FromStr for Notation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| NotationError::Malformed(s.to_string()))?;
        Ok(Notation {
            from: Cell::parse_cell_number(from)?,
            to: Cell::parse_cell_number(to)?,
        })
    }
}
