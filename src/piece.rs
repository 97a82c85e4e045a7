//! Players and pieces.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;
use crate::constants::ROWS;

/// One of the two sides.
///
/// `Above` starts on rows 0-2 and moves toward increasing rows; `Below`
/// starts on rows 5-7, moves toward decreasing rows, and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Above,
    Below,
}

/// Display labels, used both for status text and for the save format.
const PLAYER_LABELS: [(Player, &str); 2] = [(Player::Above, "Red"), (Player::Below, "Black")];

impl Player {
    pub fn opposite(self) -> Player {
        match self {
            Player::Above => Player::Below,
            Player::Below => Player::Above,
        }
    }

    /// Row direction this side moves in when not a king.
    pub fn forward(self) -> isize {
        match self {
            Player::Above => 1,
            Player::Below => -1,
        }
    }

    /// The row on which this side's pieces are crowned.
    pub fn promotion_row(self) -> usize {
        match self {
            Player::Above => ROWS - 1,
            Player::Below => 0,
        }
    }

    pub fn label(self) -> &'static str {
        PLAYER_LABELS
            .iter()
            .find(|(p, _)| *p == self)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    /// Single-letter code used in the save format.
    pub fn code(self) -> char {
        match self {
            Player::Above => 'A',
            Player::Below => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a player label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown player '{0}'")]
pub struct ParsePlayerError(pub String);

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLAYER_LABELS
            .iter()
            .find(|(_, label)| *label == s)
            .map(|(p, _)| *p)
            .ok_or_else(|| ParsePlayerError(s.to_string()))
    }
}

/// A piece on the board. It knows its owner and cell, not the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub cell: Cell,
    king: bool,
}

impl Piece {
    pub fn new(player: Player, cell: Cell) -> Self {
        Self {
            player,
            cell,
            king: false,
        }
    }

    pub fn king(player: Player, cell: Cell) -> Self {
        Self {
            player,
            cell,
            king: true,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.king
    }

    /// Crown this piece. There is no way back.
    pub fn make_king(&mut self) {
        self.king = true;
    }

    /// True if the piece stands on its promotion row and is not yet a king.
    pub fn should_be_king(&self) -> bool {
        !self.king && self.cell.row == self.player.promotion_row()
    }

    /// Row directions this piece may move or jump in.
    pub fn directions(&self) -> &'static [isize] {
        match (self.king, self.player) {
            (true, _) => &[-1, 1],
            (false, Player::Below) => &[-1],
            (false, Player::Above) => &[1],
        }
    }

    /// Save-format code: `A`, `AK`, `B` or `BK`.
    pub fn code(&self) -> String {
        let mut s = self.player.code().to_string();
        if self.king {
            s.push('K');
        }
        s
    }

    /// Parse a save-format code into a piece at `cell`.
    pub fn from_code(code: &str, cell: Cell) -> Option<Piece> {
        let mut chars = code.chars();
        let player = match chars.next()? {
            'A' => Player::Above,
            'B' => Player::Below,
            _ => return None,
        };
        match chars.as_str() {
            "" => Some(Piece::new(player, cell)),
            "K" => Some(Piece::king(player, cell)),
            _ => None,
        }
    }

    /// Board symbol: lowercase for men, uppercase for kings.
    pub fn symbol(&self) -> char {
        let c = self.player.code().to_ascii_lowercase();
        if self.king { c.to_ascii_uppercase() } else { c }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
