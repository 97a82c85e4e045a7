//! Saved-game text format.
//!
//! A save file lists the 32 dark cells in cell-number order, one per line,
//! followed by three trailer lines:
//!
//! ```text
//! 1 A
//! 2 AK
//! ...
//! 32 N
//! Black
//! Player-vs-Computer
//! true
//! ```
//!
//! Piece codes are `A`/`B` for the owner, with a `K` suffix for kings, or
//! `N` for an empty cell. The trailer holds the side to move, the game style
//! and the multi-capture setting.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;
use crate::constants::{COLS, ROWS};
use crate::piece::{Piece, Player};
use crate::position::Position;

/// Who controls each side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum GameStyle {
    PlayerVsPlayer,
    /// Human plays Below (moves first), computer plays Above
    #[default]
    PlayerVsComputer,
    /// Computer plays Below (moves first), human plays Above
    ComputerVsPlayer,
    ComputerVsComputer,
}

const STYLE_LABELS: [(GameStyle, &str); 4] = [
    (GameStyle::PlayerVsPlayer, "Player-vs-Player"),
    (GameStyle::PlayerVsComputer, "Player-vs-Computer"),
    (GameStyle::ComputerVsPlayer, "Computer-vs-Player"),
    (GameStyle::ComputerVsComputer, "Computer-vs-Computer"),
];

impl GameStyle {
    pub const ALL: [GameStyle; 4] = [
        GameStyle::PlayerVsPlayer,
        GameStyle::PlayerVsComputer,
        GameStyle::ComputerVsPlayer,
        GameStyle::ComputerVsComputer,
    ];

    pub fn label(self) -> &'static str {
        STYLE_LABELS
            .iter()
            .find(|(s, _)| *s == self)
            .map(|(_, l)| *l)
            .unwrap_or_default()
    }

    /// Whether the computer plays for `player` in this style.
    pub fn is_computer(self, player: Player) -> bool {
        match self {
            GameStyle::PlayerVsPlayer => false,
            GameStyle::PlayerVsComputer => player == Player::Above,
            GameStyle::ComputerVsPlayer => player == Player::Below,
            GameStyle::ComputerVsComputer => true,
        }
    }
}

impl fmt::Display for GameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a game style label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown game style '{0}'")]
pub struct ParseStyleError(pub String);

impl FromStr for GameStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STYLE_LABELS
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(s))
            .map(|(style, _)| *style)
            .ok_or_else(|| ParseStyleError(s.to_string()))
    }
}

/// Error loading a saved game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("error at ({row},{col}): missing token")]
    MissingToken { row: usize, col: usize },
    #[error("error at ({row},{col}): bad cell number '{token}'")]
    BadCellNumber { row: usize, col: usize, token: String },
    #[error("error at ({row},{col}): bad piece code '{token}'")]
    BadPieceCode { row: usize, col: usize, token: String },
    #[error("missing {0}")]
    MissingTrailer(&'static str),
    #[error("bad player '{0}'")]
    BadPlayer(String),
    #[error("bad game style '{0}'")]
    BadGameStyle(String),
    #[error("bad multi-capture flag '{0}'")]
    BadFlag(String),
}

impl LoadError {
    /// The (row, col) being read when the error occurred, for cell records.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            LoadError::MissingToken { row, col }
            | LoadError::BadCellNumber { row, col, .. }
            | LoadError::BadPieceCode { row, col, .. } => Some(Cell::new(*row, *col)),
            _ => None,
        }
    }
}

/// A loaded game: the position and the style it was played in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SavedGame {
    pub position: Position,
    pub style: GameStyle,
}

/// Serialize a position and game style to the save format.
pub fn to_save_string(pos: &Position, style: GameStyle) -> String {
    let mut out = String::new();
    for cell in Cell::dark_cells() {
        let code = pos.get(cell).map(|p| p.code()).unwrap_or_else(|| "N".into());
        out.push_str(&format!("{} {code}\n", cell.cell_number()));
    }
    out.push_str(&format!("{}\n", pos.current_player()));
    out.push_str(&format!("{style}\n"));
    out.push_str(&format!("{}\n", pos.allow_multi_capture()));
    out
}

/// Parse a saved game.
///
/// The position is built from scratch, so a failed load never leaves a
/// half-filled board behind. Capture and game-over state are recomputed
/// from the loaded board.
pub fn load(text: &str) -> Result<SavedGame, LoadError> {
    let mut tokens = text.split_whitespace();
    let mut pos = Position::new();

    for row in 0..ROWS {
        for col in 0..COLS {
            let cell = Cell::new(row, col);
            if !cell.is_dark() {
                continue;
            }
            let number = tokens.next().ok_or(LoadError::MissingToken { row, col })?;
            if Cell::parse_cell_number(number).ok() != Some(cell) {
                return Err(LoadError::BadCellNumber {
                    row,
                    col,
                    token: number.to_string(),
                });
            }
            let code = tokens.next().ok_or(LoadError::MissingToken { row, col })?;
            if code == "N" {
                continue;
            }
            let piece = Piece::from_code(code, cell).ok_or_else(|| LoadError::BadPieceCode {
                row,
                col,
                token: code.to_string(),
            })?;
            pos.set(cell, Some(piece));
        }
    }

    let player = tokens.next().ok_or(LoadError::MissingTrailer("current player"))?;
    let player: Player = player
        .parse()
        .map_err(|_| LoadError::BadPlayer(player.to_string()))?;
    let style = tokens.next().ok_or(LoadError::MissingTrailer("game style"))?;
    let style: GameStyle = style
        .parse()
        .map_err(|_| LoadError::BadGameStyle(style.to_string()))?;
    let flag = tokens.next().ok_or(LoadError::MissingTrailer("multi-capture flag"))?;
    let allow_multi_capture: bool = flag
        .parse()
        .map_err(|_| LoadError::BadFlag(flag.to_string()))?;

    pos.set_current_player(player);
    pos.set_allow_multi_capture(allow_multi_capture);
    pos.refresh_capture_state();
    Ok(SavedGame {
        position: pos,
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_save_text() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsComputer);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 35);
        assert_eq!(lines[0], "1 A");
        assert_eq!(lines[12], "13 N");
        assert_eq!(lines[31], "32 B");
        assert_eq!(lines[32], "Black");
        assert_eq!(lines[33], "Player-vs-Computer");
        assert_eq!(lines[34], "true");
    }

    #[test]
    fn test_roundtrip_with_kings() {
        let mut pos = Position::new();
        let k = Cell::new(4, 3);
        pos.set(k, Some(Piece::king(Player::Above, k)));
        let m = Cell::new(6, 1);
        pos.set(m, Some(Piece::new(Player::Below, m)));
        pos.set_current_player(Player::Above);
        pos.set_allow_multi_capture(false);
        pos.refresh_capture_state();

        let saved = load(&to_save_string(&pos, GameStyle::ComputerVsComputer)).unwrap();
        assert_eq!(saved.style, GameStyle::ComputerVsComputer);
        assert_eq!(saved.position, pos);
    }

    #[test]
    fn test_missing_token_reports_cell() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsPlayer);
        let truncated: String = text.lines().take(5).collect::<Vec<_>>().join("\n");
        let err = load(&truncated).unwrap_err();
        // The sixth dark cell is (1,2).
        assert_eq!(err, LoadError::MissingToken { row: 1, col: 2 });
        assert_eq!(err.cell(), Some(Cell::new(1, 2)));
    }

    #[test]
    fn test_bad_piece_code() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsPlayer)
            .replacen("1 A", "1 Q", 1);
        let err = load(&text).unwrap_err();
        assert!(matches!(err, LoadError::BadPieceCode { row: 0, col: 1, .. }));
        assert!(err.to_string().starts_with("error at (0,1)"));
    }

    #[test]
    fn test_out_of_range_cell_number() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsPlayer);

        let bad = text.replacen("1 A", "999 A", 1);
        let err = load(&bad).unwrap_err();
        assert_eq!(
            err,
            LoadError::BadCellNumber {
                row: 0,
                col: 1,
                token: "999".into()
            }
        );

        // Second record is cell 2 at (0,3).
        let bad = text.replacen("\n2 A", "\n-5 A", 1);
        let err = load(&bad).unwrap_err();
        assert_eq!(
            err,
            LoadError::BadCellNumber {
                row: 0,
                col: 3,
                token: "-5".into()
            }
        );
        assert_eq!(err.cell(), Some(Cell::new(0, 3)));

        let bad = text.replacen("1 A", "x A", 1);
        assert!(matches!(load(&bad), Err(LoadError::BadCellNumber { row: 0, col: 1, .. })));
    }

    #[test]
    fn test_mismatched_cell_number() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsPlayer);
        // In range, but not the cell expected at this point of the file.
        let bad = text.replacen("1 A", "2 A", 1);
        assert_eq!(
            load(&bad),
            Err(LoadError::BadCellNumber {
                row: 0,
                col: 1,
                token: "2".into()
            })
        );

        let bad = text.replacen("\n32 B", "\n31 B", 1);
        assert!(matches!(load(&bad), Err(LoadError::BadCellNumber { row: 7, col: 6, .. })));
    }

    #[test]
    fn test_bad_trailer() {
        let text = to_save_string(&Position::new_game(), GameStyle::PlayerVsPlayer);
        let bad = text.replace("Black", "Blue");
        assert_eq!(load(&bad), Err(LoadError::BadPlayer("Blue".into())));

        let bad = text.replace("true", "maybe");
        assert_eq!(load(&bad), Err(LoadError::BadFlag("maybe".into())));

        let missing: String = text.lines().take(33).collect::<Vec<_>>().join("\n");
        assert_eq!(load(&missing), Err(LoadError::MissingTrailer("game style")));
    }

    #[test]
    fn test_style_labels_roundtrip() {
        for style in GameStyle::ALL {
            assert_eq!(style.label().parse::<GameStyle>(), Ok(style));
        }
        assert_eq!(
            "Nobody-vs-Nobody".parse::<GameStyle>(),
            Err(ParseStyleError("Nobody-vs-Nobody".into()))
        );
    }

    #[test]
    fn test_computer_sides() {
        assert!(GameStyle::PlayerVsComputer.is_computer(Player::Above));
        assert!(!GameStyle::PlayerVsComputer.is_computer(Player::Below));
        assert!(GameStyle::ComputerVsPlayer.is_computer(Player::Below));
        assert!(GameStyle::ComputerVsComputer.is_computer(Player::Above));
        assert!(!GameStyle::PlayerVsPlayer.is_computer(Player::Below));
    }
}
