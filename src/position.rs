//! Checkers position representation and rule logic.
//!
//! This module provides the core game logic, including:
//! - Board state as an 8x8 array of optional pieces
//! - Move and capture generation with the forced-capture rule
//! - Move execution, promotion and multi-capture chaining
//! - Turn switching and game-over detection
//! - A static evaluator used by the move selector
//!
//! `Position` is `Copy`. Evaluating a candidate move never touches the live
//! position: [`Position::apply_move`] works on a value copy.

use std::fmt;

use tracing::{debug, info, trace};

use crate::cell::Cell;
use crate::constants::{
    CAPTURE_BONUS, COLS, DEFAULT_ALLOW_MULTI_CAPTURE, EMPTY, KING_VALUE, LIGHT, PIECE_VALUE, ROWS,
    START_ROWS,
};
use crate::moves::Move;
use crate::piece::{Piece, Player};

/// Column offsets of the two diagonals in a row direction.
const SIDEWAYS: [isize; 2] = [-1, 1];

/// A checkers position (board state plus turn state).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Pieces by `[row][col]`; light cells are always `None`
    squares: [[Option<Piece>; COLS]; ROWS],
    /// Side to move
    current_player: Player,
    /// Whether the side to move has at least one capture
    has_capture: bool,
    game_over: bool,
    /// Cell of the piece that captured last during the current turn
    last_capturing: Option<Cell>,
    allow_multi_capture: bool,
    /// Whether the piece moved last was crowned by that move
    just_promoted: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// An empty board. No game is in progress until [`Position::reset`].
    pub fn new() -> Self {
        Position {
            squares: [[None; COLS]; ROWS],
            current_player: Player::Below,
            has_capture: false,
            game_over: true,
            last_capturing: None,
            allow_multi_capture: DEFAULT_ALLOW_MULTI_CAPTURE,
            just_promoted: false,
        }
    }

    /// A position set up for a new game.
    pub fn new_game() -> Self {
        let mut p = Self::new();
        p.reset();
        p
    }

    /// Start a new game: standard setup, Below to move.
    ///
    /// The multi-capture setting is kept.
    pub fn reset(&mut self) {
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = Cell::new(row, col);
                self.squares[row][col] = if !cell.is_dark() {
                    None
                } else if row < START_ROWS {
                    Some(Piece::new(Player::Above, cell))
                } else if row >= ROWS - START_ROWS {
                    Some(Piece::new(Player::Below, cell))
                } else {
                    None
                };
            }
        }
        self.current_player = Player::Below;
        self.has_capture = false;
        self.game_over = false;
        self.last_capturing = None;
        self.just_promoted = false;
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    /// Whether the side to move had a capture when its turn started.
    pub fn has_capture(&self) -> bool {
        self.has_capture
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The side that won, once the game is over. An empty board has no
    /// winner.
    pub fn winner(&self) -> Option<Player> {
        (self.game_over && self.pieces().next().is_some()).then(|| self.current_player.opposite())
    }

    pub fn last_capturing(&self) -> Option<Cell> {
        self.last_capturing
    }

    pub fn allow_multi_capture(&self) -> bool {
        self.allow_multi_capture
    }

    pub fn set_allow_multi_capture(&mut self, allow: bool) {
        self.allow_multi_capture = allow;
    }

    pub fn just_promoted(&self) -> bool {
        self.just_promoted
    }

    /// The piece on a cell, if any. Off-board cells are empty.
    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.squares.get(cell.row)?.get(cell.col).copied().flatten()
    }

    /// Put a piece on (or clear) a cell. The piece's own cell is kept in
    /// sync. Light and off-board cells are left untouched.
    pub fn set(&mut self, cell: Cell, piece: Option<Piece>) {
        if !cell.is_on_board() || !cell.is_dark() {
            return;
        }
        self.squares[cell.row][cell.col] = piece.map(|mut p| {
            p.cell = cell;
            p
        });
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|p| *p)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces().filter(|p| p.player == player).count()
    }

    /// Recompute `has_capture` and `game_over` from the board, and clear
    /// any in-progress capture chain. Used after loading or manual setup.
    pub fn refresh_capture_state(&mut self) {
        self.last_capturing = None;
        self.just_promoted = false;
        self.has_capture = self.any_capture_available();
        self.game_over = !self.has_capture && self.has_lost();
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// The piece on `cell` if it belongs to the side to move.
    fn movable_piece(&self, cell: Cell) -> Option<Piece> {
        self.get(cell).filter(|p| p.player == self.current_player)
    }

    fn is_enemy(&self, cell: Cell, player: Player) -> bool {
        self.get(cell).is_some_and(|p| p.player != player)
    }

    /// Landing cells of every jump open to `piece`.
    fn capture_targets(&self, piece: Piece) -> impl Iterator<Item = Cell> + '_ {
        piece.directions().iter().flat_map(move |&drow| {
            SIDEWAYS.iter().filter_map(move |&dcol| {
                let over = piece.cell.offset(drow, dcol)?;
                let land = piece.cell.offset(2 * drow, 2 * dcol)?;
                (self.is_enemy(over, piece.player) && self.get(land).is_none()).then_some(land)
            })
        })
    }

    /// Empty cells one diagonal step away in the directions open to `piece`.
    fn step_targets(&self, piece: Piece) -> impl Iterator<Item = Cell> + '_ {
        piece.directions().iter().flat_map(move |&drow| {
            SIDEWAYS.iter().filter_map(move |&dcol| {
                let to = piece.cell.offset(drow, dcol)?;
                self.get(to).is_none().then_some(to)
            })
        })
    }

    /// Captures available to the piece on `cell`.
    ///
    /// Empty if the cell is empty or holds a piece of the side not to move.
    pub fn valid_captures(&self, cell: Cell) -> Vec<Move> {
        match self.movable_piece(cell) {
            Some(piece) => self
                .capture_targets(piece)
                .map(|to| Move::new(piece, to))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Simple (non-capturing) moves available to the piece on `cell`.
    pub fn valid_moves(&self, cell: Cell) -> Vec<Move> {
        match self.movable_piece(cell) {
            Some(piece) => self
                .step_targets(piece)
                .map(|to| Move::new(piece, to))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_valid_capture(&self, cell: Cell) -> bool {
        self.movable_piece(cell)
            .is_some_and(|p| self.capture_targets(p).next().is_some())
    }

    pub fn has_valid_move(&self, cell: Cell) -> bool {
        self.movable_piece(cell)
            .is_some_and(|p| self.step_targets(p).next().is_some())
    }

    /// Every capture open to the side to move.
    pub fn all_valid_captures(&self) -> Vec<Move> {
        Cell::dark_cells()
            .flat_map(|c| self.valid_captures(c))
            .collect()
    }

    /// Every legal move for the side to move. Captures are forced: if any
    /// exist, only captures are returned.
    pub fn all_valid_moves(&self) -> Vec<Move> {
        let captures = self.all_valid_captures();
        if !captures.is_empty() {
            return captures;
        }
        Cell::dark_cells()
            .flat_map(|c| self.valid_moves(c))
            .collect()
    }

    /// Moves a driver may offer right now. While a capture chain is in
    /// progress only the capturing piece may go on, and only by capturing.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.last_capturing {
            Some(cell) if self.double_capture_available() => self.valid_captures(cell),
            _ => self.all_valid_moves(),
        }
    }

    /// Whether the side to move has any capture on the board.
    pub fn any_capture_available(&self) -> bool {
        Cell::dark_cells().any(|c| self.has_valid_capture(c))
    }

    /// True if no piece of the side to move has a simple move.
    pub fn has_lost(&self) -> bool {
        !Cell::dark_cells().any(|c| self.has_valid_move(c))
    }

    /// Whether `piece` may step to `to` (interactive input check).
    pub fn is_valid_move(&self, piece: &Piece, to: Cell) -> bool {
        if self.double_capture_available() {
            return false;
        }
        if !to.is_on_board() || self.get(to).is_some() {
            return false;
        }
        if piece.player != self.current_player || self.get(piece.cell) != Some(*piece) {
            return false;
        }
        self.step_targets(*piece).any(|c| c == to)
    }

    /// Whether `piece` may capture by jumping to `to` (interactive input
    /// check). During a capture chain only the capturing piece qualifies.
    pub fn is_valid_capture(&self, piece: &Piece, to: Cell) -> bool {
        if self.double_capture_available() && self.last_capturing != Some(piece.cell) {
            return false;
        }
        if piece.player != self.current_player || self.get(piece.cell) != Some(*piece) {
            return false;
        }
        self.capture_targets(*piece).any(|c| c == to)
    }

    // =========================================================================
    // Move execution
    // =========================================================================

    /// Execute a move without checking legality and without passing the
    /// turn.
    ///
    /// A jump removes the piece in between and records the mover as the
    /// capturing piece. A piece reaching its promotion row is crowned.
    ///
    /// The move must come from one of the generators above; an off-board
    /// destination panics.
    pub fn move_piece(&mut self, mv: &Move) {
        self.just_promoted = false;
        let from = mv.from();
        let mut piece = self.squares[from.row][from.col]
            .take()
            .unwrap_or(mv.piece);

        if let Some(jumped) = mv.jumped() {
            trace!(%jumped, "captured");
            self.squares[jumped.row][jumped.col] = None;
            self.last_capturing = Some(mv.to);
        }

        piece.cell = mv.to;
        if piece.should_be_king() {
            piece.make_king();
            self.just_promoted = true;
            debug!(cell = %mv.to, player = %piece.player, "crowned");
        }
        self.squares[mv.to.row][mv.to.col] = Some(piece);
    }

    /// Whether the piece that just captured must capture again.
    ///
    /// Promotion ends the turn even if another jump is geometrically open.
    pub fn double_capture_available(&self) -> bool {
        if !self.allow_multi_capture || self.just_promoted {
            return false;
        }
        self.last_capturing
            .is_some_and(|cell| self.has_valid_capture(cell))
    }

    /// Pass the turn and recompute capture and game-over state.
    pub fn next_turn(&mut self) {
        self.last_capturing = None;
        self.switch_player();
        self.has_capture = self.any_capture_available();
        if !self.has_capture && self.has_lost() {
            self.game_over = true;
            info!(winner = %self.current_player.opposite(), "game over");
        }
        debug!(player = %self.current_player, has_capture = self.has_capture, "next turn");
    }

    /// The position after `mv`, leaving `self` untouched.
    ///
    /// The turn passes unless the moved piece must keep capturing.
    pub fn apply_move(&self, mv: &Move) -> Position {
        let mut next = *self;
        next.move_piece(mv);
        if !next.double_capture_available() {
            next.next_turn();
        }
        next
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Material and positional score for one side.
    ///
    /// Each piece counts its cell value plus 3 (man) or 5 (king). A piece
    /// with a capture open scores +20 for the side to move and -20 for the
    /// other side.
    pub fn value(&self, player: Player) -> i32 {
        let mut value = 0;
        for piece in self.pieces().filter(|p| p.player == player) {
            value += piece.cell.value();
            value += if piece.is_king() { KING_VALUE } else { PIECE_VALUE };
            if self.has_valid_capture(piece.cell) {
                if player == self.current_player {
                    value += CAPTURE_BONUS;
                } else {
                    value -= CAPTURE_BONUS;
                }
            }
        }
        value
    }

    /// Score of `player` minus the score of the opponent.
    pub fn value2(&self, player: Player) -> i32 {
        self.value(player) - self.value(player.opposite())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for row in 0..ROWS {
            write!(f, "{row}")?;
            for col in 0..COLS {
                let cell = Cell::new(row, col);
                let ch = match self.get(cell) {
                    Some(p) => p.symbol(),
                    None if cell.is_dark() => EMPTY,
                    None => LIGHT,
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
