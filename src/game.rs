//! Game driver: one live position plus who plays which side.
//!
//! `Game` validates interactive moves, plays whole computer turns through
//! the greedy selector, keeps the replay log, and handles save/load.

use thiserror::Error;
use tracing::{debug, info};

use crate::cell::{Cell, NotationError};
use crate::moves::{Move, Notation};
use crate::piece::Player;
use crate::position::Position;
use crate::replay::MoveLog;
use crate::save::{self, GameStyle, LoadError};
use crate::selector::{GreedySelector, SelectError};

/// Error playing a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("no piece at {0}")]
    NoPiece(Cell),
    #[error("illegal move {0}")]
    IllegalMove(Notation),
    #[error("the game is over")]
    GameOver,
    #[error("replay move {index}: {source}")]
    Replay {
        index: usize,
        #[source]
        source: Box<PlayError>,
    },
}

/// What happens after a move leg.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The same piece must capture again
    Continue,
    /// The other side is to move
    TurnPassed,
    GameOver { winner: Player },
}

pub struct Game {
    position: Position,
    style: GameStyle,
    log: MoveLog,
    selector: GreedySelector,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameStyle::default())
    }
}

impl Game {
    /// A new game with a system-seeded selector.
    pub fn new(style: GameStyle) -> Self {
        Self::with_selector(style, GreedySelector::new())
    }

    /// A new game whose computer moves are reproducible.
    pub fn with_seed(style: GameStyle, seed: u64) -> Self {
        Self::with_selector(style, GreedySelector::with_seed(seed))
    }

    fn with_selector(style: GameStyle, selector: GreedySelector) -> Self {
        Self {
            position: Position::new_game(),
            style,
            log: MoveLog::new(),
            selector,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Replace the live position (manual setup). Clears the log.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.log.clear();
    }

    pub fn style(&self) -> GameStyle {
        self.style
    }

    pub fn set_style(&mut self, style: GameStyle) {
        self.style = style;
    }

    /// Toggle multi-capture. Turning it off in the middle of a capture
    /// chain ends the turn there.
    pub fn set_allow_multi_capture(&mut self, allow: bool) {
        let chain_open = self.position.double_capture_available();
        self.position.set_allow_multi_capture(allow);
        if chain_open && !allow {
            debug!("multi-capture disabled mid-chain, passing the turn");
            self.position.next_turn();
        }
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Start over from the initial setup.
    pub fn new_game(&mut self) {
        self.position.reset();
        self.log.clear();
        info!(style = %self.style, "new game");
    }

    pub fn computer_to_move(&self) -> bool {
        !self.position.is_game_over() && self.style.is_computer(self.position.current_player())
    }

    fn outcome(&self) -> Outcome {
        match self.position.winner() {
            Some(winner) => Outcome::GameOver { winner },
            None => Outcome::TurnPassed,
        }
    }

    /// Play an interactive move leg from `from` to `to`.
    ///
    /// A simple move is only accepted when no capture is pending. Rejected
    /// input leaves the game unchanged.
    pub fn play(&mut self, from: Cell, to: Cell) -> Result<Outcome, PlayError> {
        if self.position.is_game_over() {
            return Err(PlayError::GameOver);
        }
        let piece = self.position.get(from).ok_or(PlayError::NoPiece(from))?;
        let mv = Move::new(piece, to);

        if !self.position.has_capture() && self.position.is_valid_move(&piece, to) {
            self.execute(&mv);
            self.position.next_turn();
            Ok(self.outcome())
        } else if self.position.is_valid_capture(&piece, to) {
            self.execute(&mv);
            if self.position.double_capture_available() {
                return Ok(Outcome::Continue);
            }
            self.position.next_turn();
            Ok(self.outcome())
        } else {
            Err(PlayError::IllegalMove(mv.notation()))
        }
    }

    /// Play an interactive move leg given in notation, e.g. `22-18`.
    pub fn play_notation(&mut self, token: &str) -> Result<Outcome, PlayError> {
        let n: Notation = token.parse()?;
        self.play(n.from, n.to)
    }

    /// Play a whole computer turn, including every leg of a capture chain.
    /// Returns the legs played.
    pub fn computer_move(&mut self) -> Result<Vec<Move>, SelectError> {
        let mut legs = Vec::new();
        loop {
            let candidates = self.position.legal_moves();
            let mv = self.selector.select(&self.position, &candidates)?;
            self.execute(&mv);
            legs.push(mv);
            if !self.position.double_capture_available() {
                break;
            }
        }
        self.position.next_turn();
        info!(
            player = %self.position.current_player().opposite(),
            legs = legs.len(),
            "computer moved"
        );
        Ok(legs)
    }

    fn execute(&mut self, mv: &Move) {
        debug!(%mv, "move");
        self.log.record(mv);
        self.position.move_piece(mv);
    }

    pub fn save_string(&self) -> String {
        save::to_save_string(&self.position, self.style)
    }

    /// Load a saved game. On error the current game is kept as it was.
    pub fn load_str(&mut self, text: &str) -> Result<(), LoadError> {
        let saved = save::load(text)?;
        self.position = saved.position;
        self.style = saved.style;
        self.log.clear();
        info!(style = %self.style, player = %self.position.current_player(), "game loaded");
        Ok(())
    }

    /// Play a replay log from the initial setup.
    pub fn replay(log: &MoveLog, allow_multi_capture: bool) -> Result<Game, PlayError> {
        let mut game = Game::new(GameStyle::PlayerVsPlayer);
        game.set_allow_multi_capture(allow_multi_capture);
        for (index, leg) in log.iter().enumerate() {
            game.play(leg.from, leg.to).map_err(|e| PlayError::Replay {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(game)
    }
}
