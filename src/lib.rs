//! Checkers-Rust: an 8x8 draughts rules engine.
//!
//! This crate provides the rules of checkers (forced captures, chained
//! multi-captures, promotion to king), a static evaluator, and a greedy
//! one-ply computer player with random tie-breaking.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, evaluator weights, defaults
//! - [`cell`] - Board coordinates and 1-32 cell numbering
//! - [`piece`] - Players and pieces
//! - [`moves`] - Moves and `22-18` notation
//! - [`position`] - Core game logic (board state, moves, captures)
//! - [`selector`] - Greedy move selection
//! - [`save`] - Saved-game text format and game styles
//! - [`replay`] - Replay log of executed moves
//! - [`game`] - Game driver for interactive and computer play
//! - [`protocol`] - Text protocol for GUIs and scripts
//!
//! ## Example
//!
//! ```
//! use checkers_rust::position::Position;
//! use checkers_rust::selector::GreedySelector;
//!
//! // Create a new game
//! let mut pos = Position::new_game();
//!
//! // Let the computer pick a move for Black and play it
//! let mut selector = GreedySelector::with_seed(1);
//! let moves = pos.all_valid_moves();
//! let best = selector.select(&pos, &moves).unwrap();
//! pos = pos.apply_move(&best);
//! println!("Played {best}");
//! ```

pub mod cell;
pub mod constants;
pub mod game;
pub mod moves;
pub mod piece;
pub mod position;
pub mod protocol;
pub mod replay;
pub mod save;
pub mod selector;
