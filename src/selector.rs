//! Greedy one-ply move selection.
//!
//! Every candidate move is applied to a copy of the position and scored by
//! how much it changes the mover's `value2`. The best-scoring moves are
//! collected and one of them is picked uniformly at random.
//!
//! There is no lookahead beyond the move itself.

use thiserror::Error;
use tracing::{debug, error};

use crate::moves::Move;
use crate::position::Position;

/// Error returned when there is nothing to choose from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("no legal moves to choose from")]
    NoMoves,
}

/// Source of random integers for tie-breaking.
pub trait RandomSource {
    /// A uniformly distributed integer in `[0, n)`. `n` is never zero.
    fn below(&mut self, n: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, n: usize) -> usize {
        self.usize(..n)
    }
}

/// Score change for the side to move if `mv` is played.
pub fn score_move(pos: &Position, mv: &Move) -> i32 {
    let mover = pos.current_player();
    pos.apply_move(mv).value2(mover) - pos.value2(mover)
}

/// Scores of all candidates, in order.
pub fn score_moves(pos: &Position, moves: &[Move]) -> Vec<i32> {
    moves.iter().map(|m| score_move(pos, m)).collect()
}

/// The candidates tied for the highest score, with that score.
pub fn best_moves(pos: &Position, moves: &[Move]) -> Option<(i32, Vec<Move>)> {
    let scores = score_moves(pos, moves);
    let max = *scores.iter().max()?;
    let best = moves
        .iter()
        .zip(&scores)
        .filter(|&(_, &s)| s == max)
        .map(|(m, _)| *m)
        .collect();
    Some((max, best))
}

/// Pick one of the best-scoring candidates at random.
pub fn choose_move<R: RandomSource>(
    pos: &Position,
    moves: &[Move],
    rng: &mut R,
) -> Result<Move, SelectError> {
    let Some((score, best)) = best_moves(pos, moves) else {
        error!(player = %pos.current_player(), "move selection called without candidates");
        return Err(SelectError::NoMoves);
    };
    let chosen = best[rng.below(best.len())];
    debug!(
        candidates = moves.len(),
        tied = best.len(),
        score,
        chosen = %chosen,
        "selected move"
    );
    Ok(chosen)
}

/// A move selector owning its random number generator.
pub struct GreedySelector {
    rng: fastrand::Rng,
}

impl Default for GreedySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedySelector {
    /// A selector seeded from the system.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A selector with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn select(&mut self, pos: &Position, moves: &[Move]) -> Result<Move, SelectError> {
        choose_move(pos, moves, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::piece::{Piece, Player};

    /// Always returns the same index (clamped to the range).
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn below(&mut self, n: usize) -> usize {
            self.0.min(n - 1)
        }
    }

    fn place(pos: &mut Position, row: usize, col: usize, player: Player) {
        let cell = Cell::new(row, col);
        pos.set(cell, Some(Piece::new(player, cell)));
    }

    #[test]
    fn test_empty_candidates_fail() {
        let pos = Position::new_game();
        assert_eq!(choose_move(&pos, &[], &mut Fixed(0)), Err(SelectError::NoMoves));
        assert_eq!(GreedySelector::with_seed(1).select(&pos, &[]), Err(SelectError::NoMoves));
    }

    #[test]
    fn test_choice_is_among_best() {
        let pos = Position::new_game();
        let moves = pos.all_valid_moves();
        let (score, best) = best_moves(&pos, &moves).unwrap();
        assert!(score_moves(&pos, &moves).iter().all(|&s| s <= score));

        let mut selector = GreedySelector::with_seed(42);
        for _ in 0..20 {
            let mv = selector.select(&pos, &moves).unwrap();
            assert!(best.contains(&mv));
        }
    }

    #[test]
    fn test_ties_use_random_index() {
        let pos = Position::new_game();
        let moves = pos.all_valid_moves();
        let (_, best) = best_moves(&pos, &moves).unwrap();
        for i in 0..best.len() {
            assert_eq!(choose_move(&pos, &moves, &mut Fixed(i)), Ok(best[i]));
        }
    }

    #[test]
    fn test_prefers_safe_move() {
        // Below at (5,2) may go to (4,1) or (4,3). At (4,3) it can be
        // jumped by the Above piece on (3,4); at (4,1) it is safe.
        let mut pos = Position::new();
        place(&mut pos, 5, 2, Player::Below);
        place(&mut pos, 3, 4, Player::Above);
        pos.refresh_capture_state();

        let moves = pos.all_valid_moves();
        assert_eq!(moves.len(), 2);
        let (_, best) = best_moves(&pos, &moves).unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].to, Cell::new(4, 1));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let pos = Position::new_game();
        let moves = pos.all_valid_moves();
        let a = GreedySelector::with_seed(7).select(&pos, &moves);
        let b = GreedySelector::with_seed(7).select(&pos, &moves);
        assert_eq!(a, b);
    }
}
