//! Constants for board geometry, evaluator weights, and engine defaults.
//!
//! The board is a fixed 8x8 grid. Only dark cells (`(row + col)` odd) are
//! ever occupied, which leaves 32 playable cells numbered 1..=32.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const ROWS: usize = 8;

/// Number of columns on the board.
pub const COLS: usize = 8;

/// Number of dark (playable) cells.
pub const DARK_CELLS: usize = ROWS * COLS / 2;

/// Dark cells per row.
pub const CELLS_PER_ROW: usize = COLS / 2;

/// Rows filled with pieces at the start of a game, per side.
pub const START_ROWS: usize = 3;

// =============================================================================
// Evaluator Weights
// =============================================================================

/// Material value of a plain piece.
pub const PIECE_VALUE: i32 = 3;

/// Material value of a king.
pub const KING_VALUE: i32 = 5;

/// Bonus (or penalty) for a piece that has a capture available.
pub const CAPTURE_BONUS: i32 = 20;

// =============================================================================
// Engine Defaults
// =============================================================================

/// Whether a piece may keep capturing in the same turn.
pub const DEFAULT_ALLOW_MULTI_CAPTURE: bool = true;

/// Ply limit for computer self-play. Kings can shuffle forever, so
/// self-play stops here and reports a draw.
pub const MAX_GAME_PLIES: usize = 400;

// =============================================================================
// Text Board Symbols
// =============================================================================

/// Empty dark cell.
pub const EMPTY: char = '.';

/// Light cell (never occupied).
pub const LIGHT: char = ' ';
