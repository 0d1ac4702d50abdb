//! Constants for board geometry, mark encoding, scores, and search depths.
//!
//! The engine only supports the classic 3x3 board. Marks and scores share the
//! same signed encoding: the computer is `-1`, the human is `+1`, and the
//! search reports scores from the computer's point of view.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Every line of three: rows, columns, then both diagonals.
pub const LINES: [[(usize, usize); N]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

// =============================================================================
// Mark Encoding
// =============================================================================

/// Numeric value of a human mark (drawn as `X`).
pub const HUMAN_MARK: i8 = 1;

/// Numeric value of a computer mark (drawn as `O`).
pub const COMPUTER_MARK: i8 = -1;

/// Numeric value of an empty cell.
pub const EMPTY_MARK: i8 = 0;

// =============================================================================
// Search Scores
// =============================================================================

/// The computer completed a line.
pub const SCORE_LOSS: i8 = COMPUTER_MARK;

/// Draw, or the search hit its depth limit.
pub const SCORE_DRAW: i8 = EMPTY_MARK;

/// The human completed a line.
pub const SCORE_WIN: i8 = HUMAN_MARK;

// =============================================================================
// Difficulty Depths
// =============================================================================

/// Search depth for the easy level (no lookahead past the computer's own move).
pub const EASY_DEPTH: usize = 1;

/// Search depth for the medium level.
pub const MEDIUM_DEPTH: usize = 3;

/// Search depth for the hard level. Exhaustive once six or fewer cells
/// remain, strong but not perfect from an empty board.
pub const HARD_DEPTH: usize = 6;

/// Depth at which the search always reaches a real terminal position.
pub const FULL_DEPTH: usize = CELLS;
