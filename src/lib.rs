//! Reverse-TTT: reverse tic-tac-toe against a minimax opponent.
//!
//! In reverse tic-tac-toe, completing three-in-a-row LOSES. The computer picks
//! its moves with a depth-bounded minimax search using alpha-beta pruning; the
//! depth limit sets the difficulty.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, mark and score encoding, difficulty depths
//! - [`board`] - Board state and terminal checks
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`game`] - A human vs. computer session with turn and outcome tracking
//! - [`protocol`] - Text protocol for driving the engine from other programs
//!
//! ## Example
//!
//! ```
//! use reverse_ttt::board::{Board, Mark, Side};
//! use reverse_ttt::search::best_move;
//!
//! let mut board = Board::new();
//! board.mark_cell(1, 1, Mark::Human);
//!
//! let result = best_move(&mut board, Side::Computer, 6);
//! assert!(result.best_move.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod protocol;
pub mod search;
