//! Depth-bounded minimax with alpha-beta pruning.
//!
//! Completing three-in-a-row loses, so the terminal scores are the reverse of
//! ordinary tic-tac-toe: a computer line scores [`SCORE_LOSS`] and a human line
//! scores [`SCORE_WIN`]. The computer is always the maximizing side.
//!
//! The search probes the caller's board in place. Every speculative mark is
//! placed through a guard that clears the cell when it goes out of scope, so
//! the board is restored after each branch and also if the search unwinds.
//!
//! Positions cut off by the depth limit score [`SCORE_DRAW`] rather than a
//! positional heuristic, which is what makes the shallow levels weaker.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::board::{Board, Coord, Mark, Side};
use crate::constants::{N, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};

/// Score from the computer's point of view: `-1`, `0` or `+1`.
pub type Score = i8;

const NEG_INF: Score = Score::MIN;
const POS_INF: Score = Score::MAX;

/// Verdict of a search and the move that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` only when the position was already terminal, full, or at the
    /// depth limit, so no move was explored.
    pub best_move: Option<Coord>,
}

impl SearchResult {
    fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// A mark placed for the duration of one branch. Dropping it empties the cell.
struct Trial<'a> {
    board: &'a mut Board,
    coord: Coord,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, coord: Coord, mark: Mark) -> Self {
        board.mark_cell(coord.0, coord.1, mark);
        Self { board, coord }
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.clear_cell(self.coord.0, self.coord.1);
    }
}

/// A reusable searcher bound to one depth limit.
///
/// Keeps the node count of the last run for diagnostics.
pub struct Search {
    max_depth: usize,
    nodes: u64,
}

impl Search {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Nodes visited by the most recent [`Search::run`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `board` with `to_move` placing the next mark.
    ///
    /// The board is borrowed mutably for the whole search and is identical to
    /// its input state when this returns.
    pub fn run(&mut self, board: &mut Board, to_move: Side) -> SearchResult {
        self.nodes = 0;
        let result = self.alphabeta(board, to_move, 0, NEG_INF, POS_INF);
        debug!(
            side = %to_move,
            max_depth = self.max_depth,
            nodes = self.nodes,
            score = result.score,
            best_move = ?result.best_move,
            "search finished"
        );
        result
    }

    fn alphabeta(
        &mut self,
        board: &mut Board,
        to_move: Side,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
    ) -> SearchResult {
        self.nodes += 1;

        // Computer line is checked first, so it wins if both sides somehow have one
        if board.has_three_in_a_row(Mark::Computer) {
            return SearchResult::leaf(SCORE_LOSS);
        }
        if board.has_three_in_a_row(Mark::Human) {
            return SearchResult::leaf(SCORE_WIN);
        }
        if board.is_full() || depth >= self.max_depth {
            return SearchResult::leaf(SCORE_DRAW);
        }

        let maximizing = to_move.is_maximizing();
        let mut best = SearchResult::leaf(if maximizing { NEG_INF } else { POS_INF });

        'cells: for row in 0..N {
            for col in 0..N {
                if !board.is_cell_available(row, col) {
                    continue;
                }

                let score = {
                    let mut trial = Trial::place(board, (row, col), to_move.mark());
                    self.alphabeta(&mut trial, to_move.opponent(), depth + 1, alpha, beta)
                        .score
                };

                // Strict comparison keeps the earliest cell on ties
                if maximizing {
                    if score > best.score {
                        best = SearchResult {
                            score,
                            best_move: Some((row, col)),
                        };
                    }
                    alpha = alpha.max(score);
                } else {
                    if score < best.score {
                        best = SearchResult {
                            score,
                            best_move: Some((row, col)),
                        };
                    }
                    beta = beta.min(score);
                }

                if beta <= alpha {
                    break 'cells;
                }
            }
        }

        best
    }
}

/// Find the best move for `to_move` searching at most `max_depth` plies.
pub fn best_move(board: &mut Board, to_move: Side, max_depth: usize) -> SearchResult {
    Search::new(max_depth).run(board, to_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_trial_restores_cell() {
        let mut board = Board::new();
        {
            let trial = Trial::place(&mut board, (1, 1), Mark::Human);
            assert_eq!(trial.get(1, 1), Mark::Human);
        }
        assert!(board.is_cell_available(1, 1));
    }

    #[test]
    fn test_trial_restores_on_panic() {
        let mut board = Board::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _trial = Trial::place(&mut board, (2, 0), Mark::Computer);
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_depth_zero_explores_nothing() {
        let mut board = Board::new();
        let mut search = Search::new(0);
        let result = search.run(&mut board, Side::Computer);
        assert_eq!(result, SearchResult::leaf(SCORE_DRAW));
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn test_depth_one_visits_every_child() {
        let mut board = Board::new();
        let mut search = Search::new(1);
        let result = search.run(&mut board, Side::Computer);
        assert_eq!(result.best_move, Some((0, 0)));
        // All children score 0, alpha never reaches +inf, so nothing is pruned
        assert_eq!(search.nodes(), 10);
    }

    #[test]
    fn test_forced_loss_is_reported() {
        // Only (0,2) is left and it completes the computer's top row.
        let mut board: Board = "OO./XXO/OXX".parse().unwrap();
        let result = best_move(&mut board, Side::Computer, 6);
        assert_eq!(result.score, SCORE_LOSS);
        assert_eq!(result.best_move, Some((0, 2)));
    }
}
