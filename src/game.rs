//! A game session between a human and the computer.
//!
//! [`Game`] owns the board for a whole session, enforces alternating turns,
//! validates human moves before they reach the board, and asks the search for
//! the computer's reply at the depth chosen by the [`Difficulty`]. After every
//! move the mover is checked for three-in-a-row first (the mover loses) and
//! then the board for a draw.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, Coord, Side, str_coord};
use crate::constants::{EASY_DEPTH, HARD_DEPTH, MEDIUM_DEPTH, N};
use crate::search::Search;

/// Difficulty level, mapped to a search depth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn max_depth(self) -> usize {
        match self {
            Difficulty::Easy => EASY_DEPTH,
            Difficulty::Medium => MEDIUM_DEPTH,
            Difficulty::Hard => HARD_DEPTH,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected 'easy', 'medium' or 'hard')")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// State of the game after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// The given side completed three-in-a-row.
    Lost(Side),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Lost(Side::Human) => write!(f, "Player X Loses!"),
            Outcome::Lost(Side::Computer) => write!(f, "AI Loses!"),
            Outcome::Draw => write!(f, "It's a Draw!"),
        }
    }
}

/// Moves rejected by a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfRange { row: usize, col: usize },

    #[error("cell {} is already marked", vertex(.row, .col))]
    Occupied { row: usize, col: usize },

    #[error("it is the {0}'s turn")]
    NotYourTurn(Side),

    #[error("game is already over")]
    GameOver,

    #[error("search returned no move")]
    NoMove,
}

fn vertex(row: &usize, col: &usize) -> String {
    str_coord((*row, *col))
}

/// One session: a board, whose turn it is, and the computer's search depth.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    max_depth: usize,
    first: Side,
    to_move: Side,
    outcome: Outcome,
    last_move: Option<Coord>,
}

impl Game {
    pub fn new(difficulty: Difficulty, first: Side) -> Self {
        Self::with_depth(difficulty.max_depth(), first)
    }

    /// Create a game with an explicit search depth. A depth of zero would
    /// leave the computer without a move, so it is raised to one.
    pub fn with_depth(max_depth: usize, first: Side) -> Self {
        Self {
            board: Board::new(),
            max_depth: max_depth.max(1),
            first,
            to_move: first,
            outcome: Outcome::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn first(&self) -> Side {
        self.first
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Change the computer's depth. Takes effect from its next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.max_depth = difficulty.max_depth();
    }

    /// Start a new game, keeping the depth and first mover.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = self.first;
        self.outcome = Outcome::InProgress;
        self.last_move = None;
    }

    /// Start a new game with `first` moving first.
    pub fn restart_with(&mut self, first: Side) {
        self.first = first;
        self.reset();
    }

    /// Apply the human's move at (row, col).
    pub fn play(&mut self, row: usize, col: usize) -> Result<Outcome, GameError> {
        self.check_turn(Side::Human)?;
        if row >= N || col >= N {
            return Err(GameError::OutOfRange { row, col });
        }
        if !self.board.is_cell_available(row, col) {
            return Err(GameError::Occupied { row, col });
        }
        Ok(self.apply(Side::Human, (row, col)))
    }

    /// Search for and apply the computer's move.
    pub fn computer_move(&mut self) -> Result<(Coord, Outcome), GameError> {
        self.check_turn(Side::Computer)?;
        let mut search = Search::new(self.max_depth);
        let result = search.run(&mut self.board, Side::Computer);
        let coord = result.best_move.ok_or(GameError::NoMove)?;
        Ok((coord, self.apply(Side::Computer, coord)))
    }

    fn check_turn(&self, side: Side) -> Result<(), GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver);
        }
        if self.to_move != side {
            return Err(GameError::NotYourTurn(self.to_move));
        }
        Ok(())
    }

    fn apply(&mut self, side: Side, (row, col): Coord) -> Outcome {
        self.board.mark_cell(row, col, side.mark());
        self.last_move = Some((row, col));
        self.to_move = side.opponent();
        debug!(%side, vertex = %str_coord((row, col)), "move played");

        self.outcome = if self.board.has_three_in_a_row(side.mark()) {
            Outcome::Lost(side)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };
        if self.outcome.is_over() {
            info!(outcome = %self.outcome, "game over");
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.max_depth(), 1);
        assert_eq!(Difficulty::Medium.max_depth(), 3);
        assert_eq!(Difficulty::Hard.max_depth(), 6);
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new(Difficulty::Easy, Side::Human);
        assert_eq!(game.computer_move(), Err(GameError::NotYourTurn(Side::Human)));
        assert_eq!(game.play(1, 1), Ok(Outcome::InProgress));
        assert_eq!(game.to_move(), Side::Computer);
        assert_eq!(game.play(0, 0), Err(GameError::NotYourTurn(Side::Computer)));

        let (coord, outcome) = game.computer_move().unwrap();
        assert_eq!(coord, (0, 0));
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(game.last_move(), Some((0, 0)));
    }

    #[test]
    fn test_rejects_bad_moves() {
        let mut game = Game::new(Difficulty::Easy, Side::Human);
        assert_eq!(game.play(3, 0), Err(GameError::OutOfRange { row: 3, col: 0 }));
        game.play(0, 0).unwrap();
        game.computer_move().unwrap();
        // Computer took (0,1) at depth 1
        assert_eq!(game.play(0, 1), Err(GameError::Occupied { row: 0, col: 1 }));
        assert_eq!(
            GameError::Occupied { row: 0, col: 1 }.to_string(),
            "cell b1 is already marked"
        );
    }

    #[test]
    fn test_human_line_loses() {
        let mut game = Game::new(Difficulty::Easy, Side::Human);
        // Easy computer takes the first free cell: a1, then b1.
        game.play(1, 0).unwrap();
        game.computer_move().unwrap();
        game.play(1, 1).unwrap();
        game.computer_move().unwrap();
        assert_eq!(game.play(1, 2), Ok(Outcome::Lost(Side::Human)));
        assert_eq!(game.play(2, 2), Err(GameError::GameOver));
        assert_eq!(game.outcome().to_string(), "Player X Loses!");
    }

    #[test]
    fn test_reset_restores_first_mover() {
        let mut game = Game::new(Difficulty::Medium, Side::Computer);
        game.computer_move().unwrap();
        game.reset();
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.to_move(), Side::Computer);

        game.restart_with(Side::Human);
        assert_eq!(game.to_move(), Side::Human);
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_zero_depth_is_raised() {
        let mut game = Game::with_depth(0, Side::Computer);
        assert_eq!(game.max_depth(), 1);
        assert!(game.computer_move().is_ok());
    }
}
