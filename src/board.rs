//! The 3x3 board, its marks, and terminal-condition checks.
//!
//! Cells hold one of three [`Mark`]s whose numeric values match the scores
//! reported by the search: the human is `+1`, the computer `-1`, and an empty
//! cell `0`. The board itself knows nothing about turns; [`Side`] names whose
//! turn it is and maps to the mark that side places.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{CELLS, COMPUTER_MARK, EMPTY_MARK, HUMAN_MARK, LINES, N};

/// A (row, col) coordinate, both in `0..N`.
pub type Coord = (usize, usize);

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    /// Drawn as `X`.
    Human,
    /// Drawn as `O`.
    Computer,
}

impl Mark {
    /// Signed encoding shared with search scores.
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Mark::Empty => EMPTY_MARK,
            Mark::Human => HUMAN_MARK,
            Mark::Computer => COMPUTER_MARK,
        }
    }

    fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Human => 'X',
            Mark::Computer => 'O',
        }
    }
}

/// One of the two players.
///
/// The computer is always the maximizing side of the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// The mark this side places.
    #[inline]
    pub fn mark(self) -> Mark {
        match self {
            Side::Human => Mark::Human,
            Side::Computer => Mark::Computer,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// Whether the search maximizes the score when this side moves.
    #[inline]
    pub fn is_maximizing(self) -> bool {
        self == Side::Computer
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side '{0}' (expected 'human' or 'computer')")]
pub struct ParseSideError(String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "player" | "x" => Ok(Side::Human),
            "computer" | "ai" | "o" => Ok(Side::Computer),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Errors from parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board string has {got} cells, expected {expected}")]
    WrongLength { expected: usize, got: usize },

    #[error("invalid character '{character}' for cell {position}")]
    InvalidCell { character: char, position: usize },
}

/// A 3x3 board.
///
/// Coordinates outside `0..N` are a caller bug and panic on indexing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; N]; N],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Mark {
        self.cells[row][col]
    }

    /// True iff the cell is empty.
    #[inline]
    pub fn is_cell_available(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == Mark::Empty
    }

    /// Set a cell unconditionally. Callers check [`Board::is_cell_available`] first.
    #[inline]
    pub fn mark_cell(&mut self, row: usize, col: usize, mark: Mark) {
        self.cells[row][col] = mark;
    }

    #[inline]
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Mark::Empty;
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&m| m != Mark::Empty)
    }

    /// True iff `mark` fills any row, column, or diagonal.
    pub fn has_three_in_a_row(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == mark))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..N)
            .flat_map(|r| (0..N).map(move |c| (r, c)))
            .filter(|&(r, c)| self.is_cell_available(r, c))
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().flatten().filter(|&&m| m == mark).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for mark in row {
                write!(f, "{} ", mark.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse nine cells in row-major order. `X` is the human, `O` the computer,
    /// `.` or `-` empty; whitespace and `/` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut position = 0;
        for ch in s.chars() {
            if ch.is_whitespace() || ch == '/' {
                continue;
            }
            let mark = match ch {
                'X' | 'x' => Mark::Human,
                'O' | 'o' => Mark::Computer,
                '.' | '-' => Mark::Empty,
                _ => {
                    return Err(BoardParseError::InvalidCell {
                        character: ch,
                        position,
                    });
                }
            };
            if position < CELLS {
                board.mark_cell(position / N, position % N, mark);
            }
            position += 1;
        }
        if position != CELLS {
            return Err(BoardParseError::WrongLength {
                expected: CELLS,
                got: position,
            });
        }
        Ok(board)
    }
}

/// Parse a vertex such as `b3` into a coordinate.
///
/// The letter picks the column (`a`-`c`) and the digit the row (`1`-`3`,
/// counted from the top). Returns `None` for anything else.
pub fn parse_coord(s: &str) -> Option<Coord> {
    let mut chars = s.trim().chars();
    let col_ch = chars.next()?.to_ascii_lowercase();
    let row_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let col = (col_ch as usize).checked_sub('a' as usize)?;
    let row = row_ch.to_digit(10)?.checked_sub(1)? as usize;
    (row < N && col < N).then_some((row, col))
}

/// Format a coordinate as a vertex (inverse of [`parse_coord`]).
pub fn str_coord((row, col): Coord) -> String {
    format!("{}{}", (b'a' + col as u8) as char, row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_cells().count(), CELLS);
        assert!(!board.is_full());
    }

    #[test]
    fn test_mark_and_clear() {
        let mut board = Board::new();
        board.mark_cell(1, 2, Mark::Computer);
        assert!(!board.is_cell_available(1, 2));
        assert_eq!(board.get(1, 2), Mark::Computer);
        board.clear_cell(1, 2);
        assert!(board.is_cell_available(1, 2));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        Board::new().is_cell_available(3, 0);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board: Board = "XO. / ... / ..O".parse().unwrap();
        let cells: Vec<_> = board.empty_cells().collect();
        assert_eq!(cells[0], (0, 2));
        assert_eq!(cells[1], (1, 0));
        assert_eq!(cells.last(), Some(&(2, 1)));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength {
                expected: 9,
                got: 2
            })
        );
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                character: '?',
                position: 2
            })
        );
        assert!(matches!(
            "..........".parse::<Board>(),
            Err(BoardParseError::WrongLength { got: 10, .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        let shown = board.to_string();
        assert_eq!(shown, "X . O \n. X . \nO . . \n");
        assert_eq!(shown.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_coords() {
        assert_eq!(parse_coord("a1"), Some((0, 0)));
        assert_eq!(parse_coord("C3"), Some((2, 2)));
        assert_eq!(parse_coord("b3"), Some((2, 1)));
        assert_eq!(parse_coord("d1"), None);
        assert_eq!(parse_coord("a4"), None);
        assert_eq!(parse_coord("a0"), None);
        assert_eq!(parse_coord("a12"), None);
        assert_eq!(str_coord((2, 1)), "b3");
    }

    #[test]
    fn test_side() {
        assert_eq!(Side::Human.opponent(), Side::Computer);
        assert_eq!(Side::Computer.mark().value(), COMPUTER_MARK);
        assert!(Side::Computer.is_maximizing());
        assert_eq!("AI".parse::<Side>(), Ok(Side::Computer));
        assert!("nobody".parse::<Side>().is_err());
    }
}
