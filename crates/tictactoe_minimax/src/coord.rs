//! Board coordinates.

use crate::BoardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

/// A cell coordinate, each component in `0..3`.
///
/// Construction validates the range, so a `Move` held by value is always
/// on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    row: usize,
    col: usize,
}

const fn at(row: usize, col: usize) -> Move {
    Move { row, col }
}

impl Move {
    /// All nine cells in row-major order.
    pub const ALL: [Move; 9] = [
        at(0, 0),
        at(0, 1),
        at(0, 2),
        at(1, 0),
        at(1, 1),
        at(1, 2),
        at(2, 0),
        at(2, 1),
        at(2, 2),
    ];

    /// The center cell.
    pub const CENTER: Move = at(1, 1);

    /// Creates a move, rejecting coordinates outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= SIZE || col >= SIZE {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(at(row, col))
    }

    /// Row index.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-8).
    pub fn to_index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Creates a move from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// True for the four corner cells.
    pub fn is_corner(self) -> bool {
        self.row != 1 && self.col != 1
    }

    /// Human-readable cell name.
    pub fn label(self) -> &'static str {
        match (self.row, self.col) {
            (0, 0) => "Top-left",
            (0, 1) => "Top-center",
            (0, 2) => "Top-right",
            (1, 0) => "Middle-left",
            (1, 1) => "Center",
            (1, 2) => "Middle-right",
            (2, 0) => "Bottom-left",
            (2, 1) => "Bottom-center",
            _ => "Bottom-right",
        }
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Accepts `"r c"`, `"r,c"`, or a keypad number `1`-`9` (row-major).
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let parse = |p: &str| {
            p.parse::<usize>()
                .map_err(|_| BoardError::Unparseable { input: s.to_string() })
        };

        match parts.as_slice() {
            [key] => {
                let key = parse(*key)?;
                key.checked_sub(1)
                    .and_then(Move::from_index)
                    .ok_or_else(|| BoardError::Unparseable { input: s.to_string() })
            }
            [row, col] => Move::new(parse(*row)?, parse(*col)?),
            _ => Err(BoardError::Unparseable { input: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
