//! The two competing sides.

use crate::BoardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the two competing symbols in a round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Side {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Side {
    /// Both sides, X first.
    pub const ALL: [Side; 2] = [Side::X, Side::O];

    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Symbol drawn on the board for this side.
    pub fn symbol(self) -> char {
        match self {
            Side::X => 'X',
            Side::O => 'O',
        }
    }

    /// Parses a single board symbol (case-insensitive).
    pub fn from_symbol(symbol: char) -> Result<Self, BoardError> {
        match symbol.to_ascii_uppercase() {
            'X' => Ok(Side::X),
            'O' => Ok(Side::O),
            _ => Err(BoardError::InvalidSymbol { symbol }),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }
}

impl FromStr for Side {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Side::from_symbol(symbol),
            (Some(symbol), Some(_)) => Err(BoardError::InvalidSymbol { symbol }),
            (None, _) => Err(BoardError::InvalidSymbol { symbol: ' ' }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_swaps() {
        assert_eq!(Side::X.opponent(), Side::O);
        assert_eq!(Side::O.opponent(), Side::X);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("x".parse::<Side>(), Ok(Side::X));
        assert_eq!(" O ".parse::<Side>(), Ok(Side::O));
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        assert_eq!(
            "Z".parse::<Side>(),
            Err(BoardError::InvalidSymbol { symbol: 'Z' })
        );
        assert!("XO".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }
}
