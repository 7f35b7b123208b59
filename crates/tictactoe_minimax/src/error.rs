//! Error types.
//!
//! Every variant here is a caller bug. Placing on an occupied cell is not an
//! error; it is reported through a `bool` or [`crate::Turn::Rejected`].

use crate::Side;

/// Precondition violation on the board model.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Coordinate outside `0..3`.
    #[display("Cell ({row}, {col}) is off the board")]
    OutOfRange {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// A symbol other than X, O, or an empty marker.
    #[display("Invalid symbol {symbol:?}")]
    InvalidSymbol {
        /// Offending character.
        symbol: char,
    },

    /// Input that is not a coordinate at all.
    #[display("Cannot parse {input:?} as a cell")]
    Unparseable {
        /// Offending input.
        input: String,
    },

    /// Board text with the wrong number of cells.
    #[display("Expected 9 cells, found {found}")]
    Shape {
        /// Cells found.
        found: usize,
    },

    /// State refresh requested for a side that has not played.
    #[display("{side} has no last move to check")]
    NoLastMove {
        /// Side without a recorded move.
        side: Side,
    },

    /// A placement that had to succeed was refused.
    #[display("Cell ({row}, {col}) could not be played")]
    Rejected {
        /// Row of the refused placement.
        row: usize,
        /// Column of the refused placement.
        col: usize,
    },

    /// A snapshot is already outstanding.
    #[display("Snapshot already taken")]
    SnapshotOutstanding,

    /// Restore requested without a snapshot.
    #[display("No snapshot to restore")]
    NoSnapshot,
}

impl std::error::Error for BoardError {}

/// Precondition violation when searching.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SearchError {
    /// Search invoked on a won or tied board.
    #[display("Cannot search a finished board")]
    NotInPlay,

    /// Search invoked on an in-play board with no empty cell.
    #[display("No legal moves on an in-play board")]
    NoLegalMoves,

    /// Board operation failed during the search.
    #[display("{_0}")]
    #[from]
    Board(BoardError),
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Board(e) => Some(e),
            _ => None,
        }
    }
}

/// Lifecycle controller misuse.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// A human move was submitted while a computer side is to move.
    #[display("It's {_0}'s turn and {_0} is computer-controlled")]
    NotHumanTurn(Side),

    /// The computer was asked to move for a human side.
    #[display("It's {_0}'s turn and {_0} is human-controlled")]
    NotComputerTurn(Side),

    /// The round already ended.
    #[display("Round is over")]
    RoundOver,

    /// Board precondition failed.
    #[display("{_0}")]
    #[from]
    Board(BoardError),

    /// Search precondition failed.
    #[display("{_0}")]
    #[from]
    Search(SearchError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            GameError::Search(e) => Some(e),
            _ => None,
        }
    }
}
