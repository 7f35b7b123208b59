//! Tic-tac-toe with an exhaustive minimax opponent.
//!
//! # Architecture
//!
//! - **Board**: grid state, win/tie detection scoped to the last move,
//!   legal moves, and a single save point for search
//! - **Search**: full-depth minimax over trial placements that are undone
//!   in place rather than cloned
//! - **Game**: round and game lifecycle, scores, and turn order
//! - **Renderer**: display collaborator notified of visible changes only
//!
//! # Example
//!
//! ```
//! use tictactoe_minimax::{best_move, Board, Move, Side};
//!
//! let mut board: Board = "XX. OO. ...".parse().unwrap();
//! assert_eq!(best_move(&mut board, Side::O).unwrap(), Move::new(1, 2).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod coord;
mod error;
mod game;
mod player;
mod render;
mod search;
mod side;

pub use board::{Board, BoardState, Grid, Square};
pub use coord::{Move, SIZE};
pub use error::{BoardError, GameError, SearchError};
pub use game::{Control, Game, Starter, Turn};
pub use player::Player;
pub use render::{NullRenderer, Renderer};
pub use search::{
    Analysis, LOSS_SCORE, ScoredMove, TIE_SCORE, WIN_SCORE, analyze, best_move, evaluate,
    score_moves,
};
pub use side::Side;
