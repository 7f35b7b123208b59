//! Per-side bookkeeping that persists across rounds.

use crate::{Move, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One side of the game and its tallies.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Player {
    /// Symbol this player places.
    side: Side,
    /// False when the computer picks this side's moves.
    is_human: bool,
    /// Most recent cell played this round.
    #[new(default)]
    last_move: Option<Move>,
    /// Pieces placed this round.
    #[new(default)]
    pieces_played: u32,
    /// Rounds won this game.
    #[new(default)]
    rounds_won: u32,
}

impl Player {
    /// Records a successful placement.
    pub fn record_placement(&mut self, mv: Move) {
        self.pieces_played += 1;
        self.last_move = Some(mv);
    }

    /// Credits a round win.
    #[instrument(skip(self), fields(side = %self.side))]
    pub fn add_win(&mut self) {
        self.rounds_won += 1;
    }

    /// Clears per-round tallies.
    pub fn reset_pieces_played(&mut self) {
        self.pieces_played = 0;
        self.last_move = None;
    }

    /// Clears everything for a new game.
    pub fn reset_all(&mut self) {
        self.reset_pieces_played();
        self.rounds_won = 0;
    }

    /// Switches between human and computer control.
    pub fn set_human(&mut self, is_human: bool) {
        self.is_human = is_human;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.side)
    }
}
