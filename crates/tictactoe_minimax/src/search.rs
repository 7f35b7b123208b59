//! Exhaustive minimax move selection.
//!
//! Scores are from the computer's point of view: [`WIN_SCORE`] when the
//! computer has won, [`LOSS_SCORE`] when its opponent has, [`TIE_SCORE`]
//! for a tie. Scores do not decay with depth, so among equally scored
//! moves a quick win and a slow one look the same. Ties between candidates
//! go to the later move in row-major order.

use crate::{Board, BoardError, BoardState, Move, SearchError, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board the computer has won.
pub const WIN_SCORE: i32 = 10;
/// Score of a board the computer's opponent has won.
pub const LOSS_SCORE: i32 = -10;
/// Score of a tied board.
pub const TIE_SCORE: i32 = 0;

/// A root candidate and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ScoredMove {
    /// The candidate cell.
    pub mv: Move,
    /// Value with both sides playing optimally afterwards.
    pub score: i32,
}

/// Outcome of a full search from one position.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Analysis {
    /// Side the search played for.
    side: Side,
    /// The chosen move.
    best: ScoredMove,
    /// Every legal root move, row-major.
    candidates: Vec<ScoredMove>,
    /// Positions visited.
    nodes: u64,
}

/// Returns the optimal move for `side`, treating `side` as the computer.
///
/// The board must be in play. It is mutated during the search and restored
/// exactly before returning.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn best_move(board: &mut Board, side: Side) -> Result<Move, SearchError> {
    Ok(analyze(board, side)?.best.mv)
}

/// Scores every legal move for `side`, row-major.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn score_moves(board: &mut Board, side: Side) -> Result<Vec<ScoredMove>, SearchError> {
    Ok(analyze(board, side)?.candidates)
}

/// Runs the search and reports the choice, every candidate, and the node count.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn analyze(board: &mut Board, side: Side) -> Result<Analysis, SearchError> {
    if board.state().is_terminal() {
        return Err(SearchError::NotInPlay);
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    board.snapshot()?;
    let mut search = Minimax::new(side);
    let scored: Result<Vec<ScoredMove>, BoardError> = moves
        .into_iter()
        .map(|mv| {
            search
                .trial(board, mv, side)
                .map(|score| ScoredMove::new(mv, score))
        })
        .collect();
    board.restore()?;
    let candidates = scored?;

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.score >= best.score {
            best = *candidate;
        }
    }

    debug!(
        best = %best.mv,
        score = best.score,
        nodes = search.nodes,
        "Search complete"
    );
    Ok(Analysis {
        side,
        best,
        candidates,
        nodes: search.nodes,
    })
}

/// Minimax value of `board` with `to_move` to play, scored for `computer`.
///
/// Terminal boards score immediately. The board is restored afterwards.
#[instrument(skip(board), fields(state = ?board.state()))]
pub fn evaluate(board: &mut Board, to_move: Side, computer: Side) -> Result<i32, SearchError> {
    board.snapshot()?;
    let mut search = Minimax::new(computer);
    let score = search.value(board, to_move);
    board.restore()?;
    score.map_err(SearchError::from)
}

struct Minimax {
    computer: Side,
    nodes: u64,
}

impl Minimax {
    fn new(computer: Side) -> Self {
        Self { computer, nodes: 0 }
    }

    fn terminal_score(&self, state: BoardState) -> Option<i32> {
        match state {
            BoardState::InPlay => None,
            BoardState::Tied => Some(TIE_SCORE),
            BoardState::Won(winner) if winner == self.computer => Some(WIN_SCORE),
            BoardState::Won(_) => Some(LOSS_SCORE),
        }
    }

    fn value(&mut self, board: &mut Board, to_move: Side) -> Result<i32, BoardError> {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board.state()) {
            return Ok(score);
        }

        let maximizing = to_move == self.computer;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in board.legal_moves() {
            let score = self.trial(board, mv, to_move)?;
            if (maximizing && score >= best) || (!maximizing && score <= best) {
                best = score;
            }
        }
        Ok(best)
    }

    /// Plays `mv` for `side`, scores the reply tree, and takes the move back.
    fn trial(&mut self, board: &mut Board, mv: Move, side: Side) -> Result<i32, BoardError> {
        if !board.place(mv, side, None) {
            return Err(BoardError::Rejected {
                row: mv.row(),
                col: mv.col(),
            });
        }
        board.refresh_state(side)?;
        let score = self.value(board, side.opponent());
        board.remove(mv, true);
        score
    }
}
