//! Round and game lifecycle.

use crate::search;
use crate::{Board, BoardState, GameError, Move, Player, Renderer, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who picks a side's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Control {
    /// Moves come from outside, one call at a time.
    #[default]
    Human,
    /// Moves come from the minimax search.
    Computer,
}

/// Which side opens a round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Starter {
    /// Coin flip.
    #[default]
    Random,
    /// X opens.
    X,
    /// O opens.
    O,
}

impl Starter {
    /// Resolves to a concrete side.
    pub fn pick(self) -> Side {
        match self {
            Starter::X => Side::X,
            Starter::O => Side::O,
            Starter::Random if rand::random::<bool>() => Side::X,
            Starter::Random => Side::O,
        }
    }
}

/// What happened after a move was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// The round goes on with this side to move.
    Continue(Side),
    /// This side completed a line.
    Won(Side),
    /// The board filled up without a line.
    Tied,
    /// The cell was taken; the same side moves again.
    Rejected,
}

/// Lifecycle controller: owns the live board, both players, and the turn.
#[derive(Debug)]
pub struct Game<R> {
    players: [Player; 2],
    board: Board,
    current: Side,
    rounds_played: u32,
    renderer: R,
}

impl<R: Renderer> Game<R> {
    /// Creates a game with the given controls. Call [`Game::new_game`] to
    /// start the first round.
    #[instrument(skip(renderer))]
    pub fn new(x: Control, o: Control, renderer: R) -> Self {
        Self {
            players: [
                Player::new(Side::X, x == Control::Human),
                Player::new(Side::O, o == Control::Human),
            ],
            board: Board::new(),
            current: Side::X,
            rounds_played: 0,
            renderer,
        }
    }

    /// Clears scores and starts a fresh round.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, first: Starter) -> Side {
        info!("Starting new game");
        for player in &mut self.players {
            player.reset_all();
        }
        self.rounds_played = 0;
        self.renderer.round_updated(self.rounds_played);
        for side in Side::ALL {
            self.renderer.score_updated(side, 0);
        }
        self.new_round(first)
    }

    /// Clears the board, keeps scores, and returns the opening side.
    #[instrument(skip(self))]
    pub fn new_round(&mut self, first: Starter) -> Side {
        self.current = first.pick();
        self.board.reset();
        self.renderer.board_cleared();
        for player in &mut self.players {
            player.reset_pieces_played();
        }
        info!(first = %self.current, round = self.rounds_played + 1, "Starting round");
        self.renderer.turn_changed(self.current);
        self.current
    }

    /// Applies a move for the human side to move.
    #[instrument(skip(self), fields(side = %self.current))]
    pub fn play_human(&mut self, mv: Move) -> Result<Turn, GameError> {
        self.ensure_in_play()?;
        if !*self.current_player().is_human() {
            return Err(GameError::NotHumanTurn(self.current));
        }
        self.commit(mv)
    }

    /// Searches and commits the move for the computer side to move.
    #[instrument(skip(self), fields(side = %self.current))]
    pub fn play_computer(&mut self) -> Result<(Move, Turn), GameError> {
        self.ensure_in_play()?;
        if *self.current_player().is_human() {
            return Err(GameError::NotComputerTurn(self.current));
        }
        let mv = search::best_move(&mut self.board, self.current)?;
        debug!(%mv, "Computer chose move");
        let turn = self.commit(mv)?;
        Ok((mv, turn))
    }

    /// Plays computer turns until a human is to move or the round ends.
    pub fn run_computer_turns(&mut self) -> Result<Vec<(Move, Turn)>, GameError> {
        let mut played = Vec::new();
        while !self.is_round_over() && !*self.current_player().is_human() {
            played.push(self.play_computer()?);
        }
        Ok(played)
    }

    fn ensure_in_play(&self) -> Result<(), GameError> {
        if self.is_round_over() {
            return Err(GameError::RoundOver);
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> Result<Turn, GameError> {
        let side = self.current;
        if !self
            .board
            .place(mv, side, Some(&mut self.renderer as &mut dyn Renderer))
        {
            debug!(%mv, "Cell occupied, waiting for another move");
            return Ok(Turn::Rejected);
        }
        self.players[side.index()].record_placement(mv);

        match self.board.refresh_state(side)? {
            BoardState::InPlay => {
                self.current = side.opponent();
                self.renderer.turn_changed(self.current);
                Ok(Turn::Continue(self.current))
            }
            state => {
                self.end_round(state);
                Ok(match state {
                    BoardState::Won(winner) => Turn::Won(winner),
                    _ => Turn::Tied,
                })
            }
        }
    }

    fn end_round(&mut self, state: BoardState) {
        self.rounds_played += 1;
        self.renderer.round_updated(self.rounds_played);
        match state.winner() {
            Some(winner) => {
                let player = &mut self.players[winner.index()];
                player.add_win();
                let rounds_won = *player.rounds_won();
                info!(%winner, rounds_won, "Round won");
                self.renderer.score_updated(winner, rounds_won);
                self.renderer.round_won(winner);
            }
            None => {
                info!("Round tied");
                self.renderer.round_tied();
            }
        }
    }

    /// Side to move.
    pub fn current(&self) -> Side {
        self.current
    }

    /// Player to move.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// The player holding `side`.
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Changes who controls `side`, effective immediately.
    pub fn set_control(&mut self, side: Side, control: Control) {
        self.players[side.index()].set_human(control == Control::Human);
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Completed rounds this game.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True once the live board is won or tied.
    pub fn is_round_over(&self) -> bool {
        self.board.state().is_terminal()
    }

    /// The display collaborator.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the display collaborator.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
