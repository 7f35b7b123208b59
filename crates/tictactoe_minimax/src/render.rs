//! Display collaborator notified of visible game events.

use crate::{Move, Side};

/// Receives display updates from the board and the lifecycle controller.
///
/// All methods default to doing nothing so front ends implement only what
/// they draw. Search never calls a renderer.
pub trait Renderer {
    /// A piece was committed to the live board.
    fn piece_placed(&mut self, _mv: Move, _side: Side) {}

    /// The live board was cleared for a new round.
    fn board_cleared(&mut self) {}

    /// The number of completed rounds changed.
    fn round_updated(&mut self, _rounds_played: u32) {}

    /// A side's rounds-won tally changed.
    fn score_updated(&mut self, _side: Side, _rounds_won: u32) {}

    /// It is now `side`'s turn.
    fn turn_changed(&mut self, _side: Side) {}

    /// The round ended with `side` completing a line.
    fn round_won(&mut self, _side: Side) {}

    /// The round ended with a full board and no line.
    fn round_tied(&mut self) {}
}

/// Renderer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

