//! Terminal front end: a text renderer and the interactive play loop.

use crate::config::GameConfig;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tictactoe_minimax::{Game, Move, Renderer, Side, Turn};
use tracing::{debug, info, instrument, warn};

/// Draws game events as text.
///
/// Keeps its own copy of the visible cells, updated only from
/// `piece_placed`, so what it shows is exactly what was committed.
pub struct TerminalRenderer<W> {
    out: W,
    cells: [Option<Side>; 9],
    scores: [u32; 2],
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: [None; 9],
            scores: [0; 2],
        }
    }

    /// Consumes the renderer, returning the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) {
        let mut text = String::new();
        for row in 0..3 {
            let line: Vec<String> = (0..3)
                .map(|col| {
                    let i = row * 3 + col;
                    match self.cells[i] {
                        Some(side) => side.symbol().to_string(),
                        None => (i + 1).to_string(),
                    }
                })
                .collect();
            text.push_str(&line.join("|"));
            if row < 2 {
                text.push_str("\n-+-+-\n");
            }
        }
        self.say(&text);
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn piece_placed(&mut self, mv: Move, side: Side) {
        self.cells[mv.to_index()] = Some(side);
        self.say("");
        self.draw();
    }

    fn board_cleared(&mut self) {
        self.cells = [None; 9];
        self.say("");
        self.draw();
    }

    fn round_updated(&mut self, rounds_played: u32) {
        self.say(&format!("Rounds played: {}", rounds_played));
    }

    fn score_updated(&mut self, side: Side, rounds_won: u32) {
        let index = if side == Side::X { 0 } else { 1 };
        self.scores[index] = rounds_won;
        let [x, o] = self.scores;
        self.say(&format!("Score  X: {}  O: {}", x, o));
    }

    fn turn_changed(&mut self, side: Side) {
        self.say(&format!("Player {}'s turn", side));
    }

    fn round_won(&mut self, side: Side) {
        self.say(&format!("Player {} wins!", side));
    }

    fn round_tied(&mut self) {
        self.say("It's a tie!");
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place at a cell.
    Move(Move),
    /// Start another round.
    NewRound,
    /// Reset scores and start over.
    NewGame,
    /// Leave.
    Quit,
    /// Anything else, with the reason.
    Invalid(String),
}

/// Interprets a line typed at the prompt.
#[instrument]
pub fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Input::Quit,
        "n" | "new" | "round" => Input::NewRound,
        "g" | "game" => Input::NewGame,
        other => match other.parse::<Move>() {
            Ok(mv) => Input::Move(mv),
            Err(e) => Input::Invalid(e.to_string()),
        },
    }
}

/// Runs rounds until the user quits, input ends, or the round limit is hit.
#[instrument(skip(input, output, renderer_out))]
pub fn run_session<R: BufRead, W: Write>(
    config: &GameConfig,
    input: R,
    mut output: W,
    renderer_out: impl Write,
) -> Result<()> {
    let first = *config.first();
    let mut game = Game::new(*config.x(), *config.o(), TerminalRenderer::new(renderer_out));
    game.new_game(first);
    let mut lines = input.lines();

    loop {
        game.run_computer_turns()
            .context("Computer move failed")?;

        if game.is_round_over() {
            if config.rounds().is_some_and(|limit| game.rounds_played() >= limit) {
                info!(rounds = game.rounds_played(), "Round limit reached");
                break;
            }
            // Unlimited unattended sessions still stop at the prompt between rounds.
            if config.is_unattended() && config.rounds().is_some() {
                game.new_round(first);
                continue;
            }
            write!(output, "[n]ew round, new [g]ame, or [q]uit: ")?;
        } else {
            write!(
                output,
                "Player {} move (row col, or 1-9): ",
                game.current()
            )?;
        }
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            break;
        };
        let line = line.context("Failed to read input")?;

        match parse_input(&line) {
            Input::Quit => break,
            Input::NewRound => {
                game.new_round(first);
            }
            Input::NewGame => {
                game.new_game(first);
            }
            Input::Move(_) if game.is_round_over() => {
                writeln!(output, "Round is over.")?;
            }
            Input::Move(mv) => match game.play_human(mv)? {
                Turn::Rejected => writeln!(output, "{} is taken, try again.", mv.label())?,
                turn => debug!(?turn, "Move applied"),
            },
            Input::Invalid(reason) => writeln!(output, "{}", reason)?,
        }
    }

    let [x, o] = [Side::X, Side::O].map(|side| *game.player(side).rounds_won());
    writeln!(
        output,
        "Final score after {} rounds  X: {}  O: {}",
        game.rounds_played(),
        x,
        o
    )?;
    Ok(())
}
