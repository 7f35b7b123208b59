//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_minimax::{Board, Control, Side, Starter};

/// Tic-tac-toe against an exhaustive minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds in the terminal
    Play {
        /// Path to a TOML config file (defaults to tictactoe.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Who controls X (human or computer)
        #[arg(long)]
        x: Option<Control>,

        /// Who controls O (human or computer)
        #[arg(long)]
        o: Option<Control>,

        /// Which side opens each round (x, o, or random)
        #[arg(long)]
        first: Option<Starter>,

        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Print the computer's choice for a position
    BestMove {
        /// Nine cells row-major: X, O, or . for empty (e.g. "XX./OO./...")
        #[arg(short, long)]
        board: Board,

        /// Side to move
        #[arg(short, long)]
        side: Side,

        /// Emit the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
