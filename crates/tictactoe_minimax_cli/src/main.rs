//! tictactoe - terminal tic-tac-toe against a minimax opponent.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use std::path::PathBuf;
use tictactoe_minimax::{Board, Control, Side, Starter, analyze};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Play {
            config,
            x,
            o,
            first,
            rounds,
        } => run_play(config, x, o, first, rounds),
        Command::BestMove { board, side, json } => run_best_move(board, side, json),
    }
}

/// Logs go to stderr so they never interleave with the board.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run an interactive session on stdin/stdout
#[instrument]
fn run_play(
    config: Option<PathBuf>,
    x: Option<Control>,
    o: Option<Control>,
    first: Option<Starter>,
    rounds: Option<u32>,
) -> Result<()> {
    let config = GameConfig::load(config.as_deref())
        .context("Failed to load play configuration")?
        .with_overrides(x, o, first, rounds);
    info!(?config, "Starting session");

    let stdin = std::io::stdin();
    terminal::run_session(&config, stdin.lock(), std::io::stdout(), std::io::stdout())
}

/// Print the search's choice for one position
#[instrument(skip(board))]
fn run_best_move(mut board: Board, side: Side, json: bool) -> Result<()> {
    let analysis = analyze(&mut board, side)
        .with_context(|| format!("Cannot search this position:\n{}", board))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}\n", board);
    for candidate in analysis.candidates() {
        println!("  {} {:<13} {:>3}", candidate.mv, candidate.mv.label(), candidate.score);
    }
    let best = analysis.best();
    println!(
        "\n{} plays {} {} (score {}, {} positions searched)",
        side,
        best.mv,
        best.mv.label(),
        best.score,
        analysis.nodes()
    );
    Ok(())
}
