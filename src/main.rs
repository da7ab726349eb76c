//! Brainvita - unified CLI
//!
//! Peg solitaire with an interactive mode and non-interactive tools.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use brainvita::{Cli, Command, GameStatus, Host, HostConfig, Move, WinRule};
use brainvita_core::{Board, possible_moves, replay};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "Brainvita starting");

    match cli.command {
        Command::Play {
            delay_ms,
            center_only,
            json,
        } => run_play(cli.config.as_deref(), delay_ms, center_only, json).await,
        Command::Replay { center_only, moves } => {
            run_replay(cli.config.as_deref(), center_only, &moves)
        }
        Command::Moves => run_moves(),
    }
}

/// Run the interactive game loop on stdin/stdout
#[instrument]
async fn run_play(
    config: Option<&Path>,
    delay_ms: Option<u64>,
    center_only: bool,
    json: bool,
) -> Result<()> {
    let config = HostConfig::load(config)?.with_overrides(delay_ms, center_only, json);
    info!(?config, "Starting interactive session");

    let mut host = Host::new(config);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    host.run(stdin, &mut std::io::stdout()).await
}

/// Replay a list of jumps and print the final position
#[instrument]
fn run_replay(config: Option<&Path>, center_only: bool, moves: &[String]) -> Result<()> {
    let config = HostConfig::load(config)?.with_overrides(None, center_only, false);
    let rule: WinRule = *config.win_rule();

    let moves = moves
        .iter()
        .map(|text| {
            text.parse::<Move>()
                .with_context(|| format!("Invalid move {:?}", text))
        })
        .collect::<Result<Vec<_>>>()?;

    let (board, status) = replay(&moves, rule).context("Replay stopped at an illegal jump")?;
    print_result(&board, status, moves.len())
}

/// List the legal jumps of the starting board
#[instrument]
fn run_moves() -> Result<()> {
    let mut out = std::io::stdout().lock();
    for mov in possible_moves(&Board::new()) {
        writeln!(out, "{mov}")?;
    }
    Ok(())
}

fn print_result(board: &Board, status: GameStatus, moves: usize) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", board.display())?;
    writeln!(
        out,
        "After {} moves: {} marbles, status {}",
        moves,
        board.count_marbles(),
        status
    )?;
    Ok(())
}
