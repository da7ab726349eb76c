//! Command-line interface for brainvita.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brainvita - peg solitaire on the 33-hole English board
#[derive(Parser, Debug)]
#[command(name = "brainvita")]
#[command(about = "Peg solitaire in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./brainvita.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, reading commands from stdin
    Play {
        /// Delay in milliseconds between a jump starting and landing
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Only count a win when the last marble ends in the center
        #[arg(long)]
        center_only: bool,

        /// Print notifications as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Replay jumps from the starting board and report the result
    Replay {
        /// Only count a win when the last marble ends in the center
        #[arg(long)]
        center_only: bool,

        /// Jumps written as `row,col-row,col`
        #[arg(required = true)]
        moves: Vec<String>,
    },

    /// List the legal opening jumps
    Moves,
}
