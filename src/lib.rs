//! Brainvita - peg solitaire in the terminal.
//!
//! This library wires the pure game engine from `brainvita_core` to a
//! line-oriented terminal host.
//!
//! # Architecture
//!
//! - **Core**: board model, move engine and move lifecycle (`brainvita_core`)
//! - **Host**: owns a session, supplies the commit delay, prints notifications
//! - **Config**: TOML file plus command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use brainvita::{Host, HostConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut host = Host::new(HostConfig::default());
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! host.run(stdin, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod command;
mod config;
mod host;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Interactive commands
pub use command::{CommandError, HELP, HostCommand};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, HostConfig};

// Crate-level exports - Host
pub use host::Host;

// Crate-level exports - Game types
pub use brainvita_core::{
    Board, Cell, Effect, GameStatus, InFlightMove, Move, MoveError, MoveTicket, Notification,
    Phase, Position, Session, SessionEvent, WinRule,
};
