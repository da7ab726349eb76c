//! Commands typed at the interactive prompt.

use brainvita_core::{ParsePositionError, Position};
use derive_more::Display;
use std::str::FromStr;
use tracing::instrument;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  start           begin a new game (restarts a running one)
  stop            abandon the current game
  r,c | select r c
                  click the cell at row r, column c (0-6)
  moves           list every legal jump
  board           print the board
  help            show this text
  quit            leave";

/// A line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Start (or restart) a game.
    Start,
    /// Stop the running game.
    Stop,
    /// Click a cell.
    Select(Position),
    /// List legal jumps.
    Moves,
    /// Print the board.
    Board,
    /// Print help.
    Help,
    /// Exit the host.
    Quit,
}

/// Error parsing an interactive command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// Blank input.
    #[display("Empty command")]
    Empty,

    /// Input is neither a keyword nor a position.
    #[display("Unknown command {:?}", _0)]
    Unknown(String),

    /// A `select` argument is not a position.
    #[display("{}", _0)]
    Position(ParsePositionError),
}

impl std::error::Error for CommandError {}

impl From<ParsePositionError> for CommandError {
    fn from(err: ParsePositionError) -> Self {
        CommandError::Position(err)
    }
}

impl FromStr for HostCommand {
    type Err = CommandError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_lowercase();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line.as_str(), ""), |(keyword, rest)| (keyword, rest.trim()));

        match (keyword, rest) {
            ("", _) => Err(CommandError::Empty),
            ("start" | "new" | "restart", "") => Ok(HostCommand::Start),
            ("stop", "") => Ok(HostCommand::Stop),
            ("moves", "") => Ok(HostCommand::Moves),
            ("board", "") => Ok(HostCommand::Board),
            ("help" | "?", "") => Ok(HostCommand::Help),
            ("quit" | "exit" | "q", "") => Ok(HostCommand::Quit),
            ("select", position) => Ok(HostCommand::Select(position.parse()?)),
            _ if line.starts_with(|c: char| c.is_ascii_digit() || c == '(') => {
                Ok(HostCommand::Select(line.parse()?))
            }
            _ => Err(CommandError::Unknown(line.clone())),
        }
    }
}
