//! First-class move types for peg solitaire.
//!
//! A move is the player's intent to jump one marble over another. It can
//! be validated against a board before anything is mutated.

use crate::position::{ParsePositionError, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// An intended jump from one hole to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Cell holding the jumping marble.
    pub from: Position,
    /// Empty hole the marble lands in.
    pub to: Position,
}

impl Move {
    /// Returns the cell whose marble this jump captures.
    pub fn midpoint(&self) -> Position {
        self.from.midpoint(self.to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParsePositionError;

    /// Parses `r,c-r,c` or `r,c -> r,c`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once("->")
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| ParsePositionError::Format(s.trim().to_string()))?;
        Ok(Self::new(from.parse()?, to.parse()?))
    }
}

/// A validated move waiting to be committed, with its captured cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InFlightMove {
    /// Cell the marble leaves.
    pub from: Position,
    /// Cell the marble lands in.
    pub to: Position,
    /// Cell whose marble is captured.
    pub mid: Position,
}

impl From<Move> for InFlightMove {
    fn from(mov: Move) -> Self {
        Self {
            from: mov.from,
            to: mov.to,
            mid: mov.midpoint(),
        }
    }
}

impl From<InFlightMove> for Move {
    fn from(flight: InFlightMove) -> Self {
        Move::new(flight.from, flight.to)
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// One end of the move lies outside the grid.
    #[display("Position {} is off the board", _0)]
    OffBoard(Position),

    /// The landing cell is occupied or has no hole.
    #[display("Destination {} is not an empty hole", _0)]
    DestinationNotEmpty(Position),

    /// There is no marble at the source cell.
    #[display("No marble at {}", _0)]
    SourceNotMarble(Position),

    /// The move is not an orthogonal jump of exactly two cells.
    #[display("{} is not a two-cell orthogonal jump", _0)]
    NotAJump(Move),

    /// The cell being jumped over holds no marble.
    #[display("No marble to jump over at {}", _0)]
    NothingToJump(Position),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
