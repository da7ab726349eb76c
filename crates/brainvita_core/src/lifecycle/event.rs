//! Inputs to the session state machine.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Names one scheduled commit.
///
/// Tickets increase monotonically within a session, so a timer that fires
/// after its move was cancelled cannot commit a later move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct MoveTicket(pub u64);

/// Something that happened to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Begin a fresh game, abandoning any game in progress.
    Start,
    /// Abort the current game and return to idle.
    Stop,
    /// The player clicked a cell.
    SelectCell(Position),
    /// The presentation delay of a scheduled commit has passed.
    DelayElapsed(MoveTicket),
}
