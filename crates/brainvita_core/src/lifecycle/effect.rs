//! Outputs of the session state machine.

use super::event::MoveTicket;
use crate::action::InFlightMove;
use crate::position::Position;
use crate::types::{Board, GameStatus};
use serde::{Deserialize, Serialize};

/// State change observed by collaborators (renderers, audio, timers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notification {
    /// The authoritative board was replaced.
    BoardChanged(Board),
    /// The game status was recomputed.
    StatusChanged(GameStatus),
    /// The selected marble changed or was cleared.
    SelectionChanged(Option<Position>),
    /// A legal jump entered its in-flight phase.
    MoveStarted(InFlightMove),
    /// A jump was committed to the board.
    MoveCompleted(InFlightMove),
    /// An in-flight jump was abandoned by `Start` or `Stop`; the board
    /// never saw it.
    MoveCancelled(InFlightMove),
    /// A click on an empty hole did not complete a legal jump.
    InvalidSelection(Position),
}

/// What the host must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Forward a notification to observers.
    Notify(Notification),
    /// Send [`SessionEvent::DelayElapsed`](super::SessionEvent::DelayElapsed)
    /// with this ticket once the presentation delay has passed.
    ScheduleCommit(MoveTicket),
}

impl Effect {
    /// Returns the notification carried by this effect, if any.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Effect::Notify(notification) => Some(notification),
            Effect::ScheduleCommit(_) => None,
        }
    }

    /// Returns the ticket of a scheduled commit, if any.
    pub fn scheduled_commit(&self) -> Option<MoveTicket> {
        match self {
            Effect::ScheduleCommit(ticket) => Some(*ticket),
            Effect::Notify(_) => None,
        }
    }
}

impl From<Notification> for Effect {
    fn from(notification: Notification) -> Self {
        Effect::Notify(notification)
    }
}
