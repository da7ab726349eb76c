//! Brainvita core - pure peg solitaire game logic.
//!
//! This crate holds the game-state engine for the 33-hole English cross
//! board. It performs no IO and owns no timers: hosts drive a [`Session`]
//! with [`SessionEvent`]s and act on the [`Effect`]s it returns.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Cell`], [`Position`]
//! - **Move engine**: [`is_move_valid`], [`apply_move`], [`possible_moves`],
//!   [`check_game_status`]
//! - **Contracts and invariants**: [`MoveContract`], [`BoardInvariants`]
//! - **Move lifecycle**: [`Session`], a select → in-flight → commit state machine
//!
//! # Example
//!
//! ```
//! use brainvita_core::{Effect, Position, Session, SessionEvent, WinRule};
//!
//! let mut session = Session::new(WinRule::default());
//! session.handle(SessionEvent::Start);
//! session.handle(SessionEvent::SelectCell(Position::new(1, 3)));
//! let effects = session.handle(SessionEvent::SelectCell(Position::new(3, 3)));
//!
//! let ticket = effects
//!     .iter()
//!     .find_map(Effect::scheduled_commit)
//!     .expect("legal jump schedules a commit");
//! session.handle(SessionEvent::DelayElapsed(ticket));
//! assert_eq!(session.board().count_marbles(), 31);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod invariants;
mod lifecycle;
mod position;
mod rules;
mod types;

// Crate-level exports - Board model
pub use position::{CENTER, Direction, ParsePositionError, Position};
pub use types::{BOARD_SIZE, Board, Cell, GameStatus, PLAYABLE_CELLS, TOTAL_MARBLES};

// Crate-level exports - Moves
pub use action::{InFlightMove, Move, MoveError};

// Crate-level exports - Move engine
pub use rules::{
    WinRule, apply_move, check_game_status, check_game_status_with, is_move_valid,
    possible_moves, replay, try_apply_move, valid_destinations, validate_move,
};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    BothOnBoard, Contract, DestinationIsEmpty, IsJumpShape, LegalMove, MidpointHasMarble,
    MoveContract, SourceHasMarble,
};
pub use invariants::{
    BoardInvariants, CrossMaskInvariant, Invariant, InvariantSet, InvariantViolation,
    MarbleBoundInvariant,
};

// Crate-level exports - Move lifecycle
pub use lifecycle::{
    Effect, MoveTicket, Notification, PendingCommit, Phase, Session, SessionEvent,
};
