//! The per-session state machine.
//!
//! The session owns the authoritative board and is its only writer. Jumps
//! are committed in two phases so observers can animate the move before
//! the capture lands:
//!
//! ```text
//! Idle --select marble--> Selecting --select same marble--> Idle
//! Selecting --select other marble--> Selecting
//! Selecting --select hole, illegal--> Idle
//! Selecting --select hole, legal--> InFlight --delay elapsed--> Idle
//! ```
//!
//! `Start` and `Stop` are honored in every phase. Issued while a jump is in
//! flight they cancel it and report `MoveCancelled`; the late
//! `DelayElapsed` for the cancelled ticket is ignored.

use super::effect::{Effect, Notification};
use super::event::{MoveTicket, SessionEvent};
use crate::action::{InFlightMove, Move};
use crate::contracts::{Contract, MoveContract};
use crate::position::Position;
use crate::rules::{WinRule, apply_move, check_game_status_with, is_move_valid, valid_destinations};
use crate::types::{Board, Cell, GameStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A jump waiting for its presentation delay to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommit {
    /// Ticket the host must echo back in `DelayElapsed`.
    pub ticket: MoveTicket,
    /// The validated jump.
    pub movement: InFlightMove,
}

/// Transient selection state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing selected, nothing in flight.
    #[default]
    Idle,
    /// A marble is selected and waits for a destination.
    Selecting(Position),
    /// A jump is in flight; every selection is rejected.
    InFlight(PendingCommit),
}

/// One game of peg solitaire and the lifecycle of its moves.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    status: GameStatus,
    phase: Phase,
    win_rule: WinRule,
    next_ticket: u64,
    moves_made: usize,
}

impl Session {
    /// Creates an idle session with a fresh board.
    #[instrument]
    pub fn new(win_rule: WinRule) -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Idle,
            phase: Phase::Idle,
            win_rule,
            next_ticket: 0,
            moves_made: 0,
        }
    }

    /// Returns the authoritative board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the win rule this session classifies boards with.
    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    /// Returns the selected marble, if any.
    pub fn selected(&self) -> Option<Position> {
        match self.phase {
            Phase::Selecting(pos) => Some(pos),
            _ => None,
        }
    }

    /// Returns the jump currently in flight, if any.
    pub fn in_flight(&self) -> Option<InFlightMove> {
        match self.phase {
            Phase::InFlight(pending) => Some(pending.movement),
            _ => None,
        }
    }

    /// Number of jumps committed since the last start.
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Legal landing cells for the selected marble.
    ///
    /// Empty when nothing is selected or a jump is in flight.
    pub fn valid_destinations(&self) -> Vec<Position> {
        match self.selected() {
            Some(from) => valid_destinations(&self.board, from),
            None => Vec::new(),
        }
    }

    /// Applies one event and returns the effects the host must carry out.
    ///
    /// Effects are ordered; everything returned by one call describes a
    /// single atomic transition.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Start => self.start(),
            SessionEvent::Stop => self.stop(),
            SessionEvent::SelectCell(pos) => self.select_cell(pos),
            SessionEvent::DelayElapsed(ticket) => self.complete_move(ticket),
        }
    }

    /// Starts a fresh game. Always permitted, including from `Won` or `Lost`.
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = self.reset_phase();
        self.board = Board::new();
        self.status = GameStatus::Playing;
        self.moves_made = 0;
        info!(win_rule = %self.win_rule, "Game started");

        effects.push(Notification::BoardChanged(self.board.clone()).into());
        effects.push(Notification::StatusChanged(self.status).into());
        effects
    }

    /// Aborts the current game and returns to `Idle` with a fresh board.
    pub fn stop(&mut self) -> Vec<Effect> {
        if self.status == GameStatus::Idle {
            debug!("Stop ignored, no game running");
            return Vec::new();
        }

        let mut effects = self.reset_phase();
        self.board = Board::new();
        self.status = GameStatus::Idle;
        self.moves_made = 0;
        info!("Game stopped");

        effects.push(Notification::BoardChanged(self.board.clone()).into());
        effects.push(Notification::StatusChanged(self.status).into());
        effects
    }

    /// Handles a click on a cell.
    ///
    /// Ignored unless the game is `Playing` and no jump is in flight.
    pub fn select_cell(&mut self, pos: Position) -> Vec<Effect> {
        if self.status != GameStatus::Playing {
            debug!(%pos, "Selection ignored, game not playing");
            return Vec::new();
        }

        match (self.phase, self.board.get(pos)) {
            (Phase::InFlight(pending), _) => {
                debug!(%pos, ticket = %pending.ticket, "Selection ignored, move in flight");
                Vec::new()
            }
            (Phase::Selecting(selected), Some(Cell::Marble)) if selected == pos => {
                self.phase = Phase::Idle;
                vec![Notification::SelectionChanged(None).into()]
            }
            (_, Some(Cell::Marble)) => {
                self.phase = Phase::Selecting(pos);
                vec![Notification::SelectionChanged(Some(pos)).into()]
            }
            (Phase::Selecting(from), Some(Cell::Empty)) => self.attempt_move(from, pos),
            _ => {
                debug!(%pos, "Selection ignored");
                Vec::new()
            }
        }
    }

    /// Commits the in-flight jump named by `ticket`.
    ///
    /// Stale tickets (from a cancelled jump) are ignored.
    pub fn complete_move(&mut self, ticket: MoveTicket) -> Vec<Effect> {
        let pending = match self.phase {
            Phase::InFlight(pending) if pending.ticket == ticket => pending,
            _ => {
                debug!(%ticket, "Ignoring stale commit");
                return Vec::new();
            }
        };

        let movement = pending.movement;
        let next = apply_move(&self.board, movement.from, movement.to);

        debug_assert!(
            MoveContract::post(&self.board, &next).is_ok(),
            "Commit of {} broke the move contract",
            Move::from(movement)
        );

        self.board = next;
        self.status = check_game_status_with(&self.board, self.win_rule);
        self.phase = Phase::Idle;
        self.moves_made += 1;
        info!(
            %ticket,
            marbles = self.board.count_marbles(),
            status = %self.status,
            "Move committed"
        );

        vec![
            Notification::BoardChanged(self.board.clone()).into(),
            Notification::StatusChanged(self.status).into(),
            Notification::MoveCompleted(movement).into(),
        ]
    }

    /// Tries the jump `from -> to` from a selection.
    fn attempt_move(&mut self, from: Position, to: Position) -> Vec<Effect> {
        if !is_move_valid(&self.board, from, to) {
            debug!(%from, %to, "Rejected jump");
            self.phase = Phase::Idle;
            return vec![
                Notification::SelectionChanged(None).into(),
                Notification::InvalidSelection(to).into(),
            ];
        }

        let ticket = MoveTicket(self.next_ticket);
        self.next_ticket += 1;
        let movement = InFlightMove::from(Move::new(from, to));
        self.phase = Phase::InFlight(PendingCommit { ticket, movement });
        debug!(%ticket, %from, %to, "Jump in flight");

        vec![
            Notification::SelectionChanged(None).into(),
            Notification::MoveStarted(movement).into(),
            Effect::ScheduleCommit(ticket),
        ]
    }

    /// Clears selection and cancels any in-flight jump.
    fn reset_phase(&mut self) -> Vec<Effect> {
        let previous = std::mem::take(&mut self.phase);
        match previous {
            Phase::Idle => Vec::new(),
            Phase::Selecting(_) => vec![Notification::SelectionChanged(None).into()],
            Phase::InFlight(pending) => {
                info!(ticket = %pending.ticket, "Cancelled in-flight move");
                vec![Notification::MoveCancelled(pending.movement).into()]
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WinRule::default())
    }
}
