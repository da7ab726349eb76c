//! Tests for the move lifecycle state machine.

use brainvita::{
    Board, Effect, GameStatus, MoveTicket, Notification, Phase, Position, Session, SessionEvent,
    WinRule,
};
use brainvita_core::possible_moves;

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn started() -> Session {
    let mut session = Session::new(WinRule::default());
    session.handle(SessionEvent::Start);
    session
}

fn notifications(effects: &[Effect]) -> Vec<Notification> {
    effects
        .iter()
        .filter_map(Effect::notification)
        .cloned()
        .collect()
}

fn ticket(effects: &[Effect]) -> MoveTicket {
    effects
        .iter()
        .find_map(Effect::scheduled_commit)
        .expect("commit scheduled")
}

/// Selects both ends of a jump and returns the commit ticket.
fn begin_jump(session: &mut Session, from: Position, to: Position) -> MoveTicket {
    session.handle(SessionEvent::SelectCell(from));
    ticket(&session.handle(SessionEvent::SelectCell(to)))
}

#[test]
fn test_start_from_idle() {
    let mut session = Session::new(WinRule::default());
    assert_eq!(session.status(), GameStatus::Idle);

    let effects = session.handle(SessionEvent::Start);
    assert_eq!(
        notifications(&effects),
        vec![
            Notification::BoardChanged(Board::new()),
            Notification::StatusChanged(GameStatus::Playing),
        ]
    );
    assert_eq!(session.status(), GameStatus::Playing);
}

#[test]
fn test_double_select_clears() {
    let mut session = started();
    let first = session.handle(SessionEvent::SelectCell(pos(1, 3)));
    let second = session.handle(SessionEvent::SelectCell(pos(1, 3)));

    assert_eq!(
        notifications(&first),
        vec![Notification::SelectionChanged(Some(pos(1, 3)))]
    );
    assert_eq!(
        notifications(&second),
        vec![Notification::SelectionChanged(None)]
    );
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.board(), &Board::new());
}

#[test]
fn test_selection_shows_destinations() {
    let mut session = started();
    session.handle(SessionEvent::SelectCell(pos(3, 1)));
    assert_eq!(session.valid_destinations(), vec![pos(3, 3)]);

    session.handle(SessionEvent::SelectCell(pos(0, 2)));
    assert!(session.valid_destinations().is_empty());
}

#[test]
fn test_in_flight_rejects_selection() {
    let mut session = started();
    let ticket = begin_jump(&mut session, pos(1, 3), pos(3, 3));
    let flight = session.in_flight().expect("in flight");
    let board = session.board().clone();

    for target in [pos(5, 3), pos(3, 3), pos(1, 3), pos(0, 0)] {
        assert!(session.handle(SessionEvent::SelectCell(target)).is_empty());
    }

    assert_eq!(session.in_flight(), Some(flight));
    assert_eq!(session.selected(), None);
    assert_eq!(session.board(), &board);

    session.handle(SessionEvent::DelayElapsed(ticket));
    assert_eq!(session.in_flight(), None);
}

#[test]
fn test_move_started_then_completed() {
    let mut session = started();
    session.handle(SessionEvent::SelectCell(pos(5, 3)));
    let effects = session.handle(SessionEvent::SelectCell(pos(3, 3)));

    let started = notifications(&effects);
    assert_eq!(started[0], Notification::SelectionChanged(None));
    let Notification::MoveStarted(flight) = started[1] else {
        panic!("Expected move start, got {:?}", started[1]);
    };
    assert_eq!(flight.mid, pos(4, 3));

    let effects = session.handle(SessionEvent::DelayElapsed(ticket(&effects)));
    let completed = notifications(&effects);
    assert_eq!(completed.last(), Some(&Notification::MoveCompleted(flight)));
    assert_eq!(session.board().count_marbles(), 31);
    assert_eq!(session.moves_made(), 1);
}

#[test]
fn test_stop_cancels_in_flight_move() {
    let mut session = started();
    let ticket = begin_jump(&mut session, pos(1, 3), pos(3, 3));
    let flight = session.in_flight().expect("in flight");

    let stopped = notifications(&session.handle(SessionEvent::Stop));
    assert_eq!(stopped[0], Notification::MoveCancelled(flight));
    assert_eq!(session.status(), GameStatus::Idle);
    assert_eq!(session.in_flight(), None);

    assert!(session.handle(SessionEvent::DelayElapsed(ticket)).is_empty());
    assert_eq!(session.board(), &Board::new());
}

#[test]
fn test_restart_ignores_stale_commit() {
    let mut session = started();
    let stale = begin_jump(&mut session, pos(1, 3), pos(3, 3));
    let cancelled = session.in_flight().expect("in flight");

    let restarted = notifications(&session.handle(SessionEvent::Start));
    assert_eq!(
        restarted,
        vec![
            Notification::MoveCancelled(cancelled),
            Notification::BoardChanged(Board::new()),
            Notification::StatusChanged(GameStatus::Playing),
        ]
    );
    let fresh = begin_jump(&mut session, pos(3, 1), pos(3, 3));
    assert_ne!(stale, fresh);

    assert!(session.handle(SessionEvent::DelayElapsed(stale)).is_empty());
    assert_eq!(session.board().count_marbles(), 32);

    session.handle(SessionEvent::DelayElapsed(fresh));
    assert_eq!(session.board().count_marbles(), 31);
    assert_eq!(session.board().get(pos(3, 2)), Some(brainvita::Cell::Empty));
}

#[test]
fn test_play_to_end_and_restart() {
    let mut session = started();

    while session.status() == GameStatus::Playing {
        let mov = possible_moves(session.board())[0];
        let ticket = begin_jump(&mut session, mov.from, mov.to);
        let effects = session.handle(SessionEvent::DelayElapsed(ticket));
        assert!(matches!(
            notifications(&effects)[1],
            Notification::StatusChanged(_)
        ));
    }

    assert!(session.status().is_terminal());
    let marble = session.board().marble_positions()[0];
    assert!(session.handle(SessionEvent::SelectCell(marble)).is_empty());

    session.handle(SessionEvent::Start);
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.board().count_marbles(), 32);
    assert_eq!(session.moves_made(), 0);
}
