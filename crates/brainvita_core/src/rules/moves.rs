//! Jump validation, application and enumeration.

use super::status::{WinRule, check_game_status_with};
use crate::action::{Move, MoveError};
use crate::contracts::{Contract, LegalMove, MoveContract};
use crate::position::{Direction, Position};
use crate::types::{Board, Cell, GameStatus};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Checks whether jumping from `from` to `to` is legal on this board.
pub fn is_move_valid(board: &Board, from: Position, to: Position) -> bool {
    validate_move(board, &Move::new(from, to)).is_ok()
}

/// Checks a move and reports the first rule it breaks.
pub fn validate_move(board: &Board, mov: &Move) -> Result<(), MoveError> {
    LegalMove::check(mov, board)
}

/// Applies a legal jump, returning the next board.
///
/// The source and the captured cell become empty and the destination
/// receives the marble. The input board is left untouched.
///
/// The move must already have passed [`is_move_valid`]; calling this with
/// an illegal move is a programmer error and trips a debug assertion.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, from: Position, to: Position) -> Board {
    let mov = Move::new(from, to);
    debug_assert!(
        validate_move(board, &mov).is_ok(),
        "apply_move called with illegal move {}",
        mov
    );

    let mut next = board.clone();
    next.set(from, Cell::Empty);
    next.set(mov.midpoint(), Cell::Empty);
    next.set(to, Cell::Marble);
    next
}

/// Validates and applies a move in one step.
///
/// Contract enforcement:
/// - Preconditions checked always
/// - Postconditions checked in debug builds only
#[instrument(skip(board))]
pub fn try_apply_move(board: &Board, mov: &Move) -> Result<Board, MoveError> {
    MoveContract::pre(board, mov)?;
    let next = apply_move(board, mov.from, mov.to);

    #[cfg(debug_assertions)]
    MoveContract::post(board, &next)?;

    Ok(next)
}

/// Enumerates every legal jump on the board.
///
/// Sources are scanned in row-major order and, for each source, directions
/// in the order up, down, left, right.
#[instrument(skip(board))]
pub fn possible_moves(board: &Board) -> Vec<Move> {
    let moves: Vec<Move> = board
        .marble_positions()
        .into_iter()
        .flat_map(|from| {
            valid_destinations(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect();
    debug!(count = moves.len(), "Enumerated legal moves");
    moves
}

/// Legal landing cells for the marble at `from`, in direction order.
pub fn valid_destinations(board: &Board, from: Position) -> Vec<Position> {
    Direction::iter()
        .filter_map(|direction| from.jump(direction))
        .filter(|to| is_move_valid(board, from, *to))
        .collect()
}

/// Replays moves from the starting layout.
///
/// Stops at the first illegal move. Returns the final board and its status
/// under the given win rule.
#[instrument]
pub fn replay(moves: &[Move], rule: WinRule) -> Result<(Board, GameStatus), MoveError> {
    let mut board = Board::new();

    for mov in moves {
        board = try_apply_move(&board, mov)?;
    }

    let status = check_game_status_with(&board, rule);
    Ok((board, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_moves() {
        let moves = possible_moves(&Board::new());
        assert_eq!(
            moves,
            vec![
                Move::new(Position::new(1, 3), Position::new(3, 3)),
                Move::new(Position::new(3, 1), Position::new(3, 3)),
                Move::new(Position::new(3, 5), Position::new(3, 3)),
                Move::new(Position::new(5, 3), Position::new(3, 3)),
            ]
        );
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let board = Board::new();
        let next = apply_move(&board, Position::new(3, 1), Position::new(3, 3));
        assert_eq!(board, Board::new());
        assert_eq!(next.get(Position::new(3, 1)), Some(Cell::Empty));
        assert_eq!(next.get(Position::new(3, 2)), Some(Cell::Empty));
        assert_eq!(next.get(Position::new(3, 3)), Some(Cell::Marble));
    }

    #[test]
    fn test_valid_destinations_direction_order() {
        let board = Board::with_marbles(&[
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(4, 3),
            Position::new(3, 2),
            Position::new(3, 4),
        ]);
        assert_eq!(
            valid_destinations(&board, Position::new(3, 3)),
            vec![
                Position::new(1, 3),
                Position::new(5, 3),
                Position::new(3, 1),
                Position::new(3, 5),
            ]
        );
    }

    #[test]
    fn test_try_apply_rejects_illegal() {
        let board = Board::new();
        let mov = Move::new(Position::new(3, 3), Position::new(1, 3));
        assert_eq!(
            try_apply_move(&board, &mov),
            Err(MoveError::DestinationNotEmpty(Position::new(1, 3)))
        );
    }

    #[test]
    fn test_replay_stops_at_illegal_move() {
        let moves = [
            Move::new(Position::new(1, 3), Position::new(3, 3)),
            Move::new(Position::new(1, 3), Position::new(3, 3)),
        ];
        assert_eq!(
            replay(&moves, WinRule::default()),
            Err(MoveError::DestinationNotEmpty(Position::new(3, 3)))
        );
    }

    #[test]
    fn test_replay_reports_status() {
        let moves = [Move::new(Position::new(1, 3), Position::new(3, 3))];
        let (board, status) = replay(&moves, WinRule::default()).expect("legal opening");
        assert_eq!(board.count_marbles(), 31);
        assert_eq!(status, GameStatus::Playing);
    }
}
