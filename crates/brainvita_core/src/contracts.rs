//! Contract-based validation for jumps.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{Move, MoveError};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::types::{Board, Cell};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: both ends of the move lie inside the grid.
pub struct BothOnBoard;

impl BothOnBoard {
    /// Checks the precondition.
    pub fn check(mov: &Move, _board: &Board) -> Result<(), MoveError> {
        match [mov.from, mov.to].into_iter().find(|pos| !pos.is_on_board()) {
            Some(pos) => Err(MoveError::OffBoard(pos)),
            None => Ok(()),
        }
    }
}

/// Precondition: the landing cell is an empty hole.
pub struct DestinationIsEmpty;

impl DestinationIsEmpty {
    /// Checks the precondition.
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if board.get(mov.to) == Some(Cell::Empty) {
            Ok(())
        } else {
            Err(MoveError::DestinationNotEmpty(mov.to))
        }
    }
}

/// Precondition: the source cell holds a marble.
pub struct SourceHasMarble;

impl SourceHasMarble {
    /// Checks the precondition.
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if board.get(mov.from) == Some(Cell::Marble) {
            Ok(())
        } else {
            Err(MoveError::SourceNotMarble(mov.from))
        }
    }
}

/// Precondition: the move is two cells along a row or a column.
pub struct IsJumpShape;

impl IsJumpShape {
    /// Checks the precondition.
    pub fn check(mov: &Move, _board: &Board) -> Result<(), MoveError> {
        let shape = (
            mov.from.row.abs_diff(mov.to.row),
            mov.from.col.abs_diff(mov.to.col),
        );
        match shape {
            (2, 0) | (0, 2) => Ok(()),
            _ => Err(MoveError::NotAJump(*mov)),
        }
    }
}

/// Precondition: the jumped-over cell holds a marble.
pub struct MidpointHasMarble;

impl MidpointHasMarble {
    /// Checks the precondition.
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let mid = mov.midpoint();
        if board.get(mid) == Some(Cell::Marble) {
            Ok(())
        } else {
            Err(MoveError::NothingToJump(mid))
        }
    }
}

/// Composite precondition: a move is legal when every check passes.
///
/// Checks run in a fixed order and the first failure is reported. The
/// shape check runs before the midpoint check, so the midpoint is always
/// a whole cell when it is inspected.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "trace", skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        BothOnBoard::check(mov, board)?;
        DestinationIsEmpty::check(mov, board)?;
        SourceHasMarble::check(mov, board)?;
        IsJumpShape::check(mov, board)?;
        MidpointHasMarble::check(mov, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for jump actions.
///
/// Preconditions:
/// - Move is legal ([`LegalMove`])
///
/// Postconditions:
/// - Board invariants still hold
/// - Exactly one marble was captured
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), MoveError> {
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let (was, now) = (before.count_marbles(), after.count_marbles());
        if now + 1 != was {
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: expected one capture, marbles went {} -> {}",
                was, now
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::rules::apply_move;

    fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
        Move::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    #[test]
    fn test_precondition_legal_opening() {
        let board = Board::new();
        assert!(MoveContract::pre(&board, &mv((1, 3), (3, 3))).is_ok());
    }

    #[test]
    fn test_precondition_off_board() {
        let board = Board::new();
        assert_eq!(
            MoveContract::pre(&board, &mv((3, 5), (3, 7))),
            Err(MoveError::OffBoard(Position::new(3, 7)))
        );
    }

    #[test]
    fn test_precondition_destination_occupied() {
        let board = Board::new();
        assert_eq!(
            MoveContract::pre(&board, &mv((2, 2), (2, 4))),
            Err(MoveError::DestinationNotEmpty(Position::new(2, 4)))
        );
    }

    #[test]
    fn test_precondition_destination_corner() {
        let board = Board::new();
        assert_eq!(
            MoveContract::pre(&board, &mv((2, 0), (0, 0))),
            Err(MoveError::DestinationNotEmpty(Position::new(0, 0)))
        );
    }

    #[test]
    fn test_precondition_source_empty() {
        let board = Board::with_marbles(&[Position::new(3, 2)]);
        assert_eq!(
            MoveContract::pre(&board, &mv((3, 1), (3, 3))),
            Err(MoveError::SourceNotMarble(Position::new(3, 1)))
        );
    }

    #[test]
    fn test_precondition_wrong_shape() {
        let board = Board::with_marbles(&[Position::new(2, 2), Position::new(3, 3)]);
        assert!(matches!(
            MoveContract::pre(&board, &mv((2, 2), (4, 4))),
            Err(MoveError::NotAJump(_))
        ));
    }

    #[test]
    fn test_precondition_nothing_to_jump() {
        let board = Board::with_marbles(&[Position::new(3, 1)]);
        assert_eq!(
            MoveContract::pre(&board, &mv((3, 1), (3, 3))),
            Err(MoveError::NothingToJump(Position::new(3, 2)))
        );
    }

    #[test]
    fn test_midpoint_check_off_grid() {
        let mov = Move::new(Position::new(usize::MAX, 0), Position::new(usize::MAX - 2, 0));
        assert_eq!(
            MidpointHasMarble::check(&mov, &Board::new()),
            Err(MoveError::NothingToJump(Position::new(usize::MAX - 1, 0)))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Board::new();
        let after = apply_move(&before, Position::new(1, 3), Position::new(3, 3));
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_capture() {
        let before = Board::new();
        assert!(matches!(
            MoveContract::post(&before, &before),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_corrupted_mask() {
        let before = Board::new();
        let mut cells = *apply_move(&before, Position::new(1, 3), Position::new(3, 3)).cells();
        cells[0][0] = Cell::Empty;
        let after = Board::from_cells(cells);
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
