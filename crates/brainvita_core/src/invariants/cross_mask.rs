//! Cross mask invariant: holes are never created or destroyed.

use super::Invariant;
use crate::position::Position;
use crate::types::{Board, Cell};

/// Invariant: exactly the 16 corner cells are `Invalid`.
pub struct CrossMaskInvariant;

impl Invariant<Board> for CrossMaskInvariant {
    fn holds(board: &Board) -> bool {
        Position::all().all(|pos| (board.get(pos) == Some(Cell::Invalid)) == pos.is_corner())
    }

    fn description() -> &'static str {
        "Corner cells are invalid and every other cell is a hole"
    }
}
