//! Marble bound invariant: a board never holds more than the starting set.

use super::Invariant;
use crate::types::{Board, TOTAL_MARBLES};

/// Invariant: at most 32 marbles, so at least one hole is always empty.
pub struct MarbleBoundInvariant;

impl Invariant<Board> for MarbleBoundInvariant {
    fn holds(board: &Board) -> bool {
        board.count_marbles() <= TOTAL_MARBLES
    }

    fn description() -> &'static str {
        "Marble count never exceeds the starting 32"
    }
}
