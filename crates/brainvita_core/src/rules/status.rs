//! Terminal-state detection.

use super::moves::possible_moves;
use crate::position::CENTER;
use crate::types::{Board, Cell, GameStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What counts as a win once no jump is left.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// A single remaining marble wins wherever it stands.
    #[default]
    AnySingleMarble,
    /// The single remaining marble must stand in the center hole.
    CenterOnly,
}

/// Classifies a board under the default [`WinRule::AnySingleMarble`].
pub fn check_game_status(board: &Board) -> GameStatus {
    check_game_status_with(board, WinRule::default())
}

/// Classifies a board: `Playing` while a jump exists, otherwise `Won` or `Lost`.
#[instrument(skip(board))]
pub fn check_game_status_with(board: &Board, rule: WinRule) -> GameStatus {
    if !possible_moves(board).is_empty() {
        return GameStatus::Playing;
    }

    let remaining = board.count_marbles();
    let won = match rule {
        WinRule::AnySingleMarble => remaining == 1,
        WinRule::CenterOnly => remaining == 1 && board.get(CENTER) == Some(Cell::Marble),
    };
    let status = if won { GameStatus::Won } else { GameStatus::Lost };
    debug!(remaining, %status, "No legal moves left");
    status
}
