//! Game rules for peg solitaire.
//!
//! Pure functions over board snapshots: move legality, move application,
//! move enumeration and terminal-state detection. Rules never hold a board
//! of their own.

pub mod moves;
pub mod status;

pub use moves::{
    apply_move, is_move_valid, possible_moves, replay, try_apply_move, valid_destinations,
    validate_move,
};
pub use status::{WinRule, check_game_status, check_game_status_with};
