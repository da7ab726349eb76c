//! Core domain types for peg solitaire.

use crate::position::{CENTER, Position};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Width and height of the board grid.
pub const BOARD_SIZE: usize = 7;

/// Marbles on the board when a game starts.
pub const TOTAL_MARBLES: usize = 32;

/// Holes on the board (every cell outside the corner mask).
pub const PLAYABLE_CELLS: usize = 33;

/// State of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No hole here (corner region). Never playable.
    Invalid,
    /// A hole without a marble.
    Empty,
    /// A hole holding a marble.
    Marble,
}

/// 7x7 English cross board.
///
/// The four 2x2 corner quadrants are permanently [`Cell::Invalid`]; the
/// only mutator is crate-private and refuses to touch them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the starting layout: every hole filled except the center.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::with_marbles(&[]);
        for pos in Position::all() {
            if board.is_playable(pos) && pos != CENTER {
                board.set(pos, Cell::Marble);
            }
        }
        board
    }

    /// Creates a board with marbles only at the given positions.
    ///
    /// Every other hole is empty. Positions that are off the board or in
    /// the corner mask are ignored.
    #[instrument]
    pub fn with_marbles(marbles: &[Position]) -> Self {
        let mut cells = [[Cell::Invalid; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all().filter(|pos| !pos.is_corner()) {
            cells[pos.row][pos.col] = if marbles.contains(&pos) {
                Cell::Marble
            } else {
                Cell::Empty
            };
        }
        Self { cells }
    }

    /// Builds a board from raw cells, bypassing the corner mask.
    #[cfg(test)]
    pub(crate) fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position, `None` when off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.is_on_board() {
            Some(self.cells[pos.row][pos.col])
        } else {
            None
        }
    }

    /// Sets a playable cell to `Empty` or `Marble`.
    ///
    /// Writes that would add or remove a hole are dropped.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if !self.is_playable(pos) || cell == Cell::Invalid {
            warn!(%pos, ?cell, "Refusing to rewrite the corner mask");
            return;
        }
        self.cells[pos.row][pos.col] = cell;
    }

    /// Checks if a position is on the board and has a hole.
    pub fn is_playable(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty | Cell::Marble))
    }

    /// Counts the marbles left on the board.
    pub fn count_marbles(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Marble)
            .count()
    }

    /// Number of marbles captured since the starting layout.
    pub fn marbles_removed(&self) -> usize {
        TOTAL_MARBLES.saturating_sub(self.count_marbles())
    }

    /// Positions holding a marble, in row-major order.
    pub fn marble_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|pos| self.get(*pos) == Some(Cell::Marble))
            .collect()
    }

    /// Returns all cells as rows.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Formats the board as a human-readable grid with row/column indices.
    ///
    /// `●` is a marble, `○` an empty hole, and corners are left blank.
    pub fn display(&self) -> String {
        let mut result = String::from(" ");
        for col in 0..BOARD_SIZE {
            result.push_str(&format!(" {col}"));
        }
        for (row, cells) in self.cells.iter().enumerate() {
            let mut line = format!("\n{row}");
            for cell in cells {
                line.push(' ');
                line.push(match cell {
                    Cell::Marble => '●',
                    Cell::Empty => '○',
                    Cell::Invalid => ' ',
                });
            }
            result.push_str(line.trim_end());
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of a session, derived from its board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum GameStatus {
    /// No session running.
    Idle,
    /// At least one legal move remains.
    Playing,
    /// No legal move and a single marble left.
    Won,
    /// No legal move and more than one marble left.
    Lost,
}

impl GameStatus {
    /// Returns true once the game has been decided.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}
