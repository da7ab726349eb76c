//! Grid coordinates and jump directions.

use crate::types::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A (row, col) grid coordinate, 0-indexed from the top-left corner.
///
/// Any pair of indices can be represented; [`Position::is_on_board`]
/// tells whether it lies inside the 7x7 grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

/// The center hole, empty at the start of a game.
pub const CENTER: Position = Position::new(3, 3);

/// Width of each corner quadrant of the cross.
const CORNER_WIDTH: usize = 2;

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Checks if the position lies inside the grid.
    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Checks if the position falls in one of the four holeless corners.
    pub fn is_corner(self) -> bool {
        let edge = |i: usize| i < CORNER_WIDTH || i >= BOARD_SIZE - CORNER_WIDTH;
        self.is_on_board() && edge(self.row) && edge(self.col)
    }

    /// Shifts the position, returning `None` if it leaves the grid.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let pos = Self::new(row, col);
        pos.is_on_board().then_some(pos)
    }

    /// Landing cell of a jump from here in the given direction.
    pub fn jump(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        self.offset(2 * d_row, 2 * d_col)
    }

    /// Cell halfway between two positions.
    ///
    /// Only meaningful for positions two cells apart on one axis.
    pub fn midpoint(self, other: Self) -> Self {
        let half = |a: usize, b: usize| a.min(b) + a.abs_diff(b) / 2;
        Self::new(half(self.row, other.row), half(self.col, other.col))
    }

    /// All 49 grid positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `r,c`, `r c` or `(r,c)`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParsePositionError::Format(s.trim().to_string()));
        };

        let coordinate = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| ParsePositionError::Coordinate(part.to_string()))
        };
        Ok(Self::new(coordinate(row)?, coordinate(col)?))
    }
}

/// Error parsing a position from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParsePositionError {
    /// Input is not two coordinates.
    #[display("Expected `row,col`, got {:?}", _0)]
    Format(String),

    /// A coordinate is not a non-negative integer.
    #[display("Invalid coordinate {:?}", _0)]
    Coordinate(String),
}

impl std::error::Error for ParsePositionError {}

/// Orthogonal jump direction.
///
/// Iteration order (`Up`, `Down`, `Left`, `Right`) fixes the order in
/// which legal moves are enumerated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 6.
    Down,
    /// Towards column 0.
    Left,
    /// Towards column 6.
    Right,
}

impl Direction {
    /// Unit step as (row, col) deltas.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_on_board_range() {
        assert!(Position::new(0, 0).is_on_board());
        assert!(Position::new(6, 6).is_on_board());
        assert!(!Position::new(7, 0).is_on_board());
        assert!(!Position::new(0, 7).is_on_board());
    }

    #[test]
    fn test_corner_mask() {
        let corners = Position::all().filter(|pos| pos.is_corner()).count();
        assert_eq!(corners, 16);
        assert!(Position::new(1, 5).is_corner());
        assert!(!Position::new(1, 2).is_corner());
        assert!(!Position::new(2, 0).is_corner());
        assert!(!Position::new(8, 8).is_corner());
    }

    #[test]
    fn test_jump_off_board() {
        assert_eq!(Position::new(1, 3).jump(Direction::Up), None);
        assert_eq!(Position::new(3, 5).jump(Direction::Right), None);
        assert_eq!(
            Position::new(1, 3).jump(Direction::Down),
            Some(Position::new(3, 3))
        );
    }

    #[test]
    fn test_direction_order() {
        let order: Vec<_> = Direction::iter().collect();
        assert_eq!(
            order,
            vec![Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_midpoint() {
        let from = Position::new(1, 2);
        let to = Position::new(3, 2);
        assert_eq!(from.midpoint(to), Position::new(2, 2));
        assert_eq!(to.midpoint(from), Position::new(2, 2));
    }

    #[test]
    fn test_midpoint_far_off_grid() {
        let far = Position::new(usize::MAX, usize::MAX - 2);
        let near = Position::new(usize::MAX - 2, usize::MAX - 2);
        assert_eq!(far.midpoint(near), Position::new(usize::MAX - 1, usize::MAX - 2));
    }

    #[test]
    fn test_parse_formats() {
        let expected = Position::new(1, 2);
        assert_eq!("1,2".parse::<Position>(), Ok(expected));
        assert_eq!(" 1 2 ".parse::<Position>(), Ok(expected));
        assert_eq!("(1,2)".parse::<Position>(), Ok(expected));
        assert_eq!(expected.to_string().parse::<Position>(), Ok(expected));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "1".parse::<Position>(),
            Err(ParsePositionError::Format(_))
        ));
        assert!(matches!(
            "1,2,3".parse::<Position>(),
            Err(ParsePositionError::Format(_))
        ));
        assert!(matches!(
            "a,2".parse::<Position>(),
            Err(ParsePositionError::Coordinate(_))
        ));
        assert!(matches!(
            "-1,2".parse::<Position>(),
            Err(ParsePositionError::Coordinate(_))
        ));
    }
}
