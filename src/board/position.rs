//! Board coordinates and diagonal directions.
//!
//! Row 0 is the top edge of the board (White's back rank) and row 7 the
//! bottom edge (Red's back rank). Columns run left to right.

use std::fmt;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A (row, column) coordinate.
///
/// A `Position` can hold any value; only positions inside `[0, 8)` on both
/// axes can be dereferenced against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns true if the position lies on the board.
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Returns true for the dark squares pieces are allowed to stand on.
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Flat array index, valid only for in-bounds positions.
    pub(crate) const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`Position::index`].
    pub(crate) const fn from_index(idx: usize) -> Self {
        Position {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }

    /// Steps `distance` squares along `dir`, or `None` if that leaves the board.
    pub fn step(self, dir: Direction, distance: usize) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row as isize + dr * distance as isize;
        let col = self.col as isize + dc * distance as isize;
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(row as usize, col as usize);
        pos.in_bounds().then_some(pos)
    }
}

/// Renders as file letter and rank number, e.g. `c3`. Row 7 is rank 1.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", file, BOARD_SIZE - self.row)
    }
}

/// One of the four diagonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// All directions, in generation order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

impl Direction {
    /// Row and column deltas for one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    pub const fn is_up(self) -> bool {
        matches!(self, Direction::UpLeft | Direction::UpRight)
    }
}
