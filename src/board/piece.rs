//! Players, pieces, and cell contents.

use serde::Serialize;

use super::position::BOARD_SIZE;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    White,
}

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::White,
            Player::White => Player::Red,
        }
    }

    /// Row delta of a forward step for this side's men.
    pub const fn forward(self) -> isize {
        match self {
            Player::Red => -1,
            Player::White => 1,
        }
    }

    /// The row on which this side's men are crowned.
    pub const fn promotion_row(self) -> usize {
        match self {
            Player::Red => 0,
            Player::White => BOARD_SIZE - 1,
        }
    }

    /// Lowercase name used by the text protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::White => "white",
        }
    }

    /// Parses a side from its protocol name, ignoring case.
    pub fn from_name(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Some(Player::Red),
            "white" => Some(Player::White),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Piece { owner, king: false }
    }

    pub const fn king(owner: Player) -> Self {
        Piece { owner, king: true }
    }

    /// Single-character diagram symbol: lowercase men, uppercase kings.
    pub const fn diagram_char(self) -> char {
        match (self.owner, self.king) {
            (Player::Red, false) => 'r',
            (Player::Red, true) => 'R',
            (Player::White, false) => 'w',
            (Player::White, true) => 'W',
        }
    }
}

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }

    /// Returns true if the cell holds a piece owned by `player`.
    pub fn is_owned_by(self, player: Player) -> bool {
        matches!(self, Cell::Occupied(p) if p.owner == player)
    }
}
