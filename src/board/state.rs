//! Board representation.
//!
//! Holds the 8×8 grid of cells as a flat array indexed by
//! `row * BOARD_SIZE + col`. The array is `Copy`, so cloning a board for
//! look-ahead is a plain memory copy with no shared piece objects.

use std::fmt;
use std::ops::Index;

use thiserror::Error;

use super::piece::{Cell, Piece, Player};
use super::position::{Position, BOARD_SIZE, CELL_COUNT};

/// Number of rows each side fills in the starting position.
pub const START_ROWS: usize = 3;

/// Errors from reading or setting up a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },

    #[error("square {0} is a light square and cannot hold a piece")]
    LightSquare(Position),

    #[error("square {0} is already occupied")]
    Occupied(Position),
}

/// The playing grid. Occupied cells only ever lie on dark squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Creates the standard opening layout: White men on rows 0-2, Red men
    /// on rows 5-7, twelve per side on the dark squares.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for idx in 0..CELL_COUNT {
            let pos = Position::from_index(idx);
            if !pos.is_playable() {
                continue;
            }
            if pos.row < START_ROWS {
                board.cells[idx] = Cell::Occupied(Piece::man(Player::White));
            } else if pos.row >= BOARD_SIZE - START_ROWS {
                board.cells[idx] = Cell::Occupied(Piece::man(Player::Red));
            }
        }
        board
    }

    /// Returns the contents of the cell at `pos`.
    pub fn cell_at(&self, pos: Position) -> Result<Cell, BoardError> {
        if !pos.in_bounds() {
            return Err(BoardError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(self.cells[pos.index()])
    }

    /// Places a piece for a set-up position.
    pub fn place_piece(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        if !self.cell_at(pos)?.is_empty() {
            return Err(BoardError::Occupied(pos));
        }
        if !pos.is_playable() {
            return Err(BoardError::LightSquare(pos));
        }
        self.cells[pos.index()] = Cell::Occupied(piece);
        Ok(())
    }

    /// Unchecked read for positions already known to be on the board.
    #[inline]
    pub(crate) fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Unchecked write for positions already known to be on the board.
    #[inline]
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Iterates over every occupied cell in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.piece().map(|p| (Position::from_index(idx), p)))
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner == player).count()
    }

    pub fn king_count(&self, player: Player) -> usize {
        self.pieces()
            .filter(|(_, p)| p.owner == player && p.king)
            .count()
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    /// Panics on an out-of-range position.
    fn index(&self, pos: Position) -> &Cell {
        assert!(
            pos.in_bounds(),
            "position ({}, {}) is outside the board",
            pos.row,
            pos.col
        );
        &self.cells[pos.index()]
    }
}

/// Text diagram, row 0 first. Dark squares show `.` when empty, light
/// squares a space.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| {
                    let pos = Position::new(row, col);
                    match self.get(pos) {
                        Cell::Occupied(p) => p.diagram_char(),
                        Cell::Empty if pos.is_playable() => '.',
                        Cell::Empty => ' ',
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_pieces() {
        let board = Board::empty();
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn standard_layout_has_twelve_men_each() {
        let board = Board::standard();
        assert_eq!(board.piece_count(Player::Red), 12);
        assert_eq!(board.piece_count(Player::White), 12);
        assert_eq!(board.king_count(Player::Red), 0);
        assert!(board.pieces().all(|(pos, _)| pos.is_playable()));
        assert!(board.pieces().all(|(pos, p)| match p.owner {
            Player::White => pos.row < 3,
            Player::Red => pos.row > 4,
        }));
    }

    #[test]
    fn cell_at_rejects_out_of_range() {
        let board = Board::standard();
        assert_eq!(
            board.cell_at(Position::new(8, 0)),
            Err(BoardError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            board.cell_at(Position::new(0, 1)),
            Ok(Cell::Occupied(Piece::man(Player::White)))
        );
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn index_panics_out_of_range() {
        let board = Board::empty();
        let _ = board[Position::new(3, 8)];
    }

    #[test]
    fn place_piece_validates() {
        let mut board = Board::empty();
        let red = Piece::man(Player::Red);
        assert!(board.place_piece(Position::new(4, 3), red).is_ok());
        assert_eq!(
            board.place_piece(Position::new(4, 3), red),
            Err(BoardError::Occupied(Position::new(4, 3)))
        );
        assert_eq!(
            board.place_piece(Position::new(4, 4), red),
            Err(BoardError::LightSquare(Position::new(4, 4)))
        );
        assert!(matches!(
            board.place_piece(Position::new(0, 9), red),
            Err(BoardError::OutOfRange { .. })
        ));
    }

    #[test]
    fn diagram_shows_pieces() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], " w w w w");
        assert_eq!(lines[3], ". . . . ");
        assert_eq!(lines[4], " . . . .");
        assert_eq!(lines[7], "r r r r ");
    }
}
