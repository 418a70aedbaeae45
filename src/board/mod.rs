//! Board representation and value types.
//!
//! Contains positions, players, pieces, cells, the board grid, and the
//! move type produced by the generator.

pub mod moves;
pub mod piece;
pub mod position;
pub mod state;

pub use moves::{Move, Step};
pub use piece::{Cell, Piece, Player};
pub use position::{Direction, Position, ALL_DIRECTIONS, BOARD_SIZE, CELL_COUNT};
pub use state::{Board, BoardError, START_ROWS};
