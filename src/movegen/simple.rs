//! Non-capturing move generation.

use crate::board::{Board, Move, Piece, Position};

use super::directions;

/// Generates the single diagonal steps into empty cells for the piece on `from`.
pub fn simple_moves(from: Position, piece: Piece, board: &Board) -> Vec<Move> {
    directions(piece)
        .iter()
        .filter_map(|&dir| from.step(dir, 1))
        .filter(|&to| board.get(to).is_empty())
        .map(|to| Move::simple(from, to))
        .collect()
}

/// Returns true if the piece on `from` has at least one free diagonal step.
pub fn can_step(from: Position, piece: Piece, board: &Board) -> bool {
    directions(piece)
        .iter()
        .filter_map(|&dir| from.step(dir, 1))
        .any(|to| board.get(to).is_empty())
}
