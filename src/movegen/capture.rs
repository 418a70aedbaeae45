//! Capture chain generation.
//!
//! Follows every jump sequence for one piece depth-first and emits only the
//! maximal chains. The board is never mutated while searching: the moving
//! piece is treated as lifted from its origin square, and captured pieces
//! stay in place until the whole chain is applied, so no piece can be jumped
//! twice and no jump can land on a captured piece.

use crate::board::{Board, Direction, Move, Piece, Position, Step};

use super::directions;

/// Generates all maximal capture chains for the piece standing on `from`.
///
/// Returns an empty vec if the piece has no capture.
pub fn captures_from(from: Position, piece: Piece, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut steps = Vec::new();
    extend_chain(from, from, piece, board, &mut steps, &mut moves);
    moves
}

/// Returns true if the piece on `from` has at least one jump available.
pub fn can_capture(from: Position, piece: Piece, board: &Board) -> bool {
    directions(piece)
        .iter()
        .any(|&dir| jump_target(from, from, dir, piece, board, &[]).is_some())
}

/// Returns the (captured, landing) squares of a jump from `at` along `dir`,
/// if that jump is legal given the captures already made in this chain.
fn jump_target(
    origin: Position,
    at: Position,
    dir: Direction,
    piece: Piece,
    board: &Board,
    taken: &[Step],
) -> Option<(Position, Position)> {
    let over = at.step(dir, 1)?;
    let land = at.step(dir, 2)?;
    if !board.get(over).is_owned_by(piece.owner.opponent()) {
        return None;
    }
    if taken.iter().any(|s| s.captured == Some(over)) {
        return None;
    }
    if land != origin && !board.get(land).is_empty() {
        return None;
    }
    Some((over, land))
}

fn extend_chain(
    origin: Position,
    at: Position,
    piece: Piece,
    board: &Board,
    steps: &mut Vec<Step>,
    out: &mut Vec<Move>,
) {
    // A man crowned mid-chain ends its turn on the crowning square.
    let crowned = !steps.is_empty() && !piece.king && at.row == piece.owner.promotion_row();

    let mut extended = false;
    if !crowned {
        for &dir in directions(piece) {
            let Some((over, land)) = jump_target(origin, at, dir, piece, board, steps) else {
                continue;
            };
            steps.push(Step {
                to: land,
                captured: Some(over),
            });
            extend_chain(origin, land, piece, board, steps, out);
            steps.pop();
            extended = true;
        }
    }

    if !extended && !steps.is_empty() {
        out.push(Move::chain(origin, steps.clone()));
    }
}
