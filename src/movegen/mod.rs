//! Legal move generation.
//!
//! Generates the set of legal moves for a side. Captures are compulsory:
//! when any piece of the side can jump, only maximal capture chains are
//! returned. Otherwise every single diagonal step is returned.
//!
//! Ordering is deterministic. Pieces are visited in row-major order and
//! each piece tries directions in [`ALL_DIRECTIONS`] order.

pub mod capture;
pub mod simple;

use crate::board::{Board, Direction, Move, Piece, Player, ALL_DIRECTIONS};

const RED_MAN_DIRECTIONS: [Direction; 2] = [Direction::UpLeft, Direction::UpRight];
const WHITE_MAN_DIRECTIONS: [Direction; 2] = [Direction::DownLeft, Direction::DownRight];

/// Directions a piece may move and capture in.
pub(crate) fn directions(piece: Piece) -> &'static [Direction] {
    if piece.king {
        return &ALL_DIRECTIONS;
    }
    match piece.owner {
        Player::Red => &RED_MAN_DIRECTIONS,
        Player::White => &WHITE_MAN_DIRECTIONS,
    }
}

/// Generates every legal move for `player` on `board`.
pub fn valid_moves(player: Player, board: &Board) -> Vec<Move> {
    let mut captures = Vec::new();
    for (pos, piece) in board.pieces().filter(|(_, p)| p.owner == player) {
        captures.extend(capture::captures_from(pos, piece, board));
    }
    if !captures.is_empty() {
        return captures;
    }

    let mut moves = Vec::new();
    for (pos, piece) in board.pieces().filter(|(_, p)| p.owner == player) {
        moves.extend(simple::simple_moves(pos, piece, board));
    }
    moves
}

/// Returns true if `player` has any capture available.
pub fn has_capture(player: Player, board: &Board) -> bool {
    board
        .pieces()
        .any(|(pos, p)| p.owner == player && capture::can_capture(pos, p, board))
}

/// Returns true if `player` has at least one legal move, without building
/// the move list.
pub fn has_legal_move(player: Player, board: &Board) -> bool {
    board.pieces().any(|(pos, p)| {
        p.owner == player
            && (simple::can_step(pos, p, board) || capture::can_capture(pos, p, board))
    })
}

impl Board {
    /// Generates every legal move for `player`. See [`valid_moves`].
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        valid_moves(player, self)
    }
}
