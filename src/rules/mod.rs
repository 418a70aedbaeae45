//! Move application.
//!
//! Applies a generated move to a board: lifts the moving piece, removes
//! every captured piece, places the piece on its final square, and crowns
//! a man that finishes on its promotion row. Turn order is not touched here;
//! that belongs to [`crate::game::Game`].

use crate::board::{Board, Cell, Move, Piece};

/// Applies `mv` to `board` in one transition.
///
/// The move must come from [`crate::movegen::valid_moves`] for the current
/// board; the moving piece is read from the move's origin square.
pub fn apply_move(board: &mut Board, mv: &Move) {
    let Some(piece) = board.get(mv.from()).piece() else {
        return;
    };

    board.set(mv.from(), Cell::Empty);
    for captured in mv.captured() {
        board.set(captured, Cell::Empty);
    }

    let dest = mv.to();
    board.set(dest, Cell::Occupied(promote(piece, dest.row)));
}

/// Returns the piece as it stands after landing on `row`.
pub fn promote(piece: Piece, row: usize) -> Piece {
    if !piece.king && row == piece.owner.promotion_row() {
        Piece::king(piece.owner)
    } else {
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, Position};
    use crate::movegen::valid_moves;

    #[test]
    fn simple_move_relocates_piece() {
        let mut board = Board::standard();
        let mv = valid_moves(Player::Red, &board).remove(0);
        apply_move(&mut board, &mv);

        assert_eq!(board[mv.from()], Cell::Empty);
        assert_eq!(board[mv.to()], Cell::Occupied(Piece::man(Player::Red)));
        assert_eq!(board.piece_count(Player::Red), 12);
    }

    #[test]
    fn capture_removes_jumped_pieces() {
        let mut board = Board::empty();
        board.place_piece(Position::new(6, 1), Piece::man(Player::Red)).unwrap();
        board.place_piece(Position::new(5, 2), Piece::man(Player::White)).unwrap();
        board.place_piece(Position::new(3, 4), Piece::man(Player::White)).unwrap();

        let mv = valid_moves(Player::Red, &board).remove(0);
        apply_move(&mut board, &mv);

        assert_eq!(board.piece_count(Player::White), 0);
        assert_eq!(board[Position::new(2, 5)], Cell::Occupied(Piece::man(Player::Red)));
        assert_eq!(board[Position::new(6, 1)], Cell::Empty);
    }

    #[test]
    fn reaching_far_row_crowns() {
        let mut board = Board::empty();
        board.place_piece(Position::new(6, 1), Piece::man(Player::White)).unwrap();

        let mv = valid_moves(Player::White, &board).remove(0);
        apply_move(&mut board, &mv);
        assert_eq!(mv.to().row, 7);
        assert_eq!(board[mv.to()], Cell::Occupied(Piece::king(Player::White)));
    }

    #[test]
    fn kings_stay_kings() {
        assert_eq!(promote(Piece::king(Player::Red), 7), Piece::king(Player::Red));
        assert_eq!(promote(Piece::man(Player::Red), 3), Piece::man(Player::Red));
        assert_eq!(promote(Piece::man(Player::Red), 0), Piece::king(Player::Red));
        assert_eq!(promote(Piece::man(Player::White), 0), Piece::man(Player::White));
    }

    #[test]
    fn king_returning_to_origin_keeps_its_square() {
        let mut board = Board::empty();
        board.place_piece(Position::new(1, 4), Piece::king(Player::Red)).unwrap();
        for p in [(2, 3), (4, 3), (4, 5), (2, 5)] {
            board
                .place_piece(Position::new(p.0, p.1), Piece::man(Player::White))
                .unwrap();
        }

        let mv = valid_moves(Player::Red, &board).remove(0);
        apply_move(&mut board, &mv);
        assert_eq!(board.piece_count(Player::White), 0);
        assert_eq!(board[Position::new(1, 4)], Cell::Occupied(Piece::king(Player::Red)));
    }
}
