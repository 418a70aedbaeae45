//! Material counting.

use crate::board::{Board, Player};
use crate::game::Game;

/// Value of an uncrowned piece.
pub const MAN_VALUE: i32 = 1;

/// Value of a king.
pub const KING_VALUE: i32 = 2;

/// Scores `game` for `player`: own material minus the opponent's.
pub fn evaluate(player: Player, game: &Game) -> i32 {
    material_balance(player, game.board())
}

/// Sums piece values over the board, positive for `player`'s pieces and
/// negative for the opponent's.
pub fn material_balance(player: Player, board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = if piece.king { KING_VALUE } else { MAN_VALUE };
            if piece.owner == player {
                value
            } else {
                -value
            }
        })
        .sum()
}
