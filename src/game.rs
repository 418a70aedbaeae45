//! Game state: board, side to move, and the game-over flag.
//!
//! `Game` is the unit the search operates over. It is `Clone`, and cloning
//! copies the flat board array plus two scalars, so a clone never shares
//! state with the original.

use thiserror::Error;

use crate::board::{Board, Move, Player};
use crate::movegen::{has_legal_move, valid_moves};
use crate::rules::apply_move;

/// Errors from mutating a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Player,
    game_over: bool,
}

impl Game {
    /// Creates a game in the standard starting position with Red to move.
    pub fn new() -> Self {
        Game::from_position(Board::standard(), Player::Red)
    }

    /// Creates a game from an arbitrary set-up position.
    pub fn from_position(board: Board, to_move: Player) -> Self {
        let game_over = !has_legal_move(to_move, &board);
        Game {
            board,
            current: to_move,
            game_over,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// True when the player to move has no legal move.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The side that won, once the game is over.
    pub fn winner(&self) -> Option<Player> {
        self.game_over.then(|| self.current.opponent())
    }

    /// Legal moves for the player to move.
    pub fn valid_moves(&self) -> Vec<Move> {
        valid_moves(self.current, &self.board)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.board.piece_count(player)
    }

    /// Plays `mv` for the player to move.
    ///
    /// Rejects any move that is not in [`Game::valid_moves`] and leaves the
    /// game untouched in that case.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), GameError> {
        if !self.valid_moves().contains(mv) {
            return Err(GameError::IllegalMove(mv.clone()));
        }
        apply_move(&mut self.board, mv);
        self.current = self.current.opponent();
        self.game_over = !has_legal_move(self.current, &self.board);
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
