//! English draughts engine library.
//!
//! Exposes the board representation, move generation, game rules, search,
//! and protocol modules for use by integration tests and the binaries.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod selfplay;
