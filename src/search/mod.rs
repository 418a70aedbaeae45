//! Search and move selection.
//!
//! Minimax with alpha-beta pruning over cloned game states, driven by a
//! [`Bot`] that owns the side it plays and its depth or time limit.

pub mod alphabeta;
pub mod bot;

pub use alphabeta::{alpha_beta, minimax_score};
pub use bot::{
    Bot, SearchLimit, SearchResult, DEFAULT_DEPTH, MAX_MOVETIME, MAX_SEARCH_DEPTH, MIN_MOVETIME,
};
