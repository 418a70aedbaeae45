//! Position evaluation.
//!
//! Scores a position from one player's perspective by material balance.
//! The search relies on depth rather than evaluation detail.

pub(crate) mod material;

pub use material::{evaluate, material_balance, KING_VALUE, MAN_VALUE};
