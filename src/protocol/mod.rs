//! Text protocol support.
//!
//! Line-oriented commands from a host (GUI, script, or test harness) to the
//! engine. Responses are written by [`crate::engine::Engine`].

pub mod parser;

pub use parser::{parse_command, Command, GoParams};
