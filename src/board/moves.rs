//! Move representation.
//!
//! A move is an origin square plus one or more landing steps. A simple move
//! has a single step with no capture; a capture chain has one step per jump,
//! each recording the square of the piece it removes.

use std::fmt;

use super::position::Position;

/// One landing of the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub to: Position,
    pub captured: Option<Position>,
}

/// A complete move for one turn.
///
/// Only the move generator constructs moves; callers select from the
/// generated list and hand the choice back to [`crate::game::Game::make_move`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    from: Position,
    steps: Vec<Step>,
}

impl Move {
    pub(crate) fn simple(from: Position, to: Position) -> Self {
        Move {
            from,
            steps: vec![Step { to, captured: None }],
        }
    }

    pub(crate) fn chain(from: Position, steps: Vec<Step>) -> Self {
        debug_assert!(!steps.is_empty());
        Move { from, steps }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Final landing square of the moving piece.
    pub fn to(&self) -> Position {
        self.steps.last().map_or(self.from, |s| s.to)
    }

    pub fn is_capture(&self) -> bool {
        self.steps.iter().any(|s| s.captured.is_some())
    }

    /// Squares of every piece this move removes, in jump order.
    pub fn captured(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().filter_map(|s| s.captured)
    }
}

/// Renders `c3-d4` for a simple move and `c3xe5xg7` for a capture chain.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for step in &self.steps {
            let sep = if step.captured.is_some() { 'x' } else { '-' };
            write!(f, "{}{}", sep, step.to)?;
        }
        Ok(())
    }
}
