//! Automated player.
//!
//! Wraps the alpha-beta search in iterative deepening. In depth mode the
//! iterations run to the configured depth; in time mode they run until the
//! move-time budget expires. Either way an interrupted iteration is thrown
//! away and the last fully completed depth supplies the move. Depth 1 always
//! completes, so a legal move is returned whenever one exists.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::board::{Move, Player};
use crate::eval::evaluate;
use crate::game::Game;

use super::alphabeta::{alpha_beta_node, SearchContext};

/// Deepest search the bot will run, in plies.
pub const MAX_SEARCH_DEPTH: u32 = 12;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u32 = 3;

/// Shortest accepted move time.
pub const MIN_MOVETIME: Duration = Duration::from_millis(100);

/// Longest accepted move time.
pub const MAX_MOVETIME: Duration = Duration::from_secs(10);

/// How far the bot looks ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimit {
    /// Search exactly this many plies.
    Depth(u32),
    /// Deepen until this much wall-clock time has passed.
    MoveTime(Duration),
}

impl SearchLimit {
    /// Pulls the limit into the accepted range.
    pub fn clamped(self) -> Self {
        match self {
            SearchLimit::Depth(d) => SearchLimit::Depth(d.clamp(1, MAX_SEARCH_DEPTH)),
            SearchLimit::MoveTime(t) => SearchLimit::MoveTime(t.clamp(MIN_MOVETIME, MAX_MOVETIME)),
        }
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        SearchLimit::Depth(DEFAULT_DEPTH)
    }
}

/// Result of a search: the chosen move and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score of the chosen line from the bot's perspective.
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// An automated player for one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bot {
    player: Player,
    limit: SearchLimit,
}

impl Bot {
    /// Creates a bot playing `player`. The limit is clamped.
    pub fn new(player: Player, limit: SearchLimit) -> Self {
        Bot {
            player,
            limit: limit.clamped(),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn limit(&self) -> SearchLimit {
        self.limit
    }

    pub fn set_limit(&mut self, limit: SearchLimit) {
        self.limit = limit.clamped();
    }

    /// Returns the best move for the side to move, scored for this bot, or
    /// `None` when that side has no legal move.
    pub fn best_move(&self, game: &Game) -> Option<Move> {
        self.search(game, &mut io::sink(), &AtomicBool::new(false))
            .best_move
    }

    /// Runs the search, writing one `info` line per completed depth to `out`.
    ///
    /// Raising `stop` ends the search early; the result of the last completed
    /// depth is returned.
    pub fn search<W: Write>(&self, game: &Game, out: &mut W, stop: &AtomicBool) -> SearchResult {
        let start = Instant::now();
        let (max_depth, deadline) = match self.limit {
            SearchLimit::Depth(d) => (d, None),
            SearchLimit::MoveTime(t) => (MAX_SEARCH_DEPTH, Some(start + t)),
        };

        let mut result = SearchResult {
            best_move: None,
            score: evaluate(self.player, game),
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        };
        if game.is_game_over() {
            return result;
        }

        for depth in 1..=max_depth {
            if depth > 1 {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
            }

            let mut ctx = if depth == 1 {
                SearchContext::unbounded(self.player)
            } else {
                SearchContext::bounded(self.player, deadline, stop)
            };
            let (score, best_move) = alpha_beta_node(game, depth, i32::MIN, i32::MAX, &mut ctx);
            result.nodes += ctx.nodes();

            if ctx.aborted() {
                tracing::debug!(depth, nodes = ctx.nodes(), "search iteration abandoned");
                break;
            }

            result.best_move = best_move;
            result.score = score;
            result.depth = depth;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            let pv = result
                .best_move
                .as_ref()
                .map_or_else(|| "none".to_string(), Move::to_string);
            let _ = writeln!(
                out,
                "info depth {} nodes {} score {} time {} pv {}",
                depth, result.nodes, score, elapsed_ms, pv
            );
            tracing::debug!(depth, nodes = result.nodes, score, elapsed_ms, "search iteration complete");

            // Every line ended before the horizon: deeper iterations would
            // repeat the same tree.
            if !ctx.horizon_reached() {
                break;
            }
        }

        result.elapsed = start.elapsed();
        result
    }
}
