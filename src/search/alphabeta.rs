//! Minimax with alpha-beta pruning.
//!
//! Every node works on its own clone of the game, so the caller's state is
//! never touched. Turn alternation comes from [`Game::make_move`]: a node
//! maximizes when the bot is to move and minimizes otherwise, regardless of
//! depth parity.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::board::{Move, Player};
use crate::eval::evaluate;
use crate::game::Game;

/// Mutable state shared by every node of one search iteration.
pub(crate) struct SearchContext<'a> {
    bot: Player,
    nodes: u64,
    deadline: Option<Instant>,
    stop: Option<&'a AtomicBool>,
    aborted: bool,
    horizon_reached: bool,
}

impl<'a> SearchContext<'a> {
    /// A context that runs to completion.
    pub(crate) fn unbounded(bot: Player) -> Self {
        SearchContext {
            bot,
            nodes: 0,
            deadline: None,
            stop: None,
            aborted: false,
            horizon_reached: false,
        }
    }

    /// A context that gives up once `deadline` passes or `stop` is raised.
    pub(crate) fn bounded(bot: Player, deadline: Option<Instant>, stop: &'a AtomicBool) -> Self {
        SearchContext {
            deadline,
            stop: Some(stop),
            ..SearchContext::unbounded(bot)
        }
    }

    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    /// True if the iteration was cut short; its result must be discarded.
    pub(crate) fn aborted(&self) -> bool {
        self.aborted
    }

    /// True if some line was cut off by the depth limit rather than by the
    /// end of the game.
    pub(crate) fn horizon_reached(&self) -> bool {
        self.horizon_reached
    }

    /// Polls the clock and stop flag every 64 nodes.
    fn check_abort(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.nodes & 63 != 0 {
            return false;
        }
        let stopped = self.stop.is_some_and(|s| s.load(Ordering::Relaxed));
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if stopped || expired {
            self.aborted = true;
        }
        self.aborted
    }
}

/// Searches `game` to `depth` plies and returns the score for `bot` together
/// with the first move achieving it, or `None` at a terminal position.
pub fn alpha_beta(game: &Game, depth: u32, bot: Player) -> (i32, Option<Move>) {
    let mut ctx = SearchContext::unbounded(bot);
    alpha_beta_node(game, depth, i32::MIN, i32::MAX, &mut ctx)
}

pub(crate) fn alpha_beta_node(
    game: &Game,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    if ctx.check_abort() {
        return (evaluate(ctx.bot, game), None);
    }
    ctx.nodes += 1;

    if game.is_game_over() {
        return (evaluate(ctx.bot, game), None);
    }
    if depth == 0 {
        ctx.horizon_reached = true;
        return (evaluate(ctx.bot, game), None);
    }

    let moves = game.valid_moves();
    if moves.is_empty() {
        return (evaluate(ctx.bot, game), None);
    }

    let maximizing = game.current_player() == ctx.bot;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in moves {
        let mut child = game.clone();
        if child.make_move(&mv).is_err() {
            continue;
        }
        let (score, _) = alpha_beta_node(&child, depth - 1, alpha, beta, ctx);
        if ctx.aborted {
            break;
        }

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }

        if beta <= alpha {
            break;
        }
    }

    (best_score, best_move)
}

/// Plain minimax without pruning. Visits every node to `depth`; used to
/// check that pruning never changes a score.
pub fn minimax_score(game: &Game, depth: u32, bot: Player) -> i32 {
    if depth == 0 || game.is_game_over() {
        return evaluate(bot, game);
    }
    let moves = game.valid_moves();
    if moves.is_empty() {
        return evaluate(bot, game);
    }

    let scores = moves.iter().filter_map(|mv| {
        let mut child = game.clone();
        child.make_move(mv).ok()?;
        Some(minimax_score(&child, depth - 1, bot))
    });

    if game.current_player() == bot {
        scores.max().unwrap_or_else(|| evaluate(bot, game))
    } else {
        scores.min().unwrap_or_else(|| evaluate(bot, game))
    }
}
