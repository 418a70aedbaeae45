//! Bot-vs-bot match runner.
//!
//! Plays full games with a bot on each side, after a few random opening
//! plies so that games with the same depth do not all repeat the same line.
//! One JSON summary per game is written for offline analysis.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::board::Player;
use crate::game::Game;
use crate::search::{Bot, SearchLimit};

/// Errors from a self-play run.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to serialize game summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search limit used by both sides.
    pub limit: SearchLimit,
    /// Uniformly random plies played before the bots take over.
    pub random_plies: usize,
    /// Ply cap; a game reaching it is recorded as a draw.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            limit: SearchLimit::default(),
            random_plies: 4,
            max_plies: 200,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub index: usize,
    /// `None` when the ply cap was hit.
    pub winner: Option<Player>,
    pub plies: usize,
    pub red_pieces: usize,
    pub white_pieces: usize,
    pub red_kings: usize,
    pub white_kings: usize,
    pub elapsed_ms: u64,
}

fn game_rng(seed: u64, index: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(index as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single game to completion or to the ply cap.
pub fn play_game(config: &SelfPlayConfig, index: usize, rng: &mut SmallRng) -> GameSummary {
    let start = Instant::now();
    let red = Bot::new(Player::Red, config.limit);
    let white = Bot::new(Player::White, config.limit);
    let mut game = Game::new();
    let mut plies = 0;

    while !game.is_game_over() && plies < config.max_plies {
        let mv = if plies < config.random_plies {
            let moves = game.valid_moves();
            if moves.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..moves.len());
            moves.into_iter().nth(pick)
        } else {
            let bot = match game.current_player() {
                Player::Red => &red,
                Player::White => &white,
            };
            bot.best_move(&game)
        };

        let Some(mv) = mv else { break };
        if let Err(e) = game.make_move(&mv) {
            tracing::warn!(index, plies, "self-play move rejected: {}", e);
            break;
        }
        plies += 1;
    }

    let board = game.board();
    GameSummary {
        index,
        winner: game.winner(),
        plies,
        red_pieces: board.piece_count(Player::Red),
        white_pieces: board.piece_count(Player::White),
        red_kings: board.king_count(Player::Red),
        white_kings: board.king_count(Player::White),
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

/// Plays `config.num_games` games on a rayon pool and writes one JSON line
/// per game to `out`, in game order. Returns the summaries.
pub fn run<W: Write>(config: &SelfPlayConfig, out: &mut W) -> Result<Vec<GameSummary>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?;

    let completed = AtomicUsize::new(0);
    let games: Vec<GameSummary> = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let mut rng = game_rng(config.seed, i);
                let summary = play_game(config, i, &mut rng);
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    let outcome = match summary.winner {
                        Some(w) => format!("{} wins", w.name()),
                        None => "draw".to_string(),
                    };
                    eprintln!(
                        "Game {}/{}: {} after {} plies ({:.1}s)",
                        n,
                        config.num_games,
                        outcome,
                        summary.plies,
                        summary.elapsed_ms as f64 / 1000.0,
                    );
                }
                summary
            })
            .collect()
    });

    write_jsonl(&games, out)?;
    Ok(games)
}

/// Writes summaries as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(games: &[GameSummary], out: &mut W) -> Result<(), SelfPlayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Win/draw tally over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub red_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn from_games(games: &[GameSummary]) -> Self {
        games.iter().fold(Tally::default(), |mut t, g| {
            match g.winner {
                Some(Player::Red) => t.red_wins += 1,
                Some(Player::White) => t.white_wins += 1,
                None => t.draws += 1,
            }
            t
        })
    }
}
