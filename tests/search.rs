//! Search properties over positions reached by seeded random play.

use std::io;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use draughts::board::Player;
use draughts::game::Game;
use draughts::search::{alpha_beta, minimax_score, Bot, SearchLimit, MIN_MOVETIME};

/// Plays `plies` random moves from the opening, stopping early at game over.
fn random_position(seed: u64, plies: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..plies {
        let moves = game.valid_moves();
        if moves.is_empty() {
            break;
        }
        let mv = &moves[rng.gen_range(0..moves.len())];
        game.make_move(mv).unwrap();
    }
    game
}

#[test]
fn pruning_never_changes_the_score() {
    for seed in 0..16u64 {
        let game = random_position(seed, 6 + (seed as usize % 20));
        for depth in 1..=4 {
            for bot in [Player::Red, Player::White] {
                let (score, mv) = alpha_beta(&game, depth, bot);
                assert_eq!(
                    score,
                    minimax_score(&game, depth, bot),
                    "seed {seed} depth {depth} bot {bot:?}"
                );
                if let Some(mv) = mv {
                    assert!(game.valid_moves().contains(&mv));
                }
            }
        }
    }
}

#[test]
fn best_move_is_deterministic() {
    for seed in 0..8u64 {
        let game = random_position(seed, 10);
        let player = game.current_player();
        let bot = Bot::new(player, SearchLimit::Depth(4));
        assert_eq!(bot.best_move(&game), bot.best_move(&game), "seed {seed}");
    }
}

#[test]
fn search_leaves_the_game_untouched() {
    let game = random_position(3, 12);
    let before = game.clone();
    let _ = Bot::new(game.current_player(), SearchLimit::Depth(5)).best_move(&game);
    assert_eq!(game, before);
}

#[test]
fn time_mode_respects_its_budget() {
    let game = random_position(5, 8);
    let bot = Bot::new(game.current_player(), SearchLimit::MoveTime(MIN_MOVETIME));
    let result = bot.search(&game, &mut io::sink(), &AtomicBool::new(false));

    let mv = result.best_move.expect("position has moves");
    assert!(game.valid_moves().contains(&mv));
    assert!(result.depth >= 1);
    assert!(result.elapsed < MIN_MOVETIME + Duration::from_secs(2));
}

#[test]
fn completed_depths_agree_with_fixed_depth_search() {
    let game = random_position(11, 14);
    let player = game.current_player();
    let bot = Bot::new(player, SearchLimit::Depth(3));
    let result = bot.search(&game, &mut io::sink(), &AtomicBool::new(false));

    let (score, mv) = alpha_beta(&game, result.depth, player);
    assert_eq!(result.score, score);
    assert_eq!(result.best_move, mv);
}
