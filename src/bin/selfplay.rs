//! Self-play match CLI.
//!
//! Plays bot-vs-bot draughts games and writes one JSON summary per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N          Number of games to play (default: 10)
//!   --depth N          Search depth per move (default: 3)
//!   --movetime MS      Search time per move in ms, overrides --depth
//!   --random-plies N   Random opening plies (default: 4)
//!   --max-plies N      Ply cap, reaching it is a draw (default: 200)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use draughts::search::SearchLimit;
use draughts::selfplay::{self, SelfPlayConfig, Tally};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut movetime_ms: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => config.num_games = flag_value(&args, &mut i),
            "--depth" => config.limit = SearchLimit::Depth(flag_value(&args, &mut i)),
            "--movetime" => movetime_ms = Some(flag_value(&args, &mut i)),
            "--random-plies" => config.random_plies = flag_value(&args, &mut i),
            "--max-plies" => config.max_plies = flag_value(&args, &mut i),
            "--threads" => config.threads = flag_value(&args, &mut i),
            "--seed" => config.seed = flag_value(&args, &mut i),
            "--output" => output_path = Some(flag_value(&args, &mut i)),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    if let Some(ms) = movetime_ms {
        config.limit = SearchLimit::MoveTime(Duration::from_millis(ms));
    }
    config.limit = config.limit.clamped();

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, limit {:?}, {} random plies, max {} plies, {} threads",
            config.num_games, config.limit, config.random_plies, config.max_plies, config.threads
        );
    }

    let start = Instant::now();
    let result = match &output_path {
        Some(path) => match File::create(path) {
            Ok(file) => selfplay::run(&config, &mut BufWriter::new(file)),
            Err(e) => {
                eprintln!("failed to create {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let stdout = io::stdout();
            selfplay::run(&config, &mut BufWriter::new(stdout.lock()))
        }
    };

    let games = match result {
        Ok(games) => games,
        Err(e) => {
            eprintln!("self-play failed: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        let tally = Tally::from_games(&games);
        eprintln!(
            "Completed {} games in {:.1}s: red {} / white {} / draws {}",
            games.len(),
            start.elapsed().as_secs_f64(),
            tally.red_wins,
            tally.white_wins,
            tally.draws
        );
        if let Some(path) = output_path {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
    }
}

/// Consumes the value following the flag at `args[*i]`, exiting on a
/// missing or unparseable value.
fn flag_value<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = &args[*i];
    *i += 1;
    let Some(raw) = args.get(*i) else {
        eprintln!("missing value for {}", flag);
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --depth N         Search depth per move (default: 3)");
    eprintln!("  --movetime MS     Search time per move in ms, overrides --depth");
    eprintln!("  --random-plies N  Random opening plies (default: 4)");
    eprintln!("  --max-plies N     Ply cap, reaching it is a draw (default: 200)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
