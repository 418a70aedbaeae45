//! Engine state management.
//!
//! Holds the authoritative game, the bot configuration, and the handle of
//! the background search, if one is running. Searches run on a worker
//! thread and their outcome comes back over a channel; the main loop hands
//! it to [`Engine::finish_search`], which is the only place a bot move is
//! applied. While a search is outstanding, commands that would mutate the
//! game are rejected, so human and bot moves never race.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use thiserror::Error;

use crate::board::{Move, Player};
use crate::game::{Game, GameError};
use crate::protocol::GoParams;
use crate::search::{
    Bot, SearchLimit, SearchResult, DEFAULT_DEPTH, MAX_MOVETIME, MAX_SEARCH_DEPTH, MIN_MOVETIME,
};

/// Errors reported back to the protocol host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOptionValue { name: String, value: String },

    #[error("no move with index {index} ({count} legal moves)")]
    NoSuchMove { index: usize, count: usize },

    #[error("a search is already running")]
    SearchInProgress,

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Bot settings adjustable between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    /// Whether the bot replies automatically after each human move.
    pub enabled: bool,
    pub player: Player,
    pub limit: SearchLimit,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            enabled: false,
            player: Player::White,
            limit: SearchLimit::Depth(DEFAULT_DEPTH),
        }
    }
}

impl BotConfig {
    pub fn bot(&self) -> Bot {
        Bot::new(self.player, self.limit)
    }
}

/// Why a search was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPurpose {
    /// `go`: report the best move without playing it.
    Analysis,
    /// The bot's own turn: play the move when it arrives.
    BotTurn,
}

/// A finished background search.
#[derive(Debug)]
pub struct SearchOutcome {
    pub purpose: SearchPurpose,
    pub result: SearchResult,
    /// `info` lines written during the search.
    pub info: Vec<u8>,
}

/// Bookkeeping for the search currently running on the worker thread.
struct PendingSearch {
    stop: Arc<AtomicBool>,
    root: Game,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Game,
    pub bot: BotConfig,
    pending: Option<PendingSearch>,
}

impl Engine {
    /// Creates an engine with a fresh game and the bot disabled.
    pub fn new() -> Self {
        Engine {
            game: Game::new(),
            bot: BotConfig::default(),
            pending: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the game with a fresh one.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.game = Game::new();
        Ok(())
    }

    /// Sets an engine option. Numeric limits are clamped to the accepted range.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        let raw = value.unwrap_or("");
        let invalid = || EngineError::InvalidOptionValue {
            name: name.to_string(),
            value: raw.to_string(),
        };

        match name {
            "BotEnabled" => {
                self.bot.enabled = match raw {
                    "" | "true" | "on" => true,
                    "false" | "off" => false,
                    _ => return Err(invalid()),
                };
            }
            "BotPlayer" => {
                self.bot.player = Player::from_name(raw).ok_or_else(invalid)?;
            }
            "Depth" => {
                let depth = raw.parse::<u32>().map_err(|_| invalid())?;
                self.bot.limit = SearchLimit::Depth(depth).clamped();
            }
            "SearchTime" => {
                let ms = raw.parse::<u64>().map_err(|_| invalid())?;
                self.bot.limit = SearchLimit::MoveTime(Duration::from_millis(ms)).clamped();
            }
            _ => return Err(EngineError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Handles the handshake: writes id, options, protocol_version, and draughtsok.
    pub fn handle_hello<W: Write>(&self, out: &mut W) {
        let _ = writeln!(out, "id name draughts");
        let _ = writeln!(out, "id author draughts");
        let _ = writeln!(out, "option name BotEnabled type check default false");
        let _ = writeln!(out, "option name BotPlayer type combo default white var red var white");
        let _ = writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_SEARCH_DEPTH
        );
        let _ = writeln!(
            out,
            "option name SearchTime type spin default 1000 min {} max {}",
            MIN_MOVETIME.as_millis(),
            MAX_MOVETIME.as_millis()
        );
        let _ = writeln!(out, "protocol_version 1");
        let _ = writeln!(out, "draughtsok");
        let _ = out.flush();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        let _ = writeln!(out, "readyok");
        let _ = out.flush();
    }

    /// Writes the board diagram and the side to move.
    pub fn handle_board<W: Write>(&self, out: &mut W) {
        let _ = write!(out, "{}", self.game.board());
        let _ = writeln!(out, "turn {}", self.game.current_player().name());
        let _ = out.flush();
    }

    /// Lists the legal moves with the indices `play` accepts.
    pub fn handle_moves<W: Write>(&self, out: &mut W) {
        let moves = self.game.valid_moves();
        for (i, mv) in moves.iter().enumerate() {
            let _ = writeln!(out, "move {} {}", i, mv);
        }
        let _ = writeln!(out, "moves {}", moves.len());
        let _ = out.flush();
    }

    /// Plays the legal move with the given index for the side to move.
    ///
    /// Returns the receiver of the bot's reply search when the bot is
    /// enabled and now on move.
    pub fn handle_play<W: Write>(
        &mut self,
        index: usize,
        out: &mut W,
    ) -> Result<Option<Receiver<SearchOutcome>>, EngineError> {
        self.ensure_idle()?;
        if self.game.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let moves = self.game.valid_moves();
        let mv = moves.get(index).ok_or(EngineError::NoSuchMove {
            index,
            count: moves.len(),
        })?;
        self.game.make_move(mv)?;

        let _ = writeln!(out, "played {}", mv);
        self.report_game_over(out);
        let _ = out.flush();
        Ok(self.start_bot_turn())
    }

    /// Starts the bot's search if the bot is enabled and on move.
    pub fn start_bot_turn(&mut self) -> Option<Receiver<SearchOutcome>> {
        if !self.bot.enabled
            || self.pending.is_some()
            || self.game.is_game_over()
            || self.game.current_player() != self.bot.player
        {
            return None;
        }
        Some(self.spawn_search(self.bot.bot(), SearchPurpose::BotTurn))
    }

    /// Starts a background analysis search for the side to move.
    pub fn start_go(&mut self, params: &GoParams) -> Result<Receiver<SearchOutcome>, EngineError> {
        self.ensure_idle()?;
        let bot = Bot::new(self.game.current_player(), self.limit_for(params));
        Ok(self.spawn_search(bot, SearchPurpose::Analysis))
    }

    /// Asks the running search to stop at its next check.
    pub fn stop(&self) {
        if let Some(pending) = &self.pending {
            pending.stop.store(true, Ordering::Relaxed);
        }
    }

    /// Forgets a search whose worker went away without reporting.
    pub fn abandon_search(&mut self) {
        if self.pending.take().is_some() {
            tracing::warn!("search worker exited without a result");
        }
    }

    /// Consumes a finished search: reports an analysis result, or plays the
    /// bot's move on its turn.
    pub fn finish_search<W: Write>(&mut self, outcome: SearchOutcome, out: &mut W) {
        let Some(pending) = self.pending.take() else {
            tracing::warn!("search result arrived with no search pending");
            return;
        };
        let _ = out.write_all(&outcome.info);

        if pending.root != self.game {
            tracing::warn!("discarding search result for a stale position");
            return;
        }

        match outcome.purpose {
            SearchPurpose::Analysis => {
                self.report_bestmove(outcome.result.best_move.as_ref(), out);
            }
            SearchPurpose::BotTurn => {
                match outcome.result.best_move {
                    Some(mv) => match self.game.make_move(&mv) {
                        Ok(()) => {
                            let _ = writeln!(out, "botmove {}", mv);
                            self.report_game_over(out);
                        }
                        Err(e) => tracing::warn!("bot move rejected: {}", e),
                    },
                    None => tracing::debug!("bot has no legal move"),
                }
                let _ = out.flush();
            }
        }
    }

    fn spawn_search(&mut self, bot: Bot, purpose: SearchPurpose) -> Receiver<SearchOutcome> {
        let stop = Arc::new(AtomicBool::new(false));
        let root = self.game.clone();
        let (tx, rx) = bounded(1);

        tracing::debug!(?purpose, player = ?bot.player(), limit = ?bot.limit(), "search started");
        let worker_stop = Arc::clone(&stop);
        let worker_game = root.clone();
        thread::spawn(move || {
            let mut info = Vec::new();
            let result = bot.search(&worker_game, &mut info, &worker_stop);
            let _ = tx.send(SearchOutcome {
                purpose,
                result,
                info,
            });
        });

        self.pending = Some(PendingSearch { stop, root });
        rx
    }

    fn limit_for(&self, params: &GoParams) -> SearchLimit {
        match (params.depth, params.movetime) {
            (Some(d), _) => SearchLimit::Depth(d),
            (None, Some(ms)) => SearchLimit::MoveTime(Duration::from_millis(ms)),
            (None, None) => self.bot.limit,
        }
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::SearchInProgress);
        }
        Ok(())
    }

    fn report_bestmove<W: Write>(&self, mv: Option<&Move>, out: &mut W) {
        let index = mv.and_then(|mv| self.game.valid_moves().iter().position(|m| m == mv));
        match (mv, index) {
            (Some(mv), Some(i)) => {
                let _ = writeln!(out, "bestmove {} {}", i, mv);
            }
            _ => {
                let _ = writeln!(out, "bestmove none");
            }
        }
        let _ = out.flush();
    }

    fn report_game_over<W: Write>(&self, out: &mut W) {
        if let Some(winner) = self.game.winner() {
            let _ = writeln!(out, "gameover winner {}", winner.name());
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Piece, Position};
    use std::io;

    fn output_of(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_fresh_game() {
        let engine = Engine::new();
        assert_eq!(engine.game, Game::new());
        assert!(!engine.bot.enabled);
        assert!(!engine.is_searching());
    }

    #[test]
    fn set_option_updates_bot_config() {
        let mut engine = Engine::new();
        engine.set_option("BotEnabled", Some("true")).unwrap();
        engine.set_option("BotPlayer", Some("red")).unwrap();
        engine.set_option("Depth", Some("5")).unwrap();
        assert!(engine.bot.enabled);
        assert_eq!(engine.bot.player, Player::Red);
        assert_eq!(engine.bot.limit, SearchLimit::Depth(5));

        engine.set_option("SearchTime", Some("20")).unwrap();
        assert_eq!(engine.bot.limit, SearchLimit::MoveTime(MIN_MOVETIME));
        engine.set_option("SearchTime", Some("999999")).unwrap();
        assert_eq!(engine.bot.limit, SearchLimit::MoveTime(MAX_MOVETIME));
    }

    #[test]
    fn set_option_rejects_bad_input() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.set_option("Threads", Some("4")),
            Err(EngineError::UnknownOption("Threads".to_string()))
        );
        assert!(matches!(
            engine.set_option("Depth", Some("deep")),
            Err(EngineError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            engine.set_option("BotPlayer", Some("black")),
            Err(EngineError::InvalidOptionValue { .. })
        ));
        assert_eq!(engine.bot, BotConfig::default());
    }

    #[test]
    fn hello_outputs_handshake() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_hello(out));
        assert!(text.contains("id name draughts"));
        assert!(text.contains("protocol_version 1"));
        assert!(text.trim_end().ends_with("draughtsok"));
    }

    #[test]
    fn moves_lists_indices() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_moves(out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "move 0 a3-b4");
        assert_eq!(lines.last(), Some(&"moves 7"));
    }

    #[test]
    fn play_applies_move_by_index() {
        let mut engine = Engine::new();
        let mut out = Vec::new();
        let reply = engine.handle_play(0, &mut out).unwrap();
        assert!(reply.is_none());
        assert_eq!(engine.game.current_player(), Player::White);
        assert_eq!(String::from_utf8(out).unwrap(), "played a3-b4\n");
    }

    #[test]
    fn play_rejects_bad_index() {
        let mut engine = Engine::new();
        let err = engine.handle_play(7, &mut io::sink()).unwrap_err();
        assert_eq!(err, EngineError::NoSuchMove { index: 7, count: 7 });
        assert_eq!(engine.game, Game::new());
    }

    #[test]
    fn bot_replies_after_human_move() {
        let mut engine = Engine::new();
        engine.set_option("BotEnabled", Some("true")).unwrap();
        engine.set_option("Depth", Some("2")).unwrap();

        let rx = engine.handle_play(0, &mut io::sink()).unwrap().unwrap();
        assert!(engine.is_searching());
        assert_eq!(
            engine.handle_play(0, &mut io::sink()).unwrap_err(),
            EngineError::SearchInProgress
        );

        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.purpose, SearchPurpose::BotTurn);
        let text = output_of(|out| engine.finish_search(outcome, out));
        assert!(text.contains("botmove "));
        assert!(!engine.is_searching());
        assert_eq!(engine.game.current_player(), Player::Red);
    }

    #[test]
    fn background_go_reports_without_playing() {
        let mut engine = Engine::new();
        let params = GoParams {
            depth: Some(3),
            movetime: None,
        };
        let rx = engine.start_go(&params).unwrap();
        assert!(matches!(engine.start_go(&params), Err(EngineError::SearchInProgress)));

        let outcome = rx.recv().unwrap();
        let text = output_of(|out| engine.finish_search(outcome, out));
        assert!(text.lines().any(|l| l.starts_with("info depth 2 ")));
        assert!(text.lines().any(|l| l.starts_with("info depth 3 ")));
        let best = text.lines().last().unwrap();
        assert!(best.starts_with("bestmove "), "{}", best);
        assert_ne!(best, "bestmove none");
        // Analysis never plays the move.
        assert_eq!(engine.game, Game::new());
        assert!(!engine.is_searching());
    }

    #[test]
    fn abandoned_search_unblocks_the_game() {
        let mut engine = Engine::new();
        let params = GoParams {
            depth: Some(2),
            movetime: None,
        };
        let rx = engine.start_go(&params).unwrap();
        drop(rx);
        assert_eq!(engine.new_game(), Err(EngineError::SearchInProgress));

        engine.abandon_search();
        assert!(!engine.is_searching());
        engine.new_game().unwrap();
        let text = output_of(|out| {
            engine.handle_play(0, out).unwrap();
        });
        assert_eq!(text, "played a3-b4\n");

        // Nothing pending: a second call is a no-op.
        engine.abandon_search();
        assert!(!engine.is_searching());
    }

    #[test]
    fn stop_still_yields_a_move() {
        let mut engine = Engine::new();
        let params = GoParams {
            depth: Some(12),
            movetime: None,
        };
        let rx = engine.start_go(&params).unwrap();
        engine.stop();
        let outcome = rx.recv().unwrap();
        assert!(outcome.result.best_move.is_some());
        assert!(outcome.result.depth >= 1);
    }

    #[test]
    fn finishing_the_game_reports_winner() {
        let mut board = Board::empty();
        board.place_piece(Position::new(5, 2), Piece::man(Player::Red)).unwrap();
        board.place_piece(Position::new(4, 3), Piece::man(Player::White)).unwrap();
        let mut engine = Engine::new();
        engine.game = Game::from_position(board, Player::Red);

        let text = output_of(|out| {
            engine.handle_play(0, out).unwrap();
        });
        assert_eq!(text, "played c3xe5\ngameover winner red\n");
        assert_eq!(
            engine.handle_play(0, &mut io::sink()).unwrap_err(),
            EngineError::GameOver
        );
    }
}
