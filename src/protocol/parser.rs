//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on. Moves are never parsed from text;
//! `play` selects by index from the current legal-move list.

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
}

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game.
    NewGame,

    /// Print the board diagram and side to move.
    Board,

    /// List the legal moves with their indices.
    Moves,

    /// Play the legal move with the given index.
    Play { index: usize },

    /// Search the current position with optional constraints.
    Go(GoParams),

    /// Interrupt the current search.
    Stop,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "draughts" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "board" => Some(Command::Board),
        "moves" => Some(Command::Moves),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(&tokens),
        "play" => parse_play(&tokens),
        "go" => parse_go(&tokens),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                tracing::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `play <index>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    let Some(raw) = tokens.get(1) else {
        tracing::warn!("malformed play: expected 'play <index>'");
        return None;
    };
    match raw.parse::<usize>() {
        Ok(index) => Some(Command::Play { index }),
        Err(_) => {
            tracing::warn!("invalid move index: '{}'", raw);
            None
        }
    }
}

/// Parses `go [movetime <ms>] [depth <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "movetime" => {
                i += 1;
                if let Some(raw) = tokens.get(i) {
                    match raw.parse::<u64>() {
                        Ok(v) => params.movetime = Some(v),
                        Err(_) => tracing::warn!("invalid movetime value: '{}'", raw),
                    }
                }
            }
            "depth" => {
                i += 1;
                if let Some(raw) = tokens.get(i) {
                    match raw.parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => tracing::warn!("invalid depth value: '{}'", raw),
                    }
                }
            }
            other => {
                tracing::warn!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("draughts"), Some(Command::Hello));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("moves"), Some(Command::Moves));
        assert_eq!(parse_command("stop"), Some(Command::Stop));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name SearchTime value 750").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "SearchTime".to_string(),
                value: Some("750".to_string()),
            }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name BotEnabled").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "BotEnabled".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_play_index() {
        assert_eq!(parse_command("play 4"), Some(Command::Play { index: 4 }));
        assert_eq!(parse_command("play"), None);
        assert_eq!(parse_command("play c3-d4"), None);
    }

    #[test]
    fn parse_go_no_params() {
        assert_eq!(parse_command("go"), Some(Command::Go(GoParams::default())));
    }

    #[test]
    fn parse_go_combined_params() {
        let cmd = parse_command("go movetime 500 depth 6").unwrap();
        assert_eq!(
            cmd,
            Command::Go(GoParams {
                movetime: Some(500),
                depth: Some(6),
            })
        );
    }

    #[test]
    fn parse_go_ignores_bad_values() {
        let cmd = parse_command("go depth deep nodes 5").unwrap();
        assert_eq!(cmd, Command::Go(GoParams::default()));
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  draughts  "), Some(Command::Hello));
        assert_eq!(parse_command("  play 0 "), Some(Command::Play { index: 0 }));
    }
}
