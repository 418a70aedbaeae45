//! draughts -- an English draughts engine speaking a line-oriented protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Searches run on
//! a worker thread; the loop waits on both the input and the pending search
//! so a `stop` can interrupt a running search and a bot reply is applied as
//! soon as it arrives.

use std::io::{self, BufRead, Write};
use std::thread;

use crossbeam_channel::{never, select, unbounded, Receiver};
use tracing_subscriber::EnvFilter;

use draughts::engine::{Engine, SearchOutcome};
use draughts::protocol::{parse_command, Command};

/// Something the main loop woke up for.
enum Event {
    Line(Option<String>),
    Search(Option<SearchOutcome>),
}

/// Runs the main protocol loop.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (line_tx, line_rx) = unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();
    let mut search_rx: Receiver<SearchOutcome> = never();

    loop {
        let event = select! {
            recv(line_rx) -> line => Event::Line(line.ok()),
            recv(search_rx) -> outcome => Event::Search(outcome.ok()),
        };

        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) => {
                let Some(cmd) = parse_command(&line) else { continue };
                if cmd == Command::Quit {
                    break;
                }
                if let Some(rx) = dispatch(&mut engine, cmd, &mut out) {
                    search_rx = rx;
                }
            }
            Event::Search(outcome) => {
                search_rx = never();
                match outcome {
                    Some(outcome) => {
                        engine.finish_search(outcome, &mut out);
                        if let Some(rx) = engine.start_bot_turn() {
                            search_rx = rx;
                        }
                    }
                    None => engine.abandon_search(),
                }
            }
        }
    }

    // Input closed or quit: let a running search finish its current depth.
    if engine.is_searching() {
        engine.stop();
        match search_rx.recv() {
            Ok(outcome) => engine.finish_search(outcome, &mut out),
            Err(_) => engine.abandon_search(),
        }
    }
    let _ = out.flush();
}

/// Executes one command. Returns the receiver of a search it started.
fn dispatch<W: Write>(
    engine: &mut Engine,
    cmd: Command,
    out: &mut W,
) -> Option<Receiver<SearchOutcome>> {
    let result = match cmd {
        Command::Hello => {
            engine.handle_hello(out);
            Ok(None)
        }
        Command::IsReady => {
            engine.handle_isready(out);
            Ok(None)
        }
        Command::SetOption { name, value } => engine
            .set_option(&name, value.as_deref())
            .map(|()| engine.start_bot_turn()),
        Command::NewGame => engine.new_game().map(|()| engine.start_bot_turn()),
        Command::Board => {
            engine.handle_board(out);
            Ok(None)
        }
        Command::Moves => {
            engine.handle_moves(out);
            Ok(None)
        }
        Command::Play { index } => engine.handle_play(index, out),
        Command::Go(params) => engine.start_go(&params).map(Some),
        Command::Stop => {
            engine.stop();
            Ok(None)
        }
        // Handled by the caller.
        Command::Quit => Ok(None),
    };

    match result {
        Ok(rx) => rx,
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}
