//! The interactive session loop
//!
//! One thread owns the session and the command surface. Input lines and
//! interrupts arrive as events on a single channel: a reader thread feeds
//! stdin lines, and the signal handler's only side effect is a one-shot
//! `Interrupt` event. Session teardown always happens here, never in
//! signal context.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::thread;

use crate::observability::Logger;

use super::dispatch::{dispatch, Outcome};
use super::errors::ReplResult;
use super::session::Session;
use super::tokenize::tokenize;

const PROMPT: &str = ">>> ";

/// An input event delivered to the loop.
enum Event {
    /// One line read from stdin, newline stripped.
    Line(String),
    /// Stdin is exhausted.
    Eof,
    /// The user interrupted the process.
    Interrupt,
}

/// Runs the shell until `exit`, end of input, or interrupt.
pub fn run() -> ReplResult<()> {
    let (events_tx, events) = mpsc::channel();

    install_interrupt_handler(events_tx.clone())?;
    spawn_stdin_reader(events_tx);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "kvshell interactive shell")?;
    writeln!(out, "Type 'help' for more information.")?;

    Logger::info("SHELL_STARTED", &[]);

    let mut session = Session::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        match events.recv() {
            Ok(Event::Line(line)) => {
                if line.is_empty() {
                    continue;
                }
                if !handle_line(&line, &mut session, &mut out)? {
                    Logger::info("SHELL_EXIT", &[]);
                    break;
                }
            }
            Ok(Event::Interrupt) => {
                writeln!(out)?;
                writeln!(out, "User Interrupt")?;
                Logger::info("USER_INTERRUPT", &[]);
                break;
            }
            Ok(Event::Eof) | Err(_) => {
                writeln!(out)?;
                Logger::info("INPUT_CLOSED", &[]);
                break;
            }
        }
    }

    session.release();
    Ok(())
}

/// Tokenizes and dispatches one non-empty line, printing the result.
/// Returns `false` when the loop must terminate.
fn handle_line<W: Write>(line: &str, session: &mut Session, out: &mut W) -> ReplResult<bool> {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(syntax_error) => {
            writeln!(out, "{}", syntax_error.diagnostic(line))?;
            return Ok(true);
        }
    };

    match dispatch(&tokens, session) {
        Ok(Outcome::Output(lines)) => {
            for printed in lines {
                writeln!(out, "{}", printed)?;
            }
        }
        Ok(Outcome::Exit) => return Ok(false),
        Err(shell_error) => writeln!(out, "{}", shell_error)?,
    }

    Ok(true)
}

fn install_interrupt_handler(events: Sender<Event>) -> ReplResult<()> {
    ctrlc::set_handler(move || {
        let _ = events.send(Event::Interrupt);
    })?;
    Ok(())
}

fn spawn_stdin_reader(events: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => Event::Line(line),
                Err(_) => break,
            };
            if events.send(event).is_err() {
                return;
            }
        }
        let _ = events.send(Event::Eof);
    });
}
