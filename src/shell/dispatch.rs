//! Command dispatch
//!
//! The gates run in order and stop on the first failure: name lookup,
//! open-store precondition, exact arity. Handlers run only with validated
//! arguments and never re-check them. Store failures are reported as
//! output lines in the backend-failure format; they never unwind the
//! loop and never change session state.

use crate::store::Store;

use super::command::Command;
use super::errors::ShellError;
use super::session::Session;

/// Requirement name used in precondition failures.
const OPEN_STORE_REQUIREMENT: &str = "Opened Database";

/// What the loop should do with a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to print on the command surface.
    Output(Vec<String>),
    /// Terminate the loop; the caller releases the session.
    Exit,
}

/// Dispatches one tokenized line against the session.
///
/// `tokens` must be non-empty; the tokenizer guarantees at least one
/// token for any non-empty line.
pub fn dispatch(tokens: &[String], session: &mut Session) -> Result<Outcome, ShellError> {
    let command = Command::lookup(&tokens[0])
        .ok_or_else(|| ShellError::UnknownInstruction(tokens[0].clone()))?;
    let info = command.info();

    if info.requires_store && !session.is_open() {
        return Err(ShellError::StateRequired {
            command: command.name(),
            requirement: OPEN_STORE_REQUIREMENT,
        });
    }

    let args = &tokens[1..];
    if args.len() != info.arity {
        return Err(ShellError::ArityMismatch {
            command: command.name(),
            expected: info.arity,
            actual: args.len(),
        });
    }

    Ok(match command {
        Command::Help => help(),
        Command::Exit => Outcome::Exit,
        Command::Open => open(&args[0], session),
        Command::Close => close(session),
        Command::Read => read(&args[0], open_store(session, command)?),
        Command::Write => write(&args[0], &args[1], open_store(session, command)?),
        Command::Dump => dump(open_store(session, command)?),
    })
}

/// Fetches the open store for a handler. The precondition gate has
/// already passed by the time this runs; the error arm keeps the lookup
/// total without reaching for `unwrap`.
fn open_store(session: &mut Session, command: Command) -> Result<&mut Store, ShellError> {
    session.store_mut().ok_or(ShellError::StateRequired {
        command: command.name(),
        requirement: OPEN_STORE_REQUIREMENT,
    })
}

fn help() -> Outcome {
    let mut lines = Vec::with_capacity(Command::ALL.len() + 5);
    lines.push("Help".to_string());
    lines.push(String::new());
    lines.push("Input format is: <instruction> <args>".to_string());
    lines.push("Example: open ./my-store".to_string());
    lines.push(String::new());
    lines.push(format!(
        "{:<15}{:<20}{:<20}",
        "Instruction", "Arguments", "Description"
    ));
    for command in Command::ALL {
        let info = command.info();
        lines.push(format!(
            "{:<15}{:<20}{:<20}",
            command.name(),
            info.arg_hint,
            info.description
        ));
    }
    Outcome::Output(lines)
}

fn open(path: &str, session: &mut Session) -> Outcome {
    match Store::open_or_create(path) {
        Ok(store) => {
            session.bind(store);
            Outcome::Output(vec!["OK".to_string()])
        }
        // The session is left unchanged on failure.
        Err(e) => Outcome::Output(vec![format!("error: open {} status='{}'", path, e)]),
    }
}

fn close(session: &mut Session) -> Outcome {
    session.release();
    Outcome::Output(vec!["OK".to_string()])
}

fn read(key: &str, store: &Store) -> Outcome {
    match store.get(key.as_bytes()) {
        Ok(value) => Outcome::Output(vec![String::from_utf8_lossy(&value).into_owned()]),
        Err(e) => Outcome::Output(vec![format!("error: read {} status='{}'", key, e)]),
    }
}

fn write(key: &str, value: &str, store: &mut Store) -> Outcome {
    match store.put(key.as_bytes(), value.as_bytes(), true) {
        Ok(()) => Outcome::Output(vec!["OK".to_string()]),
        Err(e) => Outcome::Output(vec![format!(
            "error: write {} {} status='{}'",
            key, value, e
        )]),
    }
}

fn dump(store: &Store) -> Outcome {
    match store.scan() {
        Ok(pairs) => Outcome::Output(
            pairs
                .into_iter()
                .map(|(key, value)| {
                    format!(
                        "{}: {}",
                        String::from_utf8_lossy(&key),
                        String::from_utf8_lossy(&value)
                    )
                })
                .collect(),
        ),
        Err(e) => Outcome::Output(vec![format!("error: dump status='{}'", e)]),
    }
}
