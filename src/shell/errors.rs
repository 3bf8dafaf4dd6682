//! Shell error types and diagnostics
//!
//! `SyntaxError` and `ShellError` are recovered at the loop: the offending
//! line is reported and discarded. `ReplError` is the only fatal class.
//! The `Display` implementations here are user-visible contracts; changing
//! them changes the console surface.

use std::io;

use thiserror::Error;

/// Tokenizer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The scan ended inside a quoted run. `column` is the 0-based byte
    /// column of the unmatched opening quote.
    #[error("expected single or double quote to be closed")]
    UnterminatedQuote { column: usize },
}

impl SyntaxError {
    /// Renders the two-line diagnostic: the offending line, then a caret
    /// under the opening quote with a `~` fill to end of line.
    pub fn diagnostic(&self, line: &str) -> String {
        let SyntaxError::UnterminatedQuote { column } = *self;

        let mut out = String::with_capacity(line.len() * 2 + 2);
        out.push_str(line);
        out.push('\n');
        for _ in 0..column {
            out.push(' ');
        }
        out.push('^');
        for _ in column + 1..line.len() {
            out.push('~');
        }
        out
    }
}

/// Dispatch rejection. Each variant renders the exact console message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// The first token matched no command name.
    #[error("Unknown instruction '{0}' !")]
    UnknownInstruction(String),

    /// The command requires an open store and the session is closed.
    #[error("error: {command} requires {requirement}")]
    StateRequired {
        command: &'static str,
        requirement: &'static str,
    },

    /// The argument count does not equal the command's arity.
    #[error("error: {command} expected {expected} arguments got {actual}")]
    ArityMismatch {
        command: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Fatal session-loop failures: interrupt-handler installation or console
/// I/O. Everything else is recovered in place.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for the session loop.
pub type ReplResult<T> = Result<T, ReplError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_places_caret_under_opening_quote() {
        let input = "bad 'unterminated";
        let err = SyntaxError::UnterminatedQuote { column: 4 };
        let rendered = err.diagnostic(input);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], input);

        // Marker line is caret-aligned and runs to end of line.
        let marker = lines[1];
        assert_eq!(marker.len(), input.len());
        assert_eq!(&marker[..4], "    ");
        assert_eq!(marker.as_bytes()[4], b'^');
        assert!(marker[5..].bytes().all(|b| b == b'~'));
    }

    #[test]
    fn diagnostic_at_end_of_line_has_no_fill() {
        let err = SyntaxError::UnterminatedQuote { column: 3 };
        let rendered = err.diagnostic("ab \"");

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "   ^");
    }

    #[test]
    fn shell_error_messages_are_exact() {
        assert_eq!(
            ShellError::UnknownInstruction("frobnicate".to_string()).to_string(),
            "Unknown instruction 'frobnicate' !"
        );
        assert_eq!(
            ShellError::StateRequired {
                command: "read",
                requirement: "Opened Database",
            }
            .to_string(),
            "error: read requires Opened Database"
        );
        assert_eq!(
            ShellError::ArityMismatch {
                command: "write",
                expected: 2,
                actual: 1,
            }
            .to_string(),
            "error: write expected 2 arguments got 1"
        );
    }
}
