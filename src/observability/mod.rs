//! Observability for the shell
//!
//! Structured JSON event logging. One log line = one event, written
//! synchronously to stderr so the interactive command surface on stdout
//! stays clean.

mod logger;

pub use logger::{Logger, Severity};
