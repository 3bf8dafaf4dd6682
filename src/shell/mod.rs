//! The interactive command shell
//!
//! Tokenizer, command registry, dispatch gates, session state, and the
//! line-oriented session loop. The tokenizer and the dispatch gates are
//! the core; everything else is glue around the store handle.

mod command;
mod dispatch;
mod errors;
mod repl;
mod session;
mod tokenize;

pub use command::{Command, CommandInfo};
pub use dispatch::{dispatch, Outcome};
pub use errors::{ReplError, ReplResult, ShellError, SyntaxError};
pub use repl::run;
pub use session::Session;
pub use tokenize::tokenize;
