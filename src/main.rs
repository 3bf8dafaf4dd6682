//! kvshell entry point
//!
//! A minimal entrypoint that hands control to the session loop and maps
//! the single fatal error class to stderr plus a non-zero exit code. All
//! logic lives in the shell module.

use kvshell::shell;

fn main() {
    if let Err(e) = shell::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
