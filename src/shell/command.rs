//! The closed command set and its metadata
//!
//! Lookup is case-sensitive over the literal lowercase names, with no
//! aliases. Metadata is total: every command has exactly one record, and
//! both lookups are exhaustive matches.

/// One of the seven operations the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Open,
    Close,
    Read,
    Write,
    Dump,
}

/// Static metadata for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Human-readable description, shown by `help`.
    pub description: &'static str,
    /// Argument shape shown by `help`; empty for zero-argument commands.
    pub arg_hint: &'static str,
    /// Exact number of arguments. There is no variadic command.
    pub arity: usize,
    /// Whether dispatch requires an open store before the handler runs.
    pub requires_store: bool,
}

impl Command {
    /// Every command, in `help` display order.
    pub const ALL: [Command; 7] = [
        Command::Help,
        Command::Exit,
        Command::Open,
        Command::Close,
        Command::Read,
        Command::Write,
        Command::Dump,
    ];

    /// Resolves a command name.
    pub fn lookup(name: &str) -> Option<Command> {
        match name {
            "help" => Some(Command::Help),
            "exit" => Some(Command::Exit),
            "open" => Some(Command::Open),
            "close" => Some(Command::Close),
            "read" => Some(Command::Read),
            "write" => Some(Command::Write),
            "dump" => Some(Command::Dump),
            _ => None,
        }
    }

    /// The literal command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Open => "open",
            Command::Close => "close",
            Command::Read => "read",
            Command::Write => "write",
            Command::Dump => "dump",
        }
    }

    /// Metadata for this command.
    pub fn info(&self) -> &'static CommandInfo {
        match self {
            Command::Help => &CommandInfo {
                description: "Print this help message",
                arg_hint: "",
                arity: 0,
                requires_store: false,
            },
            Command::Exit => &CommandInfo {
                description: "Exit the shell",
                arg_hint: "",
                arity: 0,
                requires_store: false,
            },
            Command::Open => &CommandInfo {
                description: "Open a store",
                arg_hint: "path",
                arity: 1,
                requires_store: false,
            },
            Command::Close => &CommandInfo {
                description: "Close the store",
                arg_hint: "",
                arity: 0,
                requires_store: true,
            },
            Command::Read => &CommandInfo {
                description: "Read a value from the store",
                arg_hint: "key",
                arity: 1,
                requires_store: true,
            },
            Command::Write => &CommandInfo {
                description: "Write a value to the store",
                arg_hint: "key value",
                arity: 2,
                requires_store: true,
            },
            Command::Dump => &CommandInfo {
                description: "Dump the whole store",
                arg_hint: "",
                arity: 0,
                requires_store: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_every_command_name() {
        for command in Command::ALL {
            assert_eq!(Command::lookup(command.name()), Some(command));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Command::lookup("OPEN"), None);
        assert_eq!(Command::lookup("Help"), None);
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        assert_eq!(Command::lookup("frobnicate"), None);
        assert_eq!(Command::lookup(""), None);
        assert_eq!(Command::lookup("ope"), None);
    }

    #[test]
    fn arity_table_matches_the_command_surface() {
        assert_eq!(Command::Help.info().arity, 0);
        assert_eq!(Command::Exit.info().arity, 0);
        assert_eq!(Command::Open.info().arity, 1);
        assert_eq!(Command::Close.info().arity, 0);
        assert_eq!(Command::Read.info().arity, 1);
        assert_eq!(Command::Write.info().arity, 2);
        assert_eq!(Command::Dump.info().arity, 0);
    }

    #[test]
    fn store_precondition_flags() {
        for command in [Command::Close, Command::Read, Command::Write, Command::Dump] {
            assert!(command.info().requires_store, "{} requires a store", command.name());
        }
        for command in [Command::Help, Command::Exit, Command::Open] {
            assert!(!command.info().requires_store);
        }
    }

    #[test]
    fn all_lists_each_command_once() {
        for command in Command::ALL {
            let count = Command::ALL.iter().filter(|c| **c == command).count();
            assert_eq!(count, 1);
        }
    }
}
