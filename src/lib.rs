//! cmdkit - declarative option parsing and a command registry
//!
//! Commands declare their options as data: a name, an optional
//! one-character shorthand, a type, whether the option is required and a
//! default. cmdkit validates those declarations, parses command-line
//! tokens into typed values plus positional arguments, and reports
//! failures with messages meant for the person at the terminal.
//!
//! A [`Manager`] holds named commands and dispatches a process's
//! arguments to one of them, with a help catalog and suggestions for
//! mistyped command names.

// Public modules
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod option;
pub mod parser;

// Re-export commonly used types
pub use cli::Manager;
pub use command::{ActionCommand, BaseCommand, Command};
pub use error::{CmdkitError, Result};
pub use option::{CmdOption, OptionType, OptionValue};
pub use parser::CommandContext;

/// Current version of cmdkit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
