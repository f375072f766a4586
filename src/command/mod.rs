//! Commands
//!
//! A command is anything that has a name, a description, help text and
//! can run against the tokens that follow its name on the command line.

pub mod base;

// Re-export main types
pub use base::*;

/// A named command the registry can dispatch to
pub trait Command: Send + Sync {
    /// Name used to select the command
    fn name(&self) -> &str;

    /// One-line summary for the command catalog
    fn description(&self) -> &str;

    /// Full help text shown for `<command> --help`
    fn help(&self) -> &str;

    /// Run with the arguments that followed the command name
    fn run(&self, args: &[String]) -> anyhow::Result<()>;
}
