//! Argument parsing
//!
//! This module binds option definitions to raw command-line tokens,
//! renders help text and formats parse errors for the user.

pub mod context;
pub mod format;
pub mod help;
pub mod parse;

// Re-export main types
pub use context::*;
pub use format::*;
pub use help::*;
pub use parse::*;
