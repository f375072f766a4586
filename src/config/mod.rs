//! Command definitions files
//!
//! This module handles discovery and parsing of cmdkit.yml files, which
//! declare commands and their options without writing Rust code.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
