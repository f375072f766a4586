//! CLI interface and command dispatch
//!
//! This module holds the command registry, the panic guard around
//! dispatch, and the `cmdkit` binary's front end.

pub mod app;
pub mod manager;
pub mod recover;

// Re-export main types
pub use app::*;
pub use manager::*;
pub use recover::*;
