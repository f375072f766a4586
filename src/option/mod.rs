//! Option definitions and validation
//!
//! This module holds the declarative option schema of a command and the
//! checks run on it before any parsing happens.

pub mod schema;
pub mod types;

// Re-export main types
pub use schema::*;
pub use types::*;
