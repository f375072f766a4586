//! Parse error diagnostics
//!
//! Turns a raw [`ParseError`] into the message shown to the user.

use crate::error::{Diagnostic, ParseError};
use crate::option::CmdOption;
use crate::parser::help::render_option_table;

/// Build the user-facing diagnostic for a parse failure
///
/// Unknown options get the full option listing, usage line and a help
/// hint. Every other failure is a single sentence.
pub fn format_error(
    error: ParseError,
    options: &[CmdOption],
    command: &str,
    usage: &str,
) -> Diagnostic {
    let message = match &error {
        ParseError::UnknownOption(token) => {
            let mut message = format!("unknown option: {}\n", token);
            if !options.is_empty() {
                message.push_str("\nAvailable options:\n");
                message.push_str(&render_option_table(options));
            }
            message.push_str(&format!("\nUsage: {} {}\n", command, usage));
            message.push_str(&format!("Run '{} --help' for more information.", command));
            message
        }
        ParseError::BoolWithValue { .. }
        | ParseError::MissingValue(_)
        | ParseError::InvalidValue { .. }
        | ParseError::MissingRequired(_) => error.to_string(),
    };

    Diagnostic {
        kind: error,
        message,
    }
}
