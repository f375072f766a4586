//! Error types for cmdkit

use crate::option::OptionType;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cmdkit operations
pub type Result<T> = std::result::Result<T, CmdkitError>;

/// Main error type for cmdkit
#[derive(Error, Debug)]
pub enum CmdkitError {
    /// Invalid command or option definitions
    #[error("{0}")]
    Definition(#[from] DefinitionError),

    /// Formatted option parsing failure
    #[error("{0}")]
    Parse(#[from] Diagnostic),

    /// Command registration errors
    #[error("{0}")]
    Registration(#[from] RegistrationError),

    /// Dispatch to a command name that is not registered
    #[error("{0}")]
    UnknownCommand(#[from] UnknownCommandError),

    /// Definitions file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failure reported by a command's own logic
    #[error(transparent)]
    Command(#[from] anyhow::Error),
}

/// A single problem found while validating a command definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("command name cannot be empty")]
    EmptyCommandName,

    #[error("command '{0}' must have a description")]
    EmptyDescription(String),

    #[error("command '{0}' must have a usage string")]
    EmptyUsage(String),

    #[error("option #{0} has an empty name")]
    EmptyOptionName(usize),

    #[error("option '{0}' is defined more than once")]
    DuplicateOptionName(String),

    #[error("option '{option}': shorthand '{shorthand}' must be exactly one character")]
    ShorthandLength { option: String, shorthand: String },

    #[error("option '{option}': shorthand '{shorthand}' must be an ASCII letter or digit")]
    ShorthandCharacter { option: String, shorthand: String },

    #[error("option '{option}': shorthand '{shorthand}' is already used by option '{other}'")]
    DuplicateShorthand {
        option: String,
        shorthand: String,
        other: String,
    },

    #[error("option '{option}': shorthand '{shorthand}' clashes with the long name of another option")]
    ShorthandShadowsName { option: String, shorthand: String },

    #[error("option '{option}': default value must be of type {expected}, got {found}")]
    DefaultTypeMismatch {
        option: String,
        expected: OptionType,
        found: OptionType,
    },
}

/// All violations found in one command definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    pub violations: Vec<DefinitionViolation>,
}

impl DefinitionError {
    pub fn new(violations: Vec<DefinitionViolation>) -> Self {
        DefinitionError { violations }
    }

    /// Check whether a particular violation was reported
    pub fn contains(&self, violation: &DefinitionViolation) -> bool {
        self.violations.contains(violation)
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid command definition:")?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for DefinitionError {}

/// Low-level option parsing failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("boolean option '{flag}' does not take a value (got '{value}')")]
    BoolWithValue { flag: String, value: String },

    #[error("option '{0}' requires a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for option '{flag}': expected {expected}")]
    InvalidValue {
        flag: String,
        value: String,
        expected: OptionType,
    },

    #[error("option '--{0}' is required but not provided")]
    MissingRequired(String),
}

/// A parse failure rendered for the user
///
/// `message` is the full text shown on stderr; `kind` keeps the
/// underlying failure for callers that need to branch on it.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct Diagnostic {
    pub kind: ParseError,
    pub message: String,
}

/// Command registration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("command name cannot be empty")]
    EmptyName,

    #[error("command '{0}' is already registered")]
    Duplicate(String),
}

/// Requested command does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommandError {
    pub name: String,
    pub program: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command \"{}\" for \"{}\"", self.name, self.program)?;
        if !self.suggestions.is_empty() {
            write!(f, "\n\nDid you mean this?")?;
            for suggestion in &self.suggestions {
                write!(f, "\n\t{}", suggestion)?;
            }
        }
        write!(f, "\n\nRun '{} help' for usage.", self.program)
    }
}

impl std::error::Error for UnknownCommandError {}

/// Definitions file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find definitions file (searched: {0})")]
    NotFound(String),

    #[error("Invalid definitions: {0}")]
    Invalid(String),

    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Command '{command}': {error}")]
    Command {
        command: String,
        error: DefinitionError,
    },
}

/// Specialized result type for definition checks
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;

/// Specialized result type for option parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Specialized result type for definitions file operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_error_lists_every_violation() {
        let err = DefinitionError::new(vec![
            DefinitionViolation::EmptyOptionName(0),
            DefinitionViolation::DuplicateOptionName("count".to_string()),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("invalid command definition:"));
        assert!(text.contains("option #0 has an empty name"));
        assert!(text.contains("option 'count' is defined more than once"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_unknown_command_message() {
        let err = UnknownCommandError {
            name: "buil".to_string(),
            program: "tool".to_string(),
            suggestions: vec!["build".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("unknown command \"buil\" for \"tool\""));
        assert!(text.contains("Did you mean this?\n\tbuild"));
        assert!(text.ends_with("Run 'tool help' for usage."));
    }

    #[test]
    fn test_unknown_command_without_suggestions() {
        let err = UnknownCommandError {
            name: "zzz".to_string(),
            program: "tool".to_string(),
            suggestions: vec![],
        };
        assert!(!err.to_string().contains("Did you mean"));
    }
}
