//! Definitions file discovery, parsing and conversion into commands

use crate::command::BaseCommand;
use crate::config::types::{CommandDef, Definitions, OptionDef};
use crate::error::{CmdkitError, ConfigError, ConfigResult};
use crate::option::{CmdOption, OptionType, OptionValue};
use directories::ProjectDirs;
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Definitions file names to search for
const DEFINITION_FILE_NAMES: &[&str] = &["cmdkit.yml", "cmdkit.yaml"];

/// Find a definitions file by searching current and parent directories
pub fn find_definitions_file() -> ConfigResult<PathBuf> {
    find_definitions_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find a definitions file starting from a specific directory
pub fn find_definitions_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in DEFINITION_FILE_NAMES {
            let path = current_dir.join(file_name);
            searched_paths.push(path.display().to_string());

            if path.is_file() {
                return Ok(path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Definitions file in the per-user configuration directory, if present
pub fn user_definitions_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cmdkit")?;
    DEFINITION_FILE_NAMES
        .iter()
        .map(|name| dirs.config_dir().join(name))
        .find(|path| path.is_file())
}

/// Locate definitions: project tree first, then the user directory
pub fn discover_definitions_file() -> Option<PathBuf> {
    match find_definitions_file() {
        Ok(path) => Some(path),
        Err(e) => {
            debug!(error = %e, "no project definitions file");
            user_definitions_file()
        }
    }
}

/// Parse definitions from a string
pub fn parse_definitions(yaml: &str) -> Result<Definitions, CmdkitError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a definitions file from a path
pub fn parse_definitions_file(path: &Path) -> Result<Definitions, CmdkitError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    parse_definitions(&contents)
}

impl Definitions {
    /// Build a validated command for every definition, sorted by name
    pub fn build_commands(&self) -> ConfigResult<Vec<BaseCommand>> {
        self.commands
            .iter()
            .map(|(name, def)| def.build(name))
            .collect()
    }
}

impl CommandDef {
    /// Build the validated command this definition describes
    pub fn build(&self, name: &str) -> ConfigResult<BaseCommand> {
        let options = self
            .options
            .iter()
            .map(OptionDef::to_option)
            .collect::<ConfigResult<Vec<_>>>()?;

        BaseCommand::new(name, &self.description, &self.usage, options).map_err(|error| {
            ConfigError::Command {
                command: name.to_string(),
                error,
            }
        })
    }
}

impl OptionDef {
    /// Convert into an option; the default's type is checked later by
    /// the definition validator
    pub fn to_option(&self) -> ConfigResult<CmdOption> {
        let default = match &self.default {
            None | Some(Value::Null) => None,
            Some(value) => Some(yaml_value(&self.name, value, self.option_type)?),
        };

        Ok(CmdOption::from_parts(
            &self.name,
            self.short.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.option_type,
            self.required,
            default,
        ))
    }
}

/// Convert a YAML scalar by its own type
///
/// Integers become `int` when they fit, unless the option is declared
/// `int64`. A quoted number stays a string.
fn yaml_value(option: &str, value: &Value, declared: OptionType) -> ConfigResult<OptionValue> {
    match value {
        Value::String(s) => Ok(OptionValue::String(s.clone())),
        Value::Bool(b) => Ok(OptionValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if declared == OptionType::Int64 {
                    return Ok(OptionValue::Int64(i));
                }
                Ok(i32::try_from(i)
                    .map(OptionValue::Int)
                    .unwrap_or(OptionValue::Int64(i)))
            } else if n.is_f64() {
                n.as_f64().map(OptionValue::Float).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "option '{}': default {} is not a number",
                        option, n
                    ))
                })
            } else {
                Err(ConfigError::Invalid(format!(
                    "option '{}': default {} is out of range",
                    option, n
                )))
            }
        }
        _ => Err(ConfigError::Invalid(format!(
            "option '{}': default must be a string, number or boolean",
            option
        ))),
    }
}
