//! Definitions file types
//!
//! This module defines the data structures that represent a cmdkit.yml
//! definitions file.

use crate::option::OptionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level definitions file structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Definitions {
    /// Commands keyed by name
    #[serde(default)]
    pub commands: BTreeMap<String, CommandDef>,
}

/// A declared command
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDef {
    /// One-line summary for the catalog and help text
    #[serde(default)]
    pub description: String,

    /// Usage string shown after the command name
    #[serde(default)]
    pub usage: String,

    /// Options in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
}

/// A declared option
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDef {
    /// Long name
    pub name: String,

    /// Short flag (single character)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Option type (string, bool, int, int64, float)
    #[serde(rename = "type", default = "default_option_type")]
    pub option_type: OptionType,

    /// Description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required option
    #[serde(default)]
    pub required: bool,

    /// Default value, checked against `type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
}

fn default_option_type() -> OptionType {
    OptionType::String
}
