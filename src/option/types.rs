//! Option model
//!
//! This module defines the declarative schema of a command's options and
//! the typed values they produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Type of value an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    #[serde(alias = "integer")]
    Int,
    Int64,
    #[serde(alias = "boolean")]
    Bool,
    Float,
}

impl OptionType {
    /// Value used when an option is neither supplied nor defaulted
    pub fn zero_value(self) -> OptionValue {
        match self {
            OptionType::String => OptionValue::String(String::new()),
            OptionType::Int => OptionValue::Int(0),
            OptionType::Int64 => OptionValue::Int64(0),
            OptionType::Bool => OptionValue::Bool(false),
            OptionType::Float => OptionValue::Float(0.0),
        }
    }

    /// Convert a raw command-line token into a value of this type
    ///
    /// Bool is handled by the parser as a pure flag and never converted
    /// from a token, but accepts the literals for completeness.
    pub fn convert(self, raw: &str) -> Option<OptionValue> {
        match self {
            OptionType::String => Some(OptionValue::String(raw.to_string())),
            OptionType::Int => raw.parse::<i32>().ok().map(OptionValue::Int),
            OptionType::Int64 => raw.parse::<i64>().ok().map(OptionValue::Int64),
            OptionType::Bool => match raw {
                "true" => Some(OptionValue::Bool(true)),
                "false" => Some(OptionValue::Bool(false)),
                _ => None,
            },
            OptionType::Float => raw.parse::<f64>().ok().map(OptionValue::Float),
        }
    }

    /// Whether the option consumes the following token as its value
    pub fn takes_value(self) -> bool {
        !matches!(self, OptionType::Bool)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionType::String => "string",
            OptionType::Int => "int",
            OptionType::Int64 => "int64",
            OptionType::Bool => "bool",
            OptionType::Float => "float",
        };
        f.write_str(name)
    }
}

/// A typed option value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Int(i32),
    Int64(i64),
    Bool(bool),
    Float(f64),
}

impl OptionValue {
    /// The type this value belongs to
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::String(_) => OptionType::String,
            OptionValue::Int(_) => OptionType::Int,
            OptionValue::Int64(_) => OptionType::Int64,
            OptionValue::Bool(_) => OptionType::Bool,
            OptionValue::Float(_) => OptionType::Float,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(v) => f.write_str(v),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Int64(v) => write!(f, "{}", v),
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Rust types that can back an option
pub trait OptionKind: Into<OptionValue> {
    const TYPE: OptionType;
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int64(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl OptionKind for String {
    const TYPE: OptionType = OptionType::String;
}

impl OptionKind for i32 {
    const TYPE: OptionType = OptionType::Int;
}

impl OptionKind for i64 {
    const TYPE: OptionType = OptionType::Int64;
}

impl OptionKind for bool {
    const TYPE: OptionType = OptionType::Bool;
}

impl OptionKind for f64 {
    const TYPE: OptionType = OptionType::Float;
}

/// An option (flag) definition
#[derive(Debug, Clone, PartialEq)]
pub struct CmdOption {
    /// Long name, used as `--name`
    pub(crate) name: String,

    /// Single-character alias, used as `-x` (empty when absent)
    pub(crate) shorthand: String,

    /// Description for help text
    pub(crate) description: String,

    /// Value type
    pub(crate) value_type: OptionType,

    /// Whether the user must supply the option
    pub(crate) required: bool,

    /// Explicit default value
    pub(crate) default: Option<OptionValue>,
}

impl CmdOption {
    /// Start a string option
    pub fn string(name: impl Into<String>) -> OptionBuilder<String> {
        OptionBuilder::new(name)
    }

    /// Start a 32-bit integer option
    pub fn int(name: impl Into<String>) -> OptionBuilder<i32> {
        OptionBuilder::new(name)
    }

    /// Start a 64-bit integer option
    pub fn int64(name: impl Into<String>) -> OptionBuilder<i64> {
        OptionBuilder::new(name)
    }

    /// Start a boolean flag
    pub fn bool(name: impl Into<String>) -> OptionBuilder<bool> {
        OptionBuilder::new(name)
    }

    /// Start a floating point option
    pub fn float(name: impl Into<String>) -> OptionBuilder<f64> {
        OptionBuilder::new(name)
    }

    /// Assemble an option from untyped parts.
    ///
    /// The default is not checked against `value_type` here; the
    /// definition validator reports mismatches.
    pub fn from_parts(
        name: impl Into<String>,
        shorthand: impl Into<String>,
        description: impl Into<String>,
        value_type: OptionType,
        required: bool,
        default: Option<OptionValue>,
    ) -> Self {
        CmdOption {
            name: name.into(),
            shorthand: shorthand.into(),
            description: description.into(),
            value_type,
            required,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shorthand(&self) -> Option<&str> {
        if self.shorthand.is_empty() {
            None
        } else {
            Some(&self.shorthand)
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value_type(&self) -> OptionType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&OptionValue> {
        self.default.as_ref()
    }

    /// Value the option holds when the user does not supply it
    pub fn initial_value(&self) -> OptionValue {
        self.default
            .clone()
            .unwrap_or_else(|| self.value_type.zero_value())
    }

    /// Spelling shown in option tables, e.g. `-c, --count`
    pub fn spelling(&self) -> String {
        match self.shorthand() {
            Some(short) => format!("-{}, --{}", short, self.name),
            None => format!("    --{}", self.name),
        }
    }

    /// Annotation shown after the description in option tables
    ///
    /// String defaults are quoted so empty or blank ones stay visible.
    pub fn annotation(&self) -> Option<String> {
        if self.required {
            return Some("(required)".to_string());
        }
        self.default.as_ref().map(|value| match value {
            OptionValue::String(s) => format!("(default: {:?})", s),
            other => format!("(default: {})", other),
        })
    }
}

/// Typed builder for [`CmdOption`]
///
/// The type parameter fixes the option type, so a default of the wrong
/// type does not compile.
#[derive(Debug, Clone)]
pub struct OptionBuilder<T: OptionKind> {
    option: CmdOption,
    _kind: PhantomData<T>,
}

impl<T: OptionKind> OptionBuilder<T> {
    fn new(name: impl Into<String>) -> Self {
        OptionBuilder {
            option: CmdOption {
                name: name.into(),
                shorthand: String::new(),
                description: String::new(),
                value_type: T::TYPE,
                required: false,
                default: None,
            },
            _kind: PhantomData,
        }
    }

    /// Set the single-character alias
    pub fn short(mut self, shorthand: char) -> Self {
        self.option.shorthand = shorthand.to_string();
        self
    }

    /// Set the help description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.option.description = description.into();
        self
    }

    /// Mark the option as required
    pub fn required(mut self) -> Self {
        self.option.required = true;
        self
    }

    /// Set the default value
    pub fn default(mut self, value: impl Into<T>) -> Self {
        self.option.default = Some(value.into().into());
        self
    }

    pub fn build(self) -> CmdOption {
        self.option
    }
}

impl<T: OptionKind> From<OptionBuilder<T>> for CmdOption {
    fn from(builder: OptionBuilder<T>) -> Self {
        builder.build()
    }
}
