//! Parsed invocation of a command
//!
//! The context holds the typed option values and positional arguments of
//! one call to the parser.

use crate::option::OptionValue;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Typed options plus positional arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandContext {
    /// Positional arguments in the order given
    args: Vec<String>,

    /// Value of every declared option, keyed by long name
    #[serde(serialize_with = "serialize_sorted")]
    options: HashMap<String, OptionValue>,

    /// Options the user supplied explicitly
    #[serde(skip)]
    supplied: HashSet<String>,
}

impl CommandContext {
    pub(crate) fn new(
        args: Vec<String>,
        options: HashMap<String, OptionValue>,
        supplied: HashSet<String>,
    ) -> Self {
        CommandContext {
            args,
            options,
            supplied,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn options(&self) -> &HashMap<String, OptionValue> {
        &self.options
    }

    /// Get the raw value of an option
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Whether the option appeared on the command line
    pub fn is_set(&self, name: &str) -> bool {
        self.supplied.contains(name)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.options.get(name)? {
            OptionValue::String(v) => Some(v),
            OptionValue::Int(_)
            | OptionValue::Int64(_)
            | OptionValue::Bool(_)
            | OptionValue::Float(_) => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        match self.options.get(name)? {
            OptionValue::Int(v) => Some(*v),
            OptionValue::String(_)
            | OptionValue::Int64(_)
            | OptionValue::Bool(_)
            | OptionValue::Float(_) => None,
        }
    }

    pub fn get_int64(&self, name: &str) -> Option<i64> {
        match self.options.get(name)? {
            OptionValue::Int64(v) => Some(*v),
            OptionValue::String(_)
            | OptionValue::Int(_)
            | OptionValue::Bool(_)
            | OptionValue::Float(_) => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.options.get(name)? {
            OptionValue::Bool(v) => Some(*v),
            OptionValue::String(_)
            | OptionValue::Int(_)
            | OptionValue::Int64(_)
            | OptionValue::Float(_) => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.options.get(name)? {
            OptionValue::Float(v) => Some(*v),
            OptionValue::String(_)
            | OptionValue::Int(_)
            | OptionValue::Int64(_)
            | OptionValue::Bool(_) => None,
        }
    }
}

fn serialize_sorted<S>(options: &HashMap<String, OptionValue>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let sorted: BTreeMap<&String, &OptionValue> = options.iter().collect();
    sorted.serialize(serializer)
}
