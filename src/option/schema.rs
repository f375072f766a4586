//! Option definition validation
//!
//! Every rule is checked and every violation collected, so a broken
//! definition is reported in one pass.

use crate::error::{DefinitionError, DefinitionResult, DefinitionViolation};
use crate::option::types::CmdOption;
use std::collections::{HashMap, HashSet};

/// Collect all violations in a set of option definitions
pub fn validate_options(options: &[CmdOption]) -> Vec<DefinitionViolation> {
    let mut violations = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut seen_shorthands: HashMap<&str, &str> = HashMap::new();
    let long_names: HashSet<&str> = options.iter().map(|o| o.name.as_str()).collect();

    for (index, option) in options.iter().enumerate() {
        if option.name.is_empty() {
            violations.push(DefinitionViolation::EmptyOptionName(index));
        } else if !seen_names.insert(option.name.as_str()) {
            violations.push(DefinitionViolation::DuplicateOptionName(option.name.clone()));
        }

        if let Some(shorthand) = option.shorthand() {
            violations.extend(validate_shorthand(option, shorthand, &long_names));

            match seen_shorthands.get(shorthand) {
                Some(other) => violations.push(DefinitionViolation::DuplicateShorthand {
                    option: option.name.clone(),
                    shorthand: shorthand.to_string(),
                    other: other.to_string(),
                }),
                None => {
                    seen_shorthands.insert(shorthand, option.name.as_str());
                }
            }
        }

        if let Some(default) = &option.default {
            if default.option_type() != option.value_type {
                violations.push(DefinitionViolation::DefaultTypeMismatch {
                    option: option.name.clone(),
                    expected: option.value_type,
                    found: default.option_type(),
                });
            }
        }
    }

    violations
}

/// Validate option definitions, failing with every violation found
pub fn check_options(options: &[CmdOption]) -> DefinitionResult<()> {
    let violations = validate_options(options);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DefinitionError::new(violations))
    }
}

fn validate_shorthand(
    option: &CmdOption,
    shorthand: &str,
    long_names: &HashSet<&str>,
) -> Vec<DefinitionViolation> {
    let mut violations = Vec::new();
    let mut chars = shorthand.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            if !c.is_ascii_alphanumeric() {
                violations.push(DefinitionViolation::ShorthandCharacter {
                    option: option.name.clone(),
                    shorthand: shorthand.to_string(),
                });
            }
        }
        _ => violations.push(DefinitionViolation::ShorthandLength {
            option: option.name.clone(),
            shorthand: shorthand.to_string(),
        }),
    }

    // Long names and shorthands resolve through one table
    if shorthand != option.name && long_names.contains(shorthand) {
        violations.push(DefinitionViolation::ShorthandShadowsName {
            option: option.name.clone(),
            shorthand: shorthand.to_string(),
        });
    }

    violations
}
