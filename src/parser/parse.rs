//! Command-line token scanner
//!
//! Binds a validated option set to an argument vector, producing a
//! [`CommandContext`] or a [`ParseError`].

use crate::error::{ParseError, ParseResult};
use crate::option::{CmdOption, OptionType, OptionValue};
use crate::parser::context::CommandContext;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Parse `args` against the declared `options`
///
/// Long names and shorthands write to the same slot. Tokens that do not
/// start with a dash, a lone `-`, and everything after `--` are
/// positional. Parsing is all-or-nothing.
pub fn parse_options<S: AsRef<str>>(
    options: &[CmdOption],
    args: &[S],
) -> ParseResult<CommandContext> {
    let lookup = build_lookup(options);
    let mut values: Vec<OptionValue> = options.iter().map(CmdOption::initial_value).collect();
    let mut supplied: HashSet<usize> = HashSet::new();
    let mut positional = Vec::new();

    let tokens: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        if token == "--" {
            positional.extend(tokens.by_ref().map(str::to_string));
            break;
        }

        let Some(flag_body) = strip_dashes(token) else {
            positional.push(token.to_string());
            continue;
        };

        let (name, inline) = match flag_body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag_body, None),
        };
        let flag = match inline {
            Some(_) => &token[..token.len() - flag_body.len() + name.len()],
            None => token,
        };

        let index = *lookup
            .get(name)
            .ok_or_else(|| ParseError::UnknownOption(token.to_string()))?;
        let option = &options[index];

        let value = match option.value_type {
            OptionType::Bool => {
                if let Some(value) = inline {
                    return Err(ParseError::BoolWithValue {
                        flag: flag.to_string(),
                        value: value.to_string(),
                    });
                }
                // Booleans are pure flags; a literal right after one is a mistake
                if let Some(&next) = tokens.as_slice().first() {
                    if next == "true" || next == "false" {
                        return Err(ParseError::BoolWithValue {
                            flag: flag.to_string(),
                            value: next.to_string(),
                        });
                    }
                }
                OptionValue::Bool(true)
            }
            value_type => {
                let raw = match inline {
                    Some(value) => value,
                    None => tokens
                        .next()
                        .ok_or_else(|| ParseError::MissingValue(flag.to_string()))?,
                };
                value_type
                    .convert(raw)
                    .ok_or_else(|| ParseError::InvalidValue {
                        flag: flag.to_string(),
                        value: raw.to_string(),
                        expected: value_type,
                    })?
            }
        };

        trace!(option = %option.name, %value, "parsed option");
        values[index] = value;
        supplied.insert(index);
    }

    check_required(options, &values, &supplied)?;

    let supplied_names = supplied.iter().map(|&i| options[i].name.clone()).collect();
    let values: HashMap<String, OptionValue> = options
        .iter()
        .map(|o| o.name.clone())
        .zip(values)
        .collect();

    Ok(CommandContext::new(positional, values, supplied_names))
}

/// Map every accepted spelling to the option's index
fn build_lookup(options: &[CmdOption]) -> HashMap<&str, usize> {
    let mut lookup = HashMap::new();
    for (index, option) in options.iter().enumerate() {
        lookup.entry(option.name.as_str()).or_insert(index);
        if let Some(shorthand) = option.shorthand() {
            lookup.entry(shorthand).or_insert(index);
        }
    }
    lookup
}

/// Strip one or two leading dashes, returning `None` for positional tokens
fn strip_dashes(token: &str) -> Option<&str> {
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    // A lone "-" conventionally means stdin
    if body.is_empty() {
        return None;
    }
    Some(body)
}

/// Every required option must be supplied; an empty string does not count
fn check_required(
    options: &[CmdOption],
    values: &[OptionValue],
    supplied: &HashSet<usize>,
) -> ParseResult<()> {
    for (index, option) in options.iter().enumerate() {
        if !option.required {
            continue;
        }
        let provided = supplied.contains(&index)
            && !matches!(&values[index], OptionValue::String(v) if v.is_empty());
        if !provided {
            return Err(ParseError::MissingRequired(option.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_options() -> Vec<CmdOption> {
        vec![
            CmdOption::int("count").short('c').default(10).build(),
            CmdOption::string("name").short('n').build(),
            CmdOption::bool("verbose").short('v').build(),
            CmdOption::int64("size").build(),
            CmdOption::float("ratio").default(0.5).build(),
        ]
    }

    #[test]
    fn test_empty_args_yield_defaults() {
        let ctx = parse_options::<&str>(&sample_options(), &[]).unwrap();
        assert_eq!(ctx.options().len(), 5);
        assert_eq!(ctx.get_int("count"), Some(10));
        assert_eq!(ctx.get_string("name"), Some(""));
        assert_eq!(ctx.get_bool("verbose"), Some(false));
        assert_eq!(ctx.get_int64("size"), Some(0));
        assert_eq!(ctx.get_float("ratio"), Some(0.5));
        assert!(ctx.args().is_empty());
    }

    #[test]
    fn test_count_scenario() {
        let options = vec![CmdOption::int("count").default(10).build()];
        let ctx = parse_options(&options, &["--count", "42", "file.txt"]).unwrap();
        assert_eq!(ctx.get_int("count"), Some(42));
        assert_eq!(ctx.args(), &["file.txt".to_string()]);
        assert!(ctx.is_set("count"));
    }

    #[test]
    fn test_short_and_long_share_storage() {
        let ctx = parse_options(&sample_options(), &["-n", "first", "--name", "second"]).unwrap();
        assert_eq!(ctx.get_string("name"), Some("second"));

        let ctx = parse_options(&sample_options(), &["-c", "3"]).unwrap();
        assert_eq!(ctx.get_int("count"), Some(3));
        assert!(ctx.is_set("count"));
    }

    #[test]
    fn test_single_dash_long_name_and_inline_value() {
        let ctx = parse_options(&sample_options(), &["-count", "7", "--name=rust"]).unwrap();
        assert_eq!(ctx.get_int("count"), Some(7));
        assert_eq!(ctx.get_string("name"), Some("rust"));
    }

    #[test]
    fn test_positional_order_preserved() {
        let ctx = parse_options(
            &sample_options(),
            &["a", "-v", "b", "--count", "1", "c", "-", "--", "--name", "d"],
        )
        .unwrap();
        assert_eq!(ctx.args(), &["a", "b", "c", "-", "--name", "d"]);
        assert_eq!(ctx.get_bool("verbose"), Some(true));
        assert!(!ctx.is_set("name"));
    }

    #[test]
    fn test_unknown_option_anywhere() {
        for args in [
            vec!["--bogus", "--count", "1"],
            vec!["--count", "1", "--bogus", "x"],
            vec!["x", "--count", "1", "-z"],
        ] {
            let err = parse_options(&sample_options(), args.as_slice()).unwrap_err();
            assert!(matches!(err, ParseError::UnknownOption(_)), "args: {:?}", args);
        }

        let err = parse_options(&sample_options(), &["--bogus=1"]).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("--bogus=1".to_string()));
    }

    #[test]
    fn test_bool_flag_with_value() {
        let options = vec![CmdOption::bool("flag").short('f').build()];
        let ctx = parse_options(&options, &["--flag"]).unwrap();
        assert_eq!(ctx.get_bool("flag"), Some(true));

        let err = parse_options(&options, &["--flag", "true"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::BoolWithValue {
                flag: "--flag".to_string(),
                value: "true".to_string(),
            }
        );

        let err = parse_options(&options, &["-f", "false"]).unwrap_err();
        assert!(err.to_string().contains("'-f'"));

        let err = parse_options(&options, &["--flag=false"]).unwrap_err();
        assert!(matches!(err, ParseError::BoolWithValue { .. }));

        // Any other word after a flag is positional
        let ctx = parse_options(&options, &["--flag", "yes"]).unwrap();
        assert_eq!(ctx.args(), &["yes".to_string()]);
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let err = parse_options(&sample_options(), &["--count"]).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("--count".to_string()));

        let err = parse_options(&sample_options(), &["-c", "ten"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue {
                flag: "-c".to_string(),
                value: "ten".to_string(),
                expected: OptionType::Int,
            }
        );

        let err = parse_options(&sample_options(), &["--ratio", "half"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { expected: OptionType::Float, .. }));
    }

    #[test]
    fn test_value_may_start_with_dash() {
        let ctx = parse_options(
            &sample_options(),
            &["--count", "-5", "--size", "-9223372036854775808"],
        )
        .unwrap();
        assert_eq!(ctx.get_int("count"), Some(-5));
        assert_eq!(ctx.get_int64("size"), Some(i64::MIN));
    }

    #[test]
    fn test_required_string() {
        let options = vec![CmdOption::string("name").required().build()];

        let err = parse_options::<&str>(&options, &[]).unwrap_err();
        assert_eq!(err, ParseError::MissingRequired("name".to_string()));
        assert!(err.to_string().contains("name"));

        let err = parse_options(&options, &["--name", ""]).unwrap_err();
        assert_eq!(err, ParseError::MissingRequired("name".to_string()));

        let ctx = parse_options(&options, &["--name", "value"]).unwrap();
        assert_eq!(ctx.get_string("name"), Some("value"));
    }

    #[test]
    fn test_required_zero_int_counts_as_provided() {
        let options = vec![CmdOption::int("level").required().build()];
        let ctx = parse_options(&options, &["--level", "0"]).unwrap();
        assert_eq!(ctx.get_int("level"), Some(0));

        assert!(parse_options::<&str>(&options, &[]).is_err());
    }

    #[test]
    fn test_required_with_default_still_needs_value() {
        let options = vec![CmdOption::string("env").required().default("dev").build()];
        let err = parse_options::<&str>(&options, &[]).unwrap_err();
        assert_eq!(err, ParseError::MissingRequired("env".to_string()));
    }
}
