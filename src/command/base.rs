//! Reusable parsing and help for commands
//!
//! Concrete commands hold a [`BaseCommand`] and delegate the name,
//! description and help parts of [`Command`] to it.

use crate::command::Command;
use crate::error::{DefinitionError, DefinitionResult, DefinitionViolation, Diagnostic};
use crate::option::{validate_options, CmdOption};
use crate::parser::{format_error, parse_options, render_help, CommandContext};
use std::fmt;
use std::sync::OnceLock;

/// Validated command definition with parsing and help
#[derive(Debug)]
pub struct BaseCommand {
    name: String,
    description: String,
    usage: String,
    options: Vec<CmdOption>,
    help: OnceLock<String>,
}

impl BaseCommand {
    /// Create a command, validating the whole definition
    ///
    /// Fails with every problem found; no command is returned unless the
    /// definition is entirely valid.
    pub fn new<I, O>(
        name: impl Into<String>,
        description: impl Into<String>,
        usage: impl Into<String>,
        options: I,
    ) -> DefinitionResult<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<CmdOption>,
    {
        let name = name.into();
        let description = description.into();
        let usage = usage.into();
        let options: Vec<CmdOption> = options.into_iter().map(Into::into).collect();

        let mut violations = Vec::new();
        if name.is_empty() {
            violations.push(DefinitionViolation::EmptyCommandName);
        }
        if description.is_empty() {
            violations.push(DefinitionViolation::EmptyDescription(name.clone()));
        }
        if usage.is_empty() {
            violations.push(DefinitionViolation::EmptyUsage(name.clone()));
        }
        violations.extend(validate_options(&options));

        if !violations.is_empty() {
            return Err(DefinitionError::new(violations));
        }

        Ok(BaseCommand {
            name,
            description,
            usage,
            options,
            help: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn options(&self) -> &[CmdOption] {
        &self.options
    }

    /// Help text, rendered once on first use
    pub fn help(&self) -> &str {
        self.help.get_or_init(|| {
            render_help(&self.name, &self.description, &self.usage, &self.options)
        })
    }

    /// Parse arguments, formatting any failure for the user
    pub fn parse_options<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<CommandContext, Diagnostic> {
        parse_options(&self.options, args)
            .map_err(|e| format_error(e, &self.options, &self.name, &self.usage))
    }

    /// Attach the logic that runs on a parsed context
    pub fn with_action<F>(self, action: F) -> ActionCommand
    where
        F: Fn(&CommandContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        ActionCommand {
            base: self,
            action: Box::new(action),
        }
    }
}

type Action = Box<dyn Fn(&CommandContext) -> anyhow::Result<()> + Send + Sync>;

/// A [`BaseCommand`] paired with the closure it runs
pub struct ActionCommand {
    base: BaseCommand,
    action: Action,
}

impl ActionCommand {
    pub fn base(&self) -> &BaseCommand {
        &self.base
    }
}

impl fmt::Debug for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCommand")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Command for ActionCommand {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn description(&self) -> &str {
        self.base.description()
    }

    fn help(&self) -> &str {
        self.base.help()
    }

    fn run(&self, args: &[String]) -> anyhow::Result<()> {
        let ctx = self.base.parse_options(args)?;
        (self.action)(&ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn greet() -> BaseCommand {
        BaseCommand::new(
            "greet",
            "Greet someone",
            "[options] <name>",
            [
                CmdOption::string("greeting").short('g').default("Hello"),
                CmdOption::string("name").short('n').required(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_command_fields() {
        let err = BaseCommand::new("", "", "", Vec::<CmdOption>::new()).unwrap_err();
        assert!(err.contains(&DefinitionViolation::EmptyCommandName));
        assert!(err.contains(&DefinitionViolation::EmptyDescription(String::new())));
        assert!(err.contains(&DefinitionViolation::EmptyUsage(String::new())));
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let result = BaseCommand::new(
            "build",
            "Build things",
            "[options]",
            [
                CmdOption::bool("release").short('r'),
                CmdOption::bool("release").short('r'),
            ],
        );
        let err = result.unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn test_help_is_memoized() {
        let cmd = greet();
        let first = cmd.help();
        let second = cmd.help();
        assert!(std::ptr::eq(first, second));
        assert!(first.contains("usage: greet [options] <name>"));
        assert!(first.contains("-g, --greeting"));
        assert!(first.contains("(default: \"Hello\")"));
    }

    #[test]
    fn test_help_concurrent_first_access() {
        let cmd = Arc::new(greet());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cmd = Arc::clone(&cmd);
                std::thread::spawn(move || cmd.help().to_string())
            })
            .collect();
        let texts: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(texts.iter().all(|t| t.as_str() == cmd.help()));
    }

    #[test]
    fn test_parse_options_formats_errors() {
        let cmd = greet();
        let err = cmd.parse_options(&["--nope"]).unwrap_err();
        assert!(matches!(err.kind, ParseError::UnknownOption(_)));
        assert!(err.message.contains("Run 'greet --help'"));

        let ctx = cmd.parse_options(&["-n", "Ferris"]).unwrap();
        assert_eq!(ctx.get_string("greeting"), Some("Hello"));
        assert_eq!(ctx.get_string("name"), Some("Ferris"));
    }

    #[test]
    fn test_action_command_runs_with_context() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let cmd = greet().with_action(move |ctx| {
            assert_eq!(ctx.args(), &["extra".to_string()]);
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        cmd.run(&["--name".to_string(), "x".to_string(), "extra".to_string()])
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cmd.name(), "greet");
    }

    #[test]
    fn test_action_not_called_on_parse_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let cmd = greet().with_action(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let err = cmd.run(&[]).unwrap_err();
        assert!(err.to_string().contains("name"));
        assert!(err.downcast_ref::<Diagnostic>().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
