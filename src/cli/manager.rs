//! Command registry and top-level dispatch

use crate::command::Command;
use crate::error::{CmdkitError, Diagnostic, RegistrationError, Result, UnknownCommandError};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Named commands plus the dispatch logic over them
///
/// Safe to share between threads. Names are write-once; the only way to
/// remove a command is [`Manager::clear`].
pub struct Manager {
    /// Program name used in usage lines and hints
    program: String,

    /// Optional summary printed above the command catalog
    about: Option<String>,

    /// Registered commands keyed by name
    commands: RwLock<HashMap<String, Arc<dyn Command>>>,
}

impl Manager {
    /// Create an empty registry
    pub fn new(program: impl Into<String>) -> Self {
        Manager {
            program: program.into(),
            about: None,
            commands: RwLock::new(HashMap::new()),
        }
    }

    /// Set the summary shown above the command catalog
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Add a command under its own name
    pub fn register(
        &self,
        command: Arc<dyn Command>,
    ) -> std::result::Result<(), RegistrationError> {
        let name = command.name().to_string();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        let mut commands = self.write();
        if commands.contains_key(&name) {
            return Err(RegistrationError::Duplicate(name));
        }
        commands.insert(name.clone(), command);
        drop(commands);

        debug!(command = %name, "registered command");
        Ok(())
    }

    /// Look up a command by name
    pub fn get_command(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.read().get(name).cloned()
    }

    /// Snapshot of all registered commands
    pub fn get_commands(&self) -> HashMap<String, Arc<dyn Command>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every registered command
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Names similar to `typed`, sorted
    ///
    /// A name is similar when one contains the other, ignoring case.
    pub fn suggestions(&self, typed: &str) -> Vec<String> {
        let typed = typed.to_lowercase();
        if typed.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<String> = self
            .read()
            .keys()
            .filter(|name| {
                let candidate = name.to_lowercase();
                candidate.contains(&typed) || typed.contains(&candidate)
            })
            .cloned()
            .collect();
        found.sort();
        found
    }

    /// Render the sorted command catalog
    pub fn render_catalog(&self) -> String {
        let mut entries: Vec<(String, String)> = self
            .read()
            .values()
            .map(|cmd| (cmd.name().to_string(), cmd.description().to_string()))
            .collect();
        entries.sort();

        let mut out = String::new();
        if let Some(about) = &self.about {
            out.push_str(about);
            out.push_str("\n\n");
        }
        out.push_str("Usage:\n");
        out.push_str(&format!("  {} <command> [arguments]\n\n", self.program));

        if entries.is_empty() {
            out.push_str("No commands registered.\n");
            return out;
        }

        let width = entries.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        out.push_str("Available commands:\n");
        for (name, description) in &entries {
            let line = format!("  {:<width$}    {}", name, description, width = width);
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push_str(&format!(
            "\nUse \"{} <command> --help\" for more information about a command.\n",
            self.program
        ));
        out
    }

    /// Dispatch an argument vector (program name excluded), writing
    /// catalog and help output to `out`
    pub fn dispatch<S, W>(&self, args: &[S], out: &mut W) -> Result<()>
    where
        S: AsRef<str>,
        W: Write,
    {
        let first: Option<&str> = args.first().map(|arg| arg.as_ref());
        let Some(first) = first else {
            out.write_all(self.render_catalog().as_bytes())?;
            return Ok(());
        };
        if first == "help" {
            out.write_all(self.render_catalog().as_bytes())?;
            return Ok(());
        }

        let command = self.get_command(first).ok_or_else(|| UnknownCommandError {
            name: first.to_string(),
            program: self.program.clone(),
            suggestions: self.suggestions(first),
        })?;

        let rest: Vec<String> = args[1..].iter().map(|a| a.as_ref().to_string()).collect();
        if matches!(rest.first().map(String::as_str), Some("-h" | "--help")) {
            let help = command.help();
            out.write_all(help.as_bytes())?;
            if !help.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            return Ok(());
        }

        debug!(command = %first, args = ?rest, "dispatching command");
        command.run(&rest).map_err(|err| match err.downcast::<Diagnostic>() {
            Ok(diagnostic) => CmdkitError::Parse(diagnostic),
            Err(err) => CmdkitError::Command(err),
        })
    }

    /// Dispatch an explicit argument vector to stdout
    pub fn run_with_args<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.dispatch(args, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Dispatch the process arguments to stdout
    pub fn run(&self) -> Result<()> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.run_with_args(&args)
    }

    // The map is only touched through insert/clear, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Command>>> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn Command>>> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }
}
