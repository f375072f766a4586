//! Command-line front end

use crate::cli::manager::Manager;
use crate::cli::recover::run_with_recovery;
use crate::command::{ActionCommand, BaseCommand};
use crate::config::{discover_definitions_file, parse_definitions_file, Definitions};
use crate::error::{CmdkitError, DefinitionResult};
use crate::option::CmdOption;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

/// Verbosity levels for log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Most detailed log level shown at this verbosity
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::OFF,
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::WARN,
            Verbosity::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// CLI application
pub struct App {
    manager: Manager,
}

impl App {
    /// Create an app with built-in commands plus any discovered definitions
    pub fn new() -> Result<Self, CmdkitError> {
        let app = App::builtin()?;
        if let Some(path) = discover_definitions_file() {
            app.load_definitions(&path)?;
        }
        Ok(app)
    }

    /// Create an app with built-in commands plus a specific definitions file
    pub fn with_definitions_file(path: &Path) -> Result<Self, CmdkitError> {
        let app = App::builtin()?;
        app.load_definitions(path)?;
        Ok(app)
    }

    /// Create an app with only the built-in commands
    pub fn builtin() -> Result<Self, CmdkitError> {
        let manager = Manager::new("cmdkit")
            .with_about("cmdkit - declarative commands and option parsing");
        manager.register(Arc::new(echo_command()?))?;
        Ok(App { manager })
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Register every command of a definitions file
    pub fn load_definitions(&self, path: &Path) -> Result<(), CmdkitError> {
        info!(path = %path.display(), "loading command definitions");
        let definitions = parse_definitions_file(path)?;
        self.register_definitions(&definitions)
    }

    /// Register declared commands; each prints its parsed context as YAML
    pub fn register_definitions(&self, definitions: &Definitions) -> Result<(), CmdkitError> {
        for command in definitions.build_commands()? {
            let command = command.with_action(|ctx| {
                let yaml = serde_yaml::to_string(ctx)?;
                let mut out = io::stdout().lock();
                out.write_all(yaml.as_bytes())?;
                Ok(())
            });
            self.manager.register(Arc::new(command))?;
        }
        Ok(())
    }

    /// Run the application with command arguments (program name excluded)
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<(), CmdkitError> {
        self.manager.run_with_args(args)
    }
}

/// Built-in `echo` command
pub fn echo_command() -> DefinitionResult<ActionCommand> {
    let base = BaseCommand::new(
        "echo",
        "Print arguments to standard output",
        "[options] <text>...",
        [
            CmdOption::bool("no-newline")
                .short('n')
                .description("Do not print the trailing newline")
                .build(),
            CmdOption::string("separator")
                .short('s')
                .description("Text placed between arguments")
                .default(" ")
                .build(),
            CmdOption::int("repeat")
                .short('r')
                .description("Number of times to print the line")
                .default(1)
                .build(),
        ],
    )?;

    Ok(base.with_action(|ctx| {
        let separator = ctx.get_string("separator").unwrap_or(" ");
        let repeat = ctx.get_int("repeat").unwrap_or(1);
        let repeat = usize::try_from(repeat)
            .map_err(|_| anyhow::anyhow!("--repeat must not be negative (got {})", repeat))?;
        let newline = !ctx.get_bool("no-newline").unwrap_or(false);

        let line = ctx.args().join(separator);
        let mut out = io::stdout().lock();
        for _ in 0..repeat {
            out.write_all(line.as_bytes())?;
            if newline {
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }))
}

/// Build the clap command for the front end's own flags
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("cmdkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Declarative commands and option parsing")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to a cmdkit.yml definitions file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Log nothing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .help("Command to run followed by its arguments")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// Get verbosity level from matches
pub fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the stderr log subscriber
pub fn init_logging(verbosity: Verbosity) {
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level_filter())
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), CmdkitError> {
    let matches = build_cli().get_matches();
    init_logging(get_verbosity(&matches));

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_definitions_file(path)?,
        None => App::new()?,
    };

    let args: Vec<String> = matches
        .get_many::<String>("command")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    debug!(?args, "starting dispatch");

    run_with_recovery(|| app.run(&args))
}
