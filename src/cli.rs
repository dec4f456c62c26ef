use std::{ffi::OsString, io, process};

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};

use crate::{
    composer::{CommitComposer, Composition},
    config::{CONFIG_FILE_NAME, ConfigFile},
    errors::{ConfigError, ConvcomError, GitError, Result},
    git::{GitCommitter, find_git_root},
    menu::{TerminalKeys, TerminalLines},
    utils::{print_error, print_info, print_success, print_warning},
};

/// Printed when no action flag is given.
pub const USAGE: &str = "No valid flag provided. Use -init to create a configuration file or -commit (-dryrun) create a conventional commit.";

/// Long flags that may also be written with a single dash (`-init`).
const LEGACY_FLAGS: [&str; 6] = ["init", "commit", "dryrun", "push", "verbose", "completions"];

#[derive(Parser, Debug)]
#[command(about = "Compose a Conventional Commits message from an interactive menu.")]
#[command(help_template = "{about}\n\nUSAGE:\n{usage}\n\n{all-args}\n")]
#[command(name = "convcom", version)]
pub struct Cli {
    /// Creates a standard configuration file
    #[arg(long, conflicts_with = "commit")]
    init: bool,

    /// Creates a git commit
    #[arg(long)]
    commit: bool,

    /// Simulates git commit
    /// Prints the composed message instead of committing.
    #[arg(long, visible_alias = "dry-run", requires = "commit")]
    dryrun: bool,

    /// Pushes to the remote after committing
    #[arg(long, requires = "commit")]
    push: bool,

    /// Verbose
    /// If passed, it will print more information about the operation.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Prints shell completions for the given shell
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// # `normalize_args`
/// Rewrites single-dash long flags (`-commit`) into their double-dash form
/// so clap can parse them. Everything else, including arguments that are
/// not valid UTF-8, is left untouched.
///
/// ## Arguments
/// * `args` - The raw command line, program name included.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let legacy = arg
                .to_str()
                .and_then(|arg| arg.strip_prefix('-'))
                .filter(|name| LEGACY_FLAGS.contains(name))
                .map(|name| OsString::from(format!("--{name}")));

            legacy.unwrap_or(arg)
        })
        .collect()
}

/// # `run`
/// Runs the program.
///
/// ## Errors
/// Returns an error if the selected operation fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "convcom", &mut io::stdout());
        return Ok(());
    }

    if cli.init {
        return init(&ConfigFile::new(), cli.verbose);
    }

    if cli.commit {
        return commit(&cli);
    }

    println!("{USAGE}");

    Ok(())
}

fn init(config_file: &ConfigFile, verbose: bool) -> Result<()> {
    if verbose {
        println!("Creating {}", config_file.path().display());
    }

    config_file.create_default()?;

    print_success(
        "Configuration created",
        &format!("Config file {CONFIG_FILE_NAME} created successfully."),
    );

    Ok(())
}

fn commit(cli: &Cli) -> Result<()> {
    let config_file = ConfigFile::new();

    if cli.verbose {
        println!("Loading config from {}", config_file.path().display());
    }

    let config = config_file.load()?;

    if !cli.dryrun {
        find_git_root()?;
    }

    let executor = GitCommitter::new()
        .with_push(cli.push)
        .with_verbose(cli.verbose);
    let composer = CommitComposer::new(&config, &executor)
        .dry_run(cli.dryrun)
        .push(cli.push);

    let outcome = composer.compose(
        &mut TerminalKeys::new(),
        &mut TerminalLines::new(),
        &mut io::stdout(),
    )?;

    match outcome {
        Composition::Committed(header) => {
            if !cli.dryrun {
                print_success("Commit created", &header);
            }
        }
        Composition::Declined(_) => {
            print_warning("Nothing committed", "The commit was not confirmed.");
        }
        Composition::Aborted => {
            print_info("Commit aborted", "No commit was created.");
        }
        Composition::Quit => process::exit(0),
    }

    Ok(())
}

/// # `report_error`
/// Prints an error returned by [`run`] with a title and a suggestion
/// matching its cause.
pub fn report_error(error: &ConvcomError) {
    let (title, suggestion) = match error {
        ConvcomError::Config(ConfigError::ConfigNotFound { .. }) => (
            "Configuration file not found",
            "Use `convcom -init` to create a default convcom.json.",
        ),
        ConvcomError::Config(ConfigError::ConfigAlreadyExists { .. }) => (
            "Configuration file already exists",
            "Edit convcom.json directly to change the types and scopes.",
        ),
        ConvcomError::Config(_) => (
            "Invalid configuration",
            "convcom.json must look like {\"types\": [\"feat\", ...], \"scopes\": [...]}.",
        ),
        ConvcomError::Git(GitError::RepositoryNotFound) => (
            "Git repository not found",
            "Run convcom from inside a git repository, or add -dryrun.",
        ),
        ConvcomError::Git(GitError::CommandFailed { .. }) => (
            "Git command failed",
            "Check that there are tracked changes to commit and that the remote is reachable.",
        ),
        ConvcomError::Terminal(_) => (
            "Terminal error",
            "convcom needs an interactive terminal to display its menus.",
        ),
        ConvcomError::Io(_) | ConvcomError::Json(_) | ConvcomError::EmptyMenu { .. } => (
            "Unexpected error",
            "Please check the details above and try again.",
        ),
    };

    print_error(title, &error.to_string(), suggestion);
}
