//! # L10n Guard CLI
//!
//! Command-line interface for checking localization contributions to Git.
//!
//! # Commands
//!
//! - `check-commits` - Check the commits of a range and the translation files
//!   they change
//! - `check-po` - Check translation files in the work tree
//! - `check` - Check every translation file and the commits not yet pushed
//! - `check-pot` - Check the spelling of config variables in `po/git.pot`
//! - `diff` - Show message changes between two revisions of an l10n file
//! - `update` - Merge the reference template into a translation
//! - `init` - Start the translation of a new locale
//! - `team` - List or check the teams in `po/TEAMS`
//!
//! # Examples
//!
//! ```bash
//! # Check the commits not yet pushed upstream
//! l10n-guard check-commits
//!
//! # Check a range in CI
//! l10n-guard --github-action-event=pull_request check-commits origin/master..HEAD
//!
//! # Check one translation, including the core template
//! l10n-guard check-po --core po/zh_CN.po
//!
//! # Draft the commit message of a template update
//! l10n-guard diff
//!
//! # Show team leaders
//! l10n-guard team --leader
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::io::{self, IsTerminal};
use std::process::{ExitCode, Termination};

use clap::{ArgAction, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::{
    check::CheckArgs, check_commits::CheckCommitsArgs, check_po::CheckPoArgs,
    check_pot::CheckPotArgs, diff::DiffArgs, init::InitArgs, team::TeamArgs, update::UpdateArgs,
};
use config::{log_level, GlobalOptions, LOG_ENV};
use errors::CliError;

/// Command-line interface structure for L10n Guard.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More output, repeat for more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Less output, repeat for less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    /// Options shared by all commands
    #[command(flatten)]
    options: GlobalOptions,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the L10n Guard CLI.
#[derive(Subcommand)]
enum Commands {
    /// Check commits of a range and the translation files they change
    CheckCommits(CheckCommitsArgs),

    /// Check translation files
    CheckPo(CheckPoArgs),

    /// Check all ".po" files and commits
    Check(CheckArgs),

    /// Check config variables in the message template
    CheckPot(CheckPotArgs),

    /// Show changes between two l10n files
    Diff(DiffArgs),

    /// Update a ".po" file from the reference template
    Update(UpdateArgs),

    /// Create a ".po" file for a new locale
    Init(InitArgs),

    /// Show team leaders and members
    Team(TeamArgs),
}

/// Sets up logging to stderr.
///
/// The filter comes from [`LOG_ENV`] when set, otherwise from the `-v` and
/// `-q` counts. Colors are used on terminals and always in CI, where the log
/// viewer renders them.
fn init_logging(verbose: u8, quiet: u8, in_ci: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_ansi(in_ci || io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Dispatches to the handler of `command`.
fn run(command: Commands, options: &GlobalOptions) -> Result<(), CliError> {
    match command {
        Commands::CheckCommits(args) => commands::check_commits::execute(args, options),
        Commands::CheckPo(args) => commands::check_po::execute(args, options),
        Commands::Check(args) => commands::check::execute(args, options),
        Commands::CheckPot(args) => commands::check_pot::execute(args, options),
        Commands::Diff(args) => commands::diff::execute(args, options),
        Commands::Update(args) => commands::update::execute(args, options),
        Commands::Init(args) => commands::init::execute(args, options),
        Commands::Team(args) => commands::team::execute(args),
    }
}

/// Main entry point for the L10n Guard CLI.
///
/// Parses the command line, initializes logging and runs the selected
/// command. Failures are logged and mapped to the exit code of their kind.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let in_ci = cli
        .options
        .github_action_event
        .as_deref()
        .is_some_and(|event| !event.trim().is_empty());
    init_logging(cli.verbose, cli.quiet, in_ci);

    match run(cli.command, &cli.options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            e.report()
        }
    }
}
