use clap::Args;
use l10n_guard_core::L10nGuard;
use tracing::instrument;

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;

/// Arguments for the diff command
#[derive(Args, Debug, Default)]
pub struct DiffArgs {
    /// Revision to compare, repeat for the destination side; the source
    /// defaults to HEAD
    #[arg(short, long = "revision", value_name = "REVISION")]
    pub revisions: Vec<String>,

    /// Source and target files, or one file for both; "po/git.pot" by default
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

/// Runs the diff command, printing the summary to stdout.
#[instrument(skip(options))]
pub fn execute(args: DiffArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let config = session.check_config(options)?;

    let lines = L10nGuard::new(session.toolbox(), &config).diff(&args.revisions, &args.files)?;
    for line in &lines {
        println!("{}", line);
    }
    Ok(())
}
