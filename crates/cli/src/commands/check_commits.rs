use clap::Args;
use l10n_guard_core::config::CheckConfig;
use l10n_guard_core::L10nGuard;
use tracing::instrument;

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

/// Arguments for the check-commits command
#[derive(Args, Debug, Default)]
pub struct CheckCommitsArgs {
    /// Check every commit even when there are more than the limit
    #[arg(long)]
    pub force: bool,

    /// Do not verify commit signatures
    #[arg(long)]
    pub no_gpg: bool,

    /// Revisions to check, "HEAD@{u}..HEAD" by default
    pub revisions: Vec<String>,
}

impl CheckCommitsArgs {
    /// Applies the flags of the command to `config`.
    pub fn apply(&self, config: &mut CheckConfig) {
        config.force |= self.force;
        config.no_gpg |= self.no_gpg;
    }
}

/// Runs the check-commits command.
#[instrument(skip(options))]
pub fn execute(args: CheckCommitsArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let mut config = session.check_config(options)?;
    args.apply(&mut config);

    run(&session, &config, &args.revisions)
}

pub(super) fn run(
    session: &Session,
    config: &CheckConfig,
    revisions: &[String],
) -> Result<(), CliError> {
    let summary = L10nGuard::new(session.toolbox(), config).check_commits(revisions)?;
    if summary.passed() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed("fail to check commits".to_string()))
    }
}
