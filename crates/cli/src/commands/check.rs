use clap::Args;
use tracing::{error, instrument};

use super::{check_commits, check_po, Session};
use crate::config::GlobalOptions;
use crate::errors::CliError;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Check every commit even when there are more than the limit
    #[arg(long)]
    pub force: bool,

    /// Do not verify commit signatures
    #[arg(long)]
    pub no_gpg: bool,

    /// Also check the translations against the core template
    #[arg(long)]
    pub core: bool,
}

/// Runs the check command: every translation file, then the commits not yet
/// pushed upstream.
///
/// Both checks always run; the first failure is returned.
#[instrument(skip(options))]
pub fn execute(args: CheckArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let mut config = session.check_config(options)?;
    config.check_core |= args.core;
    config.force |= args.force;
    config.no_gpg |= args.no_gpg;

    let po = check_po::run(&session, &config, &[]);
    if let Err(e) = &po {
        error!("{}", e);
    }
    let commits = check_commits::run(&session, &config, &[]);
    po.and(commits)
}
