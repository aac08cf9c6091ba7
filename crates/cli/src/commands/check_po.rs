use clap::Args;
use l10n_guard_core::config::CheckConfig;
use l10n_guard_core::L10nGuard;
use tracing::instrument;

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

/// Arguments for the check-po command
#[derive(Args, Debug, Default)]
pub struct CheckPoArgs {
    /// Also check the translations against the core template
    #[arg(long)]
    pub core: bool,

    /// Translations to check, as locale or file name; all of "po/" by default
    #[arg(value_name = "XX.po")]
    pub files: Vec<String>,
}

/// Runs the check-po command.
#[instrument(skip(options))]
pub fn execute(args: CheckPoArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let mut config = session.check_config(options)?;
    config.check_core |= args.core;

    run(&session, &config, &args.files)
}

pub(super) fn run(session: &Session, config: &CheckConfig, files: &[String]) -> Result<(), CliError> {
    if L10nGuard::new(session.toolbox(), config).check_po_files(files)? {
        Ok(())
    } else {
        Err(CliError::ChecksFailed("fail to check po".to_string()))
    }
}
