use clap::Args;
use l10n_guard_core::po::{locale_of, po_path};
use l10n_guard_core::L10nGuard;
use tracing::instrument;

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

/// Arguments for the update command
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Translation to update, as locale or file name
    #[arg(value_name = "XX.po")]
    pub file: String,
}

/// Runs the update command: merges the reference template into the
/// translation, then checks it.
#[instrument(skip(options))]
pub fn execute(args: UpdateArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let config = session.check_config(options)?;

    let report = L10nGuard::new(session.toolbox(), &config).update_po_file(&args.file)?;
    report.emit(&format!("[{}]", po_path(locale_of(&args.file))));
    if report.passed() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed("fail to update po".to_string()))
    }
}
