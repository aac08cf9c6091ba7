use clap::Args;
use l10n_guard_core::maintain::init_notes;
use l10n_guard_core::po::locale_of;
use l10n_guard_core::L10nGuard;
use tracing::{info, instrument};

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Start from the core messages only, writing "po-core/XX.po"
    #[arg(long)]
    pub core: bool,

    /// Locale of the new translation, e.g. "eo" or "po/eo.po"
    #[arg(value_name = "XX.po")]
    pub file: String,
}

/// Runs the init command and prints the next steps.
#[instrument(skip(options))]
pub fn execute(args: InitArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;
    let config = session.check_config(options)?;

    let created = L10nGuard::new(session.toolbox(), &config).init_po_file(&args.file, args.core)?;
    info!("created {}", created);
    println!("{}", init_notes(locale_of(&args.file), args.core));
    Ok(())
}
