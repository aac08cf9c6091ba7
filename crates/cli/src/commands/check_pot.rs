use clap::Args;
use l10n_guard_core::config::TEMPLATE_FILE;
use l10n_guard_core::pot::manpage_config_variables;
use l10n_guard_core::L10nGuard;
use l10n_guard_tools::Repository;
use tracing::instrument;

use super::Session;
use crate::config::GlobalOptions;
use crate::errors::CliError;

#[cfg(test)]
#[path = "check_pot_tests.rs"]
mod tests;

/// Arguments for the check-pot command
#[derive(Args, Debug, Default)]
pub struct CheckPotArgs {
    /// Show all config variables in the config manpages
    #[arg(long, conflicts_with = "show_camel_case_configs")]
    pub show_all_configs: bool,

    /// Show CamelCase config variables in the config manpages
    #[arg(long)]
    pub show_camel_case_configs: bool,
}

impl CheckPotArgs {
    /// Whether config variables are listed instead of checked, and if so
    /// whether only CamelCase ones.
    fn listing(&self) -> Option<bool> {
        if self.show_all_configs {
            Some(false)
        } else if self.show_camel_case_configs {
            Some(true)
        } else {
            None
        }
    }
}

/// Runs the check-pot command.
#[instrument(skip(options))]
pub fn execute(args: CheckPotArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let session = Session::open(options)?;

    if let Some(only_camel_case) = args.listing() {
        for config in manpage_config_variables(session.repository.work_dir(), only_camel_case)? {
            println!("{}", config);
        }
        return Ok(());
    }

    let config = session.check_config(options)?;
    let report = L10nGuard::new(session.toolbox(), &config).check_template()?;
    report.emit(&format!("[{}]", TEMPLATE_FILE));
    if report.passed() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed("fail to check pot".to_string()))
    }
}
