use std::path::{Path, PathBuf};

use clap::Args;
use l10n_guard_core::config::{
    load_config, max_commits_from_env, CheckConfig, CiEvent, L10nGuardConfig, ReportLevel,
    SecondaryCheckPolicy, TemplateSource, DEFAULT_CONFIG_FILE,
};
use tracing::debug;

use crate::errors::CliError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding a log filter, e.g. `l10n_guard_core=debug`
pub const LOG_ENV: &str = "L10N_GUARD_LOG";

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Event that triggered a CI run, e.g. "push" or "pull_request"
    #[arg(long, global = true, value_name = "EVENT")]
    pub github_action_event: Option<String>,

    /// Reference template: "download", "build", "no" or a path to a .pot file
    #[arg(long, global = true, value_name = "SOURCE")]
    pub pot_file: Option<TemplateSource>,

    /// Severity of placeholder mismatches: none, warn or error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub report_typos: Option<ReportLevel>,

    /// Severity of file-location comments: none, warn or error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub report_file_locations: Option<ReportLevel>,

    /// Alternate configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Back-compatible msgfmt used as a second syntax checker
    #[arg(long, global = true, value_name = "PATH")]
    pub secondary_msgfmt: Option<PathBuf>,

    /// Whether secondary msgfmt failures are errors: advisory or gate
    #[arg(long, global = true, value_name = "POLICY")]
    pub secondary_check: Option<SecondaryCheckPolicy>,
}

/// Reads the configuration file selected by `options`.
///
/// An explicitly given file must exist. Without one, `.l10n-guard.toml` in
/// the work tree is used when present.
pub fn load_file_config(
    options: &GlobalOptions,
    work_dir: &Path,
) -> Result<L10nGuardConfig, CliError> {
    let path = match &options.config {
        Some(path) => path.clone(),
        None => {
            let path = work_dir.join(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                debug!("no configuration file, using defaults");
                return Ok(L10nGuardConfig::default());
            }
            path
        }
    };

    debug!("Loading configuration from {:?}", path);
    Ok(load_config(&path)?)
}

/// Builds the runtime configuration: file values, then the environment,
/// then command-line flags.
pub fn build_check_config(
    options: &GlobalOptions,
    work_dir: &Path,
) -> Result<CheckConfig, CliError> {
    let mut config = load_file_config(options, work_dir)?.to_check_config();

    if let Some(limit) = max_commits_from_env() {
        config.max_commits = limit;
    }
    config.ci_event = options
        .github_action_event
        .as_deref()
        .and_then(CiEvent::from_name);
    if let Some(source) = &options.pot_file {
        config.template_source = source.clone();
    }
    if options.report_typos.is_some() {
        config.report_typos = options.report_typos;
    }
    if options.report_file_locations.is_some() {
        config.report_file_locations = options.report_file_locations;
    }
    if let Some(policy) = options.secondary_check {
        config.secondary_check = policy;
    }

    Ok(config)
}

/// Default log level for the given counts of `-v` and `-q`.
pub fn log_level(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
