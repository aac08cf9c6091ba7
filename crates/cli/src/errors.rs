use std::process::ExitCode;

use l10n_guard_core::errors::{ConfigLoadError, L10nGuardError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An external tool failed or could not be started
    #[error("Tool error: {0}")]
    ToolError(String),

    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The checks ran and found problems
    #[error("Checks failed: {0}")]
    ChecksFailed(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{:#}", err))
    }
}

impl From<ConfigLoadError> for CliError {
    fn from(err: ConfigLoadError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}

impl From<l10n_guard_tools::errors::Error> for CliError {
    fn from(err: l10n_guard_tools::errors::Error) -> Self {
        CliError::ToolError(err.to_string())
    }
}

impl From<L10nGuardError> for CliError {
    fn from(err: L10nGuardError) -> Self {
        match err {
            L10nGuardError::Tool(e) => e.into(),
            L10nGuardError::Checkout { .. } => CliError::ToolError(err.to_string()),
            L10nGuardError::MissingTemplate(_) | L10nGuardError::MissingDocumentation(_) => {
                CliError::ConfigError(err.to_string())
            }
            L10nGuardError::TooManyCommits { .. }
            | L10nGuardError::InvalidLocale(_)
            | L10nGuardError::NoPoFiles
            | L10nGuardError::InvalidArguments(_)
            | L10nGuardError::MissingFile(_)
            | L10nGuardError::MissingPoFile(_)
            | L10nGuardError::PoFileExists(_) => CliError::InvalidArguments(err.to_string()),
            L10nGuardError::Io(_) => CliError::Other(err.to_string()),
        }
    }
}

impl std::process::Termination for CliError {
    fn report(self) -> ExitCode {
        match self {
            CliError::ChecksFailed(_) => ExitCode::from(1),
            CliError::ConfigError(_) => ExitCode::from(2),
            CliError::ToolError(_) => ExitCode::from(3),
            CliError::InvalidArguments(_) => ExitCode::from(5),
            CliError::Other(_) => ExitCode::FAILURE,
        }
    }
}
