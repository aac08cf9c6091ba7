use super::*;
use anyhow::{anyhow, Context};
use std::process::Termination;

#[test]
fn test_config_error_display() {
    let err = CliError::ConfigError("bad config".to_string());
    assert_eq!(format!("{}", err), "Configuration error: bad config");
}

#[test]
fn test_checks_failed_display() {
    let err = CliError::ChecksFailed("fail to check commits".to_string());
    assert_eq!(format!("{}", err), "Checks failed: fail to check commits");
}

#[test]
fn test_from_anyhow_error_keeps_context() {
    let result: Result<(), anyhow::Error> =
        Err(anyhow!("permission denied")).context("cannot read .l10n-guard.toml");

    let err: CliError = result.unwrap_err().into();

    assert!(matches!(
        &err,
        CliError::Other(message) if message == "cannot read .l10n-guard.toml: permission denied"
    ));
}

#[test]
fn test_from_core_errors() {
    let too_many: CliError = L10nGuardError::TooManyCommits {
        found: 150,
        limit: 100,
    }
    .into();
    assert_eq!(
        too_many.to_string(),
        "Invalid arguments: too many commits to check (150 > 100), check args or use option --force"
    );

    let missing: CliError = L10nGuardError::MissingTemplate("ref.pot".to_string()).into();
    assert!(matches!(missing, CliError::ConfigError(_)));

    let tool: CliError =
        L10nGuardError::Tool(l10n_guard_tools::errors::Error::ToolUnavailable("msgfmt".to_string()))
            .into();
    assert_eq!(tool.to_string(), "Tool error: msgfmt is not configured");
}

#[test]
fn test_from_maintenance_errors() {
    let exists: CliError = L10nGuardError::PoFileExists("po/eo.po".to_string()).into();
    assert_eq!(
        exists.to_string(),
        "Invalid arguments: fail to init, \"po/eo.po\" is already exist"
    );

    let operands: CliError =
        L10nGuardError::InvalidArguments("too many revisions (3 > 2)".to_string()).into();
    assert_eq!(operands.to_string(), "Invalid arguments: too many revisions (3 > 2)");

    let docs: CliError =
        L10nGuardError::MissingDocumentation("Documentation/config".to_string()).into();
    assert!(matches!(docs, CliError::ConfigError(_)));

    let checkout: CliError = L10nGuardError::Checkout {
        file: "po/git.pot".to_string(),
        revision: "HEAD".to_string(),
        source: l10n_guard_tools::errors::Error::ToolUnavailable("git".to_string()),
    }
    .into();
    assert!(matches!(checkout, CliError::ToolError(_)));
}

fn exit_code(err: CliError) -> String {
    format!("{:?}", err.report())
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        exit_code(CliError::ChecksFailed(String::new())),
        format!("{:?}", ExitCode::from(1))
    );
    assert_eq!(
        exit_code(CliError::ConfigError(String::new())),
        format!("{:?}", ExitCode::from(2))
    );
    assert_eq!(
        exit_code(CliError::InvalidArguments(String::new())),
        format!("{:?}", ExitCode::from(5))
    );
}
