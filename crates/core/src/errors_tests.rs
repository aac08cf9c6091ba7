use super::*;
use std::error::Error as StdError;

#[test]
fn test_too_many_commits_message() {
    let error = L10nGuardError::TooManyCommits {
        found: 150,
        limit: 100,
    };

    assert_eq!(
        error.to_string(),
        "too many commits to check (150 > 100), check args or use option --force"
    );
}

#[test]
fn test_tool_error_is_transparent_in_message() {
    let tool = l10n_guard_tools::errors::Error::MissingPoDirectory("/w".to_string());
    let error: L10nGuardError = tool.into();

    assert_eq!(error.to_string(), "cannot find \"po/\" directory in /w");
    assert!(error.source().is_some());
}

#[test]
fn test_invalid_locale_message() {
    let error = L10nGuardError::InvalidLocale("xx-YY".to_string());

    assert_eq!(error.to_string(), "invalid locale name \"xx-YY\"");
}

#[test]
fn test_config_invalid_value_message() {
    let error = ConfigLoadError::InvalidValue {
        key: "--report-typos".to_string(),
        value: "loud".to_string(),
    };

    assert_eq!(error.to_string(), "invalid value \"loud\" for --report-typos");
}

#[test]
fn test_config_parse_error_conversion() {
    let parse_error = toml::from_str::<toml::Table>("schemaVersion = ").unwrap_err();
    let error: ConfigLoadError = parse_error.into();

    assert!(error
        .to_string()
        .starts_with("cannot parse configuration file: "));
}

#[test]
fn test_missing_po_file_suggests_init() {
    let error = L10nGuardError::MissingPoFile("po/de.po".to_string());

    assert_eq!(
        error.to_string(),
        "\"po/de.po\" does not exist, try to create one using init command"
    );
}

#[test]
fn test_checkout_error_keeps_its_source() {
    let error = L10nGuardError::Checkout {
        file: "po/git.pot".to_string(),
        revision: "v2.40.0".to_string(),
        source: l10n_guard_tools::errors::Error::ToolUnavailable("git".to_string()),
    };

    assert!(error
        .to_string()
        .starts_with("fail to checkout po/git.pot of revision v2.40.0: "));
    assert!(error.source().is_some());
}
