use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Failures that stop an orchestration step as a whole.
///
/// Rule violations are never errors of this type: they are collected in
/// [`crate::outcome::CheckOutcome`] and [`crate::report::FileReport`] values.
#[derive(Error, Debug)]
pub enum L10nGuardError {
    #[error("{0}")]
    Tool(#[from] l10n_guard_tools::errors::Error),

    #[error("too many commits to check ({found} > {limit}), check args or use option --force")]
    TooManyCommits { found: usize, limit: usize },

    #[error("invalid locale name \"{0}\"")]
    InvalidLocale(String),

    #[error("cannot find any \".po\" files to check")]
    NoPoFiles,

    #[error("reference template \"{0}\" does not exist")]
    MissingTemplate(String),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("file \"{0}\" does not exist")]
    MissingFile(String),

    #[error("\"{0}\" does not exist, try to create one using init command")]
    MissingPoFile(String),

    #[error("fail to init, \"{0}\" is already exist")]
    PoFileExists(String),

    #[error("fail to checkout {file} of revision {revision}: {source}")]
    Checkout {
        file: String,
        revision: String,
        source: l10n_guard_tools::errors::Error,
    },

    #[error("cannot find dir {0}")]
    MissingDocumentation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems loading the optional configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("configuration file not found: {0}")]
    NotFound(String),

    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedSchemaVersion(u32),

    #[error("invalid value \"{value}\" for {key}")]
    InvalidValue { key: String, value: String },
}
