#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for external tool operations.
///
/// This enum covers every way an interaction with `git`, the gettext
/// tool-chain or the template download can fail. A program that ran but
/// reported a problem through its exit status is only an error for queries
/// whose output is required; checks inspect [`crate::models::ToolOutput`]
/// instead.
///
/// # Examples
///
/// ```rust
/// use l10n_guard_tools::errors::Error;
///
/// let error = Error::MissingPoDirectory("/src/project".to_string());
/// assert_eq!(
///     error.to_string(),
///     "cannot find \"po/\" directory in /src/project"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A program could not be started at all.
    ///
    /// Usually the program is not installed or not on `PATH`.
    #[error("failed to run {program}: {source}")]
    SpawnFailed {
        /// Name of the program that failed to start
        program: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A query command exited with a non-zero status.
    ///
    /// The stderr of the command is kept so it can be relayed to the user.
    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        /// The program and its leading arguments
        program: String,
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// A tool that was asked for is not configured.
    #[error("{0} is not configured")]
    ToolUnavailable(String),

    /// A compiled message catalog could not be decoded.
    #[error("malformed message catalog: {0}")]
    MalformedCatalog(String),

    /// A template download failed.
    #[error("fail to download {url}: {reason}")]
    DownloadFailed {
        /// The URL that was requested
        url: String,
        /// Description of the failure
        reason: String,
    },

    /// The starting directory is not inside a git work tree.
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// The work tree does not contain the translation directory.
    #[error("cannot find \"po/\" directory in {0}")]
    MissingPoDirectory(String),

    /// A local file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
