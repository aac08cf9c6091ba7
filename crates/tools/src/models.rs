//! # Models
//!
//! Values exchanged between the tool implementations and the checks: the
//! captured output of a program, changed paths of a commit, and scratch files
//! holding content checked out from the repository.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::Error;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Captured result of running an external program to completion.
///
/// # Examples
///
/// ```
/// use l10n_guard_tools::models::ToolOutput;
///
/// let output = ToolOutput {
///     success: true,
///     status: "exit status: 0".to_string(),
///     stdout: String::new(),
///     stderr: "12 translated messages.\n\n".to_string(),
/// };
///
/// assert_eq!(output.stderr_lines(), vec!["12 translated messages."]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the program exited with status zero
    pub success: bool,

    /// Human readable exit status, e.g. `exit status: 1`
    pub status: String,

    /// Captured standard output, lossily decoded
    pub stdout: String,

    /// Captured standard error, lossily decoded
    pub stderr: String,
}

impl ToolOutput {
    /// Non-empty lines of standard error, in order.
    pub fn stderr_lines(&self) -> Vec<&str> {
        self.stderr.lines().filter(|l| !l.is_empty()).collect()
    }

    /// Non-empty lines of standard output, in order.
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.is_empty()).collect()
    }
}

/// Kind of change recorded for a path in a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    TypeChanged,
    Unmerged,
    Unknown,
}

impl ChangeStatus {
    /// Maps the status letter printed by `git diff-tree` to a status.
    ///
    /// Copy and rename statuses carry a similarity score (`R087`); only the
    /// leading letter is significant.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => ChangeStatus::Added,
            Some('C') => ChangeStatus::Copied,
            Some('D') => ChangeStatus::Deleted,
            Some('M') => ChangeStatus::Modified,
            Some('R') => ChangeStatus::Renamed,
            Some('T') => ChangeStatus::TypeChanged,
            Some('U') => ChangeStatus::Unmerged,
            _ => ChangeStatus::Unknown,
        }
    }
}

/// A path touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    /// How the path was changed
    pub status: ChangeStatus,

    /// Path relative to the work tree root, always with `/` separators
    pub path: String,
}

impl ChangedPath {
    /// Creates a changed path.
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

/// Which `msgfmt` binary performs a syntax check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxChecker {
    /// The `msgfmt` found on `PATH`
    Primary,

    /// An older, back-compatible `msgfmt` configured explicitly
    Secondary,
}

/// A temporary file that is removed when dropped.
///
/// Scratch files hold blobs checked out from the repository, compiled
/// catalogs and downloaded templates. Their name keeps a caller supplied
/// suffix so tools that look at file extensions keep working.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Creates an empty scratch file whose name ends with `suffix`.
    pub fn new(suffix: &str) -> Result<Self, Error> {
        let file = tempfile::Builder::new()
            .prefix("l10n-guard-")
            .suffix(suffix)
            .tempfile()?;
        Ok(Self { file })
    }

    /// Creates a scratch file holding `content`.
    ///
    /// # Arguments
    ///
    /// * `suffix` - Suffix of the generated file name, e.g. `--zh_CN.po`
    /// * `content` - Bytes to write
    ///
    /// # Returns
    ///
    /// A `Result` containing the scratch file
    pub fn with_content(suffix: &str, content: &[u8]) -> Result<Self, Error> {
        let mut scratch = Self::new(suffix)?;
        scratch.file.write_all(content)?;
        scratch.file.flush()?;
        Ok(scratch)
    }

    /// Creates a scratch file holding a copy of `source`.
    pub fn copy_of(suffix: &str, source: &Path) -> Result<Self, Error> {
        let content = fs::read(source)?;
        Self::with_content(suffix, &content)
    }

    /// Location of the scratch file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
