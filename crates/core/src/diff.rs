//! # Translation Diff
//!
//! Summarizes how the messages of two l10n files differ, each taken from a
//! revision or from the work tree. The typical use is comparing a freshly
//! generated `po/git.pot` with the one in `HEAD`, which also drafts the
//! subject and body of the commit updating the template.

use std::fmt;
use std::path::{Path, PathBuf};

use l10n_guard_tools::models::ScratchFile;
use l10n_guard_tools::{GettextToolchain, Repository};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::config::TEMPLATE_FILE;
use crate::errors::L10nGuardError;

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;

lazy_static! {
    // git.pot:NNN: this message is used but not defined in /tmp/XXXX--git.pot
    static ref NEW_ENTRY_REGEX: Regex =
        Regex::new(r":([0-9]*): this message is used but not defined in")
            .expect("Failed to compile new entry regex");
    // /tmp/XXXX--git.pot:NNN: warning: this message is not used
    static ref REMOVED_ENTRY_REGEX: Regex =
        Regex::new(r":([0-9]*): warning: this message is not used")
            .expect("Failed to compile removed entry regex");
}

/// Most revisions and files one diff accepts
const MAX_OPERANDS: usize = 2;

/// A file as found in a revision, or in the work tree when `revision` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRevision {
    pub revision: Option<String>,
    pub file: String,
}

impl FileRevision {
    pub fn new(revision: Option<&str>, file: &str) -> Self {
        Self {
            revision: revision.map(str::to_string),
            file: file.to_string(),
        }
    }
}

impl fmt::Display for FileRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}@{}", self.file, revision),
            None => write!(f, "{}", self.file),
        }
    }
}

/// Pairs the revision and file operands of a diff into its two sides.
///
/// | files | revisions | source          | destination      |
/// |-------|-----------|-----------------|------------------|
/// | 0, 1  | none      | `HEAD`          | work tree        |
/// | 0, 1  | `r1`      | `r1`            | work tree        |
/// | 2     | none      | work tree       | work tree        |
/// | 2     | `r1`      | `r1`            | `r1`             |
/// | any   | `r1 r2`   | `r1`            | `r2`             |
///
/// Without files both sides are `po/git.pot`, one file is used on both
/// sides, and two files are the source and destination in order.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::diff::{resolve_revisions, FileRevision};
///
/// let (src, dest) = resolve_revisions(&[], &[]).unwrap();
/// assert_eq!(src, FileRevision::new(Some("HEAD"), "po/git.pot"));
/// assert_eq!(dest, FileRevision::new(None, "po/git.pot"));
/// ```
pub fn resolve_revisions(
    revisions: &[String],
    files: &[String],
) -> Result<(FileRevision, FileRevision), L10nGuardError> {
    if revisions.len() > MAX_OPERANDS {
        return Err(L10nGuardError::InvalidArguments(format!(
            "too many revisions ({} > {})",
            revisions.len(),
            MAX_OPERANDS
        )));
    }
    if files.len() > MAX_OPERANDS {
        return Err(L10nGuardError::InvalidArguments(format!(
            "too many arguments ({} > {})",
            files.len(),
            MAX_OPERANDS
        )));
    }

    let (src_revision, dest_revision) = match (files.len(), revisions) {
        (_, [src, dest]) => (Some(src.as_str()), Some(dest.as_str())),
        (2, [revision]) => (Some(revision.as_str()), Some(revision.as_str())),
        (2, _) => (None, None),
        (_, [revision]) => (Some(revision.as_str()), None),
        _ => (Some("HEAD"), None),
    };
    let (src_file, dest_file) = match files {
        [] => (TEMPLATE_FILE, TEMPLATE_FILE),
        [file] => (file.as_str(), file.as_str()),
        [src, dest, ..] => (src.as_str(), dest.as_str()),
    };

    Ok((
        FileRevision::new(src_revision, src_file),
        FileRevision::new(dest_revision, dest_file),
    ))
}

/// Count of messages gained and lost between two files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub added: usize,
    pub removed: usize,
}

impl DiffStat {
    /// Counts the new and removed messages reported by `msgcmp`.
    pub fn parse(stderr: &str) -> Self {
        let mut stat = Self::default();
        for line in stderr.lines() {
            if NEW_ENTRY_REGEX.is_match(line) {
                stat.added += 1;
            } else if REMOVED_ENTRY_REGEX.is_match(line) {
                stat.removed += 1;
            }
        }
        stat
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    /// Short form such as `3 new, 1 removed`, empty when nothing changed.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.added != 0 {
            parts.push(format!("{} new", self.added));
        }
        if self.removed != 0 {
            parts.push(format!("{} removed", self.removed));
        }
        parts.join(", ")
    }
}

/// One side of a diff on disk; revisions live in scratch files.
enum Side {
    WorkTree(PathBuf),
    Revision(ScratchFile),
}

impl Side {
    fn path(&self) -> &Path {
        match self {
            Side::WorkTree(path) => path.as_path(),
            Side::Revision(scratch) => scratch.path(),
        }
    }
}

/// Compares the messages of two file revisions.
///
/// # Arguments
///
/// * `repository` - Provides revision contents and the description of `HEAD`
/// * `gettext` - Runs the message comparison
/// * `src` - The old side
/// * `dest` - The new side
///
/// # Returns
///
/// The report lines: a heading, then either the change summary or, when
/// the destination is `git.pot`, a draft commit message for the template
/// update
#[instrument(skip(repository, gettext, src, dest), fields(src = %src, dest = %dest))]
pub fn diff_revisions(
    repository: &dyn Repository,
    gettext: &dyn GettextToolchain,
    src: &FileRevision,
    dest: &FileRevision,
) -> Result<Vec<String>, L10nGuardError> {
    let src_side = checkout(repository, src)?;
    let dest_side = checkout(repository, dest)?;

    let output = gettext.diff(src_side.path(), dest_side.path())?;
    let stat = DiffStat::parse(&output.stderr);
    debug!(added = stat.added, removed = stat.removed, "compared messages");
    // msgcmp exits non-zero for every difference it finds.
    if !output.success && stat.is_empty() {
        return Err(l10n_guard_tools::errors::Error::CommandFailed {
            program: "msgcmp".to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }

    let mut lines = vec![format!("# Diff between {} and {}", src, dest)];
    if stat.is_empty() {
        lines.push("\tNothing changed.".to_string());
    }

    let is_template = Path::new(&dest.file).file_name() == Path::new(TEMPLATE_FILE).file_name();
    if is_template {
        let description = repository.describe().unwrap_or_else(|e| {
            warn!("cannot describe HEAD: {}", e);
            String::new()
        });
        lines.push(format!("l10n: git.pot: vN.N.N round N ({})", stat.describe()));
        lines.push(String::new());
        lines.push(format!(
            "Generate po/git.pot from ({}) for git vN.N.N l10n round N.",
            description
        ));
    } else if !stat.is_empty() {
        lines.push(format!("\t{}", stat.describe()));
    }
    Ok(lines)
}

fn checkout(repository: &dyn Repository, side: &FileRevision) -> Result<Side, L10nGuardError> {
    match &side.revision {
        Some(revision) => repository
            .checkout_blob(revision, &side.file)
            .map(Side::Revision)
            .map_err(|source| L10nGuardError::Checkout {
                file: side.file.clone(),
                revision: revision.clone(),
                source,
            }),
        None => {
            let path = repository.work_dir().join(&side.file);
            if !path.is_file() {
                return Err(L10nGuardError::MissingFile(side.file.clone()));
            }
            Ok(Side::WorkTree(path))
        }
    }
}
