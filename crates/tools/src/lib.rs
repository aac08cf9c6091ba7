//! # l10n-guard tools
//!
//! Interfaces to the external programs the l10n checks are built on.
//!
//! All repository access goes through the `git` command-line client, and all
//! PO/MO handling goes through the gettext tool-chain (`msgfmt`, `msgmerge`,
//! `msgcmp`, `msginit`, `msgcat`, `xgettext`). The checks in the core crate only ever see the traits
//! defined here, which keeps them testable with in-memory fakes.
//!
//! The process-backed implementations live in:
//! - [`git::GitCli`] for [`Repository`]
//! - [`gettext::GettextCli`] for [`GettextToolchain`]
//! - [`download::HttpTemplateFetcher`] for [`TemplateFetcher`]
//! - [`terminal::StdTerminal`] for [`Terminal`]

use std::path::Path;

pub mod download;
pub mod errors;
pub mod gettext;
pub mod git;
pub mod mo;
pub mod models;
mod process;
pub mod terminal;

use errors::Error;
use models::{ChangedPath, ScratchFile, SyntaxChecker, ToolOutput};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Read access to the git repository being checked.
///
/// Implementations run every query against the work tree root of a single
/// repository. Failures to start a process or non-zero exits of query
/// commands are reported as [`Error`] values; commands whose exit status is
/// itself the answer (such as signature verification) return a
/// [`ToolOutput`] instead.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use std::path::{Path, PathBuf};
/// use l10n_guard_tools::{Repository, errors::Error, models::{ChangedPath, ScratchFile, ToolOutput}};
///
/// struct FixedRepository {
///     root: PathBuf,
/// }
///
/// impl Repository for FixedRepository {
///     fn git_dir(&self) -> &Path { &self.root }
///     fn work_dir(&self) -> &Path { &self.root }
///     fn config_bool(&self, _key: &str, default: bool) -> bool { default }
///     fn rev_list(&self, _args: &[String]) -> Result<Vec<String>, Error> { Ok(Vec::new()) }
///     # fn cat_commit(&self, _: &str) -> Result<Vec<u8>, Error> { unimplemented!() }
///     # fn changed_paths(&self, _: &str) -> Result<Vec<ChangedPath>, Error> { unimplemented!() }
///     # fn checkout_blob(&self, _: &str, _: &str) -> Result<ScratchFile, Error> { unimplemented!() }
///     # fn verify_commit(&self, _: &str) -> Result<ToolOutput, Error> { unimplemented!() }
///     # fn missing_blobs(&self, _: &[String], _: usize, _: &str) -> Result<Vec<String>, Error> { unimplemented!() }
///     # fn fetch_blobs(&self, _: &[String]) -> Result<ToolOutput, Error> { unimplemented!() }
///     # fn describe(&self) -> Result<String, Error> { unimplemented!() }
///     // Implement the remaining methods...
/// }
/// ```
pub trait Repository {
    /// Absolute path of the `.git` directory.
    fn git_dir(&self) -> &Path;

    /// Absolute path of the work tree root.
    fn work_dir(&self) -> &Path;

    /// Looks up a boolean configuration value, returning `default` when the
    /// key is unset or cannot be read.
    fn config_bool(&self, key: &str, default: bool) -> bool;

    /// Lists commit IDs for a revision range, oldest first.
    ///
    /// # Arguments
    ///
    /// * `args` - Revision arguments as they would be passed to `git rev-list`
    ///
    /// # Returns
    ///
    /// A `Result` containing the full 40-hex commit IDs
    fn rev_list(&self, args: &[String]) -> Result<Vec<String>, Error>;

    /// Returns the raw commit object for `commit` as printed by
    /// `git cat-file commit`.
    fn cat_commit(&self, commit: &str) -> Result<Vec<u8>, Error>;

    /// Lists the paths added, copied or modified by `commit`.
    ///
    /// # Arguments
    ///
    /// * `commit` - The commit to inspect
    ///
    /// # Returns
    ///
    /// A `Result` containing the changed paths relative to the work tree root
    fn changed_paths(&self, commit: &str) -> Result<Vec<ChangedPath>, Error>;

    /// Writes the blob `path` at `revision` into a scratch file.
    ///
    /// The scratch file is removed when the returned value is dropped.
    fn checkout_blob(&self, revision: &str, path: &str) -> Result<ScratchFile, Error>;

    /// Runs the repository's signature verifier on `commit`.
    fn verify_commit(&self, commit: &str) -> Result<ToolOutput, Error>;

    /// Lists blobs referenced by the range that are missing from a partial
    /// clone.
    ///
    /// # Arguments
    ///
    /// * `args` - Revision arguments for the range
    /// * `max_count` - Upper bound on the number of commits walked
    /// * `pathspec` - Restricts the listing to this path
    ///
    /// # Returns
    ///
    /// A `Result` containing the IDs of the missing blobs
    fn missing_blobs(
        &self,
        args: &[String],
        max_count: usize,
        pathspec: &str,
    ) -> Result<Vec<String>, Error>;

    /// Fetches the given blobs from `origin` in a single request.
    fn fetch_blobs(&self, blobs: &[String]) -> Result<ToolOutput, Error>;

    /// Names `HEAD` after the nearest tag, or by its abbreviated ID.
    fn describe(&self) -> Result<String, Error>;
}

/// The gettext tool-chain used to validate and compare translation files.
///
/// Every method returns the captured [`ToolOutput`] of the underlying program;
/// only a failure to start the program is an [`Error`]. Callers decide how a
/// non-zero exit status is reported.
pub trait GettextToolchain {
    /// Runs a syntax check with statistics on `po_file`.
    ///
    /// # Arguments
    ///
    /// * `checker` - Whether to use the primary or the back-compatible `msgfmt`
    /// * `po_file` - The translation file to check
    ///
    /// # Returns
    ///
    /// A `Result` containing the checker output; the statistics line and any
    /// syntax errors are on stderr
    fn check_syntax(&self, checker: SyntaxChecker, po_file: &Path) -> Result<ToolOutput, Error>;

    /// Whether a back-compatible secondary `msgfmt` is configured.
    fn has_secondary_checker(&self) -> bool;

    /// Compiles `po_file` into the binary catalog `mo_file`.
    fn compile(&self, po_file: &Path, mo_file: &Path) -> Result<ToolOutput, Error>;

    /// Compares `po_file` against the template `pot_file` without fuzzy
    /// matching. Diagnostics are on stderr and always in the C locale.
    fn compare(&self, po_file: &Path, pot_file: &Path) -> Result<ToolOutput, Error>;

    /// Updates `po_file` in place from the template `pot_file`, keeping file
    /// locations.
    fn merge(&self, po_file: &Path, pot_file: &Path) -> Result<ToolOutput, Error>;

    /// Compares two catalogs entry by entry, counting untranslated entries
    /// as present. Entries only in `dest` are reported as used but not
    /// defined, entries only in `src` as not used.
    fn diff(&self, src: &Path, dest: &Path) -> Result<ToolOutput, Error>;

    /// Creates the initial translation of `locale` from `pot_file`.
    ///
    /// # Returns
    ///
    /// A `Result` containing the output of `msginit`; the new catalog is on
    /// stdout
    fn init(&self, locale: &str, pot_file: &Path) -> Result<ToolOutput, Error>;

    /// Prints `pot_file` without line wrapping and with every string on its
    /// own indented line.
    fn normalize(&self, pot_file: &Path) -> Result<ToolOutput, Error>;

    /// Extracts translatable strings from `sources` into `pot_file`.
    fn extract(&self, pot_file: &Path, sources: &[&str]) -> Result<ToolOutput, Error>;

    /// Regenerates the project template with the project's build system.
    fn build_template(&self) -> Result<ToolOutput, Error>;
}

/// Fetches reference template files from a remote location.
pub trait TemplateFetcher {
    /// Downloads `url` into `destination`, replacing its content.
    ///
    /// # Arguments
    ///
    /// * `url` - Location of the template
    /// * `destination` - File that receives the downloaded content
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    fn fetch_template(&self, url: &str, destination: &Path) -> Result<(), Error>;
}

/// The user-facing terminal, used for confirmation prompts.
pub trait Terminal {
    /// Whether both stdin and stdout are attached to a terminal.
    fn is_interactive(&self) -> bool;

    /// Asks a yes/no question and returns the answer, or `default` when the
    /// answer is empty or cannot be read.
    fn confirm(&self, question: &str, default: bool) -> bool;
}
