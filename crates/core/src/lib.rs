//! # L10n Guard Core
//!
//! Rule checks for localization contributions to Git: commits that update
//! translations and the `po/XX.po` files they touch.
//!
//! L10n Guard validates:
//! - commit metadata, subject, body, encoding and signature conventions
//! - that l10n commits only change files in the `po/` directory
//! - translation file syntax, file-location comments and placeholder typos
//! - completeness of translations against the reference template
//! - spelling of config variables in the message template
//!
//! It also drafts template update commits from a message diff and starts or
//! refreshes translation files.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use l10n_guard_core::{config::CheckConfig, L10nGuard, Toolbox};
//! use l10n_guard_tools::download::HttpTemplateFetcher;
//! use l10n_guard_tools::gettext::GettextCli;
//! use l10n_guard_tools::git::GitCli;
//! use l10n_guard_tools::terminal::StdTerminal;
//! use l10n_guard_tools::Repository;
//!
//! fn check() -> Result<bool, Box<dyn std::error::Error>> {
//!     let repository = GitCli::discover(&std::env::current_dir()?)?;
//!     let gettext = GettextCli::new(repository.work_dir());
//!     let fetcher = HttpTemplateFetcher::new()?;
//!     let terminal = StdTerminal;
//!     let toolbox = Toolbox {
//!         repository: &repository,
//!         gettext: &gettext,
//!         fetcher: &fetcher,
//!         terminal: &terminal,
//!     };
//!
//!     let config = CheckConfig::default();
//!     let guard = L10nGuard::new(toolbox, &config);
//!
//!     // Check the commits not yet pushed upstream
//!     let summary = guard.check_commits(&[])?;
//!     Ok(summary.passed())
//! }
//! ```

use std::fs;
use std::path::Path;

use l10n_guard_tools::{GettextToolchain, Repository, TemplateFetcher, Terminal};
use tracing::{debug, error, instrument};

pub mod checks;
pub mod commit;
pub mod completeness;
pub mod config;
pub mod diff;
pub mod errors;
pub mod keep_words;
pub mod maintain;
pub mod outcome;
pub mod po;
pub mod pot;
pub mod report;
pub mod scope;
pub mod smudge;
pub mod teams;
pub mod typos;
pub mod walker;

use completeness::{CompletenessChecker, ReferenceTemplate};
use config::{CheckConfig, PO_DIR, TEAMS_FILE};
use errors::L10nGuardError;
use po::{locale_of, po_path, validate_locale, PoChecker};
use report::FileReport;
use teams::Roster;
use walker::{CommitWalker, WalkSummary};

#[cfg(test)]
mod testing;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The external tools a run works with.
#[derive(Clone, Copy)]
pub struct Toolbox<'a> {
    pub repository: &'a dyn Repository,
    pub gettext: &'a dyn GettextToolchain,
    pub fetcher: &'a dyn TemplateFetcher,
    pub terminal: &'a dyn Terminal,
}

/// Main entry point for checking commits and translation files.
pub struct L10nGuard<'a> {
    toolbox: Toolbox<'a>,
    config: &'a CheckConfig,
}

impl<'a> L10nGuard<'a> {
    pub fn new(toolbox: Toolbox<'a>, config: &'a CheckConfig) -> Self {
        Self { toolbox, config }
    }

    /// Checks a range of commits, see [`CommitWalker::run`].
    pub fn check_commits(&self, args: &[String]) -> Result<WalkSummary, L10nGuardError> {
        CommitWalker::new(self.toolbox, self.config).run(args)
    }

    /// Checks translation files in the work tree.
    ///
    /// Each argument names a translation by locale or file name, e.g. `zh_CN`
    /// or `po/zh_CN.po`. Without arguments every `.po` file in `po/` is
    /// checked. The checked files are then compared with the reference
    /// template unless that is disabled.
    ///
    /// # Returns
    ///
    /// Whether every file passed, or an error when there is nothing to check
    #[instrument(skip(self))]
    pub fn check_po_files(&self, args: &[String]) -> Result<bool, L10nGuardError> {
        let work_dir = self.toolbox.repository.work_dir();
        let names = if args.is_empty() {
            list_po_files(work_dir)?
        } else {
            args.iter().map(|arg| po_path(locale_of(arg))).collect()
        };
        if names.is_empty() {
            return Err(L10nGuardError::NoPoFiles);
        }

        let checker = PoChecker::new(self.toolbox.gettext, self.config);
        let mut passed = true;
        let mut checked = Vec::new();
        for name in &names {
            let locale = locale_of(name);
            let prompt = format!("[{}]", name);
            let report = checker.check_po_file(locale, &work_dir.join(name));
            report.emit(&prompt);
            passed &= report.passed();

            if validate_locale(locale).is_err() || !work_dir.join(name).exists() {
                continue;
            }
            if self.config.check_core {
                let report = checker.check_core_po_file(work_dir, locale);
                report.emit(&prompt);
                passed &= report.passed();
            }
            checked.push(name.as_str());
        }

        if !checked.is_empty() {
            passed &= self.check_completeness(&checked);
        }
        Ok(passed)
    }

    fn check_completeness(&self, names: &[&str]) -> bool {
        let work_dir = self.toolbox.repository.work_dir();
        let template = match ReferenceTemplate::resolve(
            self.config,
            work_dir,
            self.toolbox.gettext,
            self.toolbox.fetcher,
        ) {
            Ok(Some(template)) => template,
            Ok(None) => return true,
            Err(e) => {
                error!("{}", e);
                return false;
            }
        };

        let mut checker =
            CompletenessChecker::new(self.toolbox.gettext, &template, self.config.completeness);
        let mut complete = true;
        for name in names {
            let (summary, report) = checker.check_file(name, &work_dir.join(name));
            report.emit(&format!("[{}]", name));
            debug!(
                file = name,
                missing = summary.counts.missing,
                fuzzy = summary.counts.fuzzy,
                "compared with template"
            );
            complete &= report.passed();
        }
        complete
    }

    /// Checks the spelling of config variables in `po/git.pot`, see
    /// [`pot::check_template`].
    pub fn check_template(&self) -> Result<FileReport, L10nGuardError> {
        pot::check_template(self.toolbox.gettext, self.toolbox.repository.work_dir())
    }

    /// Summarizes the message changes between two file revisions.
    ///
    /// `revisions` and `files` are paired as described in
    /// [`diff::resolve_revisions`].
    pub fn diff(
        &self,
        revisions: &[String],
        files: &[String],
    ) -> Result<Vec<String>, L10nGuardError> {
        let (src, dest) = diff::resolve_revisions(revisions, files)?;
        diff::diff_revisions(self.toolbox.repository, self.toolbox.gettext, &src, &dest)
    }

    /// Merges the reference template into a translation and checks it.
    pub fn update_po_file(&self, name: &str) -> Result<FileReport, L10nGuardError> {
        maintain::update_po_file(self.toolbox, self.config, name)
    }

    /// Starts a new translation, returning its path.
    pub fn init_po_file(&self, name: &str, core: bool) -> Result<String, L10nGuardError> {
        maintain::init_po_file(self.toolbox, name, core)
    }

    /// Reads the team roster of the work tree.
    pub fn load_roster(&self) -> Result<Roster, L10nGuardError> {
        Roster::load(&self.toolbox.repository.work_dir().join(TEAMS_FILE))
    }
}

/// Translation files directly inside `po/`, sorted by name.
fn list_po_files(work_dir: &Path) -> Result<Vec<String>, L10nGuardError> {
    let mut names = Vec::new();
    let po_dir = work_dir.join(PO_DIR);
    if !po_dir.is_dir() {
        return Ok(names);
    }
    for entry in fs::read_dir(po_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.ends_with(".po") {
            names.push(format!("{}/{}", PO_DIR, file_name));
        }
    }
    names.sort();
    Ok(names)
}
