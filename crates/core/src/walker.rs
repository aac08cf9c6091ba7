//! # Commit Range Walker
//!
//! Entry point for checking a range of commits: resolves the range, guards
//! against accidentally huge ranges, runs the scope analysis and the commit
//! rule checks on every commit from oldest to newest, and finally compares
//! the translation files touched by the range with the reference template.
//! The comparison uses the versions at the last commit the walk reached, so
//! commits after a break or beyond the ceiling never contribute.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info, instrument, warn};

use crate::checks::{check_commit_log, CheckContext};
use crate::commit::abbrev_commit;
use crate::completeness::{CompletenessChecker, ReferenceTemplate};
use crate::config::{CheckConfig, DEFAULT_COMMIT_RANGE, PO_DIR};
use crate::errors::L10nGuardError;
use crate::outcome::CheckOutcome;
use crate::po::{locale_of, po_path, PoChecker};
use crate::report::emit_outcome;
use crate::scope::check_commit_changes;
use crate::Toolbox;

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;

lazy_static! {
    static ref ZERO_BOUNDARY_REGEX: Regex =
        Regex::new(r"^0{40,}\.\.").expect("Failed to compile zero boundary regex");
}

/// Revision arguments with the all-zero boundary of new branches removed.
///
/// Hooks receive `0000000000000000000000000000000000000000..<new>` for a
/// newly created branch, which `git rev-list` rejects.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::walker::normalize_range_args;
///
/// let args = vec![format!("{}..HEAD", "0".repeat(40))];
/// assert_eq!(normalize_range_args(&args), vec!["HEAD"]);
/// assert_eq!(normalize_range_args(&[]), vec!["HEAD@{u}..HEAD"]);
/// ```
pub fn normalize_range_args(args: &[String]) -> Vec<String> {
    if args.is_empty() {
        return vec![DEFAULT_COMMIT_RANGE.to_string()];
    }
    args.iter()
        .map(|arg| ZERO_BOUNDARY_REGEX.replace(arg, "").into_owned())
        .collect()
}

/// Pass and fail counts of a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitTally {
    /// Commits selected for checking
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl CommitTally {
    fn record(&mut self, outcome: &CheckOutcome) {
        if !outcome.is_ok() {
            self.failed += 1;
        } else if !outcome.should_break {
            self.passed += 1;
        }
    }

    /// Commits that were neither passed nor failed, including those never
    /// reached because the walk stopped early.
    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.passed + self.failed)
    }

    /// The summary line printed after a walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use l10n_guard_core::walker::CommitTally;
    ///
    /// let tally = CommitTally { total: 3, passed: 1, failed: 1 };
    /// assert_eq!(tally.summary(), "checking commits: 1 passed, 1 failed, 1 skipped.");
    /// ```
    pub fn summary(&self) -> String {
        if self.total == 0 {
            "no commit checked.".to_string()
        } else if self.skipped() > 0 {
            format!(
                "checking commits: {} passed, {} failed, {} skipped.",
                self.passed,
                self.failed,
                self.skipped()
            )
        } else if self.failed > 0 {
            format!(
                "checking commits: {} passed, {} failed.",
                self.passed, self.failed
            )
        } else {
            format!("checking commits: {} passed.", self.passed)
        }
    }
}

/// Result of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub tally: CommitTally,

    /// Translation files touched by the checked commits
    pub po_files: Vec<String>,

    /// Whether the final completeness check found no error
    pub complete: bool,
}

impl WalkSummary {
    /// Whether no commit failed and the touched files are complete.
    pub fn passed(&self) -> bool {
        self.tally.failed == 0 && self.complete
    }
}

/// Checks ranges of commits with the tools of a [`Toolbox`].
pub struct CommitWalker<'a> {
    toolbox: Toolbox<'a>,
    config: &'a CheckConfig,
}

impl<'a> CommitWalker<'a> {
    pub fn new(toolbox: Toolbox<'a>, config: &'a CheckConfig) -> Self {
        Self { toolbox, config }
    }

    /// Checks every commit of the range given by `args`.
    ///
    /// # Arguments
    ///
    /// * `args` - Revision arguments for `git rev-list`; the upstream range
    ///   `HEAD@{u}..HEAD` when empty
    ///
    /// # Returns
    ///
    /// The counts of the walk, or an error when the range cannot be resolved
    /// or the user declined to check an oversized range
    #[instrument(skip(self))]
    pub fn run(&self, args: &[String]) -> Result<WalkSummary, L10nGuardError> {
        let args = normalize_range_args(args);
        let commits = self.toolbox.repository.rev_list(&args)?;
        let count = self.apply_ceiling(commits.len())?;
        let commits = &commits[..count];

        self.prefetch(&args);

        let context = CheckContext::from_config(self.config);
        let checker = PoChecker::new(self.toolbox.gettext, self.config);
        let mut tally = CommitTally {
            total: count,
            ..CommitTally::default()
        };
        let mut po_files = BTreeSet::new();
        let mut last_walked = None;

        for commit in commits {
            last_walked = Some(commit);
            let abbrev = abbrev_commit(commit);
            let scope = check_commit_changes(self.toolbox.repository, &checker, self.config, commit);
            po_files.extend(scope.po_files);

            let mut outcome = scope.outcome;
            if !outcome.should_break {
                outcome.merge(check_commit_log(self.toolbox.repository, commit, &context));
            }
            emit_outcome(abbrev, &outcome);
            debug!(
                commit = abbrev,
                errors = outcome.errors.len(),
                warnings = outcome.warnings.len(),
                "checked commit"
            );

            tally.record(&outcome);
            if outcome.should_break {
                break;
            }
        }
        info!("{}", tally.summary());

        let po_files: Vec<String> = po_files.into_iter().collect();
        let complete = match last_walked {
            Some(tip) if !po_files.is_empty() => self.check_completeness(tip, &po_files),
            _ => true,
        };

        Ok(WalkSummary {
            tally,
            po_files,
            complete,
        })
    }

    /// Number of commits to check out of `found`.
    fn apply_ceiling(&self, found: usize) -> Result<usize, L10nGuardError> {
        let limit = self.config.max_commits;
        if found <= limit || self.config.force {
            return Ok(found);
        }

        if self.toolbox.terminal.is_interactive() {
            let question = format!(
                "too many commits to check ({} > {}), continue to run?",
                found, limit
            );
            if self.toolbox.terminal.confirm(&question, false) {
                return Ok(found);
            }
            return Err(L10nGuardError::TooManyCommits { found, limit });
        }

        warn!("{}", L10nGuardError::TooManyCommits { found, limit });
        Ok(limit)
    }

    /// Fetches the missing translation blobs of a partial clone in one batch.
    fn prefetch(&self, args: &[String]) {
        let repository = self.toolbox.repository;
        if !repository.config_bool("remote.origin.promisor", false) {
            return;
        }

        let pathspec = format!("{}/", PO_DIR);
        let blobs = match repository.missing_blobs(args, self.config.max_commits, &pathspec) {
            Ok(blobs) => blobs,
            Err(e) => {
                warn!("fail to fetch missing blob in batch from partial clone: {}", e);
                return;
            }
        };
        if blobs.is_empty() {
            info!("no missing blobs of po/* in partial clone");
            return;
        }

        match repository.fetch_blobs(&blobs) {
            Ok(output) if output.success => info!(
                "successfully fetched {} missing blob(s) in a batch from partial clone",
                blobs.len()
            ),
            Ok(output) => {
                for line in output.stderr_lines() {
                    warn!("{}", line);
                }
                warn!(
                    "fail to fetch missing blob in batch from partial clone: {}",
                    output.status
                );
            }
            Err(e) => warn!("fail to fetch missing blob in batch from partial clone: {}", e),
        }
    }

    /// Compares the versions of `po_files` at `tip` with the reference
    /// template.
    fn check_completeness(&self, tip: &str, po_files: &[String]) -> bool {
        let toolbox = &self.toolbox;
        let template = match ReferenceTemplate::resolve(
            self.config,
            toolbox.repository.work_dir(),
            toolbox.gettext,
            toolbox.fetcher,
        ) {
            Ok(Some(template)) => template,
            Ok(None) => return true,
            Err(e) => {
                error!("{}", e);
                return false;
            }
        };

        let abbrev = abbrev_commit(tip);
        let mut checker =
            CompletenessChecker::new(toolbox.gettext, &template, self.config.completeness);
        let mut complete = true;
        for path in po_files {
            let name = po_path(locale_of(path));
            let prompt = format!("[{}@{}]", name, abbrev);
            let scratch = match toolbox.repository.checkout_blob(tip, path) {
                Ok(scratch) => scratch,
                Err(e) => {
                    error!(
                        "commit {}: fail to checkout {} of revision {}: {}",
                        abbrev, path, abbrev, e
                    );
                    complete = false;
                    continue;
                }
            };

            let (_, report) = checker.check_file(&name, scratch.path());
            report.emit(&prompt);
            complete &= report.passed();
        }
        complete
    }
}
