//! # Change Scope
//!
//! Decides whether the paths touched by a commit belong to the translation
//! directory and checks the translation files and the team roster the commit
//! changed, as they were at that revision.
//!
//! A commit that only touches paths outside `po/` is not a localization
//! commit at all. In CI, the walk stops at such a commit: for a push event
//! this is only a warning, for every other event it fails the commit.

use l10n_guard_tools::models::ChangeStatus;
use l10n_guard_tools::Repository;
use tracing::{debug, instrument};

use crate::commit::abbrev_commit;
use crate::config::{CheckConfig, CiEvent, PO_DIR, TEAMS_FILE};
use crate::outcome::CheckOutcome;
use crate::po::{locale_of, po_path, PoChecker};
use crate::teams::Roster;

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;

/// Result of the scope analysis of one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeReport {
    pub outcome: CheckOutcome,

    /// Translation files changed by the commit, e.g. `po/zh_CN.po`
    pub po_files: Vec<String>,
}

/// Paths changed by a commit, split by whether they may be changed by a
/// localization commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Partition {
    in_scope: Vec<String>,
    out_of_scope: Vec<String>,
}

fn partition(paths: impl IntoIterator<Item = String>) -> Partition {
    let prefix = format!("{}/", PO_DIR);
    let mut partition = Partition::default();
    for path in paths {
        if !path.starts_with(&prefix) {
            partition.out_of_scope.push(path);
        } else if path == TEAMS_FILE || path.ends_with(".po") {
            partition.in_scope.push(path);
        }
    }
    partition
}

/// Checks the changes of `commit`.
///
/// # Arguments
///
/// * `repository` - Repository the commit belongs to
/// * `checker` - Checks applied to each changed translation file
/// * `config` - Provides the CI event of the run
/// * `commit` - Full commit ID
///
/// # Returns
///
/// The outcome of the analysis, which may ask the walk to stop, and the
/// translation files the commit changed.
#[instrument(skip(repository, checker, config), fields(commit = %abbrev_commit(commit)))]
pub fn check_commit_changes(
    repository: &dyn Repository,
    checker: &PoChecker<'_>,
    config: &CheckConfig,
    commit: &str,
) -> ScopeReport {
    let mut report = ScopeReport::default();
    let abbrev = abbrev_commit(commit);

    let changes = match repository.changed_paths(commit) {
        Ok(changes) => changes,
        Err(e) => {
            report
                .outcome
                .error(format!("fail to run git-diff-tree: {}", e));
            report.outcome.halt();
            return report;
        }
    };
    let partition = partition(
        changes
            .into_iter()
            .filter(|c| {
                matches!(
                    c.status,
                    ChangeStatus::Added | ChangeStatus::Copied | ChangeStatus::Modified
                )
            })
            .map(|c| c.path),
    );
    debug!(
        in_scope = partition.in_scope.len(),
        out_of_scope = partition.out_of_scope.len(),
        "classified changes"
    );

    if !partition.out_of_scope.is_empty() {
        let mut message = format!("found changes beyond \"{}/\" directory:", PO_DIR);
        for path in &partition.out_of_scope {
            message.push_str("\n\t\t");
            message.push_str(path);
        }

        match (&config.ci_event, partition.in_scope.is_empty()) {
            (Some(CiEvent::Push), true) => {
                report.outcome.warn(message);
                report
                    .outcome
                    .warn("break because this commit is not for git-l10n");
                report.outcome.halt();
                return report;
            }
            (Some(_), true) => {
                report.outcome.error(message);
                report
                    .outcome
                    .error("break because this commit is not for git-l10n");
                report.outcome.halt();
                return report;
            }
            _ => report.outcome.error(message),
        }
    }

    for path in partition.in_scope {
        let scratch = match repository.checkout_blob(commit, &path) {
            Ok(scratch) => scratch,
            Err(e) => {
                report.outcome.error(format!(
                    "fail to checkout {} of revision {}: {}",
                    path, abbrev, e
                ));
                continue;
            }
        };

        if path == TEAMS_FILE {
            match Roster::load(scratch.path()) {
                Ok(roster) => {
                    for error in roster.errors {
                        report.outcome.error(error);
                    }
                }
                Err(e) => report
                    .outcome
                    .error(format!("fail to read {}: {}", TEAMS_FILE, e)),
            }
            continue;
        }

        let locale = locale_of(&path).to_string();
        let prompt = format!("[{}@{}]", po_path(&locale), abbrev);
        let file_report = checker.check_po_file(&locale, scratch.path());
        file_report.emit(&prompt);
        if !file_report.passed() {
            report
                .outcome
                .error(format!("{} does not pass the checks", po_path(&locale)));
        }
        report.po_files.push(path);
    }

    report
}
