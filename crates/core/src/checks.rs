//! # Commit Rule Checks
//!
//! This module contains the rules applied to every parsed commit.
//!
//! The checks are organized into submodules:
//! - `identity`: author and committer format and date sanity
//! - `subject`: prefix, width and character set of the subject line
//! - `body`: blank lines, line width and the sign-off trailer
//! - `encoding`: message bytes against the declared encoding
//! - `gpg`: signature verification through the repository
//!
//! The checks are independent and never short-circuit each other; their
//! findings are merged into one [`CheckOutcome`] per commit.

use chrono::Utc;
use l10n_guard_tools::Repository;
use tracing::debug;

use crate::commit::CommitRecord;
use crate::config::CheckConfig;
use crate::outcome::CheckOutcome;

pub mod body;
pub mod encoding;
pub mod gpg;
pub mod identity;
pub mod subject;

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;

/// Inputs of the commit checks that do not come from the commit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckContext {
    /// Current time as a Unix timestamp
    pub now: i64,

    /// Seconds a commit date may lie in the future
    pub clock_drift_tolerance: i64,

    /// Do not verify signatures
    pub skip_gpg: bool,
}

impl CheckContext {
    /// Builds the context for a run, taking the current time from the clock.
    pub fn from_config(config: &CheckConfig) -> Self {
        Self {
            now: Utc::now().timestamp(),
            clock_drift_tolerance: config.clock_drift_tolerance(),
            skip_gpg: config.skip_gpg(),
        }
    }
}

/// Runs every rule check on a parsed commit.
///
/// # Arguments
///
/// * `record` - The commit to check
/// * `context` - Time and signature settings
/// * `repository` - Used to verify signatures
///
/// # Returns
///
/// The merged outcome of all checks
pub fn check_commit(
    record: &CommitRecord,
    context: &CheckContext,
    repository: &dyn Repository,
) -> CheckOutcome {
    let mut outcome = identity::check_author_committer(record, context);
    outcome.merge(subject::check_subject(record));
    outcome.merge(body::check_body(record));
    outcome.merge(encoding::check_encoding(record));
    outcome.merge(gpg::check_signature(record, context, repository));
    outcome
}

/// Reads commit `id` from the repository, parses it and runs every rule
/// check on it.
///
/// Structural parse errors are reported alongside the rule violations.
pub fn check_commit_log(
    repository: &dyn Repository,
    id: &str,
    context: &CheckContext,
) -> CheckOutcome {
    let raw = match repository.cat_commit(id) {
        Ok(raw) => raw,
        Err(e) => {
            let mut outcome = CheckOutcome::default();
            outcome.error(format!("fail to get commit log: {}", e));
            return outcome;
        }
    };

    let parsed = CommitRecord::parse(id, &raw);
    debug!(
        commit = parsed.record.abbrev(),
        lines = parsed.record.message.len(),
        "parsed commit"
    );

    let mut outcome = CheckOutcome::default();
    for error in parsed.errors {
        outcome.error(error);
    }
    outcome.merge(check_commit(&parsed.record, context, repository));
    outcome
}
