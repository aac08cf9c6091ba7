//! # Signature Check

use l10n_guard_tools::Repository;
use tracing::debug;

use crate::checks::CheckContext;
use crate::commit::CommitRecord;
use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "gpg_tests.rs"]
mod tests;

/// Verifies the signature of a signed commit with the repository's own
/// verifier.
///
/// Unsigned commits pass. Nothing is verified when signature checks are
/// disabled for the run.
pub fn check_signature(
    record: &CommitRecord,
    context: &CheckContext,
    repository: &dyn Repository,
) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    if context.skip_gpg || !record.has_signature() {
        return outcome;
    }

    debug!(commit = record.abbrev(), "verifying signature");
    match repository.verify_commit(&record.id) {
        Ok(output) if output.success => {}
        Ok(output) => outcome.error(format!("cannot verify gpg-sig: {}", output.status)),
        Err(e) => outcome.error(format!("cannot verify gpg-sig: {}", e)),
    }
    outcome
}
