//! # Check Outcome
//!
//! The per-commit result of running the scope analysis and the commit rule
//! checks.
//!
//! An outcome accumulates error and warning messages instead of returning on
//! the first problem, so that one pass over a commit reports everything that
//! is wrong with it. The walker additionally looks at
//! [`CheckOutcome::should_break`] to decide whether further commits of the
//! range are processed at all.

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

/// Accumulated result of checking one commit.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::outcome::CheckOutcome;
///
/// let mut outcome = CheckOutcome::default();
/// assert!(outcome.is_ok());
///
/// outcome.warn("author and committer are different");
/// assert!(outcome.is_ok());
///
/// outcome.error("subject should not end with period");
/// assert!(!outcome.is_ok());
/// assert_eq!(outcome.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Rule violations that fail the commit
    pub errors: Vec<String>,

    /// Findings that are reported but do not fail the commit
    pub warnings: Vec<String>,

    /// Stop processing the remaining commits of the range
    pub should_break: bool,
}

impl CheckOutcome {
    /// Whether no error has been recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Marks the walk to stop after this commit.
    pub fn halt(&mut self) {
        self.should_break = true;
    }

    /// Appends the messages of `other`; a break in either outcome is kept.
    pub fn merge(&mut self, other: CheckOutcome) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.should_break |= other.should_break;
    }
}
