//! # Report
//!
//! Leveled diagnostics produced while checking a single translation file,
//! and the functions that write them, together with commit outcomes, to the
//! log.
//!
//! Every diagnostic line of a file report is written with a bracketed prompt
//! such as `[po/zh_CN.po@1a2b3c4]` in front of it, separated by a tab, so the
//! origin of each line stays traceable when many files and revisions are
//! checked in one run.

use tracing::{error, info, warn};

use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Level of a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One message, possibly spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Diagnostics collected for one translation file.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::report::FileReport;
///
/// let mut report = FileReport::default();
/// report.info("12 translated messages.");
/// assert!(report.passed());
///
/// report.error("fail to generate mofile");
/// assert!(!report.passed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Whether no diagnostic is an error.
    pub fn passed(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(message));
    }

    /// Adds a message at `severity`.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    /// Appends all diagnostics of `other`.
    pub fn extend(&mut self, other: FileReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Messages of the given severity, in order.
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }

    /// Writes every diagnostic to the log, one record per line, each line
    /// prefixed with `prompt` and a tab. Empty messages become empty records.
    pub fn emit(&self, prompt: &str) {
        for diagnostic in &self.diagnostics {
            for line in prefixed_lines(prompt, &diagnostic.message) {
                match diagnostic.severity {
                    Severity::Info => info!("{}", line),
                    Severity::Warning => warn!("{}", line),
                    Severity::Error => error!("{}", line),
                }
            }
        }
    }
}

/// Splits `message` into log lines, each prefixed with `prompt` and a tab.
///
/// An empty message yields a single empty line so that blank separators
/// between groups of diagnostics survive.
pub fn prefixed_lines(prompt: &str, message: &str) -> Vec<String> {
    if message.is_empty() {
        return vec![String::new()];
    }
    message
        .split('\n')
        .map(|line| format!("{}\t{}", prompt, line))
        .collect()
}

/// Writes the messages of a commit outcome to the log, each prefixed with
/// `commit <abbrev>: `.
pub fn emit_outcome(abbrev: &str, outcome: &CheckOutcome) {
    for message in &outcome.warnings {
        warn!("commit {}: {}", abbrev, message);
    }
    for message in &outcome.errors {
        error!("commit {}: {}", abbrev, message);
    }
}
