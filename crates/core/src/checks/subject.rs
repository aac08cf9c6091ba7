//! # Subject Check
//!
//! Validates the first line of a commit message.

use crate::commit::CommitRecord;
use crate::config::{
    MERGE_SUBJECT_PREFIX, SUBJECT_PREFIX, SUBJECT_WIDTH_LIMIT, SUBJECT_WIDTH_TIERS,
};
use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "subject_tests.rs"]
mod tests;

/// Checks the subject line of `record`.
///
/// # Rules
///
/// - Merge commits start with `Merge `, all others with `l10n: `
/// - The subject is at most 72 bytes; the soft width tiers only warn
/// - The subject is not empty and does not end with a period
/// - Only printable ASCII characters are used
/// - A blank line separates the subject from the body
///
/// # Examples
///
/// ```
/// use l10n_guard_core::checks::subject::check_subject;
/// use l10n_guard_core::commit::CommitRecord;
///
/// let raw = b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\nl10n: de: update translation\n";
/// let parsed = CommitRecord::parse("4b825dc642cb6eb9a060e54bf8d69288fbee4904", raw);
///
/// assert!(check_subject(&parsed.record).is_ok());
/// ```
pub fn check_subject(record: &CommitRecord) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let lines = &record.message;

    match lines.len() {
        0 => {
            outcome.error("do not have any commit message");
            return outcome;
        }
        1 => {}
        _ => {
            if !lines[1].is_empty() {
                outcome.error("no blank line between subject and body of commit message");
            }
        }
    }

    let raw = &lines[0];
    let subject = String::from_utf8_lossy(raw);
    let width = raw.len();

    if record.is_merge() {
        if !subject.starts_with(MERGE_SUBJECT_PREFIX) {
            outcome.error(format!(
                "merge commit does not have prefix \"{}\" in subject",
                MERGE_SUBJECT_PREFIX.trim_end()
            ));
        }
    } else if !subject.starts_with(SUBJECT_PREFIX) {
        outcome.error(format!(
            "subject (\"{}\") does not have prefix \"{}\"",
            abbrev_message(&subject),
            SUBJECT_PREFIX.trim_end()
        ));
    }

    if width > SUBJECT_WIDTH_LIMIT {
        outcome.error(format!(
            "subject (\"{}\") is too long: {} > {}",
            abbrev_message(&subject),
            width,
            SUBJECT_WIDTH_LIMIT
        ));
    }
    if let Some((tier, percent)) = SUBJECT_WIDTH_TIERS.iter().find(|(tier, _)| width > *tier) {
        outcome.warn(format!(
            "subject length {} > {}, about {}% commits have a subject less than {} characters",
            width, tier, percent, tier
        ));
    }

    if width == 0 {
        outcome.error("subject is empty");
        return outcome;
    }

    if subject.ends_with('.') {
        outcome.error("subject should not end with period");
    }

    if let Some(c) = subject.chars().find(|c| !(' '..='~').contains(c)) {
        let shown = if c.is_control() {
            c.escape_default().to_string()
        } else {
            c.to_string()
        };
        outcome.error(format!("subject has non-ascii character \"{}\"", shown));
    }

    outcome
}

/// Shortens a long line for display.
///
/// The line is cut at the first space, `(` or `"` found after at least one
/// other character and past the eighth byte, and ` ...` is appended. Lines
/// without such a position are returned unchanged.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::checks::subject::abbrev_message;
///
/// assert_eq!(abbrev_message("l10n: zh_CN: update translation"), "l10n: zh_CN: ...");
/// assert_eq!(abbrev_message("short"), "short");
/// ```
pub fn abbrev_message(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut seen_other = false;
    for (pos, byte) in bytes.iter().enumerate() {
        match byte {
            b' ' | b'(' | b'"' => {
                if seen_other && pos > 7 {
                    return format!("{} ...", &line[..pos]);
                }
            }
            _ => seen_other = true,
        }
    }
    line.to_string()
}
