//! # Body Check
//!
//! Validates blank lines, line widths and the sign-off trailer of a commit
//! message body.

use crate::checks::subject::abbrev_message;
use crate::commit::CommitRecord;
use crate::config::{BODY_WIDTH_LIMIT, SIGNED_OFF_BY_PREFIX};
use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;

/// Checks the message body of `record`.
///
/// Every commit needs a body without a trailing blank line and without two
/// consecutive blank lines. Merge commits are exempt from the remaining
/// rules. For all other commits the last paragraph is the signature block:
/// it must hold a `Signed-off-by: ` trailer and every line in it must be a
/// `key: value` pair. Lines before the signature block are at most 72 bytes
/// wide.
pub fn check_body(record: &CommitRecord) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let lines = record.message_lines();
    let count = lines.len();

    match count {
        // Reported by the subject check.
        0 => return outcome,
        1 => {
            if record.is_merge() {
                outcome.error("empty body of the commit message, set merge.log=true");
            } else {
                outcome.error("empty body of the commit message, no s-o-b signature");
            }
            return outcome;
        }
        _ => {}
    }

    if lines[count - 1].is_empty() {
        outcome.error("empty line at the end of the commit message");
        return outcome;
    }

    let mut empty_run = 0;
    for (index, line) in lines.iter().enumerate() {
        empty_run = if line.is_empty() { empty_run + 1 } else { 0 };
        if empty_run > 1 {
            outcome.error(format!(
                "too many empty lines found at line #{}",
                index + 1
            ));
            return outcome;
        }
    }

    if record.is_merge() {
        return outcome;
    }

    // A missing blank line after the subject is reported by the subject check.
    let body_start = if lines[1].is_empty() { 2 } else { 1 };

    let signature_start = (body_start..count)
        .filter(|i| lines[*i].is_empty())
        .last()
        .map_or(body_start, |i| i + 1);

    let has_sign_off = lines[signature_start..]
        .iter()
        .any(|line| line.starts_with(SIGNED_OFF_BY_PREFIX));

    // Trailers may carry long addresses, so only the text above them is
    // checked for width.
    let body_end = if has_sign_off {
        signature_start
    } else {
        outcome.error(format!(
            "cannot find \"{}\" signature",
            SIGNED_OFF_BY_PREFIX.trim_end()
        ));
        count
    };

    for (index, raw) in record.message.iter().enumerate().take(body_end).skip(body_start) {
        if raw.len() > BODY_WIDTH_LIMIT {
            outcome.error(format!(
                "line #{} (\"{}\") is too long: {} > {}",
                index + 1,
                abbrev_message(&lines[index]),
                raw.len(),
                BODY_WIDTH_LIMIT
            ));
        }
    }

    if has_sign_off {
        if let Some((index, line)) = lines
            .iter()
            .enumerate()
            .skip(signature_start)
            .find(|(_, line)| !line.contains(": "))
        {
            outcome.error(format!(
                "no colon in signature at line #{}: \"{}\"",
                index + 1,
                abbrev_message(line)
            ));
        }
    }

    outcome
}
