//! # Author and Committer Check
//!
//! Validates the format of the `author` and `committer` headers and the
//! plausibility of their dates.

use crate::checks::CheckContext;
use crate::commit::CommitRecord;
use crate::config::{IDENTITY_REGEX, OLD_COMMIT_DAYS};
use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

/// Checks both identity headers of `record`.
///
/// A missing header is an error that ends the check. A malformed header or a
/// date in the future is an error; a very old date and differing author and
/// committer identities are warnings.
pub fn check_author_committer(record: &CommitRecord, context: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    let (Some(author), Some(committer)) = (&record.headers.author, &record.headers.committer)
    else {
        let missing = if record.headers.author.is_none() {
            "author"
        } else {
            "committer"
        };
        outcome.error(format!("cannot find {} field in commit", missing));
        return outcome;
    };

    let author = check_identity("author", author, context, &mut outcome);
    let committer = check_identity("committer", committer, context, &mut outcome);

    if let (Some(author), Some(committer)) = (author, committer) {
        if author != committer {
            outcome.warn(format!(
                "author ({}) and committer ({}) are different",
                author, committer
            ));
        }
    }

    outcome
}

/// Checks one identity header and returns its `Name <email>` part.
fn check_identity(
    role: &str,
    value: &[u8],
    context: &CheckContext,
    outcome: &mut CheckOutcome,
) -> Option<String> {
    let value = String::from_utf8_lossy(value);
    let Some(captures) = IDENTITY_REGEX.captures(&value) else {
        outcome.error(format!("bad format for {} field: {}", role, value));
        return None;
    };

    let ident = captures[1].to_string();
    match captures[2].parse::<i64>() {
        Ok(timestamp) => check_date(role, timestamp, context, outcome),
        Err(_) => outcome.error(format!(
            "bad {} date: bad timestamp: {}",
            role, &captures[2]
        )),
    }
    Some(ident)
}

fn check_date(role: &str, timestamp: i64, context: &CheckContext, outcome: &mut CheckOutcome) {
    if timestamp > context.now + context.clock_drift_tolerance {
        outcome.error(format!(
            "bad {} date: date is in the future, {} from now",
            role,
            format_duration(timestamp - context.now)
        ));
    } else if context.now - timestamp > OLD_COMMIT_DAYS * 24 * 3600 {
        outcome.warn(format!(
            "too old {} date ({} earlier). Please check your system clock!",
            role,
            format_duration(context.now - timestamp)
        ));
    }
}

/// Formats a number of seconds as hours, minutes and seconds.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::checks::identity::format_duration;
///
/// assert_eq!(format_duration(3723), "1h2m3s");
/// assert_eq!(format_duration(125), "2m5s");
/// assert_eq!(format_duration(7), "7s");
/// ```
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
