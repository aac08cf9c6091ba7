//! # Encoding Check
//!
//! Validates the identity headers and message lines of a commit against the
//! encoding it declares.

use encoding_rs::Encoding;

use crate::commit::CommitRecord;
use crate::outcome::CheckOutcome;

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod tests;

/// Whether `label` names UTF-8, ignoring case and dashes.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::checks::encoding::is_utf8_label;
///
/// assert!(is_utf8_label("UTF-8"));
/// assert!(is_utf8_label("utf8"));
/// assert!(!is_utf8_label("ISO-8859-1"));
/// ```
pub fn is_utf8_label(label: &str) -> bool {
    label.to_lowercase().replace('-', "") == "utf8"
}

/// Checks that author, committer and every message line of `record` are
/// valid in the declared encoding.
///
/// UTF-8 content is validated strictly. Any other encoding is decoded with
/// a transcoder that rejects malformed sequences; an encoding the transcoder
/// does not know is an error in itself.
pub fn check_encoding(record: &CommitRecord) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let label = record.encoding();

    let transcoder = if is_utf8_label(label) {
        None
    } else {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => Some(encoding),
            None => {
                outcome.error(format!("unsupported encoding \"{}\"", label));
                return outcome;
            }
        }
    };

    let lines = record
        .headers
        .author
        .iter()
        .chain(record.headers.committer.iter())
        .chain(record.message.iter());

    for line in lines {
        let valid = match transcoder {
            None => std::str::from_utf8(line).is_ok(),
            Some(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(line)
                .is_some(),
        };
        if !valid {
            outcome.error(format!(
                "bad {} characters in: \"{}\"",
                if transcoder.is_some() { label } else { "UTF-8" },
                String::from_utf8_lossy(line)
            ));
        }
    }

    outcome
}
