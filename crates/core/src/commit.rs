//! # Commit Object Parser
//!
//! Parses the raw text of a commit object, as printed by
//! `git cat-file commit <id>`, into a [`CommitRecord`].
//!
//! A raw commit consists of `key value` header lines, one blank line, and the
//! free-text message. The parser never stops on the first structural problem:
//! every malformed line is recorded as an error in [`ParsedCommit::errors`]
//! and parsing continues, so a single pass surfaces every problem of the
//! commit.
//!
//! Header values and message lines are kept as raw bytes because the commit
//! may declare a non-UTF-8 encoding; decoding is left to the checks.

use lazy_static::lazy_static;
use regex::Regex;

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;

/// Encoding assumed when a commit has no `encoding` header
pub const DEFAULT_ENCODING: &str = "UTF-8";

lazy_static! {
    static ref OBJECT_ID_REGEX: Regex =
        Regex::new(r"^[0-9a-f]{7,40}[0-9]*$").expect("Failed to compile object id regex");
}

/// Shortens an object ID to 7 characters for display.
///
/// Anything that does not look like a hexadecimal object ID, such as a
/// symbolic revision, is returned unchanged.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::commit::abbrev_commit;
///
/// assert_eq!(abbrev_commit("1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d"), "1a2b3c4");
/// assert_eq!(abbrev_commit("HEAD"), "HEAD");
/// ```
pub fn abbrev_commit(id: &str) -> &str {
    if OBJECT_ID_REGEX.is_match(id) {
        &id[..7]
    } else {
        id
    }
}

/// Headers of a commit object.
///
/// Signature blocks are opaque to every check, so only their presence is
/// recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitHeaders {
    pub tree: Option<String>,
    pub parents: Vec<String>,
    pub author: Option<Vec<u8>>,
    pub committer: Option<Vec<u8>>,
    pub encoding: Option<String>,
    pub gpgsig: bool,
    pub gpgsig_sha256: bool,
    pub mergetag: bool,
}

/// One parsed commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full object ID
    pub id: String,

    pub headers: CommitHeaders,

    /// Message lines without their line terminators
    pub message: Vec<Vec<u8>>,
}

/// A commit record together with the structural errors found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub record: CommitRecord,
    pub errors: Vec<String>,
}

impl ParsedCommit {
    /// Whether the raw object was well-formed.
    pub fn is_well_formed(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CommitRecord {
    /// Parses a raw commit object.
    ///
    /// # Arguments
    ///
    /// * `id` - The object ID the raw content belongs to
    /// * `raw` - The content printed by `git cat-file commit`
    ///
    /// # Returns
    ///
    /// The parsed commit and every structural error encountered. Parsing
    /// never fails as a whole.
    ///
    /// # Examples
    ///
    /// ```
    /// use l10n_guard_core::commit::CommitRecord;
    ///
    /// let raw = b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
    /// author A U Thor <author@example.com> 1112911993 -0700\n\
    /// committer A U Thor <author@example.com> 1112911993 -0700\n\
    /// \n\
    /// l10n: zh_CN: update translation\n";
    ///
    /// let parsed = CommitRecord::parse("4b825dc642cb6eb9a060e54bf8d69288fbee4904", raw);
    /// assert!(parsed.is_well_formed());
    /// assert_eq!(parsed.record.message.len(), 1);
    /// assert!(!parsed.record.is_merge());
    /// ```
    pub fn parse(id: &str, raw: &[u8]) -> ParsedCommit {
        let mut headers = CommitHeaders::default();
        let mut message = Vec::new();
        let mut errors = Vec::new();

        let mut lines: Vec<&[u8]> = raw.split(|b| *b == b'\n').collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut in_headers = true;
        let mut index = 0;
        while index < lines.len() {
            let line = lines[index];
            index += 1;

            if !in_headers {
                message.push(line.to_vec());
                continue;
            }
            if line.is_empty() {
                in_headers = false;
                continue;
            }

            let text = String::from_utf8_lossy(line);
            let Some(split) = line.iter().position(|b| *b == b' ') else {
                errors.push(format!("cannot parse commit header: {}", text));
                continue;
            };
            let key = &line[..split];
            let value = &line[split + 1..];

            match key {
                b"tree" => {
                    set_once(&mut headers.tree, lossy(value), &text, &mut errors);
                }
                b"encoding" => {
                    set_once(&mut headers.encoding, lossy(value), &text, &mut errors);
                }
                b"author" => {
                    set_once(&mut headers.author, value.to_vec(), &text, &mut errors);
                }
                b"committer" => {
                    set_once(&mut headers.committer, value.to_vec(), &text, &mut errors);
                }
                b"parent" => headers.parents.push(lossy(value)),
                b"gpgsig" | b"gpgsig-sha256" | b"mergetag" => {
                    let flag = match key {
                        b"gpgsig" => &mut headers.gpgsig,
                        b"gpgsig-sha256" => &mut headers.gpgsig_sha256,
                        _ => &mut headers.mergetag,
                    };
                    if *flag {
                        errors.push(format!("duplicate header: {}", text));
                    }
                    *flag = true;

                    // Continuation lines start with a single space.
                    loop {
                        match lines.get(index) {
                            Some(next) if next.first() == Some(&b' ') => index += 1,
                            Some(_) => break,
                            None => {
                                errors.push(format!(
                                    "header \"{}\" is too short, early EOF",
                                    String::from_utf8_lossy(key)
                                ));
                                break;
                            }
                        }
                    }
                }
                _ => errors.push(format!("unknown commit header: {}", text)),
            }
        }

        ParsedCommit {
            record: CommitRecord {
                id: id.to_string(),
                headers,
                message,
            },
            errors,
        }
    }

    /// Abbreviated object ID for display.
    pub fn abbrev(&self) -> &str {
        abbrev_commit(&self.id)
    }

    /// Whether the commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.headers.parents.len() > 1
    }

    /// Whether the commit carries a GPG signature block.
    pub fn has_signature(&self) -> bool {
        self.headers.gpgsig || self.headers.gpgsig_sha256
    }

    /// The declared encoding, or [`DEFAULT_ENCODING`].
    pub fn encoding(&self) -> &str {
        self.headers.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// Message lines decoded as UTF-8, with invalid sequences replaced.
    pub fn message_lines(&self) -> Vec<String> {
        self.message.iter().map(|l| lossy(l)).collect()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn set_once<T>(slot: &mut Option<T>, value: T, line: &str, errors: &mut Vec<String>) {
    if slot.is_some() {
        errors.push(format!("duplicate header: {}", line));
    } else {
        *slot = Some(value);
    }
}
