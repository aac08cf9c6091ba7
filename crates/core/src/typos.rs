//! # Typo Detection
//!
//! Compares the keep words of every original string of a translation with
//! those of its translation and reports the tokens found on one side only.
//!
//! Both strings are normalized first: the locale's smudge rules remove
//! accepted deviations, then the global skip patterns blank out text that
//! is free to change in translation, such as `<placeholder>` names and the
//! positions of `printf` arguments.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use l10n_guard_tools::mo::{Entry, MoCatalog};
use l10n_guard_tools::models::ScratchFile;
use l10n_guard_tools::GettextToolchain;
use regex::Regex;
use tracing::debug;

use crate::config::ReportLevel;
use crate::keep_words::{extract_keep_words, extract_keep_words_from_translation};
use crate::report::{FileReport, Severity};
use crate::smudge::SmudgeRegistry;

#[cfg(test)]
#[path = "typos_tests.rs"]
mod tests;

lazy_static! {
    static ref SKIP_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"\b(git-directories|e\.g\.?|i\.e\.?)\b")
                .expect("Failed to compile abbreviation pattern"),
            "...",
        ),
        // <variable_name>
        (
            Regex::new(r"<[^>]+>").expect("Failed to compile placeholder pattern"),
            "<...>",
        ),
        // [variable_name]
        (
            Regex::new(r"\[[^\]]+\]").expect("Failed to compile placeholder pattern"),
            "[...]",
        ),
        // %2$s, %2$.*1$s
        (
            Regex::new(r"%[0-9]+(\$\.\*[0-9]*)?\$").expect("Failed to compile printf pattern"),
            "%...",
        ),
    ];
}

/// Blanks out the parts of `text` that translations may change freely.
///
/// Applying the patterns to their own output changes nothing.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::typos::apply_skip_patterns;
///
/// assert_eq!(apply_skip_patterns("git log [<options>] <path>"), "git log [...] <...>");
/// assert_eq!(apply_skip_patterns("%2$s of %1$d"), "%...s of %...d");
/// ```
pub fn apply_skip_patterns(text: &str) -> String {
    SKIP_PATTERNS
        .iter()
        .fold(text.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}

/// Checks message pairs of one locale for keep word mismatches.
#[derive(Debug, Clone, Copy)]
pub struct TypoDetector<'a> {
    registry: &'a SmudgeRegistry,
    locale: &'a str,
    level: ReportLevel,
}

impl<'a> TypoDetector<'a> {
    /// Creates a detector for `locale`.
    ///
    /// # Arguments
    ///
    /// * `registry` - Smudge rules to normalize translations with
    /// * `locale` - Locale of the translations, e.g. `zh_CN`
    /// * `level` - How mismatches are reported; [`ReportLevel::None`] turns
    ///   the detector off
    pub fn new(registry: &'a SmudgeRegistry, locale: &'a str, level: ReportLevel) -> Self {
        Self {
            registry,
            locale,
            level,
        }
    }

    /// Keep words present in only one of the normalized strings, sorted.
    pub fn mismatched_keep_words(&self, msgid: &str, msgstr: &str) -> Vec<String> {
        let (msgid, msgstr) = self.registry.normalize(self.locale, msgid, msgstr);
        let msgid = apply_skip_patterns(&msgid);
        let msgstr = apply_skip_patterns(&msgstr);

        let source = extract_keep_words(&msgid);
        let target = if self.registry.fragment_filter(self.locale) {
            extract_keep_words_from_translation(&msgstr)
        } else {
            extract_keep_words(&msgstr)
        };

        // Both sets are ordered, so their symmetric difference is too.
        source.symmetric_difference(&target).cloned().collect()
    }

    /// Checks one message pair.
    ///
    /// Headers, untranslated messages and a disabled detector produce an
    /// empty report. A mismatch is reported with the strings as they appear
    /// in the file, followed by an empty separator line.
    pub fn check_entry(&self, msgid: &str, msgstr: &str) -> FileReport {
        let mut report = FileReport::default();
        let severity = match self.level {
            ReportLevel::None => return report,
            ReportLevel::Warn => Severity::Warning,
            ReportLevel::Error => Severity::Error,
        };
        if msgid.is_empty() || msgstr.is_empty() {
            return report;
        }

        let mismatched = self.mismatched_keep_words(msgid, msgstr);
        if !mismatched.is_empty() {
            report.push(
                severity,
                format!(
                    "mismatched patterns: {}\n>> msgid: {}\n>> msgstr: {}",
                    mismatched.join(", "),
                    msgid,
                    msgstr
                ),
            );
            report.push(severity, "");
        }
        report
    }

    /// Checks every message of a compiled catalog.
    ///
    /// Plural translations are paired with the singular original for the
    /// first form and with the plural original for all others.
    pub fn check_catalog(&self, catalog: &MoCatalog) -> FileReport {
        let mut report = FileReport::default();
        for entry in catalog.entries() {
            match entry {
                Ok(entry) if entry.is_header() => {}
                Ok(entry) => {
                    for (msgid, msgstr) in message_pairs(&entry) {
                        report.extend(self.check_entry(msgid, msgstr));
                    }
                }
                Err(e) => report.error(format!("fail to iterate messages: {}", e)),
            }
        }
        report
    }

    /// Compiles `po_file` and checks every message in it.
    ///
    /// A compiler failure is only a warning as long as a catalog was still
    /// written; an empty or missing catalog is an error.
    pub fn check_po_file(&self, gettext: &dyn GettextToolchain, po_file: &Path) -> FileReport {
        let mut report = FileReport::default();
        if self.level == ReportLevel::None {
            return report;
        }

        let mo_file = match ScratchFile::new(".mo") {
            Ok(file) => file,
            Err(e) => {
                report.error(format!("fail to create tmpfile: {}", e));
                return report;
            }
        };

        debug!(file = %po_file.display(), "compiling catalog for typo check");
        match gettext.compile(po_file, mo_file.path()) {
            Ok(output) if output.success => {}
            Ok(output) => report.warning(format!(
                "fail to compile {}: {}",
                po_file.display(),
                output.status
            )),
            Err(e) => report.warning(format!("fail to compile {}: {}", po_file.display(), e)),
        }

        let generated = fs::metadata(mo_file.path()).is_ok_and(|m| m.len() > 0);
        if !generated {
            report.error("fail to generate mofile");
            return report;
        }

        match MoCatalog::open(mo_file.path()) {
            Ok(catalog) => report.extend(self.check_catalog(&catalog)),
            Err(e) => report.error(format!("fail to open mofile: {}", e)),
        }
        report
    }
}

fn message_pairs(entry: &Entry) -> Vec<(&str, &str)> {
    let plural = entry.id_plural.as_deref();
    entry
        .translations
        .iter()
        .enumerate()
        .map(|(index, translation)| match plural {
            Some(plural) if index > 0 => (plural, translation.as_str()),
            _ => (entry.id.as_str(), translation.as_str()),
        })
        .collect()
}
