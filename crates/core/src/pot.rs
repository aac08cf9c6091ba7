//! # Template Checks
//!
//! Checks on the message template `po/git.pot` itself rather than on a
//! translation. Config variables are documented in CamelCase in the config
//! manpages, e.g. `core.sharedRepository`, and translators are told to keep
//! them verbatim. A message that spells such a variable in a different case
//! would make every translation wrong, so it is reported here, before the
//! template reaches the translators.

use std::fs;
use std::path::Path;

use l10n_guard_tools::GettextToolchain;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, instrument};

use crate::config::TEMPLATE_FILE;
use crate::errors::L10nGuardError;
use crate::report::FileReport;

#[cfg(test)]
#[path = "pot_tests.rs"]
mod tests;

/// Directory of the config manpage fragments, relative to the work tree
pub const CONFIG_DOC_DIR: &str = "Documentation/config";

lazy_static! {
    static ref MANPAGE_ENTRY_REGEX: Regex =
        Regex::new(r"^[a-z].*::$").expect("Failed to compile manpage entry regex");
    static ref CAMEL_CASE_REGEX: Regex =
        Regex::new(r"[a-z][A-Z][a-z]").expect("Failed to compile camel case regex");
}

/// Extracts the config variables documented in one manpage fragment.
///
/// Entries are definition list terms such as `core.fileMode::` or
/// `gc.pruneExpire, gc.worktreePruneExpire::`. Wildcard names like
/// `advice.*` are skipped, as is the ` (deprecated)` marker.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::pot::parse_manpage_config_variables;
///
/// let page = "core.fileMode::\n\tTells Git...\nadvice.*::\n";
/// assert_eq!(parse_manpage_config_variables(page, false), vec!["core.fileMode"]);
/// ```
pub fn parse_manpage_config_variables(content: &str, only_camel_case: bool) -> Vec<String> {
    let mut configs = Vec::new();
    for line in content.lines() {
        if !MANPAGE_ENTRY_REGEX.is_match(line) {
            continue;
        }
        let line = line.trim_end_matches("::");
        for word in line.split(',') {
            let word = word.trim().replace(" (deprecated)", "");
            if word.is_empty() || word.contains('*') {
                continue;
            }
            if only_camel_case && !CAMEL_CASE_REGEX.is_match(&word) {
                continue;
            }
            configs.push(word);
        }
    }
    configs
}

/// Collects the config variables of every manpage fragment in `work_dir`.
///
/// Fragments are read in file name order, both the `.txt` and the `.adoc`
/// flavour.
pub fn manpage_config_variables(
    work_dir: &Path,
    only_camel_case: bool,
) -> Result<Vec<String>, L10nGuardError> {
    let doc_dir = work_dir.join(CONFIG_DOC_DIR);
    if !doc_dir.is_dir() {
        return Err(L10nGuardError::MissingDocumentation(
            CONFIG_DOC_DIR.to_string(),
        ));
    }

    let mut pages = Vec::new();
    for entry in fs::read_dir(&doc_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_page = path
            .extension()
            .map(|ext| ext == "txt" || ext == "adoc")
            .unwrap_or(false);
        if is_page {
            pages.push(path);
        }
    }
    pages.sort();

    let mut configs = Vec::new();
    for page in pages {
        let content = fs::read_to_string(&page)?;
        configs.extend(parse_manpage_config_variables(&content, only_camel_case));
    }
    Ok(configs)
}

/// Reports every message line that spells a config variable in another case.
///
/// `template` is the normalized template text: one line per string, as
/// printed by `msgcat --no-wrap --indent`. Comments and `msgstr` lines are
/// not looked at.
pub fn check_config_variables(template: &str, configs: &[String]) -> FileReport {
    let mut report = FileReport::default();
    let mut unmatched = 0;

    for line in template.lines() {
        if line.is_empty() || line.starts_with('#') || line.starts_with("msgstr") {
            continue;
        }
        // ASCII lowercasing keeps byte offsets aligned with `line`.
        let lower_line = line.to_ascii_lowercase();
        for item in configs {
            let lower_item = item.to_ascii_lowercase();
            for (idx, _) in lower_line.match_indices(&lower_item) {
                if line[idx..].starts_with(item.as_str()) {
                    debug!("'{}' is found in: {}", item, line);
                    continue;
                }
                report.error(format!(
                    "config variable '{}' in manpage does not match string in pot file:",
                    item
                ));
                report.error(format!("    >> {}", line));
                unmatched += 1;
            }
        }
    }

    if unmatched != 0 {
        report.error(format!("{} unmatched config variables", unmatched));
    }
    report
}

/// Checks the spelling of config variables in the work tree template.
///
/// # Returns
///
/// The diagnostics of the check, or an error when the template, the
/// manpages or the formatter are unavailable
#[instrument(skip(gettext, work_dir))]
pub fn check_template(
    gettext: &dyn GettextToolchain,
    work_dir: &Path,
) -> Result<FileReport, L10nGuardError> {
    let template = work_dir.join(TEMPLATE_FILE);
    if !template.is_file() {
        return Err(L10nGuardError::MissingTemplate(TEMPLATE_FILE.to_string()));
    }

    let configs = manpage_config_variables(work_dir, false)?;
    debug!(count = configs.len(), "collected config variables");

    let output = gettext.normalize(&template)?;
    if !output.success {
        return Err(l10n_guard_tools::errors::Error::CommandFailed {
            program: "msgcat".to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(check_config_variables(&output.stdout, &configs))
}
