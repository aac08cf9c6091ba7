//! # Translation File Checks
//!
//! Validation of a single `po/XX.po` file: syntax through the gettext
//! compiler, absence of `#: file:line` reference comments, and placeholder
//! mismatches through [`crate::typos`].
//!
//! The checks only collect diagnostics into a [`FileReport`]; the caller
//! decides on the prompt the report is written with.

use std::fs;
use std::path::{Path, PathBuf};

use l10n_guard_tools::models::{ScratchFile, SyntaxChecker};
use l10n_guard_tools::GettextToolchain;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, instrument};

use crate::config::{
    CheckConfig, ReportLevel, SecondaryCheckPolicy, CORE_SOURCES, CORE_TEMPLATE_FILE,
    LOCALE_REGEX, PO_DIR,
};
use crate::errors::L10nGuardError;
use crate::report::{FileReport, Severity};
use crate::smudge::SmudgeRegistry;
use crate::typos::TypoDetector;

#[cfg(test)]
#[path = "po_tests.rs"]
mod tests;

lazy_static! {
    static ref LINE_LOCATION_REGEX: Regex =
        Regex::new(r".*:\d+$").expect("Failed to compile file location regex");
}

const FILE_LOCATION_GUIDANCE: &str = "\
Found file-location comments in po file. By submitting a location-less
\"po/XX.po\" file, the size of the Git repository can be greatly reduced.
See the discussion below:

    https://lore.kernel.org/git/20220504124121.12683-1-worldhello.net@gmail.com/

As how to commit a location-less \"po/XX.po\" file, See:

    the [Updating a \"XX.po\" file] section in \"po/README.md\"";

/// Extracts the locale from a translation file name such as `po/zh_CN.po`.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::po::locale_of;
///
/// assert_eq!(locale_of("po/zh_CN.po"), "zh_CN");
/// assert_eq!(locale_of("pt_PT"), "pt_PT");
/// ```
pub fn locale_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".po").unwrap_or(name)
}

/// Path of the translation file of `locale`, relative to the work tree.
pub fn po_path(locale: &str) -> String {
    format!("{}/{}.po", PO_DIR, locale)
}

/// Rejects names that are not `ll`, `ll_CC` or `ll_Script` locale codes.
pub fn validate_locale(locale: &str) -> Result<(), L10nGuardError> {
    if LOCALE_REGEX.is_match(locale) {
        Ok(())
    } else {
        Err(L10nGuardError::InvalidLocale(locale.to_string()))
    }
}

/// Runs the file checks of one run's configuration.
pub struct PoChecker<'a> {
    gettext: &'a dyn GettextToolchain,
    config: &'a CheckConfig,
    registry: &'a SmudgeRegistry,
}

impl<'a> PoChecker<'a> {
    /// Creates a checker using the built-in smudge rules.
    pub fn new(gettext: &'a dyn GettextToolchain, config: &'a CheckConfig) -> Self {
        Self {
            gettext,
            config,
            registry: SmudgeRegistry::builtin(),
        }
    }

    /// Replaces the smudge rules used by the typo check.
    pub fn with_registry(mut self, registry: &'a SmudgeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Runs every check on the translation of `locale` stored at `po_file`.
    ///
    /// `po_file` may be a scratch copy; `locale` names the translation the
    /// content belongs to.
    ///
    /// # Arguments
    ///
    /// * `locale` - Locale of the translation, e.g. `zh_CN`
    /// * `po_file` - File holding the translation
    ///
    /// # Returns
    ///
    /// The diagnostics of all checks. The file passes when none of them is
    /// an error.
    #[instrument(skip(self, po_file), fields(file = %po_file.display()))]
    pub fn check_po_file(&self, locale: &str, po_file: &Path) -> FileReport {
        let mut report = FileReport::default();
        if let Err(e) = validate_locale(locale) {
            report.error(e.to_string());
            return report;
        }
        if !po_file.exists() {
            report.error(format!(
                "fail to check \"{}\", does not exist",
                po_file.display()
            ));
            return report;
        }

        report.extend(self.check_syntax(po_file));
        report.extend(self.check_file_locations(po_file));
        report.extend(
            TypoDetector::new(self.registry, locale, self.config.typo_level())
                .check_po_file(self.gettext, po_file),
        );
        report
    }

    /// Checks the syntax of `po_file` with the compiler.
    ///
    /// The statistics printed by a successful check are kept as info
    /// messages. When a back-compatible secondary compiler is configured its
    /// findings are errors or warnings depending on
    /// [`SecondaryCheckPolicy`].
    pub fn check_syntax(&self, po_file: &Path) -> FileReport {
        let mut report = FileReport::default();

        match self.gettext.check_syntax(SyntaxChecker::Primary, po_file) {
            Ok(output) if output.success => {
                for line in output.stderr_lines() {
                    report.info(line);
                }
            }
            Ok(output) => {
                for line in output.stderr_lines() {
                    report.error(line);
                }
                report.error(format!("fail to check po: {}", output.status));
            }
            Err(e) => report.error(format!("fail to check po: {}", e)),
        }

        if self.gettext.has_secondary_checker() {
            let severity = match self.config.secondary_check {
                SecondaryCheckPolicy::Gate => Severity::Error,
                SecondaryCheckPolicy::Advisory => Severity::Warning,
            };
            match self.gettext.check_syntax(SyntaxChecker::Secondary, po_file) {
                Ok(output) if output.success => {}
                Ok(output) => {
                    for line in output.stderr_lines() {
                        report.push(severity, line);
                    }
                    report.push(
                        severity,
                        format!("fail to check po with secondary msgfmt: {}", output.status),
                    );
                }
                Err(e) => report.push(
                    severity,
                    format!("fail to check po with secondary msgfmt: {}", e),
                ),
            }
        }
        report
    }

    /// Reports `#: file:line` comments after the header of `po_file`.
    ///
    /// Only the first reference of each comment is inspected; one finding
    /// is enough to report the file.
    pub fn check_file_locations(&self, po_file: &Path) -> FileReport {
        let mut report = FileReport::default();
        let severity = match self.config.file_location_level() {
            ReportLevel::None => return report,
            ReportLevel::Warn => Severity::Warning,
            ReportLevel::Error => Severity::Error,
        };

        let content = match fs::read(po_file) {
            Ok(content) => content,
            Err(e) => {
                report.error(format!("cannot open {}: {}", po_file.display(), e));
                return report;
            }
        };
        let content = String::from_utf8_lossy(&content);

        let found = content
            .lines()
            .skip_while(|line| !line.is_empty())
            .filter_map(|line| line.strip_prefix("#: "))
            .filter_map(|locations| locations.split(' ').next())
            .any(|first| LINE_LOCATION_REGEX.is_match(first));
        if found {
            debug!(file = %po_file.display(), "found file locations");
            report.push(severity, FILE_LOCATION_GUIDANCE);
        }
        report
    }

    /// Checks the translation of `locale` against the core template.
    ///
    /// The core template holds the messages of the programs every
    /// installation needs. It is generated from a fixed list of sources when
    /// missing. The translation is merged into a scratch copy, so the work
    /// tree is left untouched, and the merged copy is checked for syntax.
    #[instrument(skip(self, work_dir))]
    pub fn check_core_po_file(&self, work_dir: &Path, locale: &str) -> FileReport {
        let mut report = FileReport::default();
        if let Err(e) = validate_locale(locale) {
            report.error(e.to_string());
            return report;
        }

        let template = match ensure_core_template(self.gettext, work_dir, &mut report) {
            Some(template) => template,
            None => return report,
        };

        let source = work_dir.join(po_path(locale));
        let scratch = match ScratchFile::copy_of(&format!("--core-{}.po", locale), &source) {
            Ok(scratch) => scratch,
            Err(e) => {
                report.error(format!("fail to copy {} to tmpfile: {}", po_path(locale), e));
                return report;
            }
        };

        match self.gettext.merge(scratch.path(), &template) {
            Ok(output) if output.success => {}
            Ok(output) => {
                for line in output.stderr_lines() {
                    report.error(line);
                }
                report.error(format!("fail to update core po file: {}", output.status));
                return report;
            }
            Err(e) => {
                report.error(format!("fail to update core po file: {}", e));
                return report;
            }
        }

        report.extend(self.check_syntax(scratch.path()));
        report
    }
}

/// Returns the core template of `work_dir`, extracting it when missing.
///
/// Extraction diagnostics land in `report`. `None` means the template is
/// still missing afterwards.
pub fn ensure_core_template(
    gettext: &dyn GettextToolchain,
    work_dir: &Path,
    report: &mut FileReport,
) -> Option<PathBuf> {
    let template = work_dir.join(CORE_TEMPLATE_FILE);
    if template.exists() {
        return Some(template);
    }

    match gettext.extract(&template, &CORE_SOURCES) {
        Ok(output) if output.success => {}
        Ok(output) => {
            for line in output.stderr_lines() {
                report.error(line);
            }
        }
        Err(e) => report.error(e.to_string()),
    }
    if !template.exists() {
        report.error(format!("fail to create core template {}", CORE_TEMPLATE_FILE));
        return None;
    }
    report.info(format!("created core template {}", CORE_TEMPLATE_FILE));
    Some(template)
}
