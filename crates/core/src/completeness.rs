//! # Completeness Check
//!
//! Compares translation files with the reference template using `msgcmp`
//! and classifies its diagnostics:
//!
//! | Category     | Meaning                                          |
//! |--------------|--------------------------------------------------|
//! | missing      | message of the template absent from the file     |
//! | fuzzy        | translation marked for review                    |
//! | untranslated | message present with an empty translation        |
//! | obsolete     | message of the file no longer in the template    |
//!
//! `msgcmp` reports fuzzy and untranslated messages a second time as unused,
//! so those are subtracted from the unused count to get the obsolete ones.

use std::path::{Path, PathBuf};

use l10n_guard_tools::errors::Error as ToolError;
use l10n_guard_tools::models::ScratchFile;
use l10n_guard_tools::{GettextToolchain, TemplateFetcher};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::config::{CheckConfig, CompletenessPolicy, ReportLevel, TemplateSource, TEMPLATE_FILE};
use crate::errors::L10nGuardError;
use crate::report::{FileReport, Severity};

#[cfg(test)]
#[path = "completeness_tests.rs"]
mod tests;

lazy_static! {
    static ref MISSING_REGEX: Regex =
        Regex::new(r"[0-9]+: this message is used but not defined in .*")
            .expect("Failed to compile msgcmp regex");
    static ref FUZZY_REGEX: Regex =
        Regex::new(r"[0-9]+: this message needs to be reviewed by the translator")
            .expect("Failed to compile msgcmp regex");
    static ref UNTRANSLATED_REGEX: Regex =
        Regex::new(r"[0-9]+: this message is untranslated")
            .expect("Failed to compile msgcmp regex");
    static ref NOT_USED_REGEX: Regex =
        Regex::new(r"[0-9]+: warning: this message is not used")
            .expect("Failed to compile msgcmp regex");
}

/// Number of examples of missing messages shown per file.
const MISSING_EXAMPLES: usize = 3;

/// Message counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletenessCounts {
    pub missing: usize,
    pub fuzzy: usize,
    pub untranslated: usize,
    pub obsolete: usize,
}

/// Classified `msgcmp` diagnostics of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessSummary {
    pub counts: CompletenessCounts,

    /// Locations of the first missing messages, relative to the template
    pub missing_examples: Vec<String>,
}

impl CompletenessSummary {
    /// Classifies the diagnostics `msgcmp` printed on stderr.
    ///
    /// # Examples
    ///
    /// ```
    /// use l10n_guard_core::completeness::CompletenessSummary;
    ///
    /// let summary = CompletenessSummary::parse(
    ///     "po/zh_CN.po:12: this message is untranslated\n\
    ///      po/zh_CN.po:12: warning: this message is not used\n",
    /// );
    /// assert_eq!(summary.counts.untranslated, 1);
    /// assert_eq!(summary.counts.obsolete, 0);
    /// ```
    pub fn parse(stderr: &str) -> Self {
        let mut summary = CompletenessSummary::default();
        let mut not_used = 0;

        for line in stderr.lines() {
            if let Some(m) = MISSING_REGEX.find(line) {
                if summary.counts.missing < MISSING_EXAMPLES {
                    summary.missing_examples.push(m.as_str().to_string());
                }
                summary.counts.missing += 1;
            } else if FUZZY_REGEX.is_match(line) {
                summary.counts.fuzzy += 1;
            } else if UNTRANSLATED_REGEX.is_match(line) {
                summary.counts.untranslated += 1;
            } else if NOT_USED_REGEX.is_match(line) {
                not_used += 1;
            }
        }

        summary.counts.obsolete = usize::saturating_sub(
            not_used,
            summary.counts.fuzzy + summary.counts.untranslated,
        );
        summary
    }

    /// Whether any category with a non-zero count is reported as an error.
    pub fn fails(&self, policy: &CompletenessPolicy) -> bool {
        let counts = &self.counts;
        [
            (counts.missing, policy.missing),
            (counts.fuzzy, policy.fuzzy),
            (counts.untranslated, policy.untranslated),
            (counts.obsolete, policy.obsolete),
        ]
        .iter()
        .any(|(count, level)| *count > 0 && *level == ReportLevel::Error)
    }
}

/// Where the template used for a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Downloaded from this URL
    Downloaded(String),

    /// The work tree template, generated by the build system when needed
    Local,

    /// A fixed file chosen by the user
    Fixed(PathBuf),
}

/// The reference template of a run.
///
/// A downloaded template lives in a scratch file owned by this value.
#[derive(Debug)]
pub struct ReferenceTemplate {
    path: PathBuf,
    origin: TemplateOrigin,
    _scratch: Option<ScratchFile>,
}

impl ReferenceTemplate {
    /// A template at a known location, used as is.
    pub fn new(path: impl Into<PathBuf>, origin: TemplateOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
            _scratch: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    /// Name of the template in diagnostics.
    fn display_name(&self) -> String {
        match &self.origin {
            TemplateOrigin::Fixed(path) => path.display().to_string(),
            _ => TEMPLATE_FILE.to_string(),
        }
    }

    /// Resolves the template selected by `config`.
    ///
    /// A failed download falls back to the work tree template. The work
    /// tree template is regenerated when it is missing or a build was
    /// requested.
    ///
    /// # Returns
    ///
    /// `None` when completeness checks are disabled, otherwise the template
    /// or the reason it cannot be provided
    pub fn resolve(
        config: &CheckConfig,
        work_dir: &Path,
        gettext: &dyn GettextToolchain,
        fetcher: &dyn TemplateFetcher,
    ) -> Result<Option<Self>, L10nGuardError> {
        let build = match &config.template_source {
            TemplateSource::No => return Ok(None),
            TemplateSource::Path(path) => {
                let path = work_dir.join(path);
                if !path.exists() {
                    return Err(L10nGuardError::MissingTemplate(path.display().to_string()));
                }
                return Ok(Some(Self::new(path.clone(), TemplateOrigin::Fixed(path))));
            }
            TemplateSource::Download => {
                let scratch = ScratchFile::new("--git.pot")?;
                info!("downloading pot file from {}", config.template_url);
                match fetcher.fetch_template(&config.template_url, scratch.path()) {
                    Ok(()) => {
                        return Ok(Some(Self {
                            path: scratch.path().to_path_buf(),
                            origin: TemplateOrigin::Downloaded(config.template_url.clone()),
                            _scratch: Some(scratch),
                        }));
                    }
                    Err(e) => {
                        warn!("{}", e);
                        false
                    }
                }
            }
            TemplateSource::Build => true,
        };

        let path = work_dir.join(TEMPLATE_FILE);
        if build || !path.exists() {
            info!("update pot file by running: make pot");
            let output = gettext.build_template()?;
            if !output.success {
                return Err(ToolError::CommandFailed {
                    program: "make pot".to_string(),
                    status: output.status,
                    stderr: output.stderr.trim().to_string(),
                }
                .into());
            }
        }
        if !path.exists() {
            return Err(L10nGuardError::MissingTemplate(TEMPLATE_FILE.to_string()));
        }
        Ok(Some(Self::new(path, TemplateOrigin::Local)))
    }
}

/// Checks translation files against one reference template.
///
/// The remediation advice for missing messages is the same for every file,
/// so it is only attached to the first report that needs it.
pub struct CompletenessChecker<'a> {
    gettext: &'a dyn GettextToolchain,
    template: &'a ReferenceTemplate,
    policy: CompletenessPolicy,
    guidance_shown: bool,
}

impl<'a> CompletenessChecker<'a> {
    pub fn new(
        gettext: &'a dyn GettextToolchain,
        template: &'a ReferenceTemplate,
        policy: CompletenessPolicy,
    ) -> Self {
        Self {
            gettext,
            template,
            policy,
            guidance_shown: false,
        }
    }

    /// Compares `po_file` with the template.
    ///
    /// # Arguments
    ///
    /// * `name` - Path of the translation in the work tree, e.g. `po/zh_CN.po`
    /// * `po_file` - File holding the content to compare
    ///
    /// # Returns
    ///
    /// The classified counts and the diagnostics of the file
    pub fn check_file(&mut self, name: &str, po_file: &Path) -> (CompletenessSummary, FileReport) {
        let mut report = FileReport::default();
        let output = match self.gettext.compare(po_file, self.template.path()) {
            Ok(output) => output,
            Err(e) => {
                report.error(format!("fail to run msgcmp: {}", e));
                return (CompletenessSummary::default(), report);
            }
        };

        let summary = CompletenessSummary::parse(&output.stderr);
        let counts = summary.counts;

        // msgcmp also exits non-zero for missing messages, which are
        // classified below. Any other failure is reported as is.
        if !output.success && counts == CompletenessCounts::default() {
            for line in output.stderr_lines() {
                report.error(line);
            }
            report.error(format!("fail to run msgcmp: {}", output.status));
            return (summary, report);
        }

        if let Some(severity) = severity(self.policy.missing).filter(|_| counts.missing > 0) {
            report.push(severity, self.missing_message(name, &summary));
        }
        if let Some(severity) = severity(self.policy.fuzzy).filter(|_| counts.fuzzy > 0) {
            report.push(
                severity,
                format!("{} fuzzy translation(s) need to be reviewed", counts.fuzzy),
            );
        }
        if let Some(severity) =
            severity(self.policy.untranslated).filter(|_| counts.untranslated > 0)
        {
            report.push(
                severity,
                format!("{} message(s) are untranslated", counts.untranslated),
            );
        }
        if let Some(severity) = severity(self.policy.obsolete).filter(|_| counts.obsolete > 0) {
            report.push(
                severity,
                format!(
                    "{} message(s) are not in '{}' any more, please update your po file",
                    counts.obsolete,
                    self.template.display_name()
                ),
            );
        }
        (summary, report)
    }

    fn missing_message(&mut self, name: &str, summary: &CompletenessSummary) -> String {
        let count = summary.counts.missing;
        let template = self.template.display_name();
        let strings = if count == 1 {
            "There is 1 new string".to_string()
        } else {
            format!("There are {} new strings", count)
        };

        let mut lines = match self.template.origin() {
            TemplateOrigin::Downloaded(_) => vec![format!(
                "{} in the latest '{}' missing in your translation.",
                strings, template
            )],
            _ => vec![format!(
                "{} in '{}' missing in your translation.",
                strings, template
            )],
        };

        if !self.guidance_shown {
            self.guidance_shown = true;
            lines.push(String::new());
            match self.template.origin() {
                TemplateOrigin::Downloaded(url) => {
                    lines.push(format!(
                        "The latest \"{}\" file can be downloaded from:",
                        template
                    ));
                    lines.push(String::new());
                    lines.push(format!("\t{}", url));
                    lines.push(String::new());
                    lines.push("Please rebase your branch to the latest upstream branch,".to_string());
                    lines.push(format!(
                        "run \"make po-update PO_FILE={}\" to update your po file,",
                        name
                    ));
                }
                TemplateOrigin::Local => lines.push(format!(
                    "Please run \"make po-update PO_FILE={}\" to update your po file,",
                    name
                )),
                TemplateOrigin::Fixed(path) => lines.push(format!(
                    "Please run \"msgmerge --update {} {}\" to update your po file,",
                    name,
                    path.display()
                )),
            }
            lines.push("and translate the new strings in it.".to_string());
            lines.push(String::new());
        }

        for example in &summary.missing_examples {
            lines.push(format!("  > {}:{}", template, example));
        }
        if count > MISSING_EXAMPLES {
            lines.push("  > ...".to_string());
        }
        lines.join("\n")
    }
}

fn severity(level: ReportLevel) -> Option<Severity> {
    match level {
        ReportLevel::None => None,
        ReportLevel::Warn => Some(Severity::Warning),
        ReportLevel::Error => Some(Severity::Error),
    }
}
