//! Configuration settings for the l10n checks.
//!
//! This module centralizes the project conventions enforced by the checks
//! (prefixes, width limits, ceilings) together with the runtime
//! [`CheckConfig`] and the optional TOML configuration file it can be built
//! from.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::errors::ConfigLoadError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Subject prefix required on every non-merge commit
pub const SUBJECT_PREFIX: &str = "l10n: ";

/// Subject prefix required on merge commits
pub const MERGE_SUBJECT_PREFIX: &str = "Merge ";

/// Prefix of the sign-off trailer
pub const SIGNED_OFF_BY_PREFIX: &str = "Signed-off-by: ";

/// Hard limit for the width of a commit subject
pub const SUBJECT_WIDTH_LIMIT: usize = 72;

/// Hard limit for the width of a commit body line
pub const BODY_WIDTH_LIMIT: usize = 72;

/// Soft subject width tiers and the share of historical subjects that fit
/// within them, widest first.
pub const SUBJECT_WIDTH_TIERS: [(usize, u32); 3] = [(72, 98), (64, 90), (50, 63)];

/// Default ceiling for the number of commits checked in one run
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// Environment variable overriding [`DEFAULT_MAX_COMMITS`]
pub const MAX_COMMITS_ENV: &str = "MAX_COMMITS";

/// Commits older than this produce a warning
pub const OLD_COMMIT_DAYS: i64 = 180;

/// Allowed clock drift for commit dates when running in CI
pub const CI_CLOCK_DRIFT_SECONDS: i64 = 15 * 60;

/// Range checked when no revision is given
pub const DEFAULT_COMMIT_RANGE: &str = "HEAD@{u}..HEAD";

/// Directory holding translation files
pub use l10n_guard_tools::git::PO_DIR;

/// The translation team roster
pub const TEAMS_FILE: &str = "po/TEAMS";

/// Reference template inside the work tree
pub const TEMPLATE_FILE: &str = "po/git.pot";

/// Template for the core subset of translatable strings
pub const CORE_TEMPLATE_FILE: &str = "po/git-core.pot";

/// Where new core translations are started
pub const PO_CORE_DIR: &str = "po-core";

/// Sources whose strings make up the core template
pub const CORE_SOURCES: [&str; 7] = [
    "builtin/checkout.c",
    "builtin/clone.c",
    "builtin/index-pack.c",
    "builtin/push.c",
    "builtin/reset.c",
    "remote.c",
    "wt-status.c",
];

/// Where the latest template is published
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/git-l10n/git-po/raw/pot/main/po/git.pot";

/// Configuration file looked up in the work tree root
pub const DEFAULT_CONFIG_FILE: &str = ".l10n-guard.toml";

lazy_static! {
    /// `Name <email> timestamp [zone]` as found in author and committer headers
    pub static ref IDENTITY_REGEX: Regex = Regex::new(
        r"^(.+ <.+@.+\..+>) ([0-9]+)( ([+-][0-9]+))?$"
    ).expect("Failed to compile identity regex");

    /// `ll` or `ll_CC` locale names, optionally with a script or variant
    pub static ref LOCALE_REGEX: Regex = Regex::new(
        r"^[a-z]{2,3}(_[A-Z]{2}|_[A-Z][a-z]{3})?(@[a-z]+)?$"
    ).expect("Failed to compile locale regex");
}

/// How a category of findings is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    /// Findings are not reported at all
    None,
    /// Findings are reported but do not fail the check
    Warn,
    /// Findings fail the check
    Error,
}

impl FromStr for ReportLevel {
    type Err = ConfigLoadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "none" | "no" | "off" => Ok(ReportLevel::None),
            "warn" | "warning" => Ok(ReportLevel::Warn),
            "error" => Ok(ReportLevel::Error),
            _ => Err(ConfigLoadError::InvalidValue {
                key: "report level".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Where the reference template for completeness checks comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemplateSource {
    /// Completeness checks are disabled
    No,
    /// Regenerate the template from the sources with `make pot`
    Build,
    /// Download the latest published template
    Download,
    /// Use a fixed template file
    Path(PathBuf),
}

impl FromStr for TemplateSource {
    type Err = ConfigLoadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "no" | "false" | "none" => Ok(TemplateSource::No),
            "build" | "make" | "update" => Ok(TemplateSource::Build),
            "download" => Ok(TemplateSource::Download),
            v if v.contains('/') || v.ends_with(".pot") => Ok(TemplateSource::Path(v.into())),
            _ => Err(ConfigLoadError::InvalidValue {
                key: "template source".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TemplateSource {
    type Error = ConfigLoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemplateSource> for String {
    fn from(source: TemplateSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::No => write!(f, "no"),
            TemplateSource::Build => write!(f, "build"),
            TemplateSource::Download => write!(f, "download"),
            TemplateSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The CI event a run was triggered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiEvent {
    Push,
    PullRequest,
    PullRequestTarget,
    Other(String),
}

impl CiEvent {
    /// Parses an event name, returning `None` for an empty name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "" => None,
            "push" => Some(CiEvent::Push),
            "pull_request" => Some(CiEvent::PullRequest),
            "pull_request_target" => Some(CiEvent::PullRequestTarget),
            other => Some(CiEvent::Other(other.to_string())),
        }
    }
}

/// Whether failures of the back-compatible `msgfmt` fail the syntax check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryCheckPolicy {
    /// Failures are reported as warnings
    #[default]
    Advisory,
    /// Failures are errors, like those of the primary `msgfmt`
    Gate,
}

impl FromStr for SecondaryCheckPolicy {
    type Err = ConfigLoadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "advisory" | "warn" => Ok(SecondaryCheckPolicy::Advisory),
            "gate" | "error" => Ok(SecondaryCheckPolicy::Gate),
            _ => Err(ConfigLoadError::InvalidValue {
                key: "secondary check policy".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Severity of each category reported by the completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessPolicy {
    #[serde(default = "CompletenessPolicy::default_missing")]
    pub missing: ReportLevel,

    #[serde(default = "CompletenessPolicy::default_fuzzy")]
    pub fuzzy: ReportLevel,

    #[serde(default = "CompletenessPolicy::default_untranslated")]
    pub untranslated: ReportLevel,

    #[serde(default = "CompletenessPolicy::default_obsolete")]
    pub obsolete: ReportLevel,
}

impl CompletenessPolicy {
    fn default_missing() -> ReportLevel {
        ReportLevel::Error
    }

    fn default_fuzzy() -> ReportLevel {
        ReportLevel::Warn
    }

    fn default_untranslated() -> ReportLevel {
        ReportLevel::Warn
    }

    fn default_obsolete() -> ReportLevel {
        ReportLevel::Error
    }
}

impl Default for CompletenessPolicy {
    fn default() -> Self {
        Self {
            missing: Self::default_missing(),
            fuzzy: Self::default_fuzzy(),
            untranslated: Self::default_untranslated(),
            obsolete: Self::default_obsolete(),
        }
    }
}

/// Runtime configuration shared by all checks of one run.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::config::{CheckConfig, CiEvent, ReportLevel};
///
/// let local = CheckConfig::default();
/// assert_eq!(local.typo_level(), ReportLevel::Error);
/// assert!(!local.skip_gpg());
///
/// let ci = CheckConfig {
///     ci_event: Some(CiEvent::PullRequest),
///     ..CheckConfig::default()
/// };
/// assert_eq!(ci.typo_level(), ReportLevel::Warn);
/// assert!(ci.skip_gpg());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Check every commit of the range even when it exceeds the ceiling
    pub force: bool,

    /// Do not verify commit signatures
    pub no_gpg: bool,

    /// Also check translation files against the core template
    pub check_core: bool,

    /// The CI event of the run, if any
    pub ci_event: Option<CiEvent>,

    /// Explicit severity for placeholder mismatches
    pub report_typos: Option<ReportLevel>,

    /// Explicit severity for file-location comments
    pub report_file_locations: Option<ReportLevel>,

    /// Source of the reference template
    pub template_source: TemplateSource,

    /// URL used when the template is downloaded
    pub template_url: String,

    /// Ceiling for the number of commits checked
    pub max_commits: usize,

    /// How back-compatible `msgfmt` failures are treated
    pub secondary_check: SecondaryCheckPolicy,

    /// Severity per completeness category
    pub completeness: CompletenessPolicy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            force: false,
            no_gpg: false,
            check_core: false,
            ci_event: None,
            report_typos: None,
            report_file_locations: None,
            template_source: TemplateSource::Download,
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            max_commits: DEFAULT_MAX_COMMITS,
            secondary_check: SecondaryCheckPolicy::default(),
            completeness: CompletenessPolicy::default(),
        }
    }
}

impl CheckConfig {
    /// Whether the run happens in CI.
    pub fn in_ci(&self) -> bool {
        self.ci_event.is_some()
    }

    /// Signatures are not verified when disabled explicitly or in CI, where
    /// contributors' public keys are not available.
    pub fn skip_gpg(&self) -> bool {
        self.no_gpg || self.in_ci()
    }

    /// Severity of placeholder mismatches: explicit value, else warn in CI
    /// and error locally.
    pub fn typo_level(&self) -> ReportLevel {
        match self.report_typos {
            Some(level) => level,
            None if self.in_ci() => ReportLevel::Warn,
            None => ReportLevel::Error,
        }
    }

    /// Severity of file-location comments: always error in CI, otherwise the
    /// explicit value or warn.
    pub fn file_location_level(&self) -> ReportLevel {
        if self.in_ci() {
            return ReportLevel::Error;
        }
        self.report_file_locations.unwrap_or(ReportLevel::Warn)
    }

    /// Seconds a commit date may lie in the future.
    pub fn clock_drift_tolerance(&self) -> i64 {
        if self.in_ci() {
            CI_CLOCK_DRIFT_SECONDS
        } else {
            0
        }
    }
}

/// Top-level structure of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct L10nGuardConfig {
    pub schema_version: u32,

    #[serde(default)]
    pub checks: ChecksConfig,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub completeness: CompletenessPolicy,
}

impl Default for L10nGuardConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            checks: ChecksConfig::default(),
            template: TemplateConfig::default(),
            completeness: CompletenessPolicy::default(),
        }
    }
}

impl L10nGuardConfig {
    /// Converts the file configuration into a runtime configuration with
    /// every unset value at its default.
    pub fn to_check_config(&self) -> CheckConfig {
        CheckConfig {
            no_gpg: self.checks.no_gpg,
            check_core: self.checks.check_core,
            report_typos: self.checks.report_typos,
            report_file_locations: self.checks.report_file_locations,
            template_source: self.template.source.clone(),
            template_url: self.template.url.clone(),
            max_commits: self.checks.max_commits.unwrap_or(DEFAULT_MAX_COMMITS),
            secondary_check: self.checks.secondary_checker,
            completeness: self.completeness,
            ..CheckConfig::default()
        }
    }
}

/// `[checks]` section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChecksConfig {
    #[serde(default)]
    pub no_gpg: bool,

    #[serde(default)]
    pub check_core: bool,

    #[serde(default)]
    pub report_typos: Option<ReportLevel>,

    #[serde(default)]
    pub report_file_locations: Option<ReportLevel>,

    #[serde(default)]
    pub max_commits: Option<usize>,

    #[serde(default)]
    pub secondary_checker: SecondaryCheckPolicy,
}

/// `[template]` section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default = "TemplateConfig::default_source")]
    pub source: TemplateSource,

    #[serde(default = "TemplateConfig::default_url")]
    pub url: String,
}

impl TemplateConfig {
    fn default_source() -> TemplateSource {
        TemplateSource::Download
    }

    fn default_url() -> String {
        DEFAULT_TEMPLATE_URL.to_string()
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            source: Self::default_source(),
            url: Self::default_url(),
        }
    }
}

/// Loads the configuration file at `path`.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// * `Ok(L10nGuardConfig)` if loaded and valid
/// * `Err(ConfigLoadError)` if the file is missing, malformed, or has an
///   unsupported schema version
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<L10nGuardConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigLoadError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };
    let config: L10nGuardConfig = toml::from_str(&content)?;
    if config.schema_version != 1 {
        return Err(ConfigLoadError::UnsupportedSchemaVersion(
            config.schema_version,
        ));
    }
    Ok(config)
}

/// Reads the commit ceiling from [`MAX_COMMITS_ENV`].
///
/// Unset or unparsable values yield `None`; the latter with a warning.
pub fn max_commits_from_env() -> Option<usize> {
    let value = std::env::var(MAX_COMMITS_ENV).ok()?;
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Some(limit),
        _ => {
            warn!(value = %value, "ignoring invalid {}", MAX_COMMITS_ENV);
            None
        }
    }
}
