//! # Translation Maintenance
//!
//! Operations that write translation files rather than only check them:
//! starting a translation for a new locale and merging the latest messages
//! into an existing one.

use std::fs;

use l10n_guard_tools::errors::Error as ToolError;
use tracing::{info, instrument};

use crate::completeness::ReferenceTemplate;
use crate::config::{CheckConfig, CORE_TEMPLATE_FILE, PO_CORE_DIR, TEMPLATE_FILE};
use crate::errors::L10nGuardError;
use crate::po::{ensure_core_template, locale_of, po_path, validate_locale, PoChecker};
use crate::report::FileReport;
use crate::Toolbox;

#[cfg(test)]
#[path = "maintain_tests.rs"]
mod tests;

const PLACEHOLDER_PROJECT: &str = "Project-Id-Version: PACKAGE VERSION";
const GIT_PROJECT: &str = "Project-Id-Version: Git";

/// Merges the reference template into the translation named by `name`,
/// then checks the result.
///
/// The template is resolved the way the completeness check does it. When
/// completeness checks are disabled the work tree template is used as is.
///
/// # Arguments
///
/// * `name` - Locale or file name of the translation, e.g. `de` or `po/de.po`
///
/// # Returns
///
/// The merge and check diagnostics of the updated file
#[instrument(skip(toolbox, config))]
pub fn update_po_file(
    toolbox: Toolbox<'_>,
    config: &CheckConfig,
    name: &str,
) -> Result<FileReport, L10nGuardError> {
    let locale = locale_of(name);
    validate_locale(locale)?;

    let work_dir = toolbox.repository.work_dir();
    let relative = po_path(locale);
    let po_file = work_dir.join(&relative);
    if !po_file.is_file() {
        return Err(L10nGuardError::MissingPoFile(relative));
    }

    let resolved =
        ReferenceTemplate::resolve(config, work_dir, toolbox.gettext, toolbox.fetcher)?;
    let template = match &resolved {
        Some(template) => template.path().to_path_buf(),
        None => work_dir.join(TEMPLATE_FILE),
    };
    if !template.is_file() {
        return Err(L10nGuardError::MissingTemplate(TEMPLATE_FILE.to_string()));
    }

    info!("updating po file for \"{}\"", locale);
    let mut report = FileReport::default();
    let output = toolbox.gettext.merge(&po_file, &template)?;
    if !output.success {
        for line in output.stderr_lines() {
            report.error(line);
        }
        report.error(format!("fail to update \"{}\": {}", relative, output.status));
        return Ok(report);
    }

    report.extend(PoChecker::new(toolbox.gettext, config).check_po_file(locale, &po_file));
    Ok(report)
}

/// Starts the translation of a new locale from a template.
///
/// A full translation is written to `po/XX.po` from `po/git.pot`. With
/// `core` set only the core messages are used, and the file goes to
/// `po-core/XX.po` so it can be translated first and merged later.
///
/// # Returns
///
/// The path of the new file, relative to the work tree
#[instrument(skip(toolbox))]
pub fn init_po_file(
    toolbox: Toolbox<'_>,
    name: &str,
    core: bool,
) -> Result<String, L10nGuardError> {
    let locale = locale_of(name);
    validate_locale(locale)?;

    let work_dir = toolbox.repository.work_dir();
    let (template, target) = if core {
        let mut report = FileReport::default();
        let template = ensure_core_template(toolbox.gettext, work_dir, &mut report);
        report.emit(&format!("[{}]", CORE_TEMPLATE_FILE));
        let template = template
            .ok_or_else(|| L10nGuardError::MissingTemplate(CORE_TEMPLATE_FILE.to_string()))?;
        (template, format!("{}/{}.po", PO_CORE_DIR, locale))
    } else {
        (work_dir.join(TEMPLATE_FILE), po_path(locale))
    };

    let po_file = work_dir.join(&target);
    if po_file.exists() {
        return Err(L10nGuardError::PoFileExists(target));
    }
    if !template.is_file() {
        return Err(L10nGuardError::MissingTemplate(TEMPLATE_FILE.to_string()));
    }

    info!("creating .po file for \"{}\"", locale);
    let output = toolbox.gettext.init(locale, &template)?;
    if !output.success {
        return Err(ToolError::CommandFailed {
            program: "msginit".to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }

    if let Some(parent) = po_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&po_file, output.stdout.replacen(PLACEHOLDER_PROJECT, GIT_PROJECT, 1))?;
    Ok(target)
}

/// Next steps for whoever started a translation with [`init_po_file`].
pub fn init_notes(locale: &str, core: bool) -> String {
    let rule = "=".repeat(72);
    if core {
        format!(
            "{rule}
Notes for core po file:

    A full translation of Git is a lot of work. The messages of the
    commands used most often are extracted from \"{template}\" into
    \"{core_template}\", so a new team can start with those.

    The new generated po file for locale \"{locale}\" is stored in
    \"{dir}/{locale}.po\" which includes core l10n entries.

    Once the core po file is translated, merge it into
    \"po/{locale}.po\" using the following commands:

        msgcat {dir}/{locale}.po po/{locale}.po -s -o /tmp/{locale}.po
        mv /tmp/{locale}.po po/{locale}.po
        msgmerge --add-location --backup=off -U po/{locale}.po {template}
{rule}",
            template = TEMPLATE_FILE,
            core_template = CORE_TEMPLATE_FILE,
            dir = PO_CORE_DIR,
        )
    } else {
        format!(
            "{rule}
Notes for l10n team leader:

    Since you created an initial locale file, you are likely to be the
    leader of the {locale} l10n team.

    You should add your team information in the \"po/TEAMS\" file, and
    make a commit for it.

    Please read the file \"po/README.md\" first to understand the workflow
    of Git l10n maintenance.
{rule}"
        )
    }
}
