use super::*;
use crate::report::Severity;
use crate::testing::{failure, success, MockGettext};
use indoc::indoc;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CORE_PAGE: &str = indoc! {"
    core.fileMode::
        Tells Git if the executable bit of files in the working tree
        is to be honored.

    core.sharedRepository, core.sharedRepo (deprecated)::
        When group (or true), the repository is made shareable.

    advice.*::
        These variables control various optional help messages.
"};

fn work_tree(pages: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(CONFIG_DOC_DIR)).unwrap();
    for (name, content) in pages {
        fs::write(dir.path().join(CONFIG_DOC_DIR).join(name), content).unwrap();
    }
    fs::create_dir_all(dir.path().join("po")).unwrap();
    fs::write(dir.path().join(TEMPLATE_FILE), "msgid \"\"\nmsgstr \"\"\n").unwrap();
    dir
}

fn normalized(stdout: &str) -> l10n_guard_tools::models::ToolOutput {
    let mut output = success("");
    output.stdout = stdout.to_string();
    output
}

#[test]
fn test_manpage_entries_are_split_and_filtered() {
    assert_eq!(
        parse_manpage_config_variables(CORE_PAGE, false),
        vec!["core.fileMode", "core.sharedRepository", "core.sharedRepo"]
    );
}

#[test]
fn test_camel_case_filter() {
    let page = "gc.auto::\ngc.pruneExpire::\n";

    assert_eq!(
        parse_manpage_config_variables(page, true),
        vec!["gc.pruneExpire"]
    );
}

#[test]
fn test_body_lines_are_not_entries() {
    let page = "\tSee core.fileMode::\nCore.bare::\n";

    assert!(parse_manpage_config_variables(page, false).is_empty());
}

#[test]
fn test_pages_are_read_in_name_order() {
    let dir = work_tree(&[
        ("gc.adoc", "gc.pruneExpire::\n"),
        ("core.txt", "core.fileMode::\n"),
        ("notes.html", "notes.rewriteRef::\n"),
    ]);

    let configs = manpage_config_variables(dir.path(), false).unwrap();

    assert_eq!(configs, vec!["core.fileMode", "gc.pruneExpire"]);
}

#[test]
fn test_missing_documentation_dir() {
    let dir = TempDir::new().unwrap();

    let error = manpage_config_variables(dir.path(), false).unwrap_err();

    assert_eq!(error.to_string(), "cannot find dir Documentation/config");
}

#[test]
fn test_misspelled_config_variable_is_reported() {
    let configs = vec!["core.fileMode".to_string(), "gc.pruneExpire".to_string()];
    let template = indoc! {r#"
        #: builtin/gc.c
        msgid "failed to parse gc.pruneexpire value"
        msgstr ""

        msgid "core.fileMode is set, see core.filemode"
        msgstr "gc.PRUNEEXPIRE"
    "#};

    let report = check_config_variables(template, &configs);

    assert_eq!(
        report.messages(Severity::Error),
        vec![
            "config variable 'gc.pruneExpire' in manpage does not match string in pot file:",
            "    >> msgid \"failed to parse gc.pruneexpire value\"",
            "config variable 'core.fileMode' in manpage does not match string in pot file:",
            "    >> msgid \"core.fileMode is set, see core.filemode\"",
            "2 unmatched config variables",
        ]
    );
}

#[test]
fn test_every_variable_is_checked_against_the_whole_line() {
    let configs = vec!["core.fileMode".to_string(), "core.bare".to_string()];
    let template = "msgid \"core.fileMode and core.BARE\"\n";

    let report = check_config_variables(template, &configs);

    assert_eq!(
        report.messages(Severity::Error).last(),
        Some(&"1 unmatched config variables")
    );
    assert_eq!(
        report.messages(Severity::Error)[0],
        "config variable 'core.bare' in manpage does not match string in pot file:"
    );
}

#[test]
fn test_template_check_passes_with_exact_spelling() {
    let dir = work_tree(&[("core.txt", CORE_PAGE)]);
    let gettext = MockGettext::new().with_normalize_output(normalized(indoc! {r#"
        msgid "core.sharedRepository is set"
        msgstr ""
    "#}));

    let report = check_template(&gettext, dir.path()).unwrap();

    assert!(report.passed());
    assert_eq!(gettext.calls(), vec!["normalize"]);
}

#[test]
fn test_template_check_requires_the_template() {
    let dir = TempDir::new().unwrap();
    let gettext = MockGettext::new();

    let error = check_template(&gettext, dir.path()).unwrap_err();

    assert!(matches!(error, L10nGuardError::MissingTemplate(_)));
    assert!(gettext.calls().is_empty());
}

#[test]
fn test_template_check_reports_formatter_failure() {
    let dir = work_tree(&[("core.txt", CORE_PAGE)]);
    let gettext = MockGettext::new().with_normalize_output(failure("msgcat: syntax error\n"));

    let error = check_template(&gettext, dir.path()).unwrap_err();

    assert!(error.to_string().contains("msgcat"));
}
