use super::*;
use crate::config::CiEvent;
use crate::testing::{failure, success, translation, MockGettext};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = indoc! {r#"
    # Chinese translations for Git package
    #: this comment belongs to the header:1
    msgid ""
    msgstr ""
    "Content-Type: text/plain; charset=UTF-8\n"
"#};

fn po_file(dir: &TempDir, name: &str, entries: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("{}\n{}", HEADER, entries)).unwrap();
    path
}

#[test]
fn test_locale_helpers() {
    assert_eq!(locale_of("po/zh_CN.po"), "zh_CN");
    assert_eq!(locale_of("zh_CN.po"), "zh_CN");
    assert_eq!(po_path("de"), "po/de.po");

    assert!(validate_locale("zh_CN").is_ok());
    assert!(validate_locale("sr_Latn").is_ok());
    assert!(validate_locale("ca@valencia").is_ok());
    assert!(validate_locale("zh-CN").is_err());
    assert!(validate_locale("ZH").is_err());
}

#[test]
fn test_invalid_locale_is_not_checked() {
    let gettext = MockGettext::new();
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_po_file("chinese", Path::new("po/x.po"));

    assert_eq!(
        report.messages(Severity::Error),
        vec!["invalid locale name \"chinese\""]
    );
    assert!(gettext.calls().is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("zh_CN.po");
    let gettext = MockGettext::new();
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_po_file("zh_CN", &missing);

    assert_eq!(
        report.messages(Severity::Error),
        vec![format!("fail to check \"{}\", does not exist", missing.display())]
    );
}

#[test]
fn test_clean_file_passes_every_check() {
    let dir = TempDir::new().unwrap();
    let path = po_file(&dir, "zh_CN.po", "#: builtin/add.c\nmsgid \"x\"\nmsgstr \"y\"\n");
    let gettext = MockGettext::new()
        .with_syntax_output(success("12 translated messages, 1 fuzzy translation.\n"))
        .with_catalog(Some(vec![translation("use --all", "使用 --all")]));
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_po_file("zh_CN", &path);

    assert!(report.passed());
    assert_eq!(
        report.messages(Severity::Info),
        vec!["12 translated messages, 1 fuzzy translation."]
    );
    assert!(report.messages(Severity::Warning).is_empty());
    assert_eq!(gettext.calls(), vec!["check_syntax", "compile"]);
}

#[test]
fn test_syntax_errors_fail_the_file() {
    let dir = TempDir::new().unwrap();
    let path = po_file(&dir, "de.po", "");
    let gettext = MockGettext::new().with_syntax_output(failure(
        "de.po:12: missing 'msgstr' section\nmsgfmt: found 1 fatal error\n",
    ));
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_syntax(&path);

    assert_eq!(
        report.messages(Severity::Error),
        vec![
            "de.po:12: missing 'msgstr' section",
            "msgfmt: found 1 fatal error",
            "fail to check po: exit status: 1",
        ]
    );
}

#[test]
fn test_secondary_checker_is_advisory_by_default() {
    let dir = TempDir::new().unwrap();
    let path = po_file(&dir, "de.po", "");
    let gettext = MockGettext::new().with_secondary_output(failure("de.po:3: unknown keyword\n"));
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_syntax(&path);

    assert!(report.passed());
    assert_eq!(
        report.messages(Severity::Warning),
        vec![
            "de.po:3: unknown keyword",
            "fail to check po with secondary msgfmt: exit status: 1",
        ]
    );
    assert_eq!(gettext.calls(), vec!["check_syntax", "check_syntax_secondary"]);
}

#[test]
fn test_secondary_checker_can_gate() {
    let dir = TempDir::new().unwrap();
    let path = po_file(&dir, "de.po", "");
    let gettext = MockGettext::new().with_secondary_output(failure("de.po:3: unknown keyword\n"));
    let config = CheckConfig {
        secondary_check: SecondaryCheckPolicy::Gate,
        ..CheckConfig::default()
    };

    let report = PoChecker::new(&gettext, &config).check_syntax(&path);

    assert!(!report.passed());
    assert_eq!(report.messages(Severity::Error).len(), 2);
}

#[test]
fn test_file_locations_after_header_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = po_file(
        &dir,
        "zh_CN.po",
        "#: builtin/add.c:123 builtin/commit.c\nmsgid \"x\"\nmsgstr \"y\"\n",
    );
    let gettext = MockGettext::new();

    let local = CheckConfig::default();
    let report = PoChecker::new(&gettext, &local).check_file_locations(&path);
    assert!(report.passed());
    assert_eq!(report.messages(Severity::Warning), vec![FILE_LOCATION_GUIDANCE]);

    let ci = CheckConfig {
        ci_event: Some(CiEvent::PullRequest),
        report_file_locations: Some(ReportLevel::None),
        ..CheckConfig::default()
    };
    let report = PoChecker::new(&gettext, &ci).check_file_locations(&path);
    assert_eq!(report.messages(Severity::Error), vec![FILE_LOCATION_GUIDANCE]);
}

#[test]
fn test_file_names_without_lines_are_allowed() {
    let dir = TempDir::new().unwrap();
    let path = po_file(
        &dir,
        "zh_CN.po",
        "#: builtin/add.c builtin/commit.c:12\nmsgid \"x\"\nmsgstr \"y\"\n",
    );
    let gettext = MockGettext::new();
    let config = CheckConfig {
        report_file_locations: Some(ReportLevel::Error),
        ..CheckConfig::default()
    };

    let report = PoChecker::new(&gettext, &config).check_file_locations(&path);

    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_core_check_merges_into_a_copy() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("po")).unwrap();
    fs::write(dir.path().join(CORE_TEMPLATE_FILE), "msgid \"\"\nmsgstr \"\"\n").unwrap();
    let original = "msgid \"\"\nmsgstr \"\"\n";
    fs::write(dir.path().join("po/zh_CN.po"), original).unwrap();
    let gettext = MockGettext::new();
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_core_po_file(dir.path(), "zh_CN");

    assert!(report.passed());
    assert_eq!(gettext.calls(), vec!["merge", "check_syntax"]);
    assert_eq!(fs::read_to_string(dir.path().join("po/zh_CN.po")).unwrap(), original);
}

#[test]
fn test_core_check_creates_missing_template() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("po")).unwrap();
    fs::write(dir.path().join("po/zh_CN.po"), "msgid \"\"\nmsgstr \"\"\n").unwrap();
    let template = dir.path().join(CORE_TEMPLATE_FILE);
    let gettext = MockGettext::new().with_template(&template, "msgid \"\"\nmsgstr \"\"\n");
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_core_po_file(dir.path(), "zh_CN");

    assert!(report.passed());
    assert_eq!(gettext.calls(), vec!["extract", "merge", "check_syntax"]);
    assert!(template.exists());
}

#[test]
fn test_core_check_fails_when_template_cannot_be_created() {
    let dir = TempDir::new().unwrap();
    let gettext = MockGettext::new();
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_core_po_file(dir.path(), "zh_CN");

    assert!(!report.passed());
    assert_eq!(
        report.messages(Severity::Error),
        vec!["fail to create core template po/git-core.pot"]
    );
}

#[test]
fn test_core_check_reports_merge_failure() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("po")).unwrap();
    fs::write(dir.path().join(CORE_TEMPLATE_FILE), "").unwrap();
    fs::write(dir.path().join("po/zh_CN.po"), "").unwrap();
    let gettext = MockGettext::new().with_merge_output(failure("msgmerge: syntax error\n"));
    let config = CheckConfig::default();

    let report = PoChecker::new(&gettext, &config).check_core_po_file(dir.path(), "zh_CN");

    assert_eq!(
        report.messages(Severity::Error),
        vec![
            "msgmerge: syntax error",
            "fail to update core po file: exit status: 1",
        ]
    );
}
