use super::*;
use crate::config::{CiEvent, TemplateSource};
use crate::testing::{
    commit_id, failure, modified, raw_commit, MockFetcher, MockGettext, MockRepository,
    MockTerminal,
};
use chrono::Utc;
use l10n_guard_tools::models::ChangedPath;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const PO_CONTENT: &str = "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n";

struct Fixture {
    repository: MockRepository,
    gettext: MockGettext,
    fetcher: MockFetcher,
    terminal: MockTerminal,
}

impl Fixture {
    fn new(repository: MockRepository) -> Self {
        Self {
            repository,
            gettext: MockGettext::new(),
            fetcher: MockFetcher::failing(),
            terminal: MockTerminal::detached(),
        }
    }

    fn toolbox(&self) -> Toolbox<'_> {
        Toolbox {
            repository: &self.repository,
            gettext: &self.gettext,
            fetcher: &self.fetcher,
            terminal: &self.terminal,
        }
    }

    fn run(&self, config: &CheckConfig) -> Result<WalkSummary, L10nGuardError> {
        CommitWalker::new(self.toolbox(), config).run(&[])
    }
}

fn recent() -> i64 {
    Utc::now().timestamp() - 3600
}

/// A repository whose commits each change the given paths, with a
/// translation blob at every commit.
fn repository(commits: &[(&str, Vec<ChangedPath>)]) -> MockRepository {
    commits
        .iter()
        .enumerate()
        .fold(MockRepository::new(), |repository, (n, (subject, changes))| {
            let id = commit_id(n);
            repository
                .with_commit(&id, &raw_commit(subject, recent()), changes.clone())
                .with_blob(&id, "po/zh_CN.po", PO_CONTENT)
        })
}

fn translations(count: usize) -> MockRepository {
    let commits: Vec<(&str, Vec<ChangedPath>)> = (0..count)
        .map(|_| ("l10n: zh_CN: update translation", vec![modified("po/zh_CN.po")]))
        .collect();
    repository(&commits)
}

fn without_template() -> CheckConfig {
    CheckConfig {
        template_source: TemplateSource::No,
        ..CheckConfig::default()
    }
}

#[test]
fn test_normalize_range_args() {
    let zeros = "0".repeat(40);

    assert_eq!(
        normalize_range_args(&[format!("{}..a1b2c3d", zeros), "^origin/master".to_string()]),
        vec!["a1b2c3d", "^origin/master"]
    );
    assert_eq!(
        normalize_range_args(&["0000000..HEAD".to_string()]),
        vec!["0000000..HEAD"]
    );
    assert_eq!(normalize_range_args(&[]), vec![DEFAULT_COMMIT_RANGE]);
}

#[test]
fn test_tally_summaries() {
    let summary = |total, passed, failed| {
        CommitTally {
            total,
            passed,
            failed,
        }
        .summary()
    };

    assert_eq!(summary(0, 0, 0), "no commit checked.");
    assert_eq!(summary(3, 3, 0), "checking commits: 3 passed.");
    assert_eq!(summary(3, 1, 2), "checking commits: 1 passed, 2 failed.");
    assert_eq!(summary(4, 1, 2), "checking commits: 1 passed, 2 failed, 1 skipped.");
}

#[test]
fn test_clean_range_passes() {
    let fixture = Fixture::new(translations(2));

    let summary = fixture.run(&without_template()).unwrap();

    assert!(summary.passed());
    assert_eq!(
        summary.tally,
        CommitTally {
            total: 2,
            passed: 2,
            failed: 0,
        }
    );
    assert_eq!(summary.po_files, vec!["po/zh_CN.po"]);
    assert_eq!(
        *fixture.repository.rev_list_calls.lock().unwrap(),
        vec![vec![DEFAULT_COMMIT_RANGE.to_string()]]
    );
}

#[test]
fn test_rule_violations_fail_the_run() {
    let fixture = Fixture::new(repository(&[
        ("l10n: zh_CN: update translation", vec![modified("po/zh_CN.po")]),
        ("zh_CN: update translation", vec![modified("po/zh_CN.po")]),
    ]));

    let summary = fixture.run(&without_template()).unwrap();

    assert!(!summary.passed());
    assert_eq!(summary.tally.passed, 1);
    assert_eq!(summary.tally.failed, 1);
}

#[test]
fn test_oversized_range_is_capped_without_terminal() {
    let fixture = Fixture::new(translations(150));

    let summary = fixture.run(&without_template()).unwrap();

    assert_eq!(summary.tally.total, 100);
    assert_eq!(summary.tally.passed, 100);
    assert_eq!(fixture.repository.inspected.lock().unwrap().len(), 100);
    assert!(fixture.terminal.questions().is_empty());
}

#[test]
fn test_declined_prompt_fails_immediately() {
    let mut fixture = Fixture::new(translations(150));
    fixture.terminal = MockTerminal::answering(false);

    let result = fixture.run(&without_template());

    assert!(matches!(
        result,
        Err(L10nGuardError::TooManyCommits {
            found: 150,
            limit: 100
        })
    ));
    assert_eq!(
        fixture.terminal.questions(),
        vec!["too many commits to check (150 > 100), continue to run?"]
    );
    assert!(fixture.repository.inspected.lock().unwrap().is_empty());
}

#[test]
fn test_confirmed_prompt_checks_every_commit() {
    let mut fixture = Fixture::new(translations(3));
    fixture.terminal = MockTerminal::answering(true);
    let config = CheckConfig {
        max_commits: 2,
        ..without_template()
    };

    let summary = fixture.run(&config).unwrap();

    assert_eq!(summary.tally.total, 3);
    assert_eq!(fixture.terminal.questions().len(), 1);
}

#[test]
fn test_force_skips_the_ceiling() {
    let mut fixture = Fixture::new(translations(3));
    fixture.terminal = MockTerminal::answering(false);
    let config = CheckConfig {
        max_commits: 2,
        force: true,
        ..without_template()
    };

    let summary = fixture.run(&config).unwrap();

    assert_eq!(summary.tally.passed, 3);
    assert!(fixture.terminal.questions().is_empty());
}

fn range_with_unrelated_commit() -> MockRepository {
    repository(&[
        ("l10n: zh_CN: update translation", vec![modified("po/zh_CN.po")]),
        ("docs: update README", vec![modified("docs/README.md")]),
        ("l10n: zh_CN: fix typos", vec![modified("po/zh_CN.po")]),
    ])
}

#[test]
fn test_unrelated_commit_on_push_stops_the_walk() {
    let fixture = Fixture::new(range_with_unrelated_commit());
    let config = CheckConfig {
        ci_event: Some(CiEvent::Push),
        ..without_template()
    };

    let summary = fixture.run(&config).unwrap();

    assert!(summary.passed());
    assert_eq!(
        summary.tally,
        CommitTally {
            total: 3,
            passed: 1,
            failed: 0,
        }
    );
    assert_eq!(summary.tally.skipped(), 2);
    assert_eq!(fixture.repository.inspected.lock().unwrap().len(), 2);
}

#[test]
fn test_unrelated_commit_in_pull_request_fails_the_walk() {
    let fixture = Fixture::new(range_with_unrelated_commit());
    let config = CheckConfig {
        ci_event: Some(CiEvent::PullRequest),
        ..without_template()
    };

    let summary = fixture.run(&config).unwrap();

    assert!(!summary.passed());
    assert_eq!(summary.tally.failed, 1);
    assert_eq!(summary.tally.skipped(), 1);
    assert_eq!(
        summary.tally.summary(),
        "checking commits: 1 passed, 1 failed, 1 skipped."
    );
}

#[test]
fn test_partial_clone_prefetches_missing_blobs() {
    let repository = translations(1)
        .with_config("remote.origin.promisor", true)
        .with_missing_blobs(&["1111111111111111111111111111111111111111", "2222222222222222222222222222222222222222"])
        .with_fetch_output(failure("fatal: unable to access remote\n"));
    let fixture = Fixture::new(repository);

    let summary = fixture.run(&without_template()).unwrap();

    assert!(summary.passed());
    assert_eq!(
        *fixture.repository.fetched.lock().unwrap(),
        vec![vec![
            "1111111111111111111111111111111111111111".to_string(),
            "2222222222222222222222222222222222222222".to_string(),
        ]]
    );
}

#[test]
fn test_no_prefetch_outside_partial_clones() {
    let repository = translations(1).with_missing_blobs(&["1111111111111111111111111111111111111111"]);
    let fixture = Fixture::new(repository);

    fixture.run(&without_template()).unwrap();

    assert!(fixture.repository.fetched.lock().unwrap().is_empty());
}

#[test]
fn test_touched_files_are_compared_at_the_tip() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ref.pot"), "").unwrap();
    let mut fixture = Fixture::new(translations(2).with_root(dir.path()));
    fixture.gettext = MockGettext::new().with_compare_output(failure(
        "ref.pot:12: this message is used but not defined in zh_CN.po\n",
    ));
    let config = CheckConfig {
        template_source: TemplateSource::Path("ref.pot".into()),
        ..CheckConfig::default()
    };

    let summary = fixture.run(&config).unwrap();

    assert_eq!(summary.tally.failed, 0);
    assert!(!summary.complete);
    assert!(!summary.passed());
    let compared = fixture.gettext.compared.lock().unwrap();
    assert_eq!(compared.len(), 1);
    assert_eq!(compared[0].1, dir.path().join("ref.pot"));
}

#[test]
fn test_missing_template_fails_the_walk() {
    let dir = TempDir::new().unwrap();
    let fixture = Fixture::new(translations(1).with_root(dir.path()));
    let config = CheckConfig {
        template_source: TemplateSource::Path("missing.pot".into()),
        ..CheckConfig::default()
    };

    let summary = fixture.run(&config).unwrap();

    assert_eq!(summary.tally.passed, 1);
    assert!(!summary.complete);
}

#[test]
fn test_range_without_translations_skips_the_template() {
    let fixture = Fixture::new(repository(&[("l10n: TEAMS: fix typo", Vec::new())]));

    let summary = fixture.run(&CheckConfig::default()).unwrap();

    assert!(summary.passed());
    assert!(fixture.fetcher.urls.lock().unwrap().is_empty());
}

#[test]
fn test_completeness_uses_last_walked_commit() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ref.pot"), "").unwrap();
    let repository = MockRepository::new()
        .with_root(dir.path())
        .with_commit(
            &commit_id(0),
            &raw_commit("l10n: zh_CN: update translation", recent()),
            vec![modified("po/zh_CN.po")],
        )
        .with_blob(&commit_id(0), "po/zh_CN.po", PO_CONTENT)
        .with_commit(
            &commit_id(1),
            &raw_commit("docs: update README", recent()),
            vec![modified("docs/README.md")],
        )
        .with_blob(&commit_id(1), "po/zh_CN.po", PO_CONTENT)
        .with_commit(
            &commit_id(2),
            &raw_commit("l10n: zh_CN: fix typos", recent()),
            vec![modified("po/zh_CN.po")],
        );
    let fixture = Fixture::new(repository);
    let config = CheckConfig {
        ci_event: Some(CiEvent::Push),
        template_source: TemplateSource::Path("ref.pot".into()),
        ..CheckConfig::default()
    };

    let summary = fixture.run(&config).unwrap();

    assert!(summary.complete);
    assert!(summary.passed());
    assert_eq!(fixture.gettext.compared.lock().unwrap().len(), 1);
}
