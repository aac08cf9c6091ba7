use super::*;
use pretty_assertions::assert_eq;

const ROSTER: &str = "\
Core Git translation language teams
(please keep the list sorted alphabetically on language field)

Language:\tbg (Bulgarian)
Repository:\thttps://github.com/alshopov/git-po
Leader:\t\tAlexander Shopov <ash AT kambanaria.org>

Language:\tis (Icelandic)
Leader:\t\tÆvar Arnfjörð Bjarmason <avarab AT gmail.com>

Language:\tzh_CN (Simplified Chinese)
Repository:\thttps://github.com/jiangxin/git-po
Leader:\t\tJiang Xin <worldhello.net AT gmail.com>
Members:\tRay Chen <oldsharp AT gmail.com>
\t\tFangyi Zhou <me AT fangyi.io>
";

fn user(name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn test_parse_roster() {
    let roster = Roster::parse(ROSTER.as_bytes());

    assert_eq!(roster.errors, Vec::<String>::new());
    assert_eq!(
        roster.teams,
        vec![
            Team {
                language: "bg (Bulgarian)".to_string(),
                repository: "https://github.com/alshopov/git-po".to_string(),
                leader: Some(user("Alexander Shopov", "ash@kambanaria.org")),
                members: Vec::new(),
            },
            Team {
                language: "zh_CN (Simplified Chinese)".to_string(),
                repository: "https://github.com/jiangxin/git-po".to_string(),
                leader: Some(user("Jiang Xin", "worldhello.net@gmail.com")),
                members: vec![
                    user("Ray Chen", "oldsharp@gmail.com"),
                    user("Fangyi Zhou", "me@fangyi.io"),
                ],
            },
        ]
    );
    assert_eq!(roster.teams[1].locale(), "zh_CN");
}

#[test]
fn test_separator_errors_name_the_line() {
    let content = "Language:\tde (German)\nRepository: https://github.com/ralfth/git\nLeader:\tRalf Thielow <ralf.thielow AT gmail.com>\n";

    let roster = Roster::parse(content.as_bytes());

    assert_eq!(
        roster.errors,
        vec![
            "bad syntax at po/TEAMS:2 (need tab between k/v): Repository: https://github.com/ralfth/git",
            "bad syntax at po/TEAMS:3 (need two tabs between k/v): Leader:\tRalf Thielow <ralf.thielow AT gmail.com>",
        ]
    );
    assert_eq!(roster.teams[0].repository, "https://github.com/ralfth/git");
    assert_eq!(
        roster.teams[0].leader,
        Some(user("Ralf Thielow", "ralf.thielow@gmail.com"))
    );
}

#[test]
fn test_value_errors() {
    let content = "Language:\tfr (French) \nFoo:\tbar\nLeader:\t\tnobody\nMembers:\tJean <jn AT x.fr>\n\t\tbroken member\nbad line\nLanguage:\tit\n";

    let roster = Roster::parse(content.as_bytes());

    assert_eq!(
        roster.errors,
        vec![
            "bad syntax at po/TEAMS:1 (too many spaces): Language:\tfr (French) ",
            "bad syntax at po/TEAMS:2 (unknown key \"Foo\"): Foo:\tbar",
            "bad syntax at po/TEAMS:3 (fail to parse user): Leader:\t\tnobody",
            "\t\"nobody\" is not a valid user/email",
            "bad syntax at po/TEAMS:5 (fail to parse user): broken member",
            "bad syntax at po/TEAMS:6 (no column): bad line",
        ]
    );
    // Parsing stops at a line without a key.
    assert_eq!(roster.teams.len(), 1);
    assert_eq!(roster.teams[0].members, vec![user("Jean", "jn@x.fr")]);
}

#[test]
fn test_invalid_utf8_is_reported() {
    let roster = Roster::parse(b"Language:\tde (Deutsch \xff)\n");

    assert_eq!(roster.errors, vec!["invalid utf-8 in: Language:\tde (Deutsch \u{fffd})"]);
    assert_eq!(roster.teams.len(), 1);
}

#[test]
fn test_load_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("TEAMS");
    std::fs::write(&path, ROSTER).unwrap();

    let roster = Roster::load(&path).unwrap();

    assert_eq!(roster.teams.len(), 2);
    assert!(Roster::load(&dir.path().join("missing")).is_err());
}

#[test]
fn test_listing_defaults_to_languages() {
    let roster = Roster::parse(ROSTER.as_bytes());

    assert_eq!(
        TeamListing::default().render(&roster.teams),
        vec!["# bg (Bulgarian):", "# zh_CN (Simplified Chinese):"]
    );
}

#[test]
fn test_listing_leaders_and_members() {
    let roster = Roster::parse(ROSTER.as_bytes());
    let listing = TeamListing {
        leader: true,
        members: true,
        language: true,
        ..TeamListing::default()
    };

    assert_eq!(
        listing.render(&roster.teams),
        vec![
            "# bg (Bulgarian):",
            "\tAlexander Shopov <ash@kambanaria.org>",
            "# zh_CN (Simplified Chinese):",
            "\tJiang Xin <worldhello.net@gmail.com>",
            "\tRay Chen <oldsharp@gmail.com>",
            "\tFangyi Zhou <me@fangyi.io>",
        ]
    );
}

#[test]
fn test_members_of_teams_without_leader_need_all() {
    let teams = vec![Team {
        language: "xx (Test)".to_string(),
        members: vec![user("A", "a@b.c")],
        ..Team::default()
    }];

    let members = TeamListing {
        members: true,
        ..TeamListing::default()
    };
    let all = TeamListing {
        all: true,
        ..TeamListing::default()
    };

    assert!(members.render(&teams).is_empty());
    assert_eq!(all.render(&teams), vec!["A <a@b.c>"]);
}
