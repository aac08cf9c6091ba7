use super::*;
use pretty_assertions::assert_eq;

const ROSTER: &str = "\
Language:\tbg (Bulgarian)
Leader:\t\tAlexander Shopov <ash AT kambanaria.org>

Language:\tzh_CN (Simplified Chinese)
Leader:\t\tJiang Xin <worldhello.net AT gmail.com>
Members:\tRay Chen <oldsharp AT gmail.com>
";

#[test]
fn test_languages_are_listed_by_default() {
    let roster = Roster::parse(ROSTER.as_bytes());

    assert_eq!(
        report(&TeamArgs::default(), &roster),
        vec!["# bg (Bulgarian):", "# zh_CN (Simplified Chinese):"]
    );
}

#[test]
fn test_selected_teams_only() {
    let roster = Roster::parse(ROSTER.as_bytes());
    let args = TeamArgs {
        all: true,
        teams: vec!["zh_CN".to_string()],
        ..TeamArgs::default()
    };

    assert_eq!(
        report(&args, &roster),
        vec!["Jiang Xin <worldhello.net@gmail.com>", "Ray Chen <oldsharp@gmail.com>"]
    );
}

#[test]
fn test_check_prints_nothing() {
    let roster = Roster::parse(ROSTER.as_bytes());
    let args = TeamArgs {
        check: true,
        leader: true,
        ..TeamArgs::default()
    };

    assert!(report(&args, &roster).is_empty());
}
