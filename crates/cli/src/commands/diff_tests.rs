use super::*;
use clap::Parser;
use pretty_assertions::assert_eq;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    args: DiffArgs,
}

#[test]
fn test_revisions_repeat_and_files_follow() {
    let cli = TestCli::try_parse_from([
        "diff",
        "-r",
        "v2.39.0",
        "--revision",
        "v2.40.0",
        "po/zh_CN.po",
    ])
    .unwrap();

    assert_eq!(cli.args.revisions, vec!["v2.39.0", "v2.40.0"]);
    assert_eq!(cli.args.files, vec!["po/zh_CN.po"]);
}

#[test]
fn test_no_operands() {
    let cli = TestCli::try_parse_from(["diff"]).unwrap();

    assert!(cli.args.revisions.is_empty());
    assert!(cli.args.files.is_empty());
}
