//! Built-in smudge tables.
//!
//! Each table records conventions of one translation team that the
//! placeholder comparison would otherwise flag: localized example values,
//! dropped angle brackets, localized quotes and Korean particles attached
//! to placeholders.

use lazy_static::lazy_static;
use regex::Regex;

use super::{SmudgeRegistry, SmudgeRule};

lazy_static! {
    static ref SV_GIT_ATTRIBUTE: Regex =
        Regex::new(r"\bgit-attribut\b").expect("Failed to compile sv rule");
    static ref SV_GIT_FILE: Regex =
        Regex::new(r"\bgit-(fil|filen)\b").expect("Failed to compile sv rule");
    static ref SV_GIT_REPOSITORY: Regex =
        Regex::new(r"\bgit-(arkiv|arkivet)\b").expect("Failed to compile sv rule");
}

/// Builds the registry with every built-in table.
pub fn builtin_registry() -> SmudgeRegistry {
    SmudgeRegistry::builder()
        .rules("bg", bulgarian())
        .rules("de", german())
        .rules("es", spanish())
        .rules("ko", korean())
        .rules("sv", swedish())
        .rules("vi", vietnamese())
        // Chinese text puts options and commands right next to the
        // surrounding words.
        .without_fragment_filter("zh_CN")
        .without_fragment_filter("zh_TW")
        .build()
}

fn literals(pairs: &[(&str, &str)]) -> Vec<SmudgeRule> {
    pairs
        .iter()
        .map(|(pattern, replacement)| SmudgeRule::literal(*pattern, *replacement))
        .collect()
}

fn bulgarian() -> Vec<SmudgeRule> {
    let mut rules = literals(&[
        ("———", "---"),
        // Placeholders without angle brackets
        ("РЕГУЛЯРЕН_ИЗРАЗ", "<РЕГУЛЯРЕН_ИЗРАЗ>"),
        ("ДИРЕКТОРИЯ", "<ДИРЕКТОРИЯ>"),
        ("ПАКЕТЕН_ФАЙЛ", "<ПАКЕТЕН_ФАЙЛ>"),
        ("--config=НАСТРОЙКА", "--config=<НАСТРОЙКА>"),
        ("--prefix=ПРЕФИКС", "--prefix=<ПРЕФИКС>"),
        ("--index-output=ФАЙЛ", "--index-output=<ФАЙЛ>"),
        ("--extcmd=КОМАНДА", "--extcmd=<КОМАНДА>"),
        ("--tool=ПРОГРАМА", "--tool=<ПРОГРАМА>"),
        ("--schedule=ЧЕСТОТА", "--schedule=<ЧЕСТОТА>"),
        ("trailers:key=ЕПИЛОГ", "trailers:key=<ЕПИЛОГ>"),
        ("--dirstat=ФАЙЛ…,ПАРАМЕТЪР_1,ПАРАМЕТЪР_2,", "--dirstat=files,param1,param2"),
        ("--dirstat=ФАЙЛОВЕ", "--dirstat=files"),
        // Example addresses
        ("ИМЕ@example.com", "you@example.com"),
        ("пенчо@example.com", "you@example.com"),
        // Options quoted in prose
        ("неправилен параметър към опцията „--update“", "bad value for update parameter"),
        ("включва опцията „--bare“ за голо хранилище", "implies bare"),
        ("„--hard“/„--mixed“/„--soft“", "--{hard,mixed,soft}"),
        ("„%s“ към опцията „--ancestry-path", "ancestry-path argument %s"),
        ("не поддържа опцията „--force“", "does not support 'force'"),
        ("неправилна стойност за „--mirror“: %s", "unknown mirror argument: %s"),
        // Commands with or without the "git" in front
        ("Командата „git pack-objects“", "spawn pack-objects"),
        (
            "„git-difftool“ изисква работно дърво или опцията „--no-index“",
            "difftool requires worktree or --no-index",
        ),
        ("командата „git index-pack“ не завърши успешно", "index-pack died"),
        ("Командата „git pack-objects“ не завърши успешно", "pack-objects died"),
        (
            "указателят „%s“ не е бил включен поради опциите зададени на „git rev-list“",
            "ref '%s' is excluded by the rev-list options",
        ),
        ("    git merge-base --fork-point", "    merge-base --fork-point"),
        // Quotes
        ("„", "\""),
        ("“", "\""),
    ]);

    // Format atoms keep their localized argument names, so the original is
    // rewritten to match.
    rules.push(SmudgeRule::literal("align:<width>,<position>", "align:ШИРОЧИНА,ПОЗИЦИЯ").reversed());
    rules.push(SmudgeRule::literal("color:<color>", "color:ЦВЯТ").reversed());
    rules
}

fn german() -> Vec<SmudgeRule> {
    literals(&[
        ("z.B.", "e.g."),
        ("ihre@emailadresse.de", "you@example.com"),
    ])
}

fn spanish() -> Vec<SmudgeRule> {
    literals(&[("p.e.", "e.g."), ("--dirstat=archivos", "--dirstat=files")])
}

fn korean() -> Vec<SmudgeRule> {
    ["를", "로", "은", "으", "을", "의", "입", "이", "와", "에", "는", "번", "가", "개", "과"]
        .iter()
        .map(|particle| SmudgeRule::literal(*particle, format!(" {}", particle)))
        .collect()
}

fn swedish() -> Vec<SmudgeRule> {
    let mut rules = literals(&[
        ("t.ex", "e.g."),
        ("ref.spec-en", "refspec"),
        ("--dirstat=filer", "--dirstat=files"),
        ("git-branch-åtgärder", "git-branch actions"),
        ("git-kommand", "git command"),
        ("git-diff-huvudet", "git diff header"),
        ("git-katalog", "git dir"),
        ("git-huvudet", "git header"),
        ("git-process", "git process"),
        ("-läge", " mode"),
        ("-krokar", " hooks"),
        ("git-arkivversion", "git repo version"),
    ]);
    rules.push(SmudgeRule::regex(SV_GIT_ATTRIBUTE.clone(), "git attribute"));
    rules.push(SmudgeRule::regex(SV_GIT_FILE.clone(), "git file"));
    rules.push(SmudgeRule::regex(SV_GIT_REPOSITORY.clone(), "git repository"));
    rules
}

fn vietnamese() -> Vec<SmudgeRule> {
    literals(&[
        ("v.d.", "e.g."),
        ("v.v.", "etc."),
        ("bạn@ví_dụ.com", "you@example.com"),
    ])
}
