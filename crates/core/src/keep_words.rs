//! # Keep Words
//!
//! Extraction of the tokens that must survive translation unchanged: shell
//! variables, configuration keys, identifiers, git command names, command
//! line options, format atoms and ref names.
//!
//! Word boundaries in the pattern are ASCII boundaries, so a token written
//! directly next to letters of a script without spaces (as is common in
//! Chinese and Japanese) is still found. For translations, matches that look
//! like a fragment of a larger non-Latin word can be filtered out with
//! [`extract_keep_words_from_translation`].

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::bytes;
use regex::Regex;

#[cfg(test)]
#[path = "keep_words_tests.rs"]
mod tests;

lazy_static! {
    /// Every category of keep word, one alternation branch each
    pub static ref KEEP_WORDS_REGEX: bytes::Regex = bytes::Regex::new(concat!(
        // shell variables: ${n}
        r"\$\{[a-zA-Z0-9_]+\}",
        // shell variables: $PATH
        r"|\$[a-zA-Z0-9_]+",
        // config variables: color.ui
        r"|(?-u:\b)[a-zA-Z.]+\.[a-zA-Z]+(?-u:\b)",
        // variable names: var_name
        r"|(?-u:\b)[a-zA-Z0-9_]+_[a-zA-Z0-9]+(?-u:\b)",
        // git commands: git-log
        r"|(?-u:\b)git-[a-z-]+",
        // git commands: git bisect--helper
        r"|(?-u:\b)git [a-z]+-[a-z-]+",
        // helper commands: bisect--helper
        r"|(?-u:\b)[a-z-]+--[a-z-]+",
        // options: --option, --[no-]option, --option=<value>; a value never
        // ends with a single period or comma, but may end with "..."
        r"|--(?:\[no-\])?[a-zA-Z0-9][a-zA-Z0-9-]*",
        r"(?:=[a-zA-Z0-9_<>*/{}|:-]*(?:[.,]+[a-zA-Z0-9_<>*/{}|:-]+)*(?:\.\.\.)?)?",
        // format atoms: %%(fieldname)
        r"|%%\([^)]*\)",
        // refs: refs/remotes/<name>/HEAD, refs/{heads,tags}/
        r"|(?-u:\b)refs/[a-zA-Z0-9{}<>_.,/-]*",
    ))
    .expect("Failed to compile keep words regex");

    static ref PUNCT_SYMBOL_SPACE_REGEX: Regex =
        Regex::new(r"^[\p{P}\p{S}\s]$").expect("Failed to compile punctuation regex");
}

/// Extracts the normalized keep words of `text`.
///
/// `${name}` is reported as `$name`, so both spellings of a shell variable
/// compare equal.
///
/// # Examples
///
/// ```
/// use l10n_guard_core::keep_words::extract_keep_words;
///
/// let words = extract_keep_words("use --show-forced-updates or set ${GIT_DIR}");
/// let words: Vec<&str> = words.iter().map(String::as_str).collect();
/// assert_eq!(words, vec!["$GIT_DIR", "--show-forced-updates"]);
/// ```
pub fn extract_keep_words(text: &str) -> BTreeSet<String> {
    matches(text).map(|(_, word)| canonical(word)).collect()
}

/// Extracts keep words from a translated string, dropping matches that are
/// fragments of a larger word in a non-Latin script.
///
/// A match is a fragment when the character right before or right after it
/// is a multi-byte character that is neither punctuation, a symbol nor
/// whitespace.
pub fn extract_keep_words_from_translation(text: &str) -> BTreeSet<String> {
    matches(text)
        .filter(|(start, word)| !is_fragment(text, *start, *start + word.len()))
        .map(|(_, word)| canonical(word))
        .collect()
}

fn matches(text: &str) -> impl Iterator<Item = (usize, &str)> {
    // ASCII boundaries never fall inside a multi-byte character, so every
    // match starts and ends on a char boundary.
    KEEP_WORDS_REGEX
        .find_iter(text.as_bytes())
        .filter_map(move |m| text.get(m.start()..m.end()).map(|word| (m.start(), word)))
}

fn canonical(word: &str) -> String {
    match word.strip_prefix("${").and_then(|w| w.strip_suffix('}')) {
        Some(name) => format!("${}", name),
        None => word.to_string(),
    }
}

fn is_fragment(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    [before, after]
        .into_iter()
        .flatten()
        .any(|c| c.len_utf8() > 1 && !is_punct_symbol_or_space(c))
}

fn is_punct_symbol_or_space(c: char) -> bool {
    let mut buffer = [0u8; 4];
    PUNCT_SYMBOL_SPACE_REGEX.is_match(c.encode_utf8(&mut buffer))
}
