//! # Terminal interaction

use std::io::{self, BufRead, IsTerminal, Write};

use crate::Terminal;

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;

/// The process' own stdin and stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    fn confirm(&self, question: &str, default: bool) -> bool {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let mut stdout = io::stdout();
        if write!(stdout, "{} {} ", question, hint)
            .and_then(|_| stdout.flush())
            .is_err()
        {
            return default;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_answer(&answer, default),
            Err(_) => default,
        }
    }
}

/// Interprets a yes/no answer typed by the user.
///
/// An empty answer selects `default`.
///
/// # Examples
///
/// ```
/// use l10n_guard_tools::terminal::parse_answer;
///
/// assert!(parse_answer("Yes\n", false));
/// assert!(!parse_answer("nope", true));
/// assert!(parse_answer("  \n", true));
/// ```
pub fn parse_answer(answer: &str, default: bool) -> bool {
    let answer = answer.trim();
    if answer.is_empty() {
        return default;
    }
    answer_is_true(answer)
}

/// Whether `answer` is one of the accepted spellings of "yes".
pub fn answer_is_true(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "t" | "true" | "on" | "1"
    )
}
