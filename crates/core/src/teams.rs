//! # Team Roster
//!
//! Parser for the `po/TEAMS` roster of translation teams.
//!
//! Each team is a block of `Key:<TAB>value` lines:
//!
//! ```text
//! Language:	zh_CN (Simplified Chinese)
//! Repository:	https://github.com/l10n-tw/git-po
//! Leader:		Jiang Xin <worldhello.net AT gmail.com>
//! Members:	Ray Chen <oldsharp AT gmail.com>
//! 		Fangyi Zhou <me AT fangyi.io>
//! ```
//!
//! `Leader:` is followed by two tabs, continuation lines of `Members:` start
//! with two tabs, and ` AT ` stands for `@`. Lines before the first key are
//! free-form text.

use std::fmt;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::L10nGuardError;

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;

lazy_static! {
    static ref USER_EMAIL_REGEX: Regex =
        Regex::new(r"^(.*) <(.+@.+\..+)>").expect("Failed to compile user regex");
}

/// The test team kept in the roster for tooling checks.
const TEST_LANGUAGE: &str = "is (Icelandic)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

impl User {
    /// Parses `Name <email>`, accepting ` AT ` in place of `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use l10n_guard_core::teams::User;
    ///
    /// let user = User::parse("Jiang Xin <worldhello.net AT gmail.com>").unwrap();
    /// assert_eq!(user.email, "worldhello.net@gmail.com");
    /// ```
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.replacen(" AT ", "@", 1);
        match USER_EMAIL_REGEX.captures(&text) {
            Some(captures) => Ok(Self {
                name: captures[1].to_string(),
                email: captures[2].to_string(),
            }),
            None => Err(format!("\"{}\" is not a valid user/email", text)),
        }
    }
}

/// One translation team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    /// Locale and language name, e.g. `zh_CN (Simplified Chinese)`
    pub language: String,
    pub repository: String,
    pub leader: Option<User>,
    pub members: Vec<User>,
}

impl Team {
    /// The locale code at the start of the language field.
    pub fn locale(&self) -> &str {
        self.language.split_whitespace().next().unwrap_or("")
    }
}

/// Result of parsing a roster. Parsing continues after syntax errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub teams: Vec<Team>,
    pub errors: Vec<String>,
}

impl Roster {
    /// Reads and parses the roster stored at `path`.
    pub fn load(path: &Path) -> Result<Self, L10nGuardError> {
        let content = fs::read(path)?;
        Ok(Self::parse(&content))
    }

    /// Parses roster content.
    pub fn parse(content: &[u8]) -> Self {
        let mut roster = Roster::default();
        let mut team = Team::default();
        let mut in_head = true;

        let lines: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
        let mut index = 0;
        while index < lines.len() {
            let number = index + 1;
            let raw = lines[index];
            index += 1;
            if raw.is_empty() {
                continue;
            }

            let line = match std::str::from_utf8(raw) {
                Ok(line) => line.to_string(),
                Err(_) => {
                    let line = String::from_utf8_lossy(raw).into_owned();
                    roster.errors.push(format!("invalid utf-8 in: {}", line));
                    line
                }
            };
            let syntax_error =
                |reason: &str| format!("bad syntax at po/TEAMS:{} ({}): {}", number, reason, line);

            let Some((key, value)) = line.split_once(':') else {
                if in_head {
                    continue;
                }
                roster.errors.push(syntax_error("no column"));
                break;
            };

            let value = if value.len() < 2 {
                roster.errors.push(syntax_error("too short value"));
                value
            } else if key == "Leader" {
                match value.strip_prefix("\t\t") {
                    Some(value) => value,
                    None => {
                        roster.errors.push(syntax_error("need two tabs between k/v"));
                        value.trim()
                    }
                }
            } else {
                match value.strip_prefix('\t') {
                    Some(value) => value,
                    None => {
                        roster.errors.push(syntax_error("need tab between k/v"));
                        value.trim()
                    }
                }
            };
            if value.trim() != value {
                roster.errors.push(syntax_error("too many spaces"));
            }

            match key {
                "Language" => {
                    let previous = std::mem::take(&mut team);
                    if !previous.language.is_empty() && previous.language != TEST_LANGUAGE {
                        roster.teams.push(previous);
                    }
                    team.language = value.to_string();
                }
                "Repository" => team.repository = value.to_string(),
                "Leader" => match User::parse(value) {
                    Ok(user) => team.leader = Some(user),
                    Err(e) => {
                        roster.errors.push(syntax_error("fail to parse user"));
                        roster.errors.push(format!("\t{}", e));
                    }
                },
                "Members" => {
                    match User::parse(value) {
                        Ok(user) => team.members.push(user),
                        Err(e) => {
                            roster.errors.push(syntax_error("fail to parse user"));
                            roster.errors.push(format!("\t{}", e));
                        }
                    }
                    while let Some(next) = lines
                        .get(index)
                        .copied()
                        .and_then(|l| l.strip_prefix(b"\t\t"))
                    {
                        let member = String::from_utf8_lossy(next);
                        index += 1;
                        match User::parse(&member) {
                            Ok(user) => team.members.push(user),
                            Err(_) => roster.errors.push(format!(
                                "bad syntax at po/TEAMS:{} (fail to parse user): {}",
                                index, member
                            )),
                        }
                    }
                }
                _ => {
                    if in_head {
                        continue;
                    }
                    roster.errors.push(syntax_error(&format!("unknown key \"{}\"", key)));
                }
            }
            in_head = false;
        }

        if !team.language.is_empty() && team.language != TEST_LANGUAGE {
            roster.teams.push(team);
        }
        roster
    }
}

/// What the team listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamListing {
    pub leader: bool,
    pub members: bool,
    pub all: bool,
    pub language: bool,
}

impl TeamListing {
    /// Renders `teams` as output lines.
    ///
    /// Without any option only the language of each team is listed. Members
    /// of a team without a leader are only shown with `all`.
    pub fn render(&self, teams: &[Team]) -> Vec<String> {
        let mut lines = Vec::new();
        for team in teams {
            let prefix = if self.language {
                lines.push(format!("# {}:", team.language));
                "\t"
            } else {
                ""
            };
            if self.leader || self.all {
                if let Some(leader) = &team.leader {
                    lines.push(format!("{}{}", prefix, leader));
                }
            }
            if (self.members && team.leader.is_some()) || self.all {
                for member in &team.members {
                    lines.push(format!("{}{}", prefix, member));
                }
            }
            if !self.leader && !self.members && !self.all && !self.language {
                lines.push(format!("# {}:", team.language));
            }
        }
        lines
    }
}
