use anyhow::Context;
use clap::Args;
use l10n_guard_core::config::TEAMS_FILE;
use l10n_guard_core::teams::{Roster, TeamListing};
use l10n_guard_tools::git::GitCli;
use l10n_guard_tools::Repository;
use tracing::{debug, error, instrument};

use crate::errors::CliError;

/// Arguments for the team command
#[derive(Args, Debug, Default)]
pub struct TeamArgs {
    /// Only check the syntax of "po/TEAMS"
    #[arg(short, long)]
    pub check: bool,

    /// Show team leaders
    #[arg(short, long)]
    pub leader: bool,

    /// Show team members of teams with a leader
    #[arg(short, long)]
    pub members: bool,

    /// Show leaders and members of every team
    #[arg(short, long)]
    pub all: bool,

    /// Show the language of each team
    #[arg(long)]
    pub language: bool,

    /// Locales of the teams to show; all teams by default
    pub teams: Vec<String>,
}

impl TeamArgs {
    fn listing(&self) -> TeamListing {
        TeamListing {
            leader: self.leader,
            members: self.members,
            all: self.all,
            language: self.language,
        }
    }
}

/// Runs the team command.
#[instrument]
pub fn execute(args: TeamArgs) -> Result<(), CliError> {
    let current_dir = std::env::current_dir().context("cannot get current directory")?;
    let repository = GitCli::discover(&current_dir)?;
    let roster = Roster::load(&repository.work_dir().join(TEAMS_FILE))?;

    let lines = report(&args, &roster);
    for line in &lines {
        println!("{}", line);
    }

    if roster.errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed(format!(
            "fail to parse {}",
            TEAMS_FILE
        )))
    }
}

/// Logs the syntax errors of `roster` and renders the selected teams.
fn report(args: &TeamArgs, roster: &Roster) -> Vec<String> {
    for e in &roster.errors {
        error!("{}", e);
    }
    debug!("get {} teams from \"{}\"", roster.teams.len(), TEAMS_FILE);
    if args.check {
        return Vec::new();
    }

    let teams: Vec<_> = roster
        .teams
        .iter()
        .filter(|team| args.teams.is_empty() || args.teams.iter().any(|t| t == team.locale()))
        .cloned()
        .collect();
    args.listing().render(&teams)
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod tests;
