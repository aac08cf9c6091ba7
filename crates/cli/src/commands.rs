use anyhow::Context;
use l10n_guard_core::config::CheckConfig;
use l10n_guard_core::Toolbox;
use l10n_guard_tools::download::HttpTemplateFetcher;
use l10n_guard_tools::gettext::GettextCli;
use l10n_guard_tools::git::GitCli;
use l10n_guard_tools::terminal::StdTerminal;
use l10n_guard_tools::Repository;

use crate::config::{build_check_config, GlobalOptions};
use crate::errors::CliError;

/// Combined check of translation files and commits
pub mod check;
/// Commit range checking
pub mod check_commits;
/// Translation file checking
pub mod check_po;
/// Message template checking
pub mod check_pot;
/// Message changes between file revisions
pub mod diff;
/// Starting a new translation
pub mod init;
/// Team roster listing and checking
pub mod team;
/// Refreshing a translation from the template
pub mod update;

/// The repository of the current directory and the tools working on it.
struct Session {
    repository: GitCli,
    gettext: GettextCli,
    fetcher: HttpTemplateFetcher,
    terminal: StdTerminal,
}

impl Session {
    /// Opens the repository containing the current directory and moves to
    /// its work tree root.
    fn open(options: &GlobalOptions) -> Result<Self, CliError> {
        let current_dir = std::env::current_dir().context("cannot get current directory")?;
        let repository = GitCli::discover(&current_dir)?;
        repository.change_to_root()?;

        let mut gettext = GettextCli::new(repository.work_dir());
        if let Some(msgfmt) = &options.secondary_msgfmt {
            gettext = gettext.with_secondary_msgfmt(msgfmt);
        }

        Ok(Self {
            repository,
            gettext,
            fetcher: HttpTemplateFetcher::new()?,
            terminal: StdTerminal,
        })
    }

    fn toolbox(&self) -> Toolbox<'_> {
        Toolbox {
            repository: &self.repository,
            gettext: &self.gettext,
            fetcher: &self.fetcher,
            terminal: &self.terminal,
        }
    }

    fn check_config(&self, options: &GlobalOptions) -> Result<CheckConfig, CliError> {
        build_check_config(options, self.repository.work_dir())
    }
}
