//! # Gettext command-line tool-chain
//!
//! [`GettextCli`] implements [`GettextToolchain`] by running `msgfmt`,
//! `msgcmp`, `msgmerge`, `msginit`, `msgcat` and `xgettext` from `PATH`,
//! plus an optional older `msgfmt` used to make sure translation files stay
//! loadable by old gettext releases.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::Error;
use crate::models::{SyntaxChecker, ToolOutput};
use crate::process;
use crate::GettextToolchain;

#[cfg(test)]
#[path = "gettext_tests.rs"]
mod tests;

/// Keywords marking translatable strings in the project's C sources.
const XGETTEXT_KEYWORDS: [&str; 3] = ["--keyword=_", "--keyword=N_", "--keyword=Q_:1,2"];

/// The gettext programs found on `PATH`.
#[derive(Debug, Clone)]
pub struct GettextCli {
    work_dir: PathBuf,
    secondary_msgfmt: Option<PathBuf>,
}

impl GettextCli {
    /// Creates a tool-chain that runs every program in `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            secondary_msgfmt: None,
        }
    }

    /// Configures an additional, back-compatible `msgfmt` binary.
    ///
    /// # Arguments
    ///
    /// * `msgfmt` - Path of the older `msgfmt` executable
    ///
    /// # Returns
    ///
    /// The updated tool-chain
    pub fn with_secondary_msgfmt(mut self, msgfmt: impl Into<PathBuf>) -> Self {
        self.secondary_msgfmt = Some(msgfmt.into());
        self
    }

    fn command(&self, program: impl AsRef<std::ffi::OsStr>) -> Command {
        let mut command = Command::new(program);
        command.current_dir(&self.work_dir);
        command
    }
}

impl GettextToolchain for GettextCli {
    fn check_syntax(&self, checker: SyntaxChecker, po_file: &Path) -> Result<ToolOutput, Error> {
        let program = match checker {
            SyntaxChecker::Primary => PathBuf::from("msgfmt"),
            SyntaxChecker::Secondary => self
                .secondary_msgfmt
                .clone()
                .ok_or_else(|| Error::ToolUnavailable("back-compatible msgfmt".to_string()))?,
        };
        let mut command = self.command(program);
        command
            .arg("-o")
            .arg(null_device())
            .args(["--check", "--statistics"])
            .arg(po_file);
        process::run(&mut command)
    }

    fn has_secondary_checker(&self) -> bool {
        self.secondary_msgfmt.is_some()
    }

    fn compile(&self, po_file: &Path, mo_file: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msgfmt");
        command.arg("-o").arg(mo_file).arg(po_file);
        process::run(&mut command)
    }

    fn compare(&self, po_file: &Path, pot_file: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msgcmp");
        command
            .env("LC_ALL", "C")
            .arg("-N")
            .arg(po_file)
            .arg(pot_file);
        process::run(&mut command)
    }

    fn merge(&self, po_file: &Path, pot_file: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msgmerge");
        command
            .args(["--add-location", "--backup=off", "-U"])
            .arg(po_file)
            .arg(pot_file);
        process::run(&mut command)
    }

    fn diff(&self, src: &Path, dest: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msgcmp");
        command
            .env("LC_ALL", "C")
            .args(["-N", "--use-untranslated"])
            .arg(src)
            .arg(dest);
        process::run(&mut command)
    }

    fn init(&self, locale: &str, pot_file: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msginit");
        command
            .arg(format!("--locale={}", locale))
            .arg("--no-translator")
            .arg("-i")
            .arg(pot_file)
            .args(["-o", "-"]);
        process::run(&mut command)
    }

    fn normalize(&self, pot_file: &Path) -> Result<ToolOutput, Error> {
        let mut command = self.command("msgcat");
        command.args(["--no-wrap", "--indent"]).arg(pot_file);
        process::run(&mut command)
    }

    fn extract(&self, pot_file: &Path, sources: &[&str]) -> Result<ToolOutput, Error> {
        let mut command = self.command("xgettext");
        command
            .args([
                "--force-po",
                "--add-comments=TRANSLATORS:",
                "--package-name=Git",
                "--msgid-bugs-address",
                "Git Mailing List <git@vger.kernel.org>",
                "--language=C",
            ])
            .args(XGETTEXT_KEYWORDS)
            .arg("-o")
            .arg(pot_file)
            .args(sources);
        process::run(&mut command)
    }

    fn build_template(&self) -> Result<ToolOutput, Error> {
        let mut command = self.command("make");
        command.arg("pot");
        process::run(&mut command)
    }
}

fn null_device() -> &'static str {
    if cfg!(windows) {
        "NUL"
    } else {
        "/dev/null"
    }
}
