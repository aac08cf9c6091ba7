//! # Git command-line client
//!
//! [`GitCli`] implements [`Repository`] by running `git` in the work tree of
//! the repository being checked.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crate::errors::Error;
use crate::models::{ChangeStatus, ChangedPath, ScratchFile, ToolOutput};
use crate::process;
use crate::Repository;

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;

/// Directory holding the translation files, relative to the work tree root.
pub const PO_DIR: &str = "po";

/// A repository accessed through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    git_dir: PathBuf,
    work_dir: PathBuf,
}

impl GitCli {
    /// Locates the repository containing `start`.
    ///
    /// # Arguments
    ///
    /// * `start` - Any directory inside the work tree
    ///
    /// # Returns
    ///
    /// A `Result` containing the repository, or [`Error::NotARepository`] when
    /// `start` is not inside a work tree
    #[instrument]
    pub fn discover(start: &Path) -> Result<Self, Error> {
        let mut command = Command::new("git");
        command
            .current_dir(start)
            .args(["rev-parse", "--absolute-git-dir", "--show-toplevel"]);
        let output = process::run_for_text(&mut command)
            .map_err(|_| Error::NotARepository(start.display().to_string()))?;

        let mut lines = output.lines();
        match (lines.next(), lines.next()) {
            (Some(git_dir), Some(work_dir)) => {
                debug!(git_dir, work_dir, "found repository");
                Ok(Self::at(git_dir, work_dir))
            }
            _ => Err(Error::NotARepository(start.display().to_string())),
        }
    }

    /// Creates a client for a repository whose locations are already known.
    pub fn at(git_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Makes the work tree root the current directory of the process.
    ///
    /// Fails when the work tree has no `po/` directory, since none of the
    /// checks make sense outside a project with translations.
    pub fn change_to_root(&self) -> Result<(), Error> {
        if !self.work_dir.join(PO_DIR).is_dir() {
            return Err(Error::MissingPoDirectory(
                self.work_dir.display().to_string(),
            ));
        }
        std::env::set_current_dir(&self.work_dir)?;
        Ok(())
    }

    fn git(&self) -> Command {
        let mut command = Command::new("git");
        command.current_dir(&self.work_dir);
        command
    }
}

/// Parses the output of `git diff-tree -r --no-commit-id`.
///
/// Each record looks like `:100644 100644 <old> <new> M\tpo/zh_CN.po`. Copies
/// and renames carry two tab separated paths; the destination is kept.
pub fn parse_diff_tree(output: &str) -> Vec<ChangedPath> {
    output
        .lines()
        .filter_map(|line| {
            let (meta, paths) = line.split_once('\t')?;
            let status = meta.split_whitespace().last()?;
            let path = paths.rsplit('\t').next()?;
            Some(ChangedPath::new(ChangeStatus::from_code(status), path))
        })
        .collect()
}

impl Repository for GitCli {
    fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn config_bool(&self, key: &str, default: bool) -> bool {
        let mut command = self.git();
        command.args(["config", "--type=bool", "--get", key]);
        match process::run_for_text(&mut command) {
            Ok(value) => match value.trim() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            Err(_) => default,
        }
    }

    fn rev_list(&self, args: &[String]) -> Result<Vec<String>, Error> {
        let mut command = self.git();
        command.args(["rev-list", "--reverse"]).args(args);
        let output = process::run_for_text(&mut command)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn cat_commit(&self, commit: &str) -> Result<Vec<u8>, Error> {
        let mut command = self.git();
        command.args(["cat-file", "commit", commit]);
        process::run_for_bytes(&mut command)
    }

    fn changed_paths(&self, commit: &str) -> Result<Vec<ChangedPath>, Error> {
        let mut command = self.git();
        command.args([
            "diff-tree",
            "-r",
            "--root",
            "--no-commit-id",
            "--diff-filter=ACM",
            commit,
        ]);
        let output = process::run_for_text(&mut command)?;
        Ok(parse_diff_tree(&output))
    }

    fn checkout_blob(&self, revision: &str, path: &str) -> Result<ScratchFile, Error> {
        let mut command = self.git();
        command.args(["show", &format!("{}:{}", revision, path)]);
        let content = process::run_for_bytes(&mut command)?;
        let base = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ScratchFile::with_content(&format!("--{}", base), &content)
    }

    fn verify_commit(&self, commit: &str) -> Result<ToolOutput, Error> {
        let mut command = self.git();
        command.args(["verify-commit", commit]);
        process::run(&mut command)
    }

    fn missing_blobs(
        &self,
        args: &[String],
        max_count: usize,
        pathspec: &str,
    ) -> Result<Vec<String>, Error> {
        let mut command = self.git();
        command
            .args(["rev-list", "--objects", "--missing=print"])
            .arg(format!("--max-count={}", max_count))
            .args(args)
            .args(["--", pathspec]);
        let output = process::run_for_text(&mut command)?;
        Ok(output
            .lines()
            .filter_map(|l| l.strip_prefix('?'))
            .map(|l| l.trim().to_string())
            .collect())
    }

    fn fetch_blobs(&self, blobs: &[String]) -> Result<ToolOutput, Error> {
        let mut command = self.git();
        command.args([
            "-c",
            "fetch.negotiationAlgorithm=noop",
            "fetch",
            "origin",
            "--no-tags",
            "--no-write-fetch-head",
            "--recurse-submodules=no",
            "--filter=blob:none",
            "--stdin",
        ]);
        let mut input = blobs.join("\n");
        input.push('\n');
        process::run_with_input(&mut command, input)
    }

    fn describe(&self) -> Result<String, Error> {
        let mut command = self.git();
        command.args(["describe", "--always"]);
        Ok(process::run_for_text(&mut command)?.trim().to_string())
    }
}
