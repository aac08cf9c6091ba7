// In-memory implementations of the tool traits shared by the unit tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use l10n_guard_tools::errors::Error;
use l10n_guard_tools::mo::{Entry, MoCatalog};
use l10n_guard_tools::models::{ChangeStatus, ChangedPath, ScratchFile, SyntaxChecker, ToolOutput};
use l10n_guard_tools::{GettextToolchain, Repository, TemplateFetcher, Terminal};

pub fn success(stderr: &str) -> ToolOutput {
    ToolOutput {
        success: true,
        status: "exit status: 0".to_string(),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

pub fn failure(stderr: &str) -> ToolOutput {
    ToolOutput {
        success: false,
        status: "exit status: 1".to_string(),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

pub fn modified(path: &str) -> ChangedPath {
    ChangedPath::new(ChangeStatus::Modified, path)
}

pub fn translation(id: &str, translated: &str) -> Entry {
    Entry {
        context: None,
        id: id.to_string(),
        id_plural: None,
        translations: vec![translated.to_string()],
    }
}

/// A 40-hex commit ID whose abbreviation is unique for small `n`.
pub fn commit_id(n: usize) -> String {
    format!("{:07x}{}", 0xa00_0000 + n, "0".repeat(33))
}

/// A well-formed l10n commit object with the given subject.
pub fn raw_commit(subject: &str, timestamp: i64) -> String {
    format!(
        "tree 0123456789012345678901234567890123456789\n\
         parent 1234567890123456789012345678901234567890\n\
         author Jiang Xin <worldhello.net@gmail.com> {ts} +0800\n\
         committer Jiang Xin <worldhello.net@gmail.com> {ts} +0800\n\
         \n\
         {subject}\n\
         \n\
         Update translation.\n\
         \n\
         Signed-off-by: Jiang Xin <worldhello.net@gmail.com>\n",
        ts = timestamp,
        subject = subject
    )
}

#[derive(Debug)]
pub struct MockRepository {
    root: PathBuf,
    commits: Vec<String>,
    raw_commits: HashMap<String, Vec<u8>>,
    changes: HashMap<String, Vec<ChangedPath>>,
    blobs: HashMap<(String, String), Vec<u8>>,
    config: HashMap<String, bool>,
    verify_outputs: HashMap<String, ToolOutput>,
    missing: Vec<String>,
    fetch_output: Option<ToolOutput>,
    description: Option<String>,
    pub rev_list_calls: Mutex<Vec<Vec<String>>>,
    pub inspected: Mutex<Vec<String>>,
    pub verified: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<Vec<String>>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/nonexistent/l10n-guard"),
            commits: Vec::new(),
            raw_commits: HashMap::new(),
            changes: HashMap::new(),
            blobs: HashMap::new(),
            config: HashMap::new(),
            verify_outputs: HashMap::new(),
            missing: Vec::new(),
            fetch_output: None,
            description: None,
            rev_list_calls: Mutex::new(Vec::new()),
            inspected: Mutex::new(Vec::new()),
            verified: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }

    /// Appends a commit to the listed range.
    pub fn with_commit(mut self, id: &str, raw: &str, changes: Vec<ChangedPath>) -> Self {
        self.commits.push(id.to_string());
        self.raw_commits.insert(id.to_string(), raw.as_bytes().to_vec());
        self.changes.insert(id.to_string(), changes);
        self
    }

    /// Stores a raw commit object that is not part of the listed range.
    pub fn with_raw_commit(mut self, id: &str, raw: &[u8]) -> Self {
        self.raw_commits.insert(id.to_string(), raw.to_vec());
        self
    }

    pub fn with_blob(mut self, revision: &str, path: &str, content: &str) -> Self {
        self.blobs.insert(
            (revision.to_string(), path.to_string()),
            content.as_bytes().to_vec(),
        );
        self
    }

    pub fn with_config(mut self, key: &str, value: bool) -> Self {
        self.config.insert(key.to_string(), value);
        self
    }

    pub fn with_verify_output(mut self, id: &str, output: ToolOutput) -> Self {
        self.verify_outputs.insert(id.to_string(), output);
        self
    }

    pub fn with_missing_blobs(mut self, blobs: &[&str]) -> Self {
        self.missing = blobs.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_fetch_output(mut self, output: ToolOutput) -> Self {
        self.fetch_output = Some(output);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl Repository for MockRepository {
    fn git_dir(&self) -> &Path {
        &self.root
    }

    fn work_dir(&self) -> &Path {
        &self.root
    }

    fn config_bool(&self, key: &str, default: bool) -> bool {
        self.config.get(key).copied().unwrap_or(default)
    }

    fn rev_list(&self, args: &[String]) -> Result<Vec<String>, Error> {
        self.rev_list_calls.lock().unwrap().push(args.to_vec());
        Ok(self.commits.clone())
    }

    fn cat_commit(&self, commit: &str) -> Result<Vec<u8>, Error> {
        self.raw_commits
            .get(commit)
            .cloned()
            .ok_or_else(|| Error::CommandFailed {
                program: "git".to_string(),
                status: "exit status: 128".to_string(),
                stderr: format!("fatal: Not a valid object name {}", commit),
            })
    }

    fn changed_paths(&self, commit: &str) -> Result<Vec<ChangedPath>, Error> {
        self.inspected.lock().unwrap().push(commit.to_string());
        Ok(self.changes.get(commit).cloned().unwrap_or_default())
    }

    fn checkout_blob(&self, revision: &str, path: &str) -> Result<ScratchFile, Error> {
        match self.blobs.get(&(revision.to_string(), path.to_string())) {
            Some(content) => ScratchFile::with_content(".po", content),
            None => Err(Error::CommandFailed {
                program: "git".to_string(),
                status: "exit status: 128".to_string(),
                stderr: format!("fatal: path '{}' does not exist in '{}'", path, revision),
            }),
        }
    }

    fn verify_commit(&self, commit: &str) -> Result<ToolOutput, Error> {
        self.verified.lock().unwrap().push(commit.to_string());
        Ok(self
            .verify_outputs
            .get(commit)
            .cloned()
            .unwrap_or_else(|| success("")))
    }

    fn missing_blobs(
        &self,
        _args: &[String],
        _max_count: usize,
        _pathspec: &str,
    ) -> Result<Vec<String>, Error> {
        Ok(self.missing.clone())
    }

    fn fetch_blobs(&self, blobs: &[String]) -> Result<ToolOutput, Error> {
        self.fetched.lock().unwrap().push(blobs.to_vec());
        Ok(self.fetch_output.clone().unwrap_or_else(|| success("")))
    }

    fn describe(&self) -> Result<String, Error> {
        self.description.clone().ok_or_else(|| Error::CommandFailed {
            program: "git describe".to_string(),
            status: "exit status: 128".to_string(),
            stderr: "fatal: No names found, cannot describe anything.".to_string(),
        })
    }
}

/// Records tool invocations; `compile` writes a catalog of the configured
/// entries.
#[derive(Debug)]
pub struct MockGettext {
    primary: ToolOutput,
    secondary: Option<ToolOutput>,
    catalog: Option<Vec<Entry>>,
    compile_output: ToolOutput,
    compare_output: ToolOutput,
    merge_output: ToolOutput,
    diff_output: ToolOutput,
    init_output: ToolOutput,
    normalize_output: ToolOutput,
    template: Option<(PathBuf, String)>,
    calls: Mutex<Vec<String>>,
    pub compared: Mutex<Vec<(PathBuf, PathBuf)>>,
    /// Contents of both sides of every `diff`, read at call time
    pub diffed: Mutex<Vec<(String, String)>>,
}

impl MockGettext {
    pub fn new() -> Self {
        Self {
            primary: success("1 translated message.\n"),
            secondary: None,
            catalog: Some(vec![translation("", "Content-Type: text/plain; charset=UTF-8\n")]),
            compile_output: success(""),
            compare_output: success(""),
            merge_output: success(""),
            diff_output: success(""),
            init_output: success(""),
            normalize_output: success(""),
            template: None,
            calls: Mutex::new(Vec::new()),
            compared: Mutex::new(Vec::new()),
            diffed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_syntax_output(mut self, output: ToolOutput) -> Self {
        self.primary = output;
        self
    }

    pub fn with_secondary_output(mut self, output: ToolOutput) -> Self {
        self.secondary = Some(output);
        self
    }

    /// Messages written by `compile`; `None` makes it write nothing.
    pub fn with_catalog(mut self, entries: Option<Vec<Entry>>) -> Self {
        self.catalog = entries;
        self
    }

    pub fn with_compile_output(mut self, output: ToolOutput) -> Self {
        self.compile_output = output;
        self
    }

    pub fn with_compare_output(mut self, output: ToolOutput) -> Self {
        self.compare_output = output;
        self
    }

    pub fn with_merge_output(mut self, output: ToolOutput) -> Self {
        self.merge_output = output;
        self
    }

    pub fn with_diff_output(mut self, output: ToolOutput) -> Self {
        self.diff_output = output;
        self
    }

    pub fn with_init_output(mut self, output: ToolOutput) -> Self {
        self.init_output = output;
        self
    }

    pub fn with_normalize_output(mut self, output: ToolOutput) -> Self {
        self.normalize_output = output;
        self
    }

    /// Makes `build_template` and `extract` write `content` to `path`.
    pub fn with_template(mut self, path: &Path, content: &str) -> Self {
        self.template = Some((path.to_path_buf(), content.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn write_template(&self) -> Result<(), Error> {
        if let Some((path, content)) = &self.template {
            fs::write(path, content)?;
        }
        Ok(())
    }
}

impl GettextToolchain for MockGettext {
    fn check_syntax(&self, checker: SyntaxChecker, _po_file: &Path) -> Result<ToolOutput, Error> {
        match checker {
            SyntaxChecker::Primary => {
                self.record("check_syntax");
                Ok(self.primary.clone())
            }
            SyntaxChecker::Secondary => {
                self.record("check_syntax_secondary");
                Ok(self.secondary.clone().unwrap_or_else(|| success("")))
            }
        }
    }

    fn has_secondary_checker(&self) -> bool {
        self.secondary.is_some()
    }

    fn compile(&self, _po_file: &Path, mo_file: &Path) -> Result<ToolOutput, Error> {
        self.record("compile");
        if let Some(entries) = &self.catalog {
            fs::write(mo_file, MoCatalog::encode(entries))?;
        }
        Ok(self.compile_output.clone())
    }

    fn compare(&self, po_file: &Path, pot_file: &Path) -> Result<ToolOutput, Error> {
        self.record("compare");
        self.compared
            .lock()
            .unwrap()
            .push((po_file.to_path_buf(), pot_file.to_path_buf()));
        Ok(self.compare_output.clone())
    }

    fn merge(&self, _po_file: &Path, _pot_file: &Path) -> Result<ToolOutput, Error> {
        self.record("merge");
        Ok(self.merge_output.clone())
    }

    fn diff(&self, src: &Path, dest: &Path) -> Result<ToolOutput, Error> {
        self.record("diff");
        self.diffed
            .lock()
            .unwrap()
            .push((fs::read_to_string(src)?, fs::read_to_string(dest)?));
        Ok(self.diff_output.clone())
    }

    fn init(&self, _locale: &str, _pot_file: &Path) -> Result<ToolOutput, Error> {
        self.record("init");
        Ok(self.init_output.clone())
    }

    fn normalize(&self, _pot_file: &Path) -> Result<ToolOutput, Error> {
        self.record("normalize");
        Ok(self.normalize_output.clone())
    }

    fn extract(&self, _pot_file: &Path, _sources: &[&str]) -> Result<ToolOutput, Error> {
        self.record("extract");
        self.write_template()?;
        Ok(success(""))
    }

    fn build_template(&self) -> Result<ToolOutput, Error> {
        self.record("build_template");
        self.write_template()?;
        Ok(success(""))
    }
}

#[derive(Debug, Default)]
pub struct MockFetcher {
    content: Option<String>,
    pub urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// A fetcher that serves `content` for every URL.
    pub fn serving(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// A fetcher whose downloads always fail.
    pub fn failing() -> Self {
        Self::default()
    }
}

impl TemplateFetcher for MockFetcher {
    fn fetch_template(&self, url: &str, destination: &Path) -> Result<(), Error> {
        self.urls.lock().unwrap().push(url.to_string());
        match &self.content {
            Some(content) => {
                fs::write(destination, content)?;
                Ok(())
            }
            None => Err(Error::DownloadFailed {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockTerminal {
    interactive: bool,
    answer: bool,
    pub questions: Mutex<Vec<String>>,
}

impl MockTerminal {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn answering(answer: bool) -> Self {
        Self {
            interactive: true,
            answer,
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Terminal for MockTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn confirm(&self, question: &str, _default: bool) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer
    }
}
