//! git command executor
//!
//! Handles running git commands and capturing their output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::GitError;
use super::constants::{self, commands, errors, flags, special};
use super::format::Formats;
use super::parser::Parser;
use crate::model::{Commit, DiffEntry};

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Path to the repository (None = current directory)
    repo_path: Option<PathBuf>,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create a new executor for the current directory
    pub fn new() -> Self {
        Self { repo_path: None }
    }

    /// Create a new executor for a specific repository path
    pub fn with_repo_path(path: PathBuf) -> Self {
        Self {
            repo_path: Some(path),
        }
    }

    /// Run a git command and return its stdout as text
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.output(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a git command and return its stdout untouched
    ///
    /// Used for blob content, which must be stored byte for byte.
    pub fn run_bytes(&self, args: &[&str]) -> Result<Vec<u8>, GitError> {
        Ok(self.output(args)?.stdout)
    }

    fn output(&self, args: &[&str]) -> Result<Output, GitError> {
        let mut cmd = Command::new(constants::GIT_COMMAND);

        // Add repository path if specified
        if let Some(ref path) = self.repo_path {
            cmd.arg(flags::REPO_PATH).arg(path);
        }

        cmd.args(args);

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::IoError(e)
            }
        })?;

        if output.status.success() {
            return Ok(output);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if stderr.contains(errors::NOT_A_REPO) {
            let path = self
                .repo_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            return Err(GitError::NotARepository(path));
        }

        Err(GitError::CommandFailed { stderr, exit_code })
    }

    /// Run `git log --first-parent` over `range`, restricted to `path`
    pub fn log_raw(&self, range: &str, path: &str) -> Result<String, GitError> {
        let mut args = vec![
            commands::LOG,
            flags::FIRST_PARENT,
            flags::NUL_TERMINATED,
            Formats::log(),
            range,
            flags::END_OF_OPTIONS,
        ];
        if !path.is_empty() {
            args.push(path);
        }
        self.run(&args)
    }

    /// First-parent commits in `range` touching `path`, newest first
    pub fn log(&self, range: &str, path: &str) -> Result<Vec<Commit>, GitError> {
        Parser::parse_log(&self.log_raw(range, path)?)
    }

    /// Run `git diff-tree` between `parent` and `commit`
    ///
    /// Without a parent, the commit is compared to the empty tree.
    pub fn diff_tree_raw(&self, parent: Option<&str>, commit: &str) -> Result<String, GitError> {
        let mut args = vec![
            commands::DIFF_TREE,
            flags::RECURSIVE,
            flags::NUL_TERMINATED,
            flags::RAW,
            flags::FIND_RENAMES,
            flags::NO_COMMIT_ID,
        ];
        match parent {
            Some(parent) => args.push(parent),
            None => args.push(flags::ROOT),
        }
        args.push(commit);
        self.run(&args)
    }

    /// Diff entries between `parent` (or the empty tree) and `commit`
    pub fn diff_tree(
        &self,
        parent: Option<&str>,
        commit: &str,
    ) -> Result<Vec<DiffEntry>, GitError> {
        Parser::parse_raw_diff(&self.diff_tree_raw(parent, commit)?)
    }

    /// Read the raw content of a blob
    pub fn cat_blob(&self, blob: &str) -> Result<Vec<u8>, GitError> {
        self.run_bytes(&[commands::CAT_FILE, special::BLOB, blob])
    }

    /// Resolve a reference to the full hash of the commit it points to
    pub fn resolve_commit(&self, reference: &str) -> Result<String, GitError> {
        let spec = format!("{}{}", reference, special::PEEL_COMMIT);
        let output = self.run(&[commands::REV_PARSE, flags::VERIFY, flags::QUIET, &spec])?;
        Ok(output.trim().to_string())
    }

    /// Check that the path is inside a git repository
    pub fn git_dir(&self) -> Result<String, GitError> {
        let output = self.run(&[commands::REV_PARSE, flags::GIT_DIR])?;
        Ok(output.trim().to_string())
    }

    /// Run `git fetch`
    pub fn fetch(&self) -> Result<String, GitError> {
        self.run(&[commands::FETCH])
    }

    /// Run `git clone --no-checkout <url> <directory>`
    pub fn clone_into(&self, url: &str, directory: &Path) -> Result<String, GitError> {
        let directory = directory.to_string_lossy();
        self.run(&[
            commands::CLONE,
            flags::NO_CHECKOUT,
            flags::END_OF_OPTIONS,
            url,
            &directory,
        ])
    }
}
