//! Repository acquisition
//!
//! Opening an existing repository, cloning a distant one, and fetching
//! updates. The walk itself only needs the [`History`] view.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::{GitError, GitExecutor};
use crate::extract::History;
use crate::model::{Commit, DiffEntry};

/// Errors raised before any history is walked
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("Directory '{0}' is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("Could not read repository at '{path}': {source}")]
    Unreadable { path: PathBuf, source: GitError },

    #[error("Could not clone repository at '{url}': {source}")]
    CloneFailed { url: String, source: GitError },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// A local git repository read through the `git` binary
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
    git: GitExecutor,
}

impl GitRepository {
    /// Open the repository at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AcquireError> {
        let path = path.into();
        debug!("Reading repository at '{}'", path.display());

        let git = GitExecutor::with_repo_path(path.clone());
        git.git_dir().map_err(|source| AcquireError::Unreadable {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, git })
    }

    /// Clone `url` into `directory` without checking out a working tree
    ///
    /// The directory may exist but must be empty.
    pub fn clone(url: &str, directory: &Path) -> Result<Self, AcquireError> {
        info!("Cloning repository at '{}'", url);

        if directory.exists() && fs::read_dir(directory)?.next().is_some() {
            return Err(AcquireError::DirectoryNotEmpty(directory.to_path_buf()));
        }

        GitExecutor::new()
            .clone_into(url, directory)
            .map_err(|source| AcquireError::CloneFailed {
                url: url.to_string(),
                source,
            })?;

        Self::open(directory)
    }

    /// Fetch from the default remote
    pub fn update(&self) -> Result<(), GitError> {
        info!("Updating repository at '{}'", self.path.display());
        self.git.fetch().map(|_| ())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl History for GitRepository {
    fn commits(&self, start: &str, end: Option<&str>, path: &str) -> Result<Vec<Commit>, GitError> {
        let range = match end {
            Some(end) => format!("{}..{}", end, start),
            None => start.to_string(),
        };
        self.git.log(&range, path)
    }

    fn diff(&self, parent: Option<&str>, commit: &str) -> Result<Vec<DiffEntry>, GitError> {
        self.git.diff_tree(parent, commit)
    }

    fn read_blob(&self, blob: &str) -> Result<Vec<u8>, GitError> {
        self.git.cat_blob(blob)
    }

    fn resolve(&self, reference: &str) -> Result<String, GitError> {
        self.git.resolve_commit(reference)
    }
}
