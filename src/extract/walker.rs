//! History walking
//!
//! Drives the extraction: commits on the first-parent line, their diffs,
//! the content of each changed file, and the partition every resulting
//! entry lands in.

use thiserror::Error;
use tracing::{debug, info};

use super::History;
use super::change::{SkipReason, classify_diff};
use super::classify::classify_bytes;
use super::config::ExtractConfig;
use super::router::{AUXILIARIES, PartitionRouter, WORKFLOWS};
use super::store::{ContentStore, StoreError};
use crate::git::GitError;
use crate::model::{Commit, DiffEntry, DiffSide, Entry};

/// Errors that stop an extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Could not read blob {blob} of '{path}' at commit {commit}: {source}")]
    BlobUnavailable {
        commit: String,
        path: String,
        blob: String,
        source: GitError,
    },

    #[error("Reference '{reference}' does not point to a commit: {source}")]
    InvalidReference { reference: String, source: GitError },
}

/// What became of one diff entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Appended to the partition at this index
    Routed { partition: usize, entry: Entry },

    /// Accepted by no partition
    Dropped,

    Skipped(SkipReason),
}

/// A diff entry left out of the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub commit: String,
    pub reason: SkipReason,
}

/// Entries of one partition, oldest last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntries {
    pub name: &'static str,
    pub entries: Vec<Entry>,
}

/// Result of a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub partitions: Vec<PartitionEntries>,
    pub skipped: Vec<Skip>,
    /// Entries no partition accepted
    pub dropped: usize,
    /// Commits visited
    pub commits: usize,
}

impl Extraction {
    fn new(router: &PartitionRouter) -> Self {
        Self {
            partitions: router
                .names()
                .map(|name| PartitionEntries {
                    name,
                    entries: Vec::new(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Entries of the partition called `name` (empty if it is not enabled)
    pub fn partition(&self, name: &str) -> &[Entry] {
        self.partitions
            .iter()
            .find(|partition| partition.name == name)
            .map(|partition| partition.entries.as_slice())
            .unwrap_or_default()
    }

    pub fn workflows(&self) -> &[Entry] {
        self.partition(WORKFLOWS)
    }

    pub fn auxiliaries(&self) -> &[Entry] {
        self.partition(AUXILIARIES)
    }

    /// Entries across all partitions
    pub fn len(&self) -> usize {
        self.partitions.iter().map(|p| p.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walks the history of a repository directory
pub struct HistoryWalker<'a, H: History> {
    history: &'a H,
    directory: &'a str,
    router: PartitionRouter,
    store: ContentStore,
}

impl<'a, H: History> HistoryWalker<'a, H> {
    /// Prepare a walk; opens the content store
    pub fn new(history: &'a H, config: &'a ExtractConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            history,
            directory: &config.directory,
            router: config.router(),
            store: ContentStore::open(config.content_dir())?,
        })
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Walk commits reachable from `start` but not from `end`, newest first
    pub fn walk(&mut self, start: &str, end: Option<&str>) -> Result<Extraction, ExtractError> {
        let start = self.resolve(start)?;
        let end = end.map(|reference| self.resolve(reference)).transpose()?;

        let commits = self
            .history
            .commits(&start, end.as_deref(), self.directory)?;
        info!(
            "Extracting {} commit(s) touching '{}'",
            commits.len(),
            self.directory
        );

        let mut extraction = Extraction::new(&self.router);
        for commit in &commits {
            self.walk_commit(commit, &mut extraction)?;
            extraction.commits += 1;
        }

        info!(
            "Extracted {} entries ({} dropped, {} skipped), wrote {} new blob(s) to '{}'",
            extraction.len(),
            extraction.dropped,
            extraction.skipped.len(),
            self.store.written(),
            self.store.directory().display()
        );
        Ok(extraction)
    }

    fn resolve(&self, reference: &str) -> Result<String, ExtractError> {
        self.history
            .resolve(reference)
            .map_err(|source| ExtractError::InvalidReference {
                reference: reference.to_string(),
                source,
            })
    }

    fn walk_commit(
        &mut self,
        commit: &Commit,
        extraction: &mut Extraction,
    ) -> Result<(), ExtractError> {
        debug!("Processing commit {}", commit.short_id());

        let directory = self.directory;
        let diff = self.history.diff(commit.first_parent(), &commit.id)?;
        for entry in diff.iter().filter(|entry| entry.touches(directory)) {
            match self.process(commit, entry)? {
                DiffOutcome::Routed { partition, entry } => {
                    extraction.partitions[partition].entries.push(entry);
                }
                DiffOutcome::Dropped => extraction.dropped += 1,
                DiffOutcome::Skipped(reason) => {
                    debug!("Skipping change at commit {}: {}", commit.short_id(), reason);
                    extraction.skipped.push(Skip {
                        commit: commit.id.clone(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    /// Turn one diff entry into a routed entry
    ///
    /// Blobs are persisted only once the entry has a partition.
    pub fn process(
        &mut self,
        commit: &Commit,
        diff: &DiffEntry,
    ) -> Result<DiffOutcome, ExtractError> {
        let params = match classify_diff(diff, commit) {
            Ok(params) => params,
            Err(reason) => return Ok(DiffOutcome::Skipped(reason)),
        };

        let same_content = params.same_content();
        let current = self.read(commit, params.current)?;
        let previous = if same_content {
            None
        } else {
            self.read(commit, params.previous)?
        };

        let current_hash = current.as_deref().map(ContentStore::digest);
        let previous_hash = if same_content {
            current_hash.clone()
        } else {
            previous.as_deref().map(ContentStore::digest)
        };
        let validity = current
            .as_deref()
            .or(previous.as_deref())
            .map(classify_bytes)
            .unwrap_or_default();

        let entry = Entry::new(
            commit,
            params.change_type,
            (
                params.current_path().map(str::to_string),
                params.previous_path().map(str::to_string),
            ),
            (current_hash, previous_hash),
            validity,
        );

        let Some(partition) = self.router.route(&entry) else {
            debug!("No partition for '{}'", entry.path());
            return Ok(DiffOutcome::Dropped);
        };

        for bytes in [current, previous].into_iter().flatten() {
            self.store.store(&bytes)?;
        }
        Ok(DiffOutcome::Routed { partition, entry })
    }

    fn read(
        &self,
        commit: &Commit,
        side: Option<&DiffSide>,
    ) -> Result<Option<Vec<u8>>, ExtractError> {
        let Some(side) = side else {
            return Ok(None);
        };
        self.history
            .read_blob(&side.blob)
            .map(Some)
            .map_err(|source| ExtractError::BlobUnavailable {
                commit: commit.id.clone(),
                path: side.path.clone(),
                blob: side.blob.clone(),
                source,
            })
    }
}
