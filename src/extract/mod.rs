//! Workflow history extraction
//!
//! The pipeline from commits to dataset entries: diff classification,
//! content classification, blob storage and partition routing, driven by
//! the [`HistoryWalker`].

pub mod change;
pub mod classify;
mod config;
mod history;
pub mod router;
mod store;
mod walker;
mod yaml;

pub use change::{BlobParameters, SkipReason, classify_diff};
pub use classify::{classify, classify_bytes};
pub use config::{DEFAULT_CONTENT_DIR, DEFAULT_DIRECTORY, ExtractConfig};
pub use history::History;
pub use router::{Partition, PartitionRouter};
pub use store::{ContentStore, StoreError};
pub use walker::{DiffOutcome, ExtractError, Extraction, HistoryWalker, PartitionEntries, Skip};
