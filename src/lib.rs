//! gigawork - GitHub Actions workflow history extraction
//!
//! Walks the first-parent history of a Git repository and records every
//! version of its workflow files as a dataset entry, with deduplicated
//! file contents and a validity verdict for each version.
//!
//! This library provides:
//! - [`app`]: Subcommand implementations
//! - [`cli`]: Command-line definition
//! - [`extract`]: History walking, classification and routing
//! - [`git`]: git command execution and parsing
//! - [`model`]: Domain models
//! - [`output`]: CSV and JSON Lines serialization
//! - [`uid`]: Persistent file identifiers across renames

pub mod app;
pub mod cli;
pub mod extract;
pub mod git;
pub mod model;
pub mod output;
pub mod uid;
