//! git command execution layer
//!
//! This module handles executing git plumbing commands and parsing their output.

pub mod constants;
mod executor;
mod format;
/// Parser module (public for integration testing)
pub mod parser;
mod repository;

pub use executor::GitExecutor;
pub use repository::{AcquireError, GitRepository};

use std::io;
use thiserror::Error;

/// Errors that can occur when executing git commands
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("git command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("git is not installed or not in PATH")]
    GitNotFound,
}
