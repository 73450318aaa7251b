//! Command implementations
//!
//! One module per subcommand:
//! - `extract`: walk a single repository and write its dataset
//! - `batch`: run `extract` in a child process for each repository of a directory
//! - `uid`: add persistent file identifiers to a dataset

mod batch;
mod extract;
mod uid;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::Commands;
use crate::extract::ExtractError;
use crate::git::AcquireError;
use crate::uid::UidError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Uid(#[from] UidError),

    #[error("Could not read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Could not write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Run a subcommand
pub fn run(command: &Commands) -> Result<(), AppError> {
    match command {
        Commands::Extract(args) => extract::run(args),
        Commands::Batch(args) => batch::run(args),
        Commands::Uid(args) => uid::run(args),
    }
}
