use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error, info};

use super::AppError;
use crate::cli::ExtractArgs;
use crate::extract::{ExtractConfig, HistoryWalker};
use crate::git::GitRepository;
use crate::model::Entry;
use crate::output;

pub fn run(args: &ExtractArgs) -> Result<(), AppError> {
    // Holds a temporary clone until the end of the run
    let (repository, _clone) = acquire(args)?;

    if args.update
        && let Err(e) = repository.update()
    {
        error!(
            "Could not update repository at '{}'. Keeping the current version...",
            repository.path().display()
        );
        debug!("{}", e);
    }

    let config =
        ExtractConfig::new(&args.workflows).with_auxiliaries(args.auxiliary_output.is_some());
    let mut walker = HistoryWalker::new(&repository, &config)?;
    let extraction = walker.walk(&args.reference, args.after.as_deref())?;

    write(extraction.workflows(), args.output.as_deref(), args)?;
    if let Some(path) = &args.auxiliary_output {
        write(extraction.auxiliaries(), Some(path), args)?;
    }
    Ok(())
}

/// Open a local repository, or clone a distant one
fn acquire(args: &ExtractArgs) -> Result<(GitRepository, Option<TempDir>), AppError> {
    let location = Path::new(&args.repository);
    if location.exists() {
        return Ok((GitRepository::open(location)?, None));
    }

    match &args.save_repository {
        Some(directory) => Ok((GitRepository::clone(&args.repository, directory)?, None)),
        None => {
            let directory = TempDir::new_in(".")?;
            let repository = GitRepository::clone(&args.repository, directory.path())?;
            Ok((repository, Some(directory)))
        }
    }
}

/// Write `entries` to `path`, or to standard output
///
/// Nothing is written when there are no entries, not even a header.
fn write(entries: &[Entry], path: Option<&Path>, args: &ExtractArgs) -> Result<(), AppError> {
    if entries.is_empty() {
        return Ok(());
    }

    let headers = !args.no_headers;
    let repository = args.repository_name.clone();
    let write_error = |path: &Path| {
        let path = PathBuf::from(path);
        move |source| AppError::Write { path, source }
    };

    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(write_error(path))?;
            }
            let mut writer = output::append_to(path, args.format, repository, headers)
                .map_err(write_error(path))?;
            writer.write_all(entries).map_err(write_error(path))?;
            writer.flush().map_err(write_error(path))?;
            info!("Wrote {} entries to '{}'", entries.len(), path.display());
        }
        None => {
            let mut writer = output::to_stdout(args.format, repository, headers)?;
            writer.write_all(entries)?;
            writer.flush()?;
        }
    }
    Ok(())
}
