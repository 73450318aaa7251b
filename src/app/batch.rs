use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info, warn};

use super::AppError;
use crate::cli::BatchArgs;

pub fn run(args: &BatchArgs) -> Result<(), AppError> {
    let program = env::current_exe()?;
    run_with(args, &program).map(|_| ())
}

/// Run `program extract` on each repository; return the number of failures
///
/// Failing repositories are counted and logged, and the batch goes on.
/// Only an unreadable repository directory is an error.
fn run_with(args: &BatchArgs, program: &Path) -> Result<usize, AppError> {
    for folder in [args.error_directory.as_ref(), Some(&args.output_directory)]
        .into_iter()
        .flatten()
    {
        fs::create_dir_all(folder).map_err(|source| AppError::Write {
            path: folder.clone(),
            source,
        })?;
    }

    let read_error = |source| AppError::Read {
        path: args.directory.clone(),
        source,
    };
    let mut repositories = fs::read_dir(&args.directory)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .map_err(read_error)?;
    repositories.sort();

    let total = repositories.len();
    let mut errors = 0;
    for (i, repository) in repositories.iter().enumerate() {
        info!(
            "({}/{} ({:.2}%) | {} error(s)) Processing repository '{}'",
            i,
            total,
            i as f64 / total as f64 * 100.0,
            errors,
            repository.display()
        );
        if !repository.is_dir() {
            warn!("'{}' is not a directory. Skipping...", repository.display());
            continue;
        }

        let name = repository
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = Command::new(program)
            .arg("extract")
            .arg("--output")
            .arg(args.output_directory.join(format!("{}.csv", name)))
            .arg("--repository-name")
            .arg(&name)
            .args(&args.options)
            .arg(repository)
            .output()?;

        if output.status.success() {
            continue;
        }
        error!("(Error {}) Could not process repository '{}'", errors, repository.display());
        errors += 1;

        if let Some(directory) = &args.error_directory {
            for (suffix, content) in [("out", &output.stdout), ("err", &output.stderr)] {
                let path = directory.join(format!("{}.{}.txt", name, suffix));
                fs::write(&path, content).map_err(|source| AppError::Write { path, source })?;
            }
        }
    }

    info!("Processed {} repositories, {} error(s)", total, errors);
    Ok(errors)
}
