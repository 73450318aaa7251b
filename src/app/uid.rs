use std::fs;

use tracing::info;

use super::AppError;
use crate::cli::UidArgs;
use crate::uid::stitch;

pub fn run(args: &UidArgs) -> Result<(), AppError> {
    let input = fs::read_to_string(&args.input).map_err(|source| AppError::Read {
        path: args.input.clone(),
        source,
    })?;

    let output = stitch(&input)?;

    fs::write(&args.output, output).map_err(|source| AppError::Write {
        path: args.output.clone(),
        source,
    })?;
    info!("Wrote '{}'", args.output.display());
    Ok(())
}
