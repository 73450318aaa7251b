//! Command-line interface definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::extract::DEFAULT_CONTENT_DIR;
use crate::output::Format;

#[derive(Parser, Debug)]
#[command(name = "gigawork", version)]
#[command(about = "Extract the history of the GitHub Actions workflow files of Git repositories")]
pub struct Cli {
    /// Log debug messages
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "gigawork=debug"
        } else if self.quiet {
            "gigawork=warn"
        } else {
            "gigawork=info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the workflow files of a single repository
    ///
    /// History is walked from `--ref` back to the first commit (or to
    /// `--after`), following first parents only. A distant repository is
    /// cloned first and removed afterwards unless `--save-repository` is given.
    Extract(ExtractArgs),

    /// Run `extract` on every repository of a directory
    ///
    /// Arguments after `--` are passed to each `extract` call.
    Batch(BatchArgs),

    /// Add a `uid` column identifying each file across renames
    Uid(UidArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path or URL of the repository
    pub repository: String,

    /// Most recent commit reference to consider
    #[arg(short, long = "ref", visible_alias = "branch", default_value = "HEAD")]
    pub reference: String,

    /// Only consider commits after this reference
    #[arg(short, long)]
    pub after: Option<String>,

    /// Keep the clone of a distant repository in this directory
    #[arg(short, long)]
    pub save_repository: Option<PathBuf>,

    /// Fetch the repository before extracting
    #[arg(short, long)]
    pub update: bool,

    /// Directory where file contents are stored
    #[arg(short, long, default_value = DEFAULT_CONTENT_DIR)]
    pub workflows: PathBuf,

    /// File the dataset is appended to (standard output if absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also extract the other files of the workflows directory, appending
    /// their entries to this file
    #[arg(long)]
    pub auxiliary_output: Option<PathBuf>,

    /// Add a leading `repository` column with this value
    #[arg(short = 'n', long)]
    pub repository_name: Option<String>,

    /// Do not write the header row
    #[arg(long)]
    pub no_headers: bool,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory holding one repository per subdirectory
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Where the output of failed extractions is saved
    #[arg(short, long)]
    pub error_directory: Option<PathBuf>,

    /// Where each repository's dataset is written
    #[arg(short, long, default_value = "outputs")]
    pub output_directory: PathBuf,

    /// Options given to every `extract` call
    #[arg(last = true)]
    pub options: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UidArgs {
    /// Dataset to read (CSV with headers)
    pub input: PathBuf,

    /// Where to write the dataset with its `uid` column
    pub output: PathBuf,
}
