//! gigawork - GitHub Actions workflow history extraction
//!
//! Binary entry point for the command-line tool.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gigawork::app;
use gigawork::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli);

    app::run(&cli.command)?;
    Ok(())
}

/// Log to standard error so the dataset can go to standard output.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
