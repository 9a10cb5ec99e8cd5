//! mediacat CLI entrypoint

use anyhow::Result;
use clap::Parser;

use mediacat::cli::{init_tracing, Cli};

fn main() -> Result<()> {
    init_tracing();

    // Parse and execute CLI
    let cli = Cli::parse();
    cli.execute()
}
