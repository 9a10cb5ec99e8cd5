//! mediacat-analyze entrypoint

use anyhow::Result;
use clap::Parser;

use mediacat::cli::{init_tracing, AnalyzeCli};

fn main() -> Result<()> {
    init_tracing();

    let cli = AnalyzeCli::parse();
    cli.execute()
}
