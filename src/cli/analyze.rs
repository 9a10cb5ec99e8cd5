//! Single-file analyzer.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::config::load_config;
use crate::domain::Entry;
use crate::media::Inspector;
use crate::report::Report;

/// mediacat-analyze - detect a media file's type and report its metadata
#[derive(Parser, Debug)]
#[command(name = "mediacat-analyze")]
#[command(author, version, about, long_about = None)]
pub struct AnalyzeCli {
    /// Media file to analyze
    pub file: Option<PathBuf>,

    /// Emit the entry as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Config file (default: .mediacat/config.yaml in the current directory or a parent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl AnalyzeCli {
    /// Execute the analyzer
    pub fn execute(self) -> Result<()> {
        let Some(file) = self.file else {
            eprintln!("{}", AnalyzeCli::command().render_usage());
            anyhow::bail!("No media file given");
        };

        let config = load_config(self.config.as_deref())?;
        let inspector = Inspector::from_config(&config);
        let entry = inspector.inspect(&file)?;

        let stdout = io::stdout();
        write_entry(&entry, self.json, &mut stdout.lock())
    }
}

/// Write `entry` as pretty JSON or as a text [`Report`]
pub fn write_entry<W: Write>(entry: &Entry, json: bool, out: &mut W) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(entry).context("Failed to serialize entry")?;
        writeln!(out, "{}", json)?;
    } else {
        write!(out, "{}", Report(entry))?;
    }
    Ok(())
}
