//! Command-line interface for mediacat.
//!
//! Two entry points share this module:
//! - `mediacat <script>`: run a command script against a fresh catalog
//! - `mediacat-analyze <file>`: print a detailed report for one file

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::load_config;
use crate::library::Catalog;
use crate::media::Inspector;
use crate::script::Interpreter;

pub mod analyze;

pub use analyze::AnalyzeCli;

/// Example script shown with the usage message
const EXAMPLE_SCRIPT: &str = "\
  ADD audio.mp3
  ADD video.mp4
  ADD image.jpg
  PRINT
  REM type == audio
  PRINT";

/// Initialize tracing on stderr (default level: warn)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// mediacat - catalog audio, video and image files from a command script
#[derive(Parser, Debug)]
#[command(name = "mediacat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command script (ADD <path>, REM <condition>, PRINT; one per line)
    pub script: Option<PathBuf>,

    /// Config file (default: .mediacat/config.yaml in the current directory or a parent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Some(script) = self.script else {
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("\nExample command script:\n{}", EXAMPLE_SCRIPT);
            anyhow::bail!("No command script given");
        };

        if !script.exists() {
            anyhow::bail!("Command script not found: {}", script.display());
        }

        let config = load_config(self.config.as_deref())?;
        let catalog = Catalog::new(Inspector::from_config(&config));

        let stdout = io::stdout();
        let mut interpreter = Interpreter::new(catalog, stdout.lock());
        interpreter.run_file(&script)
    }
}
