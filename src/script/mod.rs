//! Command script interpreter.
//!
//! A script is UTF-8 text with one instruction per line:
//!
//! ```text
//! # comment
//! ADD <file_path>
//! REM <condition>
//! PRINT
//! ```
//!
//! Lines run independently against one shared [`Catalog`]. Unknown command
//! words are skipped silently; recoverable errors are reported on the output
//! and never stop the script.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::library::Catalog;

/// A recognized script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ADD <path>`
    Add(String),

    /// `REM <condition>`
    Remove(String),

    /// `PRINT`
    Print,
}

/// Result of parsing one script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Blank, comment, or unknown command word
    Skip,

    /// A command ready to execute
    Command(Command),

    /// A known command that needs an argument but has none
    MissingArgument(&'static str),
}

/// Parse a single script line
pub fn parse_line(line: &str) -> Line {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Skip;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_uppercase().as_str() {
        "ADD" if rest.is_empty() => Line::MissingArgument("ADD"),
        "ADD" => Line::Command(Command::Add(rest.to_string())),
        "REM" if rest.is_empty() => Line::MissingArgument("REM"),
        "REM" => Line::Command(Command::Remove(rest.to_string())),
        "PRINT" => Line::Command(Command::Print),
        _ => Line::Skip,
    }
}

/// Drives a [`Catalog`] from script commands, writing results to `out`
#[derive(Debug)]
pub struct Interpreter<W: Write> {
    catalog: Catalog,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(catalog: Catalog, out: W) -> Self {
        Self { catalog, out }
    }

    /// Read and run a script file
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read command script: {}", path.display()))?;
        self.run_script(&script)
            .with_context(|| format!("Failed to write output for {}", path.display()))
    }

    /// Run every line of `script`
    pub fn run_script(&mut self, script: &str) -> io::Result<()> {
        for (index, line) in script.lines().enumerate() {
            let line_number = index + 1;
            match parse_line(line) {
                Line::Skip => {}
                Line::MissingArgument(command) => {
                    warn!(line = line_number, command, "missing command argument");
                    writeln!(
                        self.out,
                        "line {}: {} requires an argument",
                        line_number, command
                    )?;
                }
                Line::Command(command) => {
                    debug!(line = line_number, ?command, "executing");
                    self.execute(command)?;
                }
            }
        }
        self.out.flush()
    }

    /// Execute one command
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Add(path) => match self.catalog.add(&path) {
                Ok(entry) => writeln!(self.out, "added: {}", entry.name),
                Err(e) => writeln!(self.out, "error: {}", e),
            },
            Command::Remove(condition) => {
                let removed = match self.catalog.remove(&condition) {
                    Ok(removed) => removed,
                    Err(e) => {
                        writeln!(self.out, "error: {}", e)?;
                        0
                    }
                };
                writeln!(self.out, "removed: {}", removed)
            }
            Command::Print => self.catalog.print_all(&mut self.out),
        }
    }

    /// The catalog being driven
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Split into catalog and output sink
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.out)
    }
}
