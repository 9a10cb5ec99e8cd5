//! In-memory catalog of media entries.
//!
//! Entries keep insertion order and are never mutated; the same path may be
//! added more than once.

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use super::condition::{Condition, ConditionError};
use crate::domain::{Entry, MediaKind};
use crate::media::{InspectError, Inspector};

/// Width of the `=` rules around a listing
const RULE_WIDTH: usize = 80;

/// Ordered container of catalogued files
#[derive(Debug, Default)]
pub struct Catalog {
    inspector: Inspector,
    entries: Vec<Entry>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new(inspector: Inspector) -> Self {
        Self {
            inspector,
            entries: Vec::new(),
        }
    }

    /// Inspect `path` and append it
    ///
    /// Missing and unclassifiable files are rejected and leave the catalog
    /// unchanged. Unreadable metadata does not prevent the add.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<&Entry, InspectError> {
        let entry = self.inspector.inspect(path.as_ref())?;
        info!(name = %entry.name, kind = %entry.kind(), "added entry");
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Parse `condition` and remove every matching entry
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, condition: &str) -> Result<usize, ConditionError> {
        let condition = Condition::parse(condition)?;
        Ok(self.remove_matching(&condition))
    }

    /// Remove every entry matching an already parsed condition
    pub fn remove_matching(&mut self, condition: &Condition) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !condition.matches(entry));
        let removed = before - self.entries.len();
        debug!(?condition, removed, "removed entries");
        removed
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries of one kind
    pub fn filter_by_kind(&self, kind: MediaKind) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the numbered listing of all entries
    pub fn print_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.entries.is_empty() {
            return writeln!(out, "container is empty");
        }

        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out)?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "Container contents (files: {})", self.entries.len())?;
        writeln!(out, "{}", rule)?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, entry)?;
        }
        writeln!(out, "{}", rule)?;
        writeln!(out)
    }
}
