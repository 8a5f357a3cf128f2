//! Where result files come from.
//!
//! [`ResultSource`] is the listing + reading capability the aggregator works
//! against. [`DirSource`] reads a directory on disk, [`MemorySource`] holds
//! files in memory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// A flat collection of named result files.
pub trait ResultSource {
    /// Human-readable location, used in log lines.
    fn location(&self) -> String;

    /// Returns the names of all entries, in no particular order.
    fn list(&self) -> io::Result<Vec<String>>;

    /// Reads the entry called `name` as UTF-8 text.
    fn read(&self, name: &str) -> io::Result<String>;
}

/// Result files stored in a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResultSource for DirSource {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            // Non UTF-8 names can never match a filter.
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.dir.join(name))
    }
}

/// In-memory result files, keyed by name.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.insert(name.to_string(), contents.to_string());
        self
    }
}

impl ResultSource for MemorySource {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> io::Result<String> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{name} not found")))
    }
}
