//! Reads book content documents from the content directory.

use crate::error::{AppError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Loads named JSON resources from a directory.
#[derive(Debug, Clone)]
pub struct ContentReader {
    root: PathBuf,
}

impl ContentReader {
    /// Create a reader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the reader resolves paths against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the full text of the resource at `path`, lines rejoined with `\n`.
    pub fn read_json(&self, path: &str) -> Result<String> {
        let file_path = self.resolve(path)?;

        let unreadable = |source| AppError::ResourceUnreadable {
            path: path.to_string(),
            source,
        };

        let file = File::open(&file_path).map_err(unreadable)?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(unreadable)?;

        tracing::debug!(path = %file_path.display(), lines = lines.len(), "Read content resource");
        Ok(lines.join("\n"))
    }

    /// Map a resource name to a file inside the root.
    ///
    /// Only bare file names are accepted; anything that could climb out of
    /// the root is reported as not found.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() || path.starts_with('.') || path.contains(['/', '\\']) {
            return Err(AppError::NotFound(format!("Book not found: {}", path)));
        }
        Ok(self.root.join(path))
    }
}
