//! The fixed list of books the server offers.

use crate::error::{AppError, Result};
use crate::library::book::BookSummary;
use std::collections::HashSet;
use std::path::Path;

/// Catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Read-only, ordered set of book summaries keyed by `path`.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<BookSummary>,
}

impl Catalog {
    /// Catalog shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON array of summaries.
    pub fn from_json(json: &str) -> Result<Self> {
        let books: Vec<BookSummary> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Failed to parse catalog: {}", e)))?;
        Self::new(books)
    }

    /// Build a catalog, rejecting empty or duplicate paths.
    pub fn new(books: Vec<BookSummary>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if book.path.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "Catalog entry \"{}\" has an empty path",
                    book.title
                )));
            }
            if !seen.insert(book.path.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate catalog path: {}",
                    book.path
                )));
            }
        }
        Ok(Self { books })
    }

    /// All summaries in catalog order.
    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    /// Summary for a book path.
    pub fn get(&self, path: &str) -> Option<&BookSummary> {
        self.books.iter().find(|b| b.path == path)
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
