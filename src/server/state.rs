//! Application state shared across handlers.

use crate::config::Config;
use crate::db::{self, Database, Progress};
use crate::error::{AppError, Result};
use crate::library::{Book, BookSummary, Catalog, ContentReader};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Progress database.
    pub db: Database,
    /// Book catalog, loaded once at startup.
    catalog: Arc<Catalog>,
    /// Book content reader.
    reader: ContentReader,
}

impl AppState {
    /// Create application state. Book content is read from `config.content.books_dir`.
    pub fn new(config: Config, db: Database, catalog: Catalog) -> Self {
        let reader = ContentReader::new(config.content.books_dir.clone());
        Self {
            config: Arc::new(config),
            db,
            catalog: Arc::new(catalog),
            reader,
        }
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The content reader.
    pub fn reader(&self) -> &ContentReader {
        &self.reader
    }

    /// Get all book summaries in catalog order.
    pub fn get_all_books(&self) -> Vec<BookSummary> {
        self.catalog.books().to_vec()
    }

    /// Load and parse a book. Content is read from disk on every call.
    pub fn get_book(&self, path: &str) -> Result<Book> {
        let json = self.reader.read_json(path)?;
        let book = Book::from_json(&json)?;

        tracing::debug!(path, sections = book.sections.len(), "Loaded book");
        Ok(book)
    }

    /// All saved progress, one entry per book.
    pub fn list_progress(&self) -> Result<Vec<Progress>> {
        self.db.list_progress()
    }

    /// Saved progress for a book.
    pub fn get_progress(&self, book: &str) -> Result<Progress> {
        self.db
            .get_progress(book)?
            .ok_or_else(|| AppError::NotFound(format!("No saved progress for book: {}", book)))
    }

    /// Save the reader's current position, replacing earlier progress for the book.
    pub fn save_progress(&self, book: &str, section_id: &str, health: i32) -> Result<Progress> {
        let book = book.trim();
        let section_id = section_id.trim();

        if book.is_empty() {
            return Err(AppError::BadRequest("Book parameter is required".to_string()));
        }
        if section_id.is_empty() {
            return Err(AppError::BadRequest(
                "SectionId parameter is required".to_string(),
            ));
        }

        if self.catalog.get(book).is_none() {
            tracing::warn!(book, "Saving progress for a book missing from the catalog");
        }

        let progress = Progress {
            book: book.to_string(),
            section_id: section_id.to_string(),
            health,
            timestamp: db::now_timestamp_millis(),
        };

        self.db.save_progress(&progress)?;
        tracing::info!(book, section_id, health, "Saved progress");
        Ok(progress)
    }

    /// Forget saved progress for a book. Returns whether anything was removed.
    pub fn clear_progress(&self, book: &str) -> Result<bool> {
        self.db.delete_progress(book)
    }

    /// Progress history for a single book.
    #[deprecated(note = "only one current position is kept per book; use `get_progress`")]
    pub fn list_progress_for_book(&self, book: &str) -> Result<Vec<Progress>> {
        Err(AppError::NotImplemented(format!(
            "progress history for {} is not supported",
            book
        )))
    }

    /// Save a numeric section position.
    #[deprecated(note = "sections are identified by ID; use `save_progress`")]
    pub fn save_progress_at_section(&self, book: &str, section: i64) -> Result<()> {
        Err(AppError::NotImplemented(format!(
            "numeric section {} for {} is not supported",
            section, book
        )))
    }
}
