use crate::db::*;
use crate::error::{AppError, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Arc;

/// Database wrapper for thread-safe access.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            -- One current position per book
            CREATE TABLE IF NOT EXISTS progress (
                book TEXT PRIMARY KEY,
                section_id TEXT NOT NULL,
                health INTEGER NOT NULL,
                timestamp INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_progress_timestamp ON progress(timestamp);
            "#,
        )
        .map_err(|e| AppError::Internal(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    // ========== PROGRESS OPERATIONS ==========

    /// Save progress, replacing any earlier record for the same book.
    pub fn save_progress(&self, progress: &Progress) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO progress (book, section_id, health, timestamp)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (book) DO UPDATE SET
                section_id = excluded.section_id,
                health = excluded.health,
                timestamp = excluded.timestamp",
            params![
                progress.book,
                progress.section_id,
                progress.health,
                progress.timestamp,
            ],
        )
        .map_err(|e| AppError::Internal(format!("Failed to save progress: {}", e)))?;
        Ok(())
    }

    /// Get saved progress for a book.
    pub fn get_progress(&self, book: &str) -> Result<Option<Progress>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT book, section_id, health, timestamp FROM progress WHERE book = ?1",
            params![book],
            Self::row_to_progress,
        )
        .optional()
        .map_err(|e| AppError::Internal(format!("Failed to get progress: {}", e)))
    }

    /// List saved progress, most recently saved first.
    pub fn list_progress(&self) -> Result<Vec<Progress>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT book, section_id, health, timestamp
                 FROM progress ORDER BY timestamp DESC, book ASC",
            )
            .map_err(|e| AppError::Internal(format!("Failed to prepare query: {}", e)))?;

        let progress = stmt
            .query_map([], Self::row_to_progress)
            .map_err(|e| AppError::Internal(format!("Failed to list progress: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(format!("Failed to collect progress: {}", e)))?;

        Ok(progress)
    }

    /// Delete saved progress for a book.
    pub fn delete_progress(&self, book: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let rows = conn
            .execute("DELETE FROM progress WHERE book = ?1", params![book])
            .map_err(|e| AppError::Internal(format!("Failed to delete progress: {}", e)))?;
        Ok(rows > 0)
    }

    fn row_to_progress(row: &rusqlite::Row<'_>) -> rusqlite::Result<Progress> {
        Ok(Progress {
            book: row.get(0)?,
            section_id: row.get(1)?,
            health: row.get(2)?,
            timestamp: row.get(3)?,
        })
    }
}
