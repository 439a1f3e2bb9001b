//! HTTP request handlers.

use crate::db::Progress;
use crate::error::{AppError, Result};
use crate::library::{Book, BookSummary};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// ============================================================================
// BOOKS
// ============================================================================

/// List all book summaries.
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<BookSummary>> {
    Json(state.get_all_books())
}

/// Full book content by path (e.g. "the-prisoner.json").
pub async fn get_book(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<Book>> {
    let book = state.get_book(&path)?;
    Ok(Json(book))
}

// ============================================================================
// PROGRESS
// ============================================================================

/// List all saved progress.
pub async fn list_progress(State(state): State<AppState>) -> Result<Json<Vec<Progress>>> {
    Ok(Json(state.list_progress()?))
}

/// Saved progress for one book.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(book_path): Path<String>,
) -> Result<Json<Progress>> {
    Ok(Json(state.get_progress(&book_path)?))
}

/// Save progress query parameters.
///
/// Everything is optional here so that missing or malformed values produce
/// a message naming the field instead of a generic extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SaveProgressParams {
    book: Option<String>,
    #[serde(rename = "sectionId")]
    section_id: Option<String>,
    health: Option<String>,
}

/// Save progress.
pub async fn save_progress(
    State(state): State<AppState>,
    Query(params): Query<SaveProgressParams>,
) -> Result<StatusCode> {
    let book = required(params.book, "Book")?;
    let section_id = required(params.section_id, "SectionId")?;
    let health = required(params.health, "Health")?;

    let health: i32 = health
        .trim()
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid health parameter: {}", e)))?;

    state.save_progress(&book, &section_id, health)?;
    Ok(StatusCode::OK)
}

// ============================================================================
// HELPERS
// ============================================================================

/// Require a present parameter that is not blank. Surrounding whitespace is dropped.
fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} parameter is required", name)))
}
