//! adventure-book: a lightweight REST backend for branching adventure books.
//!
//! This crate serves a fixed catalog of adventure books, the full content of
//! each book (narrative sections linked by reader choices), and the reader's
//! saved progress.
//!
//! # Features
//!
//! - Book catalog embedded in the binary or loaded from a JSON file
//! - Book content read from one JSON document per book
//! - Reading progress (section and health) persisted in SQLite, one record per book
//! - Content integrity check for dangling links and unreferenced files

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Progress storage.
pub mod db;
/// Error types.
pub mod error;
/// Book models, catalog and content access.
pub mod library;
/// HTTP server.
pub mod server;


pub use config::{Cli, Command, Config};
pub use db::{Database, Progress};
pub use error::{AppError, Result};
pub use library::Catalog;
pub use server::AppState;
