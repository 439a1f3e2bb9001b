mod schema;

pub use schema::Database;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Saved reading position for a book. One record per book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Book path (e.g. "pirates-jade-sea.json").
    pub book: String,
    /// Section the reader stopped on.
    pub section_id: String,
    /// Reader health at save time.
    pub health: i32,
    /// Save time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
