//! Table definitions. Created idempotently on open; there is no schema
//! versioning.

use rusqlite::Connection;
use upstat_core::errors::StorageError;

pub const CREATE_ANALYSIS_RESULTS: &str = "
CREATE TABLE IF NOT EXISTS analysis_results (
    machine_name TEXT PRIMARY KEY,
    analyzed_at INTEGER NOT NULL,
    result_json TEXT NOT NULL
) STRICT;
";

pub fn initialize(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(CREATE_ANALYSIS_RESULTS)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
