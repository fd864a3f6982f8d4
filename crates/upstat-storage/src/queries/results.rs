//! analysis_results table queries.

use rusqlite::{params, Connection, OptionalExtension};
use upstat_core::errors::StorageError;

/// A stored row before JSON decoding.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub machine_name: String,
    pub analyzed_at: i64,
    pub result_json: String,
}

/// Insert or fully replace the row for `row.machine_name`.
pub fn upsert_result(conn: &Connection, row: &ResultRow) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR REPLACE INTO analysis_results (machine_name, analyzed_at, result_json)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    stmt.execute(params![row.machine_name, row.analyzed_at, row.result_json])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

pub fn get_result(conn: &Connection, machine_name: &str) -> Result<Option<ResultRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT machine_name, analyzed_at, result_json
             FROM analysis_results WHERE machine_name = ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    stmt.query_row(params![machine_name], |row| {
        Ok(ResultRow {
            machine_name: row.get(0)?,
            analyzed_at: row.get(1)?,
            result_json: row.get(2)?,
        })
    })
    .optional()
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

pub fn delete_result(conn: &Connection, machine_name: &str) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "DELETE FROM analysis_results WHERE machine_name = ?1",
            params![machine_name],
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(changed > 0)
}

pub fn list_names(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT machine_name FROM analysis_results ORDER BY machine_name")
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
