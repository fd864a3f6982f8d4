//! `SqliteResultStore`: the `ResultStore` implementation backed by SQLite.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use upstat_core::errors::StorageError;
use upstat_core::traits::ResultStore;
use upstat_core::types::AnalysisResult;

use crate::queries::results::{self, ResultRow};
use crate::schema;

/// Owns a single connection. Every call takes the lock for the duration of
/// one statement; concurrent writers to the same key are last-write-wins.
pub struct SqliteResultStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteResultStore {
    /// Open (creating if needed) a file-backed store.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        schema::initialize(&conn)?;
        tracing::debug!(path = %path.display(), "result store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection lock poisoned".to_string(),
        })
    }
}

impl ResultStore for SqliteResultStore {
    fn get(&self, machine_name: &str) -> Result<Option<AnalysisResult>, StorageError> {
        let row = {
            let conn = self.lock()?;
            results::get_result(&conn, machine_name)?
        };
        row.map(|r| {
            serde_json::from_str(&r.result_json).map_err(|e| StorageError::Serialization {
                message: format!("{}: {e}", r.machine_name),
            })
        })
        .transpose()
    }

    fn put(&self, machine_name: &str, result: &AnalysisResult) -> Result<(), StorageError> {
        let result_json = serde_json::to_string(result)
            .map_err(|e| StorageError::Serialization { message: e.to_string() })?;
        let row = ResultRow {
            machine_name: machine_name.to_string(),
            analyzed_at: result.timestamp.timestamp(),
            result_json,
        };
        let conn = self.lock()?;
        results::upsert_result(&conn, &row)
    }

    fn delete(&self, machine_name: &str) -> Result<bool, StorageError> {
        let conn = self.lock()?;
        results::delete_result(&conn, machine_name)
    }

    fn list_names(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.lock()?;
        results::list_names(&conn)
    }
}
