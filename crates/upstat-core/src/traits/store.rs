//! `ResultStore` trait: flat key → [`AnalysisResult`] persistence.
//!
//! Keys are extension machine names. Writes fully replace the previous
//! record; there is no versioning.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::AnalysisResult;

pub trait ResultStore: Send + Sync {
    fn get(&self, machine_name: &str) -> Result<Option<AnalysisResult>, StorageError>;

    fn put(&self, machine_name: &str, result: &AnalysisResult) -> Result<(), StorageError>;

    /// Returns whether a record existed.
    fn delete(&self, machine_name: &str) -> Result<bool, StorageError>;

    /// Stored keys in ascending order.
    fn list_names(&self) -> Result<Vec<String>, StorageError>;
}

impl<T: ResultStore + ?Sized> ResultStore for Arc<T> {
    fn get(&self, machine_name: &str) -> Result<Option<AnalysisResult>, StorageError> {
        (**self).get(machine_name)
    }
    fn put(&self, machine_name: &str, result: &AnalysisResult) -> Result<(), StorageError> {
        (**self).put(machine_name, result)
    }
    fn delete(&self, machine_name: &str) -> Result<bool, StorageError> {
        (**self).delete(machine_name)
    }
    fn list_names(&self) -> Result<Vec<String>, StorageError> {
        (**self).list_names()
    }
}
