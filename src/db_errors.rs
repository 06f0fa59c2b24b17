//! # Storage Error Types Module
//!
//! This module defines the error types returned by the SQLite persistence layer.
//! Every failure surfaces directly to the caller; nothing is retried here.

use thiserror::Error;

/// Custom error types for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Opening the database file or applying the schema failed
    #[error("Storage initialization error: {0}")]
    Init(#[source] sqlx::Error),
    /// A query or result access failed
    #[error("Storage read error: {0}")]
    Read(#[source] sqlx::Error),
    /// An insert or delete failed
    #[error("Storage write error: {0}")]
    Write(#[source] sqlx::Error),
    /// The query succeeded but returned no row
    #[error("Not found: {0}")]
    NotFound(&'static str),
}

impl StorageError {
    /// Whether this error only means the requested row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
