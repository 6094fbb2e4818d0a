//! Error types for the storage layer

use thiserror::Error;

/// Failure reading from or writing to a key-value store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage backend on this platform (no `window.localStorage`, native build)
    #[error("storage backend unavailable")]
    Unavailable,
    /// Backend refused the operation (quota exceeded, privacy mode, ...)
    #[error("storage rejected `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

impl StorageError {
    pub fn rejected(key: &str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
