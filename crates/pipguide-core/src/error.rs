//! Error types for the tutorial engine library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tutorial engine operations.
///
/// Navigation operations never produce these errors; they degrade to
/// logged no-ops instead. The variants below only escape through
/// construction paths: opening the state store, resolving the default
/// store location, and loading catalog content.
#[derive(Error, Debug)]
pub enum TutorialError {
    /// State store connection or query errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Catalog content that violates the content invariants
    #[error("Invalid catalog content for '{field}': {reason}")]
    InvalidCatalog { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TutorialError {
    /// Creates a new storage error with additional context.
    pub fn storage_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Storage {
            message: message.to_string(),
            source,
        }
    }

    /// Creates a new catalog validation error.
    pub fn invalid_catalog(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait for mapping `rusqlite` results into storage errors
/// with a message.
pub trait StorageResultExt<T> {
    /// Map storage errors with a message.
    fn storage_context(self, message: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn storage_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TutorialError::storage_error(message, e))
    }
}

/// Result type alias for tutorial engine operations
pub type Result<T> = std::result::Result<T, TutorialError>;
