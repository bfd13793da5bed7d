//! Error types raised by the point store.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::PointValidationError;

/// Failures surfaced to callers of [`crate::PointStore`] operations.
///
/// Persistence problems are deliberately absent: the store logs them and keeps
/// serving its in-memory collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PointStoreError {
    /// No point carries the requested identifier.
    #[error("point `{id}` not found")]
    NotFound {
        /// Identifier that failed to resolve.
        id: String,
    },
    /// The supplied record failed validation.
    #[error(transparent)]
    Validation(#[from] PointValidationError),
}

/// Errors raised while reading or writing a persisted JSON document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file contents were not valid JSON for the expected document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File whose contents were rejected.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The JSON document had a top-level shape no reader understands.
    #[error("{path} holds a JSON {kind}, expected a list or object of points")]
    UnsupportedShape {
        /// File whose contents were rejected.
        path: Utf8PathBuf,
        /// JSON type found at the top level.
        kind: &'static str,
    },
    /// Encoding the in-memory state failed.
    #[error("failed to serialise data for {path}: {source}")]
    Serialise {
        /// Destination file.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the file (or creating its directory) failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination file.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Report whether the error means the file simply does not exist yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
