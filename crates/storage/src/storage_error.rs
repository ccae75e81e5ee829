// ---------------------------------------------------------------------------
// StorageError: error type for per-user document persistence
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors from reading or writing persisted user documents.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error from the file store (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// A document could not be serialized.
    Encode(String),
    /// A stored document is not valid JSON for its type.
    Decode(String),
    /// The backing store cannot be reached (no `window`, storage disabled).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            StorageError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}
