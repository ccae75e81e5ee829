use std::fmt;

/// Errors that end a feature-collection load.
///
/// Every variant is terminal: the view switches to its "no data" state and
/// the load is not retried.
#[derive(Debug)]
pub enum FeatureLoadError {
    /// Reading the collection from disk failed.
    Io(std::io::Error),
    /// The browser fetch failed or answered with a non-success status.
    Fetch(String),
    /// The document is not a valid feature collection.
    Parse(serde_json::Error),
}

impl fmt::Display for FeatureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureLoadError::Io(e) => write!(f, "I/O error: {e}"),
            FeatureLoadError::Fetch(msg) => write!(f, "Fetch error: {msg}"),
            FeatureLoadError::Parse(e) => write!(f, "Invalid feature collection: {e}"),
        }
    }
}

impl std::error::Error for FeatureLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureLoadError::Io(e) => Some(e),
            FeatureLoadError::Parse(e) => Some(e),
            FeatureLoadError::Fetch(_) => None,
        }
    }
}

impl From<std::io::Error> for FeatureLoadError {
    fn from(e: std::io::Error) -> Self {
        FeatureLoadError::Io(e)
    }
}

impl From<serde_json::Error> for FeatureLoadError {
    fn from(e: serde_json::Error) -> Self {
        FeatureLoadError::Parse(e)
    }
}
