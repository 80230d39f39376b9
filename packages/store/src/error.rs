use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The storage medium itself could not be reached (no `window`,
    /// `localStorage` disabled, no data directory).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("session storage I/O failed: {0}")]
    Io(String),

    /// A stored entry exists but is not valid JSON for its type.
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
