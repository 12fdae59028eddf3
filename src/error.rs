//! Error types shared across the library view layer.

use thiserror::Error;

/// Failures reported by the library store or the configuration layer.
///
/// None of these terminate an active subscription: screens surface them as
/// transient notices and keep listening for the next snapshot.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The raw catalog could not be read from its source.
    #[error("Library source unavailable: {0}")]
    SourceUnavailable(String),

    /// The store rejected a write.
    #[error("Library store write failed: {0}")]
    Store(String),

    /// The playback engine refused a request.
    #[error("Playback request failed: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
