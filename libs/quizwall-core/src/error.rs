//! Error types for quizwall-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by collection mutations, the template registry and the
/// export orchestrator.
///
/// Extraction has no variant here: a page without cards produces an empty
/// set, not an error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("index {index} out of range for collection of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid import url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failures reported by an export store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
