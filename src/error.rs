// Passbook — Top-level error types
//
// Aggregates errors from the store module into a single error enum for the
// application boundary.

use thiserror::Error;

/// Top-level error type for all Passbook operations.
#[derive(Debug, Error)]
pub enum PassbookError {
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PassbookError>;
