// Passbook — Store error types

use thiserror::Error;
use uuid::Uuid;

/// Input rejected before any mutation was attempted. Always recoverable:
/// the user may retry with corrected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("all fields must be filled out")]
    Incomplete,

    #[error("invalid email format")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("account not found: {0}")]
    NotFound(Uuid),

    #[error("storage read failed: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("storage write failed: {0}")]
    Write(#[source] rusqlite::Error),
}
