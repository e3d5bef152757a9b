// Passbook — Library root
//
// Re-exports the store, validation, and CLI modules.

pub mod cli;
pub mod error;
pub mod store;
pub mod validate;

pub use error::{PassbookError, Result};
