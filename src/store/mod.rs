// Passbook — Store Module
//
// Durable account storage on SQLite. The store owns the record set; the
// presentation layer only ever holds a transient snapshot from `list()`.

mod db;
mod error;
mod models;
mod repository;

pub use db::Database;
pub use error::{StoreError, ValidationError};
pub use models::{Account, NewAccount};
pub use repository::{AccountStore, SqliteAccountStore};
