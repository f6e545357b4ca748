pub mod records;
pub mod schema;
pub mod sqlite;

pub use records::*;
pub use schema::{initialize, InitMode};
pub use sqlite::Store;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
