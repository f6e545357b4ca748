//! Catalog schema and startup initialization

use super::StoreResult;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

pub const CREATE_ARCHAEOLOGISTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS archaeologists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    salary REAL,
    specialization TEXT,
    qualification TEXT
)
"#;

pub const CREATE_ARTIFACTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS artifacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cost REAL,
    era TEXT,
    prior_owner TEXT
)
"#;

pub const CREATE_FINDINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS findings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    archaeologist_id INTEGER NOT NULL,
    artifact_id INTEGER NOT NULL,
    location TEXT,
    date TEXT,
    condition TEXT,
    type TEXT,
    FOREIGN KEY (archaeologist_id) REFERENCES archaeologists(id),
    FOREIGN KEY (artifact_id) REFERENCES artifacts(id)
)
"#;

pub const SCHEMA_VERSION: i32 = 1;

pub fn all_schema_statements() -> [&'static str; 3] {
    [
        CREATE_ARCHAEOLOGISTS_TABLE,
        CREATE_ARTIFACTS_TABLE,
        CREATE_FINDINGS_TABLE,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Delete any existing database file first
    Reset,
    CreateIfAbsent,
}

/// Make sure the catalog tables exist at `path`.
pub fn initialize(path: &Path, owner: &str, mode: InitMode) -> StoreResult<()> {
    if mode == InitMode::Reset && path.exists() {
        std::fs::remove_file(path)?;
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    for stmt in all_schema_statements() {
        tx.execute(stmt, [])?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!(
        "Database '{}' initialized successfully with owner '{}'",
        path.display(),
        owner
    );
    Ok(())
}
