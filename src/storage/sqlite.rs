//! SQLite-backed catalog queries.
//!
//! `Store` only remembers where the database lives; each call opens its own
//! connection and closes it before returning.

use super::records::*;
use super::StoreResult;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

const ARCHAEOLOGIST_COLUMNS: &str = "id, full_name, salary, specialization, qualification";
const ARTIFACT_COLUMNS: &str = "id, name, cost, era, prior_owner";
const FINDING_COLUMNS: &str =
    "id, archaeologist_id, artifact_id, location, date, condition, type";

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign keys enforced
    fn connect(&self) -> StoreResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    // ========== Archaeologists ==========

    pub fn list_archaeologists(&self) -> StoreResult<Vec<Archaeologist>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM archaeologists",
            ARCHAEOLOGIST_COLUMNS
        ))?;
        let rows = stmt.query_map([], archaeologist_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Insert an archaeologist and return its assigned id
    pub fn insert_archaeologist(&self, fields: &ArchaeologistFields) -> StoreResult<i64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO archaeologists (full_name, salary, specialization, qualification)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                fields.full_name,
                fields.salary,
                fields.specialization,
                fields.qualification,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn get_archaeologist(&self, id: i64) -> StoreResult<Option<Archaeologist>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM archaeologists WHERE id = ?1",
                    ARCHAEOLOGIST_COLUMNS
                ),
                params![id],
                archaeologist_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Overwrite every column of one archaeologist. Returns the number of rows changed.
    pub fn update_archaeologist(
        &self,
        id: i64,
        fields: &ArchaeologistFields,
    ) -> StoreResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            r#"
            UPDATE archaeologists
            SET full_name = ?1, salary = ?2, specialization = ?3, qualification = ?4
            WHERE id = ?5
            "#,
            params![
                fields.full_name,
                fields.salary,
                fields.specialization,
                fields.qualification,
                id,
            ],
        )?;
        tx.commit()?;
        Ok(changed)
    }

    pub fn delete_archaeologist(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM archaeologists WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Archaeologists earning strictly more than `min_salary` whose
    /// specialization equals `specialization` exactly.
    pub fn filter_archaeologists(
        &self,
        min_salary: f64,
        specialization: &str,
    ) -> StoreResult<Vec<Archaeologist>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM archaeologists WHERE salary > ?1 AND specialization = ?2",
            ARCHAEOLOGIST_COLUMNS
        ))?;
        let rows = stmt.query_map(params![min_salary, specialization], archaeologist_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    // ========== Artifacts ==========

    pub fn list_artifacts(&self) -> StoreResult<Vec<Artifact>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM artifacts", ARTIFACT_COLUMNS))?;
        let rows = stmt.query_map([], artifact_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn insert_artifact(&self, fields: &ArtifactFields) -> StoreResult<i64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO artifacts (name, cost, era, prior_owner) VALUES (?1, ?2, ?3, ?4)",
            params![fields.name, fields.cost, fields.era, fields.prior_owner],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn get_artifact(&self, id: i64) -> StoreResult<Option<Artifact>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM artifacts WHERE id = ?1", ARTIFACT_COLUMNS),
                params![id],
                artifact_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn list_artifacts_sorted(
        &self,
        field: SortField,
        order: SortOrder,
    ) -> StoreResult<Vec<Artifact>> {
        let conn = self.connect()?;
        // Both fragments come from closed enums, never from request text.
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM artifacts ORDER BY {} {}",
            ARTIFACT_COLUMNS,
            field.column(),
            order.keyword()
        ))?;
        let rows = stmt.query_map([], artifact_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    // ========== Findings ==========

    pub fn list_findings(&self) -> StoreResult<Vec<Finding>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM findings", FINDING_COLUMNS))?;
        let rows = stmt.query_map([], finding_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn insert_finding(&self, fields: &FindingFields) -> StoreResult<i64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO findings (archaeologist_id, artifact_id, location, date, condition, type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                fields.archaeologist_id,
                fields.artifact_id,
                fields.location,
                fields.date,
                fields.condition,
                fields.kind,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn get_finding(&self, id: i64) -> StoreResult<Option<Finding>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM findings WHERE id = ?1", FINDING_COLUMNS),
                params![id],
                finding_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Findings with archaeologist and artifact names joined in.
    /// Findings whose references no longer resolve are skipped.
    pub fn finding_details(&self) -> StoreResult<Vec<FindingDetail>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT a.full_name, i.name, f.location, f.date, f.condition
            FROM findings f
            JOIN archaeologists a ON a.id = f.archaeologist_id
            JOIN artifacts i ON i.id = f.artifact_id
            ORDER BY f.id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FindingDetail {
                archaeologist_name: row.get(0)?,
                artifact_name: row.get(1)?,
                location: row.get(2)?,
                date: row.get(3)?,
                condition: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Mark every finding dated before `cutoff` (an ISO `YYYY-MM-DD` string) as
    /// archived. Rows already archived are left alone, so the returned count is
    /// the number of rows whose condition actually changed.
    pub fn archive_findings_before(&self, cutoff: &str) -> StoreResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            r#"
            UPDATE findings SET condition = ?1
            WHERE date < ?2
              AND (condition IS NULL OR condition <> ?1)
            "#,
            params![ARCHIVED_CONDITION, cutoff],
        )?;
        tx.commit()?;
        Ok(changed)
    }

    /// Finding counts per archaeologist; archaeologists without findings are omitted
    pub fn finding_counts_by_archaeologist(&self) -> StoreResult<Vec<FindingCount>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT a.id, a.full_name, COUNT(f.id)
            FROM findings f
            JOIN archaeologists a ON a.id = f.archaeologist_id
            GROUP BY a.id, a.full_name
            ORDER BY a.id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FindingCount {
                archaeologist_id: row.get(0)?,
                name: row.get(1)?,
                count: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

fn archaeologist_from_row(row: &Row<'_>) -> rusqlite::Result<Archaeologist> {
    Ok(Archaeologist {
        id: row.get(0)?,
        full_name: row.get(1)?,
        salary: row.get(2)?,
        specialization: row.get(3)?,
        qualification: row.get(4)?,
    })
}

fn artifact_from_row(row: &Row<'_>) -> rusqlite::Result<Artifact> {
    Ok(Artifact {
        id: row.get(0)?,
        name: row.get(1)?,
        cost: row.get(2)?,
        era: row.get(3)?,
        prior_owner: row.get(4)?,
    })
}

fn finding_from_row(row: &Row<'_>) -> rusqlite::Result<Finding> {
    Ok(Finding {
        id: row.get(0)?,
        archaeologist_id: row.get(1)?,
        artifact_id: row.get(2)?,
        location: row.get(3)?,
        date: row.get(4)?,
        condition: row.get(5)?,
        kind: row.get(6)?,
    })
}
