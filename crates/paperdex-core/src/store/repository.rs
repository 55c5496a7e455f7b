//! CRUD operations on the question_paper table

use std::path::Path;

use chrono::{DateTime, Utc};

use super::schema::{Schema, SCHEMA_VERSION};
use crate::error::{PaperdexError, Result, StorageError};
use crate::paper::{NewPaper, Paper};

/// SQLite-backed store of paper records.
///
/// Owns the connection; every operation runs a single statement (or the
/// documented two-step delete) against it.
pub struct PaperStore {
    conn: rusqlite::Connection,
}

impl PaperStore {
    /// Open a store at the given database path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path).map_err(StorageError::from)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(StorageError::from)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.get_schema_version().unwrap_or(0);

        if current_version == 0 {
            // Fresh database, create all tables
            self.conn
                .execute_batch(Schema::create_tables())
                .map_err(StorageError::from)?;
            self.set_schema_version(SCHEMA_VERSION)?;
        } else if current_version < SCHEMA_VERSION {
            // Run migrations
            for version in current_version..SCHEMA_VERSION {
                if let Some(migration) = Schema::migration(version, version + 1) {
                    self.conn
                        .execute_batch(migration)
                        .map_err(|e| StorageError::Migration(e.to_string()))?;
                }
            }
            self.set_schema_version(SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Option<u32> {
        self.conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok()
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    // ==================== Paper Operations ====================

    /// Persist a new paper and return the assigned id
    pub fn insert(&self, paper: &NewPaper) -> Result<i64> {
        self.conn
            .execute(
                r#"
                INSERT INTO question_paper (subject, year, semester, file_path, status, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                rusqlite::params![
                    paper.subject,
                    paper.year,
                    paper.semester,
                    paper.file_path,
                    paper.status,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(StorageError::from)?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Exact-match filter on subject, year, and semester
    pub fn find_by(&self, subject: &str, year: i32, semester: i32) -> Result<Vec<Paper>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, subject, year, semester, file_path, status, created_at
                 FROM question_paper WHERE subject = ?1 AND year = ?2 AND semester = ?3",
            )
            .map_err(StorageError::from)?;

        let papers = stmt
            .query_map(
                rusqlite::params![subject, year, semester],
                Self::row_to_paper,
            )
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(papers)
    }

    /// Full table scan; order is storage-defined
    pub fn all(&self) -> Result<Vec<Paper>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, subject, year, semester, file_path, status, created_at
                 FROM question_paper",
            )
            .map_err(StorageError::from)?;

        let papers = stmt
            .query_map([], Self::row_to_paper)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(papers)
    }

    /// Delete a row by id and return its `file_path` for caller cleanup.
    ///
    /// Two-step on purpose: SQLite does not hand back deleted-row data, so
    /// the file path is read before the DELETE. A concurrent delete between
    /// the steps surfaces as `NotFound`.
    pub fn delete(&self, id: i64) -> Result<String> {
        let file_path: Option<String> = self
            .conn
            .query_row(
                "SELECT file_path FROM question_paper WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                e => Err(StorageError::from(e)),
            })?;

        let rows = self
            .conn
            .execute("DELETE FROM question_paper WHERE id = ?1", [id])
            .map_err(StorageError::from)?;

        if rows == 0 {
            return Err(PaperdexError::NotFound(format!(
                "no paper with id {id}"
            )));
        }

        Ok(file_path.unwrap_or_default())
    }

    fn row_to_paper(row: &rusqlite::Row) -> rusqlite::Result<Paper> {
        let created_at_str: String = row.get(6)?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Paper {
            id: row.get(0)?,
            subject: row.get(1)?,
            year: row.get(2)?,
            semester: row.get(3)?,
            file_path: row.get(4)?,
            status: row.get(5)?,
            created_at,
        })
    }
}
