//! Registry service: store + resolver behind a single API
//!
//! Consumed by both the HTTP front door and the interactive CLI.

use std::path::Path;

use crate::error::{PaperdexError, Result};
use crate::paper::{NewPaper, Paper};
use crate::resolver::FileResolver;
use crate::store::PaperStore;

pub struct PaperRegistry {
    store: PaperStore,
    resolver: FileResolver,
}

impl PaperRegistry {
    pub fn new(store: PaperStore, resolver: FileResolver) -> Self {
        Self { store, resolver }
    }

    /// Open a registry over a database file and a PDF base folder
    pub fn open(db_path: impl AsRef<Path>, pdf_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: PaperStore::new(db_path)?,
            resolver: FileResolver::new(pdf_dir.as_ref()),
        })
    }

    pub fn resolver(&self) -> &FileResolver {
        &self.resolver
    }

    /// Catalog a new paper and return its assigned id.
    ///
    /// The file is not required to exist yet; a record may be added before
    /// its PDF is uploaded.
    pub fn add(&self, paper: NewPaper) -> Result<i64> {
        if paper.subject.trim().is_empty() {
            return Err(PaperdexError::Validation(
                "subject must not be empty".to_string(),
            ));
        }
        if paper.file_path.trim().is_empty() {
            return Err(PaperdexError::Validation(
                "filePath must not be empty".to_string(),
            ));
        }

        let id = self.store.insert(&paper)?;
        tracing::info!(id, subject = %paper.subject, "paper added");
        Ok(id)
    }

    /// Exact-match search on subject, year, and semester
    pub fn search(&self, subject: &str, year: i32, semester: i32) -> Result<Vec<Paper>> {
        self.store.find_by(subject, year, semester)
    }

    /// All catalogued papers
    pub fn list(&self) -> Result<Vec<Paper>> {
        self.store.all()
    }

    /// Find a paper by id.
    ///
    /// A scan over `list()`; fine at catalog scale, and it keeps the store
    /// contract to the three operations the callers need.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Paper>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Delete a paper record, then best-effort delete its PDF from disk.
    ///
    /// The database deletion is the operation's source of truth; a file that
    /// cannot be found or removed is logged as a warning, never an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let file_path = self.store.delete(id)?;
        tracing::info!(id, "paper deleted");

        if file_path.is_empty() {
            return Ok(());
        }

        match self.resolver.resolve(&file_path) {
            Some(path) => {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to delete PDF for removed paper"
                    );
                } else {
                    tracing::info!(path = %path.display(), "deleted associated PDF");
                }
            }
            None => {
                tracing::warn!(%file_path, "PDF for removed paper not found on disk");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn registry_with_tempdir() -> (PaperRegistry, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let registry = PaperRegistry::new(
            PaperStore::in_memory().unwrap(),
            FileResolver::new(dir.path()),
        );
        (registry, dir)
    }

    fn sample_paper() -> NewPaper {
        NewPaper {
            subject: "DBMS".to_string(),
            year: 2024,
            semester: 5,
            file_path: "dbms2024.pdf".to_string(),
            status: "AVAILABLE".to_string(),
        }
    }

    #[test]
    fn add_then_list_contains_record() {
        let (registry, _dir) = registry_with_tempdir();
        let id = registry.add(sample_paper()).unwrap();

        let all = registry.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].subject, "DBMS");
    }

    #[test]
    fn add_rejects_empty_subject_and_file() {
        let (registry, _dir) = registry_with_tempdir();

        let mut no_subject = sample_paper();
        no_subject.subject = "  ".to_string();
        assert!(matches!(
            registry.add(no_subject),
            Err(PaperdexError::Validation(_))
        ));

        let mut no_file = sample_paper();
        no_file.file_path = String::new();
        assert!(matches!(
            registry.add(no_file),
            Err(PaperdexError::Validation(_))
        ));
    }

    #[test]
    fn find_by_id_scans_catalog() {
        let (registry, _dir) = registry_with_tempdir();
        let id = registry.add(sample_paper()).unwrap();

        assert_eq!(registry.find_by_id(id).unwrap().unwrap().id, id);
        assert!(registry.find_by_id(id + 1).unwrap().is_none());
    }

    #[test]
    fn delete_removes_record_and_file() {
        let (registry, dir) = registry_with_tempdir();
        let pdf = dir.path().join("dbms2024.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        let id = registry.add(sample_paper()).unwrap();
        registry.delete(id).unwrap();

        assert!(registry.list().unwrap().is_empty());
        assert!(!pdf.exists());
    }

    #[test]
    fn delete_tolerates_missing_file() {
        let (registry, _dir) = registry_with_tempdir();
        let id = registry.add(sample_paper()).unwrap();

        // No PDF on disk; the record deletion still succeeds.
        registry.delete(id).unwrap();
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_id_is_not_found() {
        let (registry, _dir) = registry_with_tempdir();
        assert!(matches!(
            registry.delete(42),
            Err(PaperdexError::NotFound(_))
        ));
    }

    #[test]
    fn search_returns_exact_matches_only() {
        let (registry, _dir) = registry_with_tempdir();
        registry.add(sample_paper()).unwrap();

        assert_eq!(registry.search("DBMS", 2024, 5).unwrap().len(), 1);
        assert!(registry.search("DBMS", 2024, 6).unwrap().is_empty());
        assert!(registry.search("dbms", 2024, 5).unwrap().is_empty());
    }
}
