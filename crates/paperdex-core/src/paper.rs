//! The paper record: one row of question-paper metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued question paper.
///
/// `file_path` is a bare filename under the configured PDF folder; the
/// record's lifetime is independent of the file's existence on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: i64,
    pub subject: String,
    pub year: i32,
    pub semester: i32,
    pub file_path: String,
    /// Free-form availability text (e.g. "AVAILABLE"); not an enum by design.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// The insert shape: a paper before the store has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaper {
    pub subject: String,
    pub year: i32,
    pub semester: i32,
    pub file_path: String,
    pub status: String,
}

impl std::fmt::Display for Paper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | Sem {} | {} | {}",
            self.id, self.subject, self.year, self.semester, self.status, self.file_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_uses_camel_case() {
        let paper = NewPaper {
            subject: "DBMS".to_string(),
            year: 2024,
            semester: 5,
            file_path: "dbms2024.pdf".to_string(),
            status: "AVAILABLE".to_string(),
        };
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["filePath"], "dbms2024.pdf");
        assert!(json.get("file_path").is_none());
    }

    #[test]
    fn display_lists_fields_pipe_separated() {
        let paper = Paper {
            id: 7,
            subject: "DBMS".to_string(),
            year: 2024,
            semester: 5,
            file_path: "dbms2024.pdf".to_string(),
            status: "AVAILABLE".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(
            paper.to_string(),
            "7 | DBMS | 2024 | Sem 5 | AVAILABLE | dbms2024.pdf"
        );
    }
}
