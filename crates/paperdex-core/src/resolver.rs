//! Directory-agnostic lookup of PDF files by bare filename
//!
//! The tool may be launched from the project root or a subdirectory, so a
//! filename is probed against an ordered list of candidate base directories
//! instead of a single hardcoded root.

use std::path::{Path, PathBuf};

/// Reduce an input to its base filename, dropping any directory components.
///
/// Handles both `/` and `\` separators; traversal segments like
/// `"../../etc/passwd"` reduce to `"passwd"`.
pub fn base_name(input: &str) -> &str {
    input
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(input)
}

/// Resolves bare PDF filenames against a configured base folder.
#[derive(Debug, Clone)]
pub struct FileResolver {
    base_dir: PathBuf,
}

impl FileResolver {
    /// Create a resolver rooted at the given base folder (e.g. `PDF`)
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The configured base folder
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Locate a PDF on disk.
    ///
    /// An absolute input that exists is used as-is. Anything else is reduced
    /// to its base filename and probed, in order, against the candidate
    /// directories; the first existing file wins. Returns `None` when no
    /// candidate exists.
    pub fn resolve(&self, name_or_path: &str) -> Option<PathBuf> {
        let as_path = Path::new(name_or_path);
        if as_path.is_absolute() && as_path.is_file() {
            return Some(as_path.to_path_buf());
        }

        let name = base_name(name_or_path);
        if name.is_empty() {
            return None;
        }

        for candidate in self.candidates(name) {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "resolved PDF");
                return Some(candidate);
            }
        }

        tracing::debug!(name, base_dir = %self.base_dir.display(), "PDF not found");
        None
    }

    /// The ordered list of paths probed for a bare filename.
    ///
    /// Kept as an explicit list: base folder as configured, base folder under
    /// the working directory, base folder under its parent, and a literal
    /// `./PDF` fallback.
    pub fn candidates(&self, file_name: &str) -> Vec<PathBuf> {
        let mut candidates = vec![self.base_dir.join(file_name)];

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(&self.base_dir).join(file_name));
            if let Some(parent) = cwd.parent() {
                candidates.push(parent.join(&self.base_dir).join(file_name));
            }
        }

        candidates.push(Path::new("PDF").join(file_name));
        candidates.dedup();
        candidates
    }

    /// List `.pdf` files in the base folder, for diagnostics when a lookup
    /// misses.
    pub fn available_pdfs(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.base_dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.to_lowercase().ends_with(".pdf"))
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("dbms2025.pdf"), "dbms2025.pdf");
        assert_eq!(base_name("../../etc/passwd"), "passwd");
        assert_eq!(base_name("a/b/c.pdf"), "c.pdf");
        assert_eq!(base_name(r"C:\papers\os2024.pdf"), "os2024.pdf");
    }

    #[test]
    fn resolves_file_in_base_folder() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("dbms2025.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        let resolver = FileResolver::new(dir.path());
        assert_eq!(resolver.resolve("dbms2025.pdf"), Some(pdf));
    }

    #[test]
    fn traversal_input_only_probes_base_folder() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = FileResolver::new(dir.path());

        // /etc/passwd exists on most systems, but the input must reduce to
        // the bare name "passwd" and be looked up only under the base dirs.
        assert_eq!(resolver.resolve("../../etc/passwd"), None);

        fs::write(dir.path().join("passwd"), b"decoy").unwrap();
        let resolved = resolver.resolve("../../etc/passwd").unwrap();
        assert!(resolved.starts_with(dir.path()));
    }

    #[test]
    fn absolute_existing_path_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("direct.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        // Base dir elsewhere; the absolute path still resolves.
        let resolver = FileResolver::new("nonexistent-base");
        assert_eq!(resolver.resolve(pdf.to_str().unwrap()), Some(pdf));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = FileResolver::new(dir.path());
        assert_eq!(resolver.resolve("nope.pdf"), None);
    }

    #[test]
    fn available_pdfs_lists_only_pdfs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("os.pdf"), b"x").unwrap();
        fs::write(dir.path().join("dbms.PDF"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let resolver = FileResolver::new(dir.path());
        assert_eq!(resolver.available_pdfs(), vec!["dbms.PDF", "os.pdf"]);
    }
}
