//! Service configuration, read from the environment once at startup

use std::path::PathBuf;

use crate::delivery::SmtpConfig;

/// Paths and addresses for the catalog service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Base folder holding the PDF files.
    pub pdf_dir: PathBuf,
    /// Directory with the bundled front-end assets.
    pub frontend_dir: PathBuf,
    /// HTTP bind address.
    pub bind_addr: String,
    /// SMTP settings; `None` when delivery is not configured.
    pub smtp: Option<SmtpConfig>,
}

impl ServiceConfig {
    /// Read configuration from `PAPERDEX_DB`, `PAPERDEX_PDF_DIR`,
    /// `PAPERDEX_FRONTEND_DIR`, `PAPERDEX_ADDR`, and the `SMTP_*` variables.
    pub fn from_env() -> Self {
        let smtp = SmtpConfig::from_env();
        if smtp.is_none() {
            tracing::warn!(
                "SMTP_USER/SMTP_PASS not set; email delivery is disabled"
            );
        }

        Self {
            db_path: std::env::var("PAPERDEX_DB")
                .unwrap_or_else(|_| "papers.db".to_string())
                .into(),
            pdf_dir: std::env::var("PAPERDEX_PDF_DIR")
                .unwrap_or_else(|_| "PDF".to_string())
                .into(),
            frontend_dir: std::env::var("PAPERDEX_FRONTEND_DIR")
                .unwrap_or_else(|_| "frontend".to_string())
                .into(),
            bind_addr: std::env::var("PAPERDEX_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            smtp,
        }
    }
}
