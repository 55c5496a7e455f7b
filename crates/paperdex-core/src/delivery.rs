//! Email delivery of question papers as PDF attachments
//!
//! Uses `lettre` for MIME building and SMTP submission. Each send is a
//! single synchronous attempt with no retry and no queue.

use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::DeliveryError;
use crate::paper::Paper;
use crate::resolver::base_name;

/// SMTP submission settings, sourced from the environment at startup.
///
/// There are deliberately no fallback credentials: when `SMTP_USER` or
/// `SMTP_PASS` is unset, delivery is simply not configured.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From address; defaults to the username.
    pub from: String,
}

impl SmtpConfig {
    /// Read SMTP settings from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
    /// `SMTP_PASS`, and `SMTP_FROM`. Returns `None` when credentials are
    /// missing.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("SMTP_USER").ok().filter(|s| !s.is_empty())?;
        let password = std::env::var("SMTP_PASS").ok().filter(|s| !s.is_empty())?;

        let host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());

        Some(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }
}

/// Sends emails with a text body and one PDF attachment.
#[derive(Debug, Clone)]
pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Send an email with the given attachment.
    ///
    /// Precondition: `attachment` must already be a resolved, existing file;
    /// a missing file fails here without any transport attempt.
    pub fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachment: &Path,
    ) -> Result<(), DeliveryError> {
        if !attachment.is_file() {
            return Err(DeliveryError::AttachmentMissing(
                attachment.display().to_string(),
            ));
        }

        let from: Mailbox =
            self.config
                .from
                .parse()
                .map_err(|e| DeliveryError::InvalidAddress {
                    address: self.config.from.clone(),
                    message: format!("{e}"),
                })?;
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| DeliveryError::InvalidAddress {
                address: recipient.to_string(),
                message: format!("{e}"),
            })?;

        let content = std::fs::read(attachment)
            .map_err(|e| DeliveryError::AttachmentMissing(format!("{}: {e}", attachment.display())))?;
        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| DeliveryError::Message(format!("attachment content type: {e}")))?;
        let file_name = attachment
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| base_name(&attachment.display().to_string()).to_string());

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(Attachment::new(file_name).body(content, pdf_type)),
            )
            .map_err(|e| DeliveryError::Message(e.to_string()))?;

        let transport = SmtpTransport::starttls_relay(&self.config.host)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport
            .send(&message)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        tracing::info!(recipient, subject, "email sent");
        Ok(())
    }

    /// Send a catalogued paper, with subject and body templated from its
    /// metadata.
    pub fn send_question_paper(
        &self,
        recipient: &str,
        paper: &Paper,
        attachment: &Path,
    ) -> Result<(), DeliveryError> {
        self.send(
            recipient,
            &paper_subject(paper),
            &paper_body(paper),
            attachment,
        )
    }
}

pub(crate) fn paper_subject(paper: &Paper) -> String {
    format!(
        "Question Paper: {} ({} - Semester {})",
        paper.subject, paper.year, paper.semester
    )
}

pub(crate) fn paper_body(paper: &Paper) -> String {
    format!(
        "Dear Recipient,\n\n\
         Please find attached the requested question paper:\n\n\
         Subject: {}\nYear: {}\nSemester: {}\nStatus: {}\n\n\
         Best regards,\nPaperdex",
        paper.subject, paper.year, paper.semester, paper.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "sender@example.com".to_string(),
            password: "secret".to_string(),
            from: "sender@example.com".to_string(),
        }
    }

    fn sample_paper() -> Paper {
        Paper {
            id: 1,
            subject: "DBMS".to_string(),
            year: 2024,
            semester: 5,
            file_path: "dbms2024.pdf".to_string(),
            status: "AVAILABLE".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_attachment_fails_before_transport() {
        let mailer = Mailer::new(test_config());
        // No network involved: the precondition check rejects immediately.
        let err = mailer
            .send(
                "someone@example.com",
                "subject",
                "body",
                Path::new("/definitely/not/here.pdf"),
            )
            .unwrap_err();
        assert!(matches!(err, DeliveryError::AttachmentMissing(_)));
    }

    #[test]
    fn invalid_recipient_fails_before_transport() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("x.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        let mailer = Mailer::new(test_config());
        let err = mailer
            .send("not-an-address", "subject", "body", &pdf)
            .unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidAddress { .. }));
    }

    #[test]
    fn subject_and_body_template_paper_fields() {
        let paper = sample_paper();
        assert_eq!(
            paper_subject(&paper),
            "Question Paper: DBMS (2024 - Semester 5)"
        );

        let body = paper_body(&paper);
        assert!(body.contains("Subject: DBMS"));
        assert!(body.contains("Year: 2024"));
        assert!(body.contains("Semester: 5"));
        assert!(body.contains("Status: AVAILABLE"));
    }
}
