//! Error types for paperdex-core

use thiserror::Error;

/// Result type alias for paperdex operations
pub type Result<T> = std::result::Result<T, PaperdexError>;

/// Main error type for paperdex operations
#[derive(Error, Debug)]
pub enum PaperdexError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Delivery-related errors
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Missing or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record or file lookup miss
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Mail-delivery-specific errors
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A mailbox address could not be parsed
    #[error("Invalid address \"{address}\": {message}")]
    InvalidAddress { address: String, message: String },

    /// The attachment file is missing on disk
    #[error("Attachment not found: {0}")]
    AttachmentMissing(String),

    /// The MIME message could not be built
    #[error("Failed to build message: {0}")]
    Message(String),

    /// SMTP connection, auth, or submission failure
    #[error("SMTP transport failed: {0}")]
    Transport(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for PaperdexError {
    fn from(err: rusqlite::Error) -> Self {
        PaperdexError::Storage(StorageError::Database(err.to_string()))
    }
}
