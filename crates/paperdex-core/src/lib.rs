//! paperdex-core: catalog and delivery library for question paper PDFs
//!
//! This library provides:
//! - A SQLite-backed store of paper metadata (subject, year, semester,
//!   file name, availability status)
//! - Directory-agnostic resolution of bare PDF filenames on disk
//! - A registry service composing store + resolver behind one API
//! - SMTP delivery of a paper as an email attachment

pub mod config;
pub mod delivery;
pub mod error;
pub mod paper;
pub mod registry;
pub mod resolver;
pub mod store;

pub use config::ServiceConfig;
pub use delivery::{Mailer, SmtpConfig};
pub use error::{DeliveryError, PaperdexError, Result, StorageError};
pub use paper::{NewPaper, Paper};
pub use registry::PaperRegistry;
pub use resolver::FileResolver;
pub use store::PaperStore;
