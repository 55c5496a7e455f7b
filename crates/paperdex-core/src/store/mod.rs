//! SQLite persistence for paper records

mod repository;
mod schema;

pub use repository::PaperStore;
pub use schema::{Schema, SCHEMA_VERSION};
