//! Offline database layer for Daily Bright

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{EntryRepository, SqliteEntryRepository};
