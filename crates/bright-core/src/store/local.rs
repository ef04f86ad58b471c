//! Entries kept in the local database when no API is used.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, EntryRepository, SqliteEntryRepository};
use crate::error::Result;
use crate::models::{Entry, EntryId, NewEntry};

/// Thread-safe handle over the offline database.
#[derive(Clone)]
pub struct LocalEntryStore {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl LocalEntryStore {
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let db = Database::open(&db_path)?;
        tracing::info!("Running in offline mode with {}", db_path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Arc::new(Mutex::new(Database::open_in_memory()?)),
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        let db = self.db.lock().await;
        SqliteEntryRepository::new(db.connection()).list()
    }

    pub async fn create_entry(&self, entry: NewEntry) -> Result<Entry> {
        let db = self.db.lock().await;
        let created = SqliteEntryRepository::new(db.connection()).create(entry)?;
        tracing::info!("Created entry {} offline", created.id);
        Ok(created)
    }

    pub async fn delete_entry(&self, id: &EntryId) -> Result<()> {
        let db = self.db.lock().await;
        SqliteEntryRepository::new(db.connection()).delete(id)?;
        tracing::info!("Deleted entry {} offline", id);
        Ok(())
    }

    pub async fn attach_feedback(&self, id: &EntryId, feedback: &str) -> Result<Entry> {
        let db = self.db.lock().await;
        SqliteEntryRepository::new(db.connection()).set_feedback(id, feedback)
    }

    pub async fn import_entries(&self, entries: &[Entry]) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteEntryRepository::new(db.connection()).import(entries)
    }
}

impl std::fmt::Debug for LocalEntryStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LocalEntryStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}
