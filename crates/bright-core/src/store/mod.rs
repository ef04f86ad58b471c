//! Entry storage backends.
//!
//! [`EntryBackend`] is either the remote API (the authenticated variant) or
//! the local database (the offline variant). The remote backend checks for a
//! session token before issuing any request, so a signed-out caller gets
//! [`Error::AuthRequired`] and the server sees nothing.

mod local;
mod remote;

pub use local::LocalEntryStore;
pub use remote::RemoteEntryStore;

use crate::error::{Error, Result};
use crate::models::{Entry, EntryId, NewEntry};

#[derive(Debug, Clone)]
pub enum EntryBackend {
    Remote(RemoteEntryStore),
    Local(LocalEntryStore),
}

impl EntryBackend {
    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        match self {
            Self::Remote(store) => store.list_entries().await,
            Self::Local(store) => store.list_entries().await,
        }
    }

    pub async fn create_entry(&self, entry: NewEntry) -> Result<Entry> {
        match self {
            Self::Remote(store) => store.create_entry(entry).await,
            Self::Local(store) => {
                validate_new_entry(&entry)?;
                store.create_entry(entry).await
            }
        }
    }

    pub async fn delete_entry(&self, id: &EntryId) -> Result<()> {
        match self {
            Self::Remote(store) => store.delete_entry(id).await,
            Self::Local(store) => store.delete_entry(id).await,
        }
    }

    /// Persist feedback produced for `id`.
    ///
    /// The API stores feedback itself when the request names the entry, so
    /// only the offline store has work to do here.
    pub async fn record_feedback(&self, id: &EntryId, feedback: &str) -> Result<()> {
        match self {
            Self::Remote(_) => Ok(()),
            Self::Local(store) => store.attach_feedback(id, feedback).await.map(|_| ()),
        }
    }
}

/// `NewEntry` fields are public, so re-check what its constructor enforced.
pub(crate) fn validate_new_entry(entry: &NewEntry) -> Result<()> {
    if entry.title.trim().is_empty() {
        return Err(Error::validation("Title is required"));
    }
    if entry.content.trim().is_empty() {
        return Err(Error::validation("Content is required"));
    }
    Ok(())
}
