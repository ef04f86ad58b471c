//! Entries held by the Daily Bright API.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Entry, EntryId, NewEntry};
use crate::session::Session;

use super::validate_new_entry;

#[derive(Debug, Clone)]
pub struct RemoteEntryStore {
    api: ApiClient,
    session: Session,
}

impl RemoteEntryStore {
    pub const fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        let token = self.session.require_token()?;
        self.api.list_entries(&token).await
    }

    pub async fn create_entry(&self, entry: NewEntry) -> Result<Entry> {
        let token = self.session.require_token()?;
        validate_new_entry(&entry)?;
        let created = self.api.create_entry(&token, &entry).await?;
        tracing::info!("Created entry {}", created.id);
        Ok(created)
    }

    pub async fn delete_entry(&self, id: &EntryId) -> Result<()> {
        let token = self.session.require_token()?;
        self.api.delete_entry(&token, id).await?;
        tracing::info!("Deleted entry {}", id);
        Ok(())
    }
}
