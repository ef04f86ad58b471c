//! Entry synchronization layer.
//!
//! [`EntrySync`] keeps the in-memory entry list a front end renders and
//! routes every change through the backend, which stays authoritative.

use crate::compose::EntryComposer;
use crate::error::{Error, Result};
use crate::feedback::FeedbackRequester;
use crate::models::{Entry, EntryId, NewEntry};
use crate::store::EntryBackend;

#[derive(Debug)]
pub struct EntrySync {
    backend: EntryBackend,
    feedback: FeedbackRequester,
    entries: Vec<Entry>,
}

impl EntrySync {
    pub const fn new(backend: EntryBackend, feedback: FeedbackRequester) -> Self {
        Self {
            backend,
            feedback,
            entries: Vec::new(),
        }
    }

    pub const fn backend(&self) -> &EntryBackend {
        &self.backend
    }

    /// Entries as of the last refresh, in backend order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn find(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Replace the in-memory list with the backend's.
    ///
    /// On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<&[Entry]> {
        self.entries = self.backend.list_entries().await?;
        tracing::debug!(count = self.entries.len(), "Refreshed entries");
        Ok(&self.entries)
    }

    /// Create an entry, then re-fetch the list from the backend.
    ///
    /// A failed re-fetch after a successful save still counts as saved; the
    /// list is simply stale until the next refresh.
    pub async fn create(&mut self, entry: NewEntry) -> Result<Entry> {
        let created = self.backend.create_entry(entry).await?;
        self.refresh_after_save(&created).await;
        Ok(created)
    }

    /// Submit the composer's draft and record the outcome on it.
    ///
    /// Re-fetches like [`EntrySync::create`].
    pub async fn submit(&mut self, composer: &mut EntryComposer) -> Result<Entry> {
        let new_entry = composer.begin_submit()?;
        let outcome = self.backend.create_entry(new_entry).await;
        composer.complete(&outcome);
        let created = outcome?;

        self.refresh_after_save(&created).await;
        Ok(created)
    }

    async fn refresh_after_save(&mut self, created: &Entry) {
        if let Err(error) = self.refresh().await {
            tracing::warn!("Saved entry {} but could not refresh: {}", created.id, error);
        }
    }

    /// Delete an entry and drop it from the in-memory list.
    pub async fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.backend.delete_entry(id).await?;
        self.entries.retain(|entry| &entry.id != id);
        Ok(())
    }

    /// Request feedback for a stored entry and attach it.
    ///
    /// Entries that already carry feedback are refused; feedback is never
    /// regenerated.
    pub async fn request_feedback(&mut self, id: &EntryId) -> Result<String> {
        let entry = self
            .find(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        if entry.has_feedback() {
            return Err(Error::validation("Entry already has feedback"));
        }
        let content = entry.content.clone();

        let feedback = self.feedback.request_feedback(Some(id), &content).await?;
        self.backend.record_feedback(id, &feedback).await?;

        if let Some(entry) = self.entries.iter_mut().find(|entry| &entry.id == id) {
            entry.feedback = Some(feedback.clone());
        }
        Ok(feedback)
    }

    /// Preview feedback for text that has not been saved as an entry.
    pub async fn preview_feedback(&self, content: &str) -> Result<String> {
        self.feedback.request_feedback(None, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::compose::{ComposeState, Draft};
    use crate::session::Session;
    use crate::store::{LocalEntryStore, RemoteEntryStore};
    use crate::test_server::FakeApi;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn remote_sync(api: &FakeApi, session: &Session) -> EntrySync {
        let client = ApiClient::new(api.base_url()).unwrap();
        EntrySync::new(
            EntryBackend::Remote(RemoteEntryStore::new(client.clone(), session.clone())),
            FeedbackRequester::remote(client, session.clone()),
        )
    }

    fn local_sync() -> EntrySync {
        EntrySync::new(
            EntryBackend::Local(LocalEntryStore::open_in_memory().unwrap()),
            FeedbackRequester::Local,
        )
    }

    #[tokio::test]
    async fn create_then_list_includes_entry() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let before = Utc::now();
        let created = sync
            .create(NewEntry::new("Monday", "Wrote the first test").unwrap())
            .await
            .unwrap();

        let listed = sync.entries();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].title, "Monday");
        assert_eq!(listed[0].content, "Wrote the first test");
        assert!(listed[0].date >= before);
    }

    #[tokio::test]
    async fn delete_removes_entry_for_good() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let created = sync
            .create(NewEntry::new("Gone", "soon").unwrap())
            .await
            .unwrap();
        let requests_before = api.requests().len();
        sync.delete(&created.id).await.unwrap();

        assert!(sync.find(&created.id).is_none());
        // Removal is local; only the DELETE went out
        assert_eq!(api.requests().len(), requests_before + 1);

        sync.refresh().await.unwrap();
        assert!(sync.find(&created.id).is_none());
    }

    #[tokio::test]
    async fn entries_operations_without_token_do_not_mutate() {
        let api = FakeApi::spawn().await;
        let mut sync = remote_sync(&api, &Session::in_memory());

        assert!(matches!(sync.refresh().await, Err(Error::AuthRequired)));
        assert!(matches!(
            sync.create(NewEntry::new("t", "c").unwrap()).await,
            Err(Error::AuthRequired)
        ));
        assert!(matches!(
            sync.delete(&"1".parse().unwrap()).await,
            Err(Error::AuthRequired)
        ));
        assert_eq!(api.mutating_requests(), 0);
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_not_found() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let error = sync.delete(&"999".parse().unwrap()).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));

        let mut offline = local_sync();
        let error = offline.delete(&"999".parse().unwrap()).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn sign_in_token_reaches_the_list_request() {
        let api = FakeApi::spawn().await;
        api.register("a@b.com", "x");
        let session = Session::in_memory();
        let client = ApiClient::new(api.base_url()).unwrap();
        session
            .set_token(client.sign_in("a@b.com", "x").await.unwrap())
            .unwrap();

        let mut sync = remote_sync(&api, &session);
        sync.refresh().await.unwrap();

        let list_request = api
            .requests()
            .into_iter()
            .find(|request| request.method == "GET" && request.path == "/api/entries")
            .unwrap();
        assert_eq!(list_request.authorization.as_deref(), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn submit_drives_composer_states() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let mut composer = EntryComposer::with_draft(Draft::new("Title", "Body"));
        sync.submit(&mut composer).await.unwrap();
        assert_eq!(composer.state(), &ComposeState::Saved);
        assert_eq!(sync.entries().len(), 1);

        session.sign_out().unwrap();
        let mut composer = EntryComposer::with_draft(Draft::new("Title", "Body"));
        let error = sync.submit(&mut composer).await.unwrap_err();
        assert!(matches!(error, Error::AuthRequired));
        assert!(matches!(composer.state(), ComposeState::Failed(_)));
        composer.resume_editing();
        assert_eq!(composer.draft().title, "Title");
    }

    #[tokio::test]
    async fn remote_feedback_is_attached_and_not_regenerated() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let created = sync
            .create(NewEntry::new("Long", "A reflection long enough to comment on").unwrap())
            .await
            .unwrap();
        let feedback = sync.request_feedback(&created.id).await.unwrap();

        assert_eq!(sync.find(&created.id).unwrap().feedback.as_deref(), Some(feedback.as_str()));
        assert_eq!(api.stored_feedback(created.id.as_str()), Some(feedback));

        let error = sync.request_feedback(&created.id).await.unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
    }

    #[tokio::test]
    async fn feedback_failure_leaves_entry_unchanged() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);
        let created = sync
            .create(NewEntry::new("Kept", "The entry itself is saved already").unwrap())
            .await
            .unwrap();

        api.fail_feedback();
        let error = sync.request_feedback(&created.id).await.unwrap_err();
        assert!(matches!(error, Error::Feedback(_)));
        assert!(sync.find(&created.id).unwrap().feedback.is_none());
    }

    #[tokio::test]
    async fn offline_feedback_is_persisted() {
        let mut sync = local_sync();
        let created = sync
            .create(NewEntry::new("Offline", "I learned that offline mode works").unwrap())
            .await
            .unwrap();
        sync.request_feedback(&created.id).await.unwrap();

        sync.refresh().await.unwrap();
        assert!(sync.find(&created.id).unwrap().has_feedback());
        assert!(matches!(sync.backend(), EntryBackend::Local(_)));
    }

    #[tokio::test]
    async fn create_counts_as_saved_when_list_fetch_fails() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);
        let first = sync
            .create(NewEntry::new("First", "Listed before the outage").unwrap())
            .await
            .unwrap();

        api.fail_list();
        let second = sync
            .create(NewEntry::new("Second", "Saved during the outage").unwrap())
            .await
            .unwrap();

        assert_eq!(second.title, "Second");
        // The list stays as it was before the failed re-fetch
        assert_eq!(sync.entries().len(), 1);
        assert_eq!(sync.entries()[0].id, first.id);
        assert!(sync.find(&second.id).is_none());
    }

    #[tokio::test]
    async fn submit_is_saved_despite_stale_list() {
        let api = FakeApi::spawn().await;
        let session = Session::in_memory();
        session.set_token(api.signed_in_token("a@b.com")).unwrap();
        let mut sync = remote_sync(&api, &session);

        let mut composer = EntryComposer::with_draft(Draft::new("Before", "Already listed"));
        let first = sync.submit(&mut composer).await.unwrap();

        api.fail_list();
        let mut composer = EntryComposer::with_draft(Draft::new("During", "Saved anyway"));
        let created = sync.submit(&mut composer).await.unwrap();

        assert_eq!(created.title, "During");
        assert_eq!(composer.state(), &ComposeState::Saved);
        assert_eq!(sync.entries().len(), 1);
        assert_eq!(sync.entries()[0].id, first.id);

        // The server kept the entry; the next refresh picks it up
        api.restore_list();
        sync.refresh().await.unwrap();
        assert!(sync.find(&created.id).is_some());
    }
}
