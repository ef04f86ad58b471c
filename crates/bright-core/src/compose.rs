//! Draft editing and the submit state machine.
//!
//! `Editing -> Submitting -> {Saved, Failed}`; both end states return to
//! `Editing` through [`EntryComposer::resume_editing`].

use crate::error::{Error, Result};
use crate::models::{Entry, NewEntry};

/// Unsaved title and content, held only in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeState {
    Editing,
    Submitting,
    Saved,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EntryComposer {
    draft: Draft,
    state: ComposeState,
    /// Reason of the last failure, shown until the next edit
    last_error: Option<String>,
}

impl Default for EntryComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryComposer {
    pub const fn new() -> Self {
        Self {
            draft: Draft {
                title: String::new(),
                content: String::new(),
            },
            state: ComposeState::Editing,
            last_error: None,
        }
    }

    pub const fn with_draft(draft: Draft) -> Self {
        Self {
            draft,
            state: ComposeState::Editing,
            last_error: None,
        }
    }

    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn state(&self) -> &ComposeState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, ComposeState::Submitting)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.last_error = None;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
        self.last_error = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.draft.is_complete()
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// A second call while a submit is in flight is rejected and leaves the
    /// state untouched. A validation failure keeps the composer editing.
    pub fn begin_submit(&mut self) -> Result<NewEntry> {
        if self.is_submitting() {
            return Err(Error::validation("Entry is already being saved"));
        }
        let entry = NewEntry::new(&self.draft.title, &self.draft.content)?;
        self.state = ComposeState::Submitting;
        Ok(entry)
    }

    /// Record the outcome of the submit started by [`Self::begin_submit`].
    pub fn complete(&mut self, outcome: &Result<Entry>) {
        self.state = match outcome {
            Ok(_) => ComposeState::Saved,
            Err(error) => ComposeState::Failed(error.to_string()),
        };
    }

    /// Return to `Editing`: a saved draft is cleared, a failed one is kept.
    pub fn resume_editing(&mut self) {
        match std::mem::replace(&mut self.state, ComposeState::Editing) {
            ComposeState::Saved => {
                self.draft.clear();
                self.last_error = None;
            }
            ComposeState::Failed(reason) => self.last_error = Some(reason),
            ComposeState::Editing | ComposeState::Submitting => {}
        }
    }
}
