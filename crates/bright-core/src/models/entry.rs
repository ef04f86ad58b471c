//! Entry model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Content shorter than this is not offered for feedback.
pub const MIN_FEEDBACK_CONTENT_CHARS: usize = 20;

/// Identifier of an entry.
///
/// The API hands out integer ids while the offline store generates UUID v7
/// strings, so the id is kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create a new time-sortable id for entries stored offline
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Entry id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(Self(text)),
            RawId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}

/// A single reflection written by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    /// Creation time, never changed afterwards
    #[serde(alias = "date_created")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Entry {
    pub fn has_feedback(&self) -> bool {
        self.feedback
            .as_deref()
            .is_some_and(|feedback| !feedback.trim().is_empty())
    }

    /// Feedback is offered once, and only for content long enough to comment on.
    pub fn can_request_feedback(&self) -> bool {
        !self.has_feedback() && self.content.trim().chars().count() >= MIN_FEEDBACK_CONTENT_CHARS
    }

    /// Collapse the first content line to at most `max_chars` characters.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or("").trim();
        let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() <= max_chars {
            collapsed
        } else {
            let take_len = max_chars.saturating_sub(3);
            let mut truncated = collapsed.chars().take(take_len).collect::<String>();
            truncated.push_str("...");
            truncated
        }
    }
}

/// Payload for creating an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl NewEntry {
    /// Validate title and content and stamp the creation time.
    pub fn new(title: impl AsRef<str>, content: impl AsRef<str>) -> Result<Self> {
        let title = title.as_ref().trim();
        let content = content.as_ref().trim();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }
        if content.is_empty() {
            return Err(Error::validation("Content is required"));
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            date: Utc::now(),
            feedback: None,
        })
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Materialize this payload as a stored entry under `id`.
    #[must_use]
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            title: self.title,
            content: self.content,
            date: self.date,
            feedback: self.feedback,
        }
    }
}

/// Short date shown on entry cards, e.g. `Oct 16, 2026`.
pub fn format_card_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Long date shown above the compose form, e.g. `Friday, October 16, 2026`.
pub fn format_heading_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format("%A, %B %-d, %Y").to_string()
}
