//! Entry repository implementation

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{Entry, EntryId, NewEntry};

/// Trait for offline entry storage operations
pub trait EntryRepository {
    /// Store a new entry under a freshly generated id
    fn create(&self, entry: NewEntry) -> Result<Entry>;

    /// Get an entry by ID
    fn get(&self, id: &EntryId) -> Result<Option<Entry>>;

    /// List all entries, newest first
    fn list(&self) -> Result<Vec<Entry>>;

    /// Remove an entry permanently
    fn delete(&self, id: &EntryId) -> Result<()>;

    /// Attach feedback text to an entry
    fn set_feedback(&self, id: &EntryId, feedback: &str) -> Result<Entry>;

    /// Insert entries keeping their ids and dates; existing ids are skipped.
    ///
    /// Returns the number of entries inserted.
    fn import(&self, entries: &[Entry]) -> Result<usize>;
}

/// `SQLite` implementation of `EntryRepository`
pub struct SqliteEntryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteEntryRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an entry from a database row
    fn parse_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
        let id: String = row.get(0)?;
        let raw_date: String = row.get(3)?;
        let date = DateTime::parse_from_rfc3339(&raw_date)
            .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?
            .with_timezone(&Utc);

        Ok(Entry {
            id: id
                .parse()
                .map_err(|error: Error| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, error.to_string().into())
                })?,
            title: row.get(1)?,
            content: row.get(2)?,
            date,
            feedback: row.get(4)?,
        })
    }

    fn insert(&self, entry: &Entry) -> Result<usize> {
        Ok(self.conn.execute(
            "INSERT OR IGNORE INTO entries (id, title, content, date, feedback) VALUES (?, ?, ?, ?, ?)",
            params![
                entry.id.as_str(),
                entry.title,
                entry.content,
                stored_date(&entry.date),
                entry.feedback
            ],
        )?)
    }
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn stored_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create(&self, entry: NewEntry) -> Result<Entry> {
        let entry = entry.into_entry(EntryId::generate());
        self.insert(&entry)?;
        Ok(entry)
    }

    fn get(&self, id: &EntryId) -> Result<Option<Entry>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, content, date, feedback FROM entries WHERE id = ?",
                params![id.as_str()],
                Self::parse_entry,
            )
            .optional()?)
    }

    fn list(&self) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, date, feedback
             FROM entries
             ORDER BY date DESC, rowid DESC",
        )?;

        let entries = stmt
            .query_map([], Self::parse_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    fn delete(&self, id: &EntryId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?", params![id.as_str()])?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn set_feedback(&self, id: &EntryId, feedback: &str) -> Result<Entry> {
        let rows = self.conn.execute(
            "UPDATE entries SET feedback = ? WHERE id = ?",
            params![feedback, id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn import(&self, entries: &[Entry]) -> Result<usize> {
        let mut inserted = 0;
        for entry in entries {
            if entry.title.trim().is_empty() || entry.content.trim().is_empty() {
                tracing::warn!("Skipping imported entry {} with empty fields", entry.id);
                continue;
            }
            inserted += self.insert(entry)?;
        }
        Ok(inserted)
    }
}
