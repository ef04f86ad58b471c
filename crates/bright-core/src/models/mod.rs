//! Data models for Daily Bright

mod entry;

pub use entry::{
    format_card_date, format_heading_date, Entry, EntryId, NewEntry, MIN_FEEDBACK_CONTENT_CHARS,
};
