//! Entry export and import helpers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{format_heading_date, Entry};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render entries as a pretty-printed JSON array.
///
/// The array has the same shape [`parse_json_entries`] reads back.
pub fn render_json_export(entries: &[Entry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Render entries as Markdown, one section per entry.
#[must_use]
pub fn render_markdown_export(entries: &[Entry]) -> String {
    let mut output = String::new();

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "## {}", entry.title);
        let _ = writeln!(output);
        let _ = writeln!(output, "_{}_", format_heading_date(&entry.date));
        let _ = writeln!(output);
        output.push_str(entry.content.trim_end());
        output.push('\n');

        if let Some(feedback) = entry.feedback.as_deref().filter(|text| !text.trim().is_empty()) {
            let _ = writeln!(output);
            for line in feedback.lines() {
                let _ = writeln!(output, "> {line}");
            }
        }
    }

    output
}

pub fn render_entries_export(entries: &[Entry], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(entries),
        ExportFormat::Markdown => Ok(render_markdown_export(entries)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("daily-bright-export-{timestamp_ms}.{}", format.extension())
}

/// Parse a JSON array of entries.
///
/// Accepts this crate's own exports as well as arrays using numeric ids or
/// the server's `date_created` field.
pub fn parse_json_entries(raw: &str) -> Result<Vec<Entry>> {
    Ok(serde_json::from_str(raw)?)
}
