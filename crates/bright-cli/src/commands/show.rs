use std::fmt::Write as _;

use bright_core::models::format_heading_date;
use bright_core::sync::EntrySync;
use bright_core::Entry;

use crate::commands::common::{normalize_entry_identifier, resolve_entry};
use crate::error::CliError;

pub async fn run_show(sync: &mut EntrySync, id: &str) -> Result<(), CliError> {
    let query = normalize_entry_identifier(id)?;
    sync.refresh().await?;
    let entry = resolve_entry(sync.entries(), &query)?;

    print!("{}", render_entry_detail(entry));
    Ok(())
}

pub fn render_entry_detail(entry: &Entry) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", entry.title);
    let _ = writeln!(output, "{}", format_heading_date(&entry.date));
    let _ = writeln!(output, "id: {}", entry.id);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", entry.content.trim_end());

    if let Some(feedback) = entry.feedback.as_deref().filter(|_| entry.has_feedback()) {
        let _ = writeln!(output);
        let _ = writeln!(output, "Feedback:");
        let _ = writeln!(output, "{}", feedback.trim_end());
    } else if entry.can_request_feedback() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Run `bright feedback {}` to get feedback.", entry.id);
    }

    output
}
