use bright_core::models::MIN_FEEDBACK_CONTENT_CHARS;
use bright_core::sync::EntrySync;
use bright_core::Error;

use crate::commands::common::{normalize_entry_identifier, resolve_entry};
use crate::error::CliError;

pub async fn run_feedback(
    sync: &mut EntrySync,
    id: Option<&str>,
    text: Option<&str>,
) -> Result<String, CliError> {
    if let Some(text) = text {
        let feedback = sync.preview_feedback(text).await?;
        println!("{feedback}");
        return Ok(feedback);
    }

    let query = normalize_entry_identifier(id.unwrap_or_default())?;
    sync.refresh().await?;
    let entry = resolve_entry(sync.entries(), &query)?;
    if entry.has_feedback() {
        return Err(Error::validation(format!(
            "Entry {} already has feedback; run `bright show {}` to read it",
            entry.id, entry.id
        ))
        .into());
    }
    if !entry.can_request_feedback() {
        return Err(Error::validation(format!(
            "Entry is too short for feedback (needs at least {MIN_FEEDBACK_CONTENT_CHARS} characters)"
        ))
        .into());
    }

    let entry_id = entry.id.clone();
    let feedback = sync.request_feedback(&entry_id).await?;
    println!("{feedback}");
    Ok(feedback)
}
