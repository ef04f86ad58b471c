use bright_core::compose::EntryComposer;
use bright_core::models::MIN_FEEDBACK_CONTENT_CHARS;
use bright_core::sync::EntrySync;
use bright_core::Entry;

use crate::commands::common::resolve_entry_content;
use crate::error::CliError;

/// Save a new entry; feedback, when asked for, never undoes the save.
pub async fn run_write(
    sync: &mut EntrySync,
    title: &str,
    content_parts: &[String],
    with_feedback: bool,
) -> Result<Entry, CliError> {
    let content = resolve_entry_content(content_parts)?;

    let mut composer = EntryComposer::new();
    composer.set_title(title);
    composer.set_content(content);
    let entry = sync.submit(&mut composer).await?;
    println!("{}", entry.id);

    if with_feedback {
        if entry.can_request_feedback() {
            match sync.request_feedback(&entry.id).await {
                Ok(feedback) => println!("\n{feedback}"),
                Err(error) => {
                    tracing::warn!("Entry {} saved without feedback: {}", entry.id, error);
                    eprintln!("Feedback unavailable: {error}");
                }
            }
        } else {
            eprintln!(
                "Entry is too short for feedback (needs at least {MIN_FEEDBACK_CONTENT_CHARS} characters)"
            );
        }
    }

    Ok(entry)
}
