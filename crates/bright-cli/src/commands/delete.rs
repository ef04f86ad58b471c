use bright_core::sync::EntrySync;
use bright_core::EntryId;

use crate::commands::common::{normalize_entry_identifier, resolve_entry};
use crate::error::CliError;

pub async fn run_delete(sync: &mut EntrySync, id: &str) -> Result<EntryId, CliError> {
    let query = normalize_entry_identifier(id)?;
    sync.refresh().await?;

    // Unknown ids still go to the backend, which reports NotFound itself
    let entry_id = match resolve_entry(sync.entries(), &query) {
        Ok(entry) => entry.id.clone(),
        Err(CliError::EntryNotFound(_)) => query.parse::<EntryId>()?,
        Err(error) => return Err(error),
    };

    sync.delete(&entry_id).await?;
    println!("{entry_id}");
    Ok(entry_id)
}
