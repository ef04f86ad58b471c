use std::path::Path;

use bright_core::export::parse_json_entries;
use bright_core::store::EntryBackend;
use bright_core::sync::EntrySync;

use crate::error::CliError;

/// Import a JSON array of entries into the offline database, keeping ids and dates.
pub async fn run_import(sync: &EntrySync, path: &Path) -> Result<usize, CliError> {
    let EntryBackend::Local(store) = sync.backend() else {
        return Err(CliError::ImportRequiresOffline);
    };

    let raw = std::fs::read_to_string(path)?;
    let entries = parse_json_entries(&raw)?;
    let inserted = store.import_entries(&entries).await?;

    match store.db_path() {
        Some(db_path) => println!(
            "Imported {inserted} of {} entries into {}",
            entries.len(),
            db_path.display()
        ),
        None => println!("Imported {inserted} of {} entries", entries.len()),
    }
    Ok(inserted)
}
