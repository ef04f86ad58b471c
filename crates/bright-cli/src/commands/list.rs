use bright_core::sync::EntrySync;

use crate::commands::common::{entry_to_list_item, format_entry_lines, EntryListItem};
use crate::error::CliError;

pub async fn run_list(sync: &mut EntrySync, limit: usize, as_json: bool) -> Result<(), CliError> {
    let entries = sync.refresh().await?;
    let shown = &entries[..entries.len().min(limit)];

    if as_json {
        let json_items = shown
            .iter()
            .map(entry_to_list_item)
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if shown.is_empty() {
        println!("No entries yet. Write one with `bright write --title <TITLE>`.");
    } else {
        for line in format_entry_lines(shown) {
            println!("{line}");
        }
    }

    Ok(())
}
