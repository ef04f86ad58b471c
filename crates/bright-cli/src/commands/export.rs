use std::path::{Path, PathBuf};

use bright_core::export::{self, render_entries_export, suggested_export_file_name};
use bright_core::sync::EntrySync;

use crate::cli::ExportFormat;
use crate::error::CliError;

pub async fn run_export(
    sync: &mut EntrySync,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<Option<PathBuf>, CliError> {
    let format = export::ExportFormat::from(format);
    let entries = sync.refresh().await?;
    let rendered = render_entries_export(entries, format)?;

    let Some(path) = output_path else {
        println!("{rendered}");
        return Ok(None);
    };

    let path = export_file_path(path, format, chrono::Utc::now().timestamp_millis());
    std::fs::write(&path, rendered)?;
    println!("{}", path.display());
    Ok(Some(path))
}

/// An existing directory gets a timestamped file name inside it.
fn export_file_path(path: &Path, format: export::ExportFormat, timestamp_ms: i64) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(format, timestamp_ms))
    } else {
        path.to_path_buf()
    }
}

impl From<ExportFormat> for export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}
