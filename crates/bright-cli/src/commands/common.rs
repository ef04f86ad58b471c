use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use bright_core::api::ApiClient;
use bright_core::config::ClientConfig;
use bright_core::feedback::FeedbackRequester;
use bright_core::models::format_card_date;
use bright_core::session::Session;
use bright_core::store::{EntryBackend, LocalEntryStore, RemoteEntryStore};
use bright_core::sync::EntrySync;
use bright_core::Entry;
use chrono::Utc;
use serde::Serialize;

use crate::auth::restore_session;
use crate::config_profiles::{default_data_dir, CliProfilesConfig};
use crate::error::CliError;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub profile: Option<String>,
    pub offline: bool,
    pub db_path: Option<PathBuf>,
}

/// The profile a command runs against, with overrides applied.
#[derive(Debug, Clone)]
pub struct ProfileContext {
    pub name: String,
    pub client: ClientConfig,
    pub db_path: PathBuf,
}

impl ProfileContext {
    pub fn resolve(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let name = config.resolve_profile_name(options.profile.as_deref());
        let client = config
            .profile(&name)
            .cloned()
            .unwrap_or_default()
            .client_config(options.offline);
        let db_path = resolve_db_path(options.db_path.clone(), &name)?;
        Ok(Self {
            name,
            client,
            db_path,
        })
    }

    pub fn api_client(&self) -> Result<ApiClient, CliError> {
        Ok(ApiClient::new(self.client.resolved_api_base_url()?)?)
    }

    pub fn session(&self) -> Result<Session, CliError> {
        Ok(restore_session(&self.name)?)
    }

    /// Build the synchronization layer for this profile's backend.
    pub fn open_entry_sync(&self) -> Result<EntrySync, CliError> {
        if self.client.offline {
            return open_offline_sync(&self.db_path);
        }

        let api = self.api_client()?;
        let session = self.session()?;
        Ok(EntrySync::new(
            EntryBackend::Remote(RemoteEntryStore::new(api.clone(), session.clone())),
            FeedbackRequester::remote(api, session),
        ))
    }
}

pub fn open_offline_sync(db_path: &Path) -> Result<EntrySync, CliError> {
    let store = LocalEntryStore::open(db_path)?;
    Ok(EntrySync::new(
        EntryBackend::Local(store),
        FeedbackRequester::Local,
    ))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, profile_name: &str) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("BRIGHT_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path(profile_name)
}

pub fn default_db_path(profile_name: &str) -> Result<PathBuf, CliError> {
    let dir = default_data_dir().map_err(CliError::Config)?;
    if profile_name == "default" {
        Ok(dir.join("bright.db"))
    } else {
        Ok(dir.join(format!("bright-{profile_name}.db")))
    }
}

#[derive(Debug, Serialize)]
pub struct EntryListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub date: String,
    pub relative_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

pub fn entry_to_list_item(entry: &Entry) -> EntryListItem {
    let now_ms = Utc::now().timestamp_millis();
    EntryListItem {
        id: entry.id.to_string(),
        title: entry.title.clone(),
        preview: entry.preview(80),
        content: entry.content.clone(),
        date: entry.date.to_rfc3339(),
        relative_time: format_relative_time(entry.date.timestamp_millis(), now_ms),
        feedback: entry.feedback.clone(),
    }
}

pub fn format_entry_lines(entries: &[Entry]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    entries
        .iter()
        .map(|entry| {
            let short_id = short_id(entry.id.as_str());
            let title = truncate_chars(&entry.title, 32);
            let date = format_card_date(&entry.date);
            let relative_time = format_relative_time(entry.date.timestamp_millis(), now_ms);
            let marker = if entry.has_feedback() { "*" } else { " " };

            format!("{short_id:<13}  {date:<12}  {marker} {title:<32}  {relative_time}")
        })
        .collect()
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Find an entry by exact id, or by a prefix matching exactly one id.
pub fn resolve_entry<'a>(entries: &'a [Entry], query: &str) -> Result<&'a Entry, CliError> {
    if let Some(entry) = entries.iter().find(|entry| entry.id.as_str() == query) {
        return Ok(entry);
    }

    let matching = entries
        .iter()
        .filter(|entry| entry.id.as_str().starts_with(query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::EntryNotFound(query.to_string())),
        [entry] => Ok(*entry),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|entry| short_id(entry.id.as_str()))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousEntryId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn resolve_entry_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_entry_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyEntryId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_entry_file_path();
    std::fs::write(&temp_file, "")?;

    let launch_result = launch_editor(&editor, &temp_file);
    let entry_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&entry_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // EDITOR may carry arguments, e.g. "code --wait"
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let status = Command::new(program).args(parts).arg(file_path).status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_entry_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("bright-entry-{}-{now}.md", std::process::id()))
}
