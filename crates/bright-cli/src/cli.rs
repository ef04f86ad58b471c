use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bright")]
#[command(about = "Write a short daily reflection and get feedback on it")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name (API URL, offline mode and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Keep entries in the local database instead of the API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Optional path to the offline database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new entry
    #[command(alias = "add")]
    Write {
        /// Entry title
        #[arg(short, long)]
        title: String,
        /// Entry content (read from stdin or $EDITOR when omitted)
        content: Vec<String>,
        /// Request feedback once the entry is saved
        #[arg(long)]
        feedback: bool,
    },
    /// List entries, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show an entry with its feedback
    Show {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Request feedback for an entry, or preview it for unsaved text
    Feedback {
        /// Entry ID or unique ID prefix
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        id: Option<String>,
        /// Text to get feedback on without saving an entry
        #[arg(long, value_name = "CONTENT")]
        text: Option<String>,
    },
    /// Export entries
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, or a directory for a timestamped export (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a JSON array of entries into the offline database
    Import {
        /// Path to a JSON export
        path: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, sign up or sign out of the Daily Bright API
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile (pass --offline to store entries locally)
    ///
    /// The profile's mode only changes when --offline or --online is given.
    Init {
        /// Daily Bright API URL (e.g. <http://localhost:8000>)
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Switch an offline profile back to the API
        #[arg(long)]
        online: bool,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and store the session token in the keychain
    Signin {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Repeat the password
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
    },
    /// Clear the stored session
    Signout,
    /// Show auth status for the profile
    Status,
}
