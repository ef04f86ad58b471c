//! Daily Bright CLI - write a short reflection every day from the terminal

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::{GlobalOptions, ProfileContext};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::feedback::run_feedback;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::commands::write::run_write;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "bright=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = GlobalOptions {
        profile: cli.profile,
        offline: cli.offline,
        db_path: cli.db_path,
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Write {
            title,
            content,
            feedback,
        } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_write(&mut sync, &title, &content, feedback).await?;
        }
        Commands::List { limit, json } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_list(&mut sync, limit, json).await?;
        }
        Commands::Show { id } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_show(&mut sync, &id).await?;
        }
        Commands::Delete { id } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_delete(&mut sync, &id).await?;
        }
        Commands::Feedback { id, text } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_feedback(&mut sync, id.as_deref(), text.as_deref()).await?;
        }
        Commands::Export { format, output } => {
            let mut sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_export(&mut sync, format, output.as_deref()).await?;
        }
        Commands::Import { path } => {
            let sync = ProfileContext::resolve(&options)?.open_entry_sync()?;
            run_import(&sync, &path).await?;
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
        Commands::Config { command } => run_config(command, &options)?,
        Commands::Auth { command } => {
            let context = ProfileContext::resolve(&options)?;
            run_auth(command, &context).await?;
        }
    }

    Ok(())
}
