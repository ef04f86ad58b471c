use std::path::Path;

use bright_core::config::normalize_api_base_url;
use bright_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::commands::common::{GlobalOptions, ProfileContext};
use crate::config_profiles::{default_config_path, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, options: &GlobalOptions) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            online,
            no_activate,
        } => {
            let offline = requested_offline_mode(options.offline, online)?;
            let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(options.profile.as_deref());
            apply_profile_init(&mut config, &profile_name, api_url, offline, no_activate)?;

            let path = config.save().map_err(CliError::Config)?;
            println!(
                "Profile '{}' initialized at {}",
                profile_name,
                path.display()
            );
            if config.profile(&profile_name).is_some_and(|profile| profile.offline) {
                println!("Entries for '{profile_name}' are stored offline.");
            } else {
                println!(
                    "Run `bright auth signin --email <EMAIL> --password <PASSWORD>` to sign in."
                );
            }
            Ok(())
        }
        ConfigCommands::Show => {
            let context = ProfileContext::resolve(options)?;
            let config_path = default_config_path().map_err(CliError::Config)?;
            print!("{}", render_profile_summary(&context, &config_path)?);
            Ok(())
        }
    }
}

/// `None` leaves the stored mode alone.
pub fn requested_offline_mode(offline: bool, online: bool) -> Result<Option<bool>, CliError> {
    match (offline, online) {
        (true, true) => Err(CliError::Config(
            "--offline and --online cannot be used together".to_string(),
        )),
        (true, false) => Ok(Some(true)),
        (false, true) => Ok(Some(false)),
        (false, false) => Ok(None),
    }
}

/// Update `profile_name` in `config`; an explicit URL is validated and normalized.
pub fn apply_profile_init(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    api_url: Option<String>,
    offline: Option<bool>,
    no_activate: bool,
) -> Result<(), CliError> {
    let api_url = normalize_text_option(api_url)
        .map(|url| normalize_api_base_url(&url))
        .transpose()?;

    let profile = config.profile_mut_or_default(profile_name);
    if let Some(url) = api_url {
        profile.api_base_url = Some(url);
    }
    if let Some(offline) = offline {
        profile.offline = offline;
    }

    if !no_activate {
        config.active_profile = Some(profile_name.to_string());
    }
    Ok(())
}

pub fn render_profile_summary(
    context: &ProfileContext,
    config_path: &Path,
) -> Result<String, CliError> {
    let mut lines = vec![format!("Profile: {}", context.name)];
    if context.client.offline {
        lines.push("Mode: offline".to_string());
        lines.push(format!("Database: {}", context.db_path.display()));
    } else {
        lines.push("Mode: online".to_string());
        lines.push(format!("API URL: {}", context.client.resolved_api_base_url()?));
    }
    lines.push(format!("Config file: {}", config_path.display()));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    Ok(rendered)
}
