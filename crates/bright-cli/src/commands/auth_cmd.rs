use bright_core::auth::AuthService;

use crate::cli::AuthCommands;
use crate::commands::common::ProfileContext;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &ProfileContext) -> Result<(), CliError> {
    let profile_name = &context.name;

    match command {
        AuthCommands::Signin { email, password } => {
            let auth = online_auth_service(context)?;
            auth.sign_in(&email, &password).await?;
            println!("Signed in profile '{profile_name}' as {}", email.trim());
            Ok(())
        }
        AuthCommands::Signup {
            email,
            password,
            confirm_password,
        } => {
            let auth = online_auth_service(context)?;
            auth.sign_up(&email, &password, &confirm_password).await?;
            println!(
                "Account created for {}. Run `bright auth signin --email {} --password <PASSWORD>`.",
                email.trim(),
                email.trim()
            );
            Ok(())
        }
        AuthCommands::Status => {
            if context.client.offline {
                println!("Profile '{profile_name}' is offline; no sign-in needed.");
            } else if context.session()?.is_authenticated() {
                println!(
                    "Profile '{}' is signed in to {}",
                    profile_name,
                    context.client.resolved_api_base_url()?
                );
            } else {
                println!("Profile '{profile_name}' is not signed in.");
            }
            Ok(())
        }
        AuthCommands::Signout => {
            context.session()?.sign_out()?;
            tracing::info!("Cleared session for profile '{}'", profile_name);
            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
    }
}

fn online_auth_service(context: &ProfileContext) -> Result<AuthService, CliError> {
    if context.client.offline {
        return Err(CliError::Config(format!(
            "Profile '{}' is offline; sign-in is only used with the API",
            context.name
        )));
    }
    Ok(AuthService::new(context.api_client()?, context.session()?))
}
