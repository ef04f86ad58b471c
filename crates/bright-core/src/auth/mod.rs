//! Sign-in, sign-up and sign-out against the Daily Bright API.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::session::Session;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
});

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Session,
}

impl AuthService {
    pub const fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a token and store it on the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let email = email.trim();
        validate_credentials(email, password)?;

        let token = self.api.sign_in(email, password).await?;
        self.session.set_token(token)?;
        tracing::info!("Signed in as {}", email);
        Ok(())
    }

    /// Register an account. Does not sign in.
    pub async fn sign_up(&self, email: &str, password: &str, confirm_password: &str) -> Result<()> {
        let email = email.trim();
        validate_credentials(email, password)?;
        if !EMAIL_PATTERN.is_match(email) {
            return Err(Error::validation(format!("'{email}' is not a valid email address")));
        }
        if password != confirm_password {
            return Err(Error::validation("Passwords do not match"));
        }

        self.api.sign_up(email, password).await?;
        tracing::info!("Registered {}", email);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.session.sign_out()?;
        tracing::info!("Signed out");
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::validation("Email is required"));
    }
    if password.trim().is_empty() {
        return Err(Error::validation("Password is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::FakeApi;

    fn service(api: &FakeApi) -> AuthService {
        AuthService::new(ApiClient::new(api.base_url()).unwrap(), Session::in_memory())
    }

    #[tokio::test]
    async fn sign_in_stores_token_on_session() {
        let api = FakeApi::spawn().await;
        api.register("a@b.com", "x");
        let auth = service(&api);

        auth.sign_in(" a@b.com ", "x").await.unwrap();
        assert_eq!(auth.session().token().unwrap().expose(), "t1");

        auth.sign_out().unwrap();
        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn rejected_sign_in_keeps_session_empty() {
        let api = FakeApi::spawn().await;
        api.register("a@b.com", "x");
        let auth = service(&api);

        let error = auth.sign_in("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(error, Error::AuthFailed(message) if message == "Invalid credentials."));
        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn sign_up_checks_input_before_request() {
        let api = FakeApi::spawn().await;
        let auth = service(&api);

        assert!(matches!(
            auth.sign_up("a@b.com", "secret", "other").await,
            Err(Error::Validation(message)) if message == "Passwords do not match"
        ));
        assert!(matches!(
            auth.sign_up("not-an-email", "secret", "secret").await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            auth.sign_up("", "secret", "secret").await,
            Err(Error::Validation(_))
        ));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let api = FakeApi::spawn().await;
        let auth = service(&api);

        auth.sign_up("new@b.com", "secret", "secret").await.unwrap();
        assert!(!auth.session().is_authenticated());

        auth.sign_in("new@b.com", "secret").await.unwrap();
        assert!(auth.session().is_authenticated());
    }
}
