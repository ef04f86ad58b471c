//! HTTP client for the Daily Bright REST API.
//!
//! Every entry call requires a [`SessionToken`]; the feedback call attaches
//! one only when given. Non-success statuses are mapped onto the crate's
//! error taxonomy by [`map_entry_status`].

mod wire;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::config::normalize_api_base_url;
use crate::error::{Error, Result};
use crate::models::{Entry, EntryId, NewEntry};
use crate::session::SessionToken;

pub use wire::parse_api_message;
use wire::{api_message, Credentials, FeedbackRequest, FeedbackResponse, SignInResponse};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Builds a client for an API origin such as `http://localhost:8000`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = normalize_api_base_url(base_url.as_ref())?;
        let client = Client::builder()
            .build()
            .map_err(|error| Error::InvalidConfiguration(error.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionToken> {
        let request = self
            .client
            .post(self.endpoint("/auth/signin"))
            .json(&Credentials { email, password });
        let response = self.send("POST", "/auth/signin", request).await?;
        if !response.status().is_success() {
            return Err(Error::AuthFailed(read_error_message(response).await));
        }

        let payload = response.json::<SignInResponse>().await?;
        let token = payload
            .token
            .ok_or_else(|| Error::AuthFailed("Sign-in response did not include a token".into()))?;
        SessionToken::new(token)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint("/auth/signup"))
            .json(&Credentials { email, password });
        let response = self.send("POST", "/auth/signup", request).await?;
        if !response.status().is_success() {
            return Err(Error::AuthFailed(read_error_message(response).await));
        }
        Ok(())
    }

    /// Entries in the order the server returns them.
    pub async fn list_entries(&self, token: &SessionToken) -> Result<Vec<Entry>> {
        let request = self
            .client
            .get(self.endpoint("/entries"))
            .bearer_auth(token.expose())
            .header("Accept", "application/json");
        let response = self.send("GET", "/entries", request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_entry_status(status, &body, "entries"));
        }
        Ok(response.json::<Vec<Entry>>().await?)
    }

    pub async fn create_entry(&self, token: &SessionToken, entry: &NewEntry) -> Result<Entry> {
        let request = self
            .client
            .post(self.endpoint("/entries"))
            .bearer_auth(token.expose())
            .header("Accept", "application/json")
            .json(entry);
        let response = self.send("POST", "/entries", request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_entry_status(status, &body, "new entry"));
        }
        Ok(response.json::<Entry>().await?)
    }

    pub async fn delete_entry(&self, token: &SessionToken, id: &EntryId) -> Result<()> {
        let path = format!("/entries/{}", urlencoding::encode(id.as_str()));
        let request = self
            .client
            .delete(self.endpoint(&path))
            .bearer_auth(token.expose());
        let response = self.send("DELETE", &path, request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_entry_status(status, &body, id.as_str()));
        }
        Ok(())
    }

    /// Ask the server for feedback on `content`; every call is a fresh request.
    pub async fn request_feedback(
        &self,
        token: Option<&SessionToken>,
        entry_id: Option<&EntryId>,
        content: &str,
    ) -> Result<String> {
        let mut request = self
            .client
            .post(self.endpoint("/feedback"))
            .header("Accept", "application/json")
            .json(&FeedbackRequest { entry_id, content });
        if let Some(token) = token {
            request = request.bearer_auth(token.expose());
        }

        let response = self
            .send("POST", "/feedback", request)
            .await
            .map_err(|error| Error::Feedback(error.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Feedback(read_error_message(response).await));
        }

        let payload = response
            .json::<FeedbackResponse>()
            .await
            .map_err(|error| Error::Feedback(format!("Unreadable feedback response: {error}")))?;
        Ok(payload.feedback)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response> {
        tracing::debug!(method, path, "Sending API request");
        let response = request.send().await?;
        tracing::debug!(method, path, status = response.status().as_u16(), "API responded");
        Ok(response)
    }
}

/// Map a non-success status from an entry endpoint onto the error taxonomy.
pub fn map_entry_status(status: StatusCode, body: &str, subject: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthRequired,
        StatusCode::NOT_FOUND => Error::NotFound(subject.to_string()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Validation(parse_api_message(status, body))
        }
        _ => match api_message(body) {
            Some(message) => Error::Network(format!("HTTP {}: {message}", status.as_u16())),
            None => Error::Network(format!("HTTP {}", status.as_u16())),
        },
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    parse_api_message(status, &body)
}
