//! Client configuration shared by front ends.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// API origin used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Where entries live and how to reach them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Keep entries in the local database instead of the API
    #[serde(default)]
    pub offline: bool,
}

impl ClientConfig {
    /// The normalized API origin, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn resolved_api_base_url(&self) -> Result<String> {
        normalize_text_option(self.api_base_url.clone()).map_or_else(
            || Ok(DEFAULT_API_BASE_URL.to_string()),
            |url| normalize_api_base_url(&url),
        )
    }
}

/// Normalize an API origin: require a scheme, drop trailing `/` and `/api`.
pub fn normalize_api_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration(
            "API URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(
            "API URL must include http:// or https://".to_string(),
        ));
    }

    let without_api = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    Ok(without_api.trim_end_matches('/').to_string())
}
