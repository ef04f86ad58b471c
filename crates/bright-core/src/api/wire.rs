//! Request and response bodies of the REST contract.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::EntryId;
use crate::util::compact_text;

#[derive(Debug, Serialize)]
pub(super) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SignInResponse {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FeedbackRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<&'a EntryId>,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeedbackResponse {
    pub feedback: String,
}

/// Human-readable message from an error body, falling back to the status code.
pub fn parse_api_message(status: StatusCode, body: &str) -> String {
    api_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Extract `{message}`-style text, a field error map, or the raw body.
pub(super) fn api_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = message_from_json(&value) {
            return Some(message);
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    for key in ["message", "detail", "error", "msg"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    // Field errors: {"title": ["This field is required."]}
    let field_errors = object
        .iter()
        .filter_map(|(field, errors)| {
            let joined = match errors {
                Value::String(text) => text.trim().to_string(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => return None,
            };
            if joined.is_empty() {
                None
            } else {
                Some(format!("{field}: {joined}"))
            }
        })
        .collect::<Vec<_>>();

    if field_errors.is_empty() {
        None
    } else {
        Some(field_errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_message_prefers_message_field() {
        let body = r#"{"message": "Invalid credentials."}"#;
        assert_eq!(
            parse_api_message(StatusCode::UNAUTHORIZED, body),
            "Invalid credentials."
        );
    }

    #[test]
    fn parse_api_message_joins_field_errors() {
        let body = r#"{"content": ["This field is required."], "title": ["Too long.", "Bad."]}"#;
        assert_eq!(
            parse_api_message(StatusCode::BAD_REQUEST, body),
            "content: This field is required.; title: Too long. Bad."
        );
    }

    #[test]
    fn parse_api_message_falls_back_to_status() {
        assert_eq!(
            parse_api_message(StatusCode::INTERNAL_SERVER_ERROR, "  "),
            "HTTP 500"
        );
        assert_eq!(
            parse_api_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn feedback_request_uses_camel_case_entry_id() {
        let id: EntryId = "5".parse().unwrap();
        let payload = serde_json::to_value(FeedbackRequest {
            entry_id: Some(&id),
            content: "text",
        })
        .unwrap();
        assert_eq!(payload["entryId"], "5");

        let payload = serde_json::to_value(FeedbackRequest {
            entry_id: None,
            content: "text",
        })
        .unwrap();
        assert!(payload.get("entryId").is_none());
    }
}
