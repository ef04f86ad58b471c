//! In-process stand-in for the Daily Bright API used by unit tests.
//!
//! Behaves like the real service for the endpoints the client calls and
//! records every request so tests can assert on headers, or on a request
//! never having been made.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::SessionToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    id: i64,
    owner: String,
    title: String,
    content: String,
    date_created: DateTime<Utc>,
    feedback: Option<String>,
}

impl StoredEntry {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "content": self.content,
            "date_created": self.date_created,
            "feedback": self.feedback,
        })
    }
}

#[derive(Debug, Default)]
struct FakeState {
    users: HashMap<String, String>,
    tokens: HashMap<String, String>,
    entries: Vec<StoredEntry>,
    next_entry_id: i64,
    issued_tokens: usize,
    fail_feedback: bool,
    fail_list: bool,
    requests: Vec<RecordedRequest>,
}

impl FakeState {
    fn issue_token(&mut self, email: &str) -> String {
        self.issued_tokens += 1;
        let token = format!("t{}", self.issued_tokens);
        self.tokens.insert(token.clone(), email.to_string());
        token
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<String> {
        let header = headers.get("authorization")?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        self.tokens.get(token).cloned()
    }
}

#[derive(Clone)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
    base_url: String,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            next_entry_id: 1,
            ..FakeState::default()
        }));

        let router = Router::new()
            .route("/api/auth/signin", post(sign_in))
            .route("/api/auth/signup", post(sign_up))
            .route("/api/entries", post(create_entry).get(list_entries))
            .route("/api/entries/{id}", delete(delete_entry))
            .route("/api/feedback", post(feedback))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let address = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            state,
            base_url: format!("http://{address}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn register(&self, email: &str, password: &str) {
        self.lock()
            .users
            .insert(email.to_string(), password.to_string());
    }

    /// Register `email` and hand back a token the server accepts.
    pub fn signed_in_token(&self, email: &str) -> SessionToken {
        let mut state = self.lock();
        state.users.insert(email.to_string(), "password".to_string());
        let token = state.issue_token(email);
        SessionToken::new(token).expect("non-empty token")
    }

    pub fn fail_feedback(&self) {
        self.lock().fail_feedback = true;
    }

    /// Make `GET /api/entries` answer 502 until [`FakeApi::restore_list`].
    pub fn fail_list(&self) {
        self.lock().fail_list = true;
    }

    pub fn restore_list(&self) {
        self.lock().fail_list = false;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn mutating_requests(&self) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method != "GET")
            .count()
    }

    pub fn stored_feedback(&self, id: &str) -> Option<String> {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.id.to_string() == id)
            .and_then(|entry| entry.feedback.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type SharedState = Arc<Mutex<FakeState>>;

fn lock(state: &SharedState) -> std::sync::MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn record(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
    };
    lock(&state).requests.push(recorded);
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct Credentials {
    email: Option<String>,
    password: Option<String>,
}

async fn sign_in(State(state): State<SharedState>, Json(body): Json<Credentials>) -> Response {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email and password are required."})),
        )
            .into_response();
    };

    let mut state = lock(&state);
    if state.users.get(&email) != Some(&password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials."})),
        )
            .into_response();
    }

    let token = state.issue_token(&email);
    Json(json!({"token": token, "refresh": "refresh-token"})).into_response()
}

async fn sign_up(State(state): State<SharedState>, Json(body): Json<Credentials>) -> Response {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"email": ["This field is required."]})),
        )
            .into_response();
    };

    let mut state = lock(&state);
    if state.users.contains_key(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "User with this email already exists."})),
        )
            .into_response();
    }
    state.users.insert(email, password);
    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully."})),
    )
        .into_response()
}

async fn list_entries(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = lock(&state);
    let Some(owner) = state.user_for(&headers) else {
        return unauthorized();
    };
    if state.fail_list {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({"message": "Entries unavailable."})),
        )
            .into_response();
    }

    // Newest first, like the real service
    let mut owned = state
        .entries
        .iter()
        .filter(|entry| entry.owner == owner)
        .collect::<Vec<_>>();
    owned.sort_by(|a, b| b.date_created.cmp(&a.date_created).then(b.id.cmp(&a.id)));
    Json(owned.iter().map(|entry| entry.to_json()).collect::<Vec<_>>()).into_response()
}

async fn create_entry(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = lock(&state);
    let Some(owner) = state.user_for(&headers) else {
        return unauthorized();
    };

    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    };
    let mut missing = serde_json::Map::new();
    let title = field("title");
    let content = field("content");
    if title.is_none() {
        missing.insert("title".into(), json!(["This field may not be blank."]));
    }
    if content.is_none() {
        missing.insert("content".into(), json!(["This field may not be blank."]));
    }
    let (Some(title), Some(content)) = (title, content) else {
        return (StatusCode::BAD_REQUEST, Json(Value::Object(missing))).into_response();
    };

    let entry = StoredEntry {
        id: state.next_entry_id,
        owner,
        title,
        content,
        date_created: Utc::now(),
        feedback: field("feedback"),
    };
    state.next_entry_id += 1;
    let payload = entry.to_json();
    state.entries.push(entry);
    (StatusCode::CREATED, Json(payload)).into_response()
}

async fn delete_entry(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = lock(&state);
    let Some(owner) = state.user_for(&headers) else {
        return unauthorized();
    };

    let position = state
        .entries
        .iter()
        .position(|entry| entry.owner == owner && entry.id.to_string() == id);
    match position {
        Some(index) => {
            state.entries.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn feedback(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = lock(&state);
    if state.fail_feedback {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Feedback service unavailable."})),
        )
            .into_response();
    }

    let Some(content) = body
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.trim().is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Content is required."})),
        )
            .into_response();
    };

    let text = format!(
        "Thanks for {} words of reflection.",
        content.split_whitespace().count()
    );

    let entry_id = body.get("entryId").and_then(|id| match id {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    });
    if let (Some(entry_id), Some(owner)) = (entry_id, state.user_for(&headers)) {
        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|entry| entry.owner == owner && entry.id.to_string() == entry_id)
        {
            entry.feedback = Some(text.clone());
        }
    }

    Json(json!({"feedback": text})).into_response()
}
