//! Session context holding the bearer token attached to outgoing requests.
//!
//! The token is passed around explicitly as a [`Session`] instead of living in
//! ambient global state. Clones share the same token, so signing in through
//! one handle is visible to every store and client holding another.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque bearer credential returned by sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Session token must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token value, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SessionToken([REDACTED])")
    }
}

/// Persistence for the single session token of a profile.
pub trait TokenStore: Send + Sync {
    fn load_token(&self) -> Result<Option<SessionToken>>;
    fn save_token(&self, token: &SessionToken) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}

/// Process-local token store, used for tests and one-shot sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<SessionToken>>>,
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_token(&self, token: &SessionToken) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    current: Arc<RwLock<Option<SessionToken>>>,
}

impl Session {
    /// Load the persisted token once; it is not re-validated afterwards.
    pub fn restore(store: impl TokenStore + 'static) -> Result<Self> {
        let token = store.load_token()?;
        tracing::debug!(authenticated = token.is_some(), "Restored session");
        Ok(Self {
            store: Arc::new(store),
            current: Arc::new(RwLock::new(token)),
        })
    }

    /// A signed-out session backed by a [`MemoryTokenStore`].
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryTokenStore::default()),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Token presence only; expiry is for the server to judge.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The current token, or [`Error::AuthRequired`] when signed out.
    pub fn require_token(&self) -> Result<SessionToken> {
        self.token().ok_or(Error::AuthRequired)
    }

    pub fn set_token(&self, token: SessionToken) -> Result<()> {
        self.store.save_token(&token)?;
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.clear_token()?;
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
