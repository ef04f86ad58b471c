//! Keychain persistence for the per-profile session token.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

use bright_core::session::{Session, SessionToken, TokenStore};
use bright_core::{Error, Result};
#[cfg(not(test))]
use keyring::Entry;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "daily-bright";

#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    username: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            username: format!("session_token:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| Error::SecureStorage(error.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    #[cfg(not(test))]
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(SessionToken::new(raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let store = Self::test_store();
        let guard = store
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        guard
            .get(&self.username)
            .map(|raw| SessionToken::new(raw.clone()))
            .transpose()
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &SessionToken) -> Result<()> {
        self.entry()?
            .set_password(token.expose())
            .map_err(|error| Error::SecureStorage(error.to_string()))
    }

    #[cfg(test)]
    fn save_token(&self, token: &SessionToken) -> Result<()> {
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        guard.insert(self.username.clone(), token.expose().to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<()> {
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

/// Restore the session stored for `profile_name`.
pub fn restore_session(profile_name: &str) -> Result<Session> {
    Session::restore(KeyringTokenStore::new(profile_name))
}
