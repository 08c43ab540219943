//! Session
//!
//! The session is the server-issued bearer token plus a cached copy of the signed-in
//! user. [`SessionStore`] is the only writer of both keys; everything else reads through
//! it.

use std::{fmt, sync::Arc};

use jam3a::users::User;
use thiserror::Error;
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::storage::{Storage, StorageError, StorageExt, StorageKey};

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session keys could not be read or written.
    #[error("session storage failed")]
    Storage(#[from] StorageError),

    /// The backend issued an empty token.
    #[error("session token cannot be empty")]
    EmptyToken,
}

/// Bearer token. Never printed, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
}

impl SessionToken {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionError> {
        let mut value = value.into();

        if value.trim().is_empty() {
            value.zeroize();
            return Err(SessionError::EmptyToken);
        }

        Ok(Self { value })
    }

    /// Raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Owner of the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Session kept in `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stored token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the token key cannot be read.
    pub fn token(&self) -> Result<Option<SessionToken>, SessionError> {
        let raw = self.storage.load::<String>(StorageKey::Token)?;

        Ok(raw.and_then(|raw| SessionToken::new(raw).ok()))
    }

    /// Cached profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the user key cannot be read.
    pub fn user(&self) -> Result<Option<User>, SessionError> {
        Ok(self.storage.load(StorageKey::User)?)
    }

    /// Whether a token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the token key cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.token()?.is_some())
    }

    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when either key cannot be written.
    pub fn save(&self, token: &SessionToken, user: &User) -> Result<(), SessionError> {
        self.storage.save(StorageKey::Token, token.expose())?;
        self.storage.save(StorageKey::User, user)?;

        info!(user = %user.id, "session stored");

        Ok(())
    }

    /// Refresh the cached profile without touching the token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the user key cannot be written.
    pub fn update_user(&self, user: &User) -> Result<(), SessionError> {
        self.storage.save(StorageKey::User, user)?;

        Ok(())
    }

    /// Drop the token and the cached user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when either key cannot be removed.
    pub fn purge(&self) -> Result<(), SessionError> {
        self.storage.remove(StorageKey::Token)?;
        self.storage.remove(StorageKey::User)?;

        debug!("session purged");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Noura".to_string(),
            email: "noura@example.com".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn token_debug_is_redacted() -> TestResult {
        let token = SessionToken::new("secret-token")?;

        assert_eq!(format!("{token:?}"), "SessionToken(**redacted**)");

        Ok(())
    }

    #[test]
    fn blank_tokens_are_rejected() {
        assert!(
            matches!(SessionToken::new("  "), Err(SessionError::EmptyToken)),
            "blank token should be rejected"
        );
    }

    #[test]
    fn save_then_purge() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());

        session.save(&SessionToken::new("t-1")?, &user())?;

        assert_eq!(session.token()?.map(|t| t.expose().to_string()).as_deref(), Some("t-1"));
        assert_eq!(session.user()?.map(|u| u.id), Some("u-1".to_string()));
        assert!(session.is_authenticated()?);

        session.purge()?;

        assert!(session.token()?.is_none());
        assert!(session.user()?.is_none());
        assert_eq!(storage.read(StorageKey::Token)?, None);

        Ok(())
    }

    #[test]
    fn stored_blank_token_reads_as_signed_out() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(StorageKey::Token, "\"\"")?;

        assert!(!SessionStore::new(storage).is_authenticated()?);

        Ok(())
    }
}
