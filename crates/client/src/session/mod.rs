//! Client-local session state.
//!
//! The session is the only mutable state the client owns: a bearer token
//! and a snapshot of the signed-in user, kept in a [`SessionStore`] under
//! two fixed keys. Both are written together on login and removed
//! together on logout or when the backend answers 401, so from the
//! caller's point of view they are either both present or both absent.
//!
//! # Stores
//!
//! - [`MemoryStore`] - process-local, for tests and embedding
//! - [`FileStore`] - JSON file on disk, survives restarts (used by the CLI)

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::users::User;

/// Store key holding the raw bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Store key holding the JSON-encoded user snapshot.
pub const USER_KEY: &str = "user";

/// Errors raised by a [`SessionStore`] write.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored map could not be encoded.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent string key/value storage for session data.
///
/// Reads are infallible: a value that cannot be read is reported as
/// absent. Writes report failures so callers know the session was not
/// persisted.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&self, key: &str, value: String) -> Result<(), SessionError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted.
    fn remove(&self, key: &str) -> Result<(), SessionError>;

    /// Store several entries. Implementations should commit them in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry could not be persisted.
    fn set_many(&self, entries: Vec<(&str, String)>) -> Result<(), SessionError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several keys. Implementations should commit them in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if any removal could not be persisted.
    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Typed view of the token and user snapshot held in a [`SessionStore`].
///
/// Cloning is cheap; every clone shares the same store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap a shared store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The cached bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.store
            .get(TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    /// Whether a bearer token is cached.
    ///
    /// Only presence is checked; validity is the backend's call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The cached user snapshot.
    ///
    /// A snapshot that fails to parse is treated as no session.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring unparsable cached user snapshot");
                None
            }
        }
    }

    /// Whether the cached user snapshot carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user()
            .is_some_and(|user| user.role.is_admin())
    }

    /// Fail with [`ClientError::NotAuthenticated`] unless a token is cached.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if no token is cached.
    pub fn ensure_authenticated(&self) -> Result<(), ClientError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// The cached user, or [`ClientError::NotAuthenticated`].
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if no parsable snapshot is cached.
    pub fn require_user(&self) -> Result<User, ClientError> {
        self.current_user().ok_or(ClientError::NotAuthenticated)
    }

    /// Persist a token and user snapshot together after a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or the store write fails.
    pub fn store_login(&self, token: &str, user: &User) -> Result<(), ClientError> {
        let snapshot = serde_json::to_string(user).map_err(SessionError::from)?;
        self.store
            .set_many(vec![(TOKEN_KEY, token.to_owned()), (USER_KEY, snapshot)])?;
        debug!(user_id = %user.id, "Session stored");
        Ok(())
    }

    /// Replace the cached token, leaving the user snapshot untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn store_token(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, token.to_owned())?;
        debug!("Session token rotated");
        Ok(())
    }

    /// Remove both the token and the user snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove_many(&[TOKEN_KEY, USER_KEY])?;
        debug!("Session cleared");
        Ok(())
    }
}
