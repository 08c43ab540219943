//! Local storage
//!
//! The storefront keeps a handful of JSON documents between runs: the session, the cart,
//! cached products and content, and the display language. Each lives under one
//! [`StorageKey`]; values are unversioned JSON and the last writer wins.

use std::{fmt, io};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Session token.
    Token,
    /// Signed-in user profile.
    User,
    /// Shopping cart.
    Cart,
    /// Cached content blocks.
    Content,
    /// Cached product list.
    Products,
    /// Display language.
    Language,
}

impl StorageKey {
    /// Every key.
    pub const ALL: [Self; 6] = [
        Self::Token,
        Self::User,
        Self::Cart,
        Self::Content,
        Self::Products,
        Self::Language,
    ];

    /// Key name on disk.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "jam3a_token",
            Self::User => "jam3a_user",
            Self::Cart => "jam3a_cart",
            Self::Content => "jam3a_content",
            Self::Products => "jam3a_products",
            Self::Language => "jam3a_language",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("failed to access {key}")]
    Io {
        /// Key being accessed.
        key: StorageKey,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The stored value is not the expected JSON.
    #[error("invalid JSON stored under {key}")]
    Json {
        /// Key being accessed.
        key: StorageKey,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Another thread panicked while holding the store.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Raw string key/value store.
pub trait Storage: fmt::Debug + Send + Sync {
    /// Stored value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the backing store cannot be read.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the backing store cannot be written.
    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the backing store cannot be written.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

/// Typed JSON access on top of [`Storage`].
pub trait StorageExt {
    /// Decode the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] when the stored value does not decode as `T`.
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError>;

    /// Encode `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] when `value` cannot be encoded.
    fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> StorageExt for S {
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        self.read(key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|source| StorageError::Json { key, source })
    }

    fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|source| StorageError::Json { key, source })?;

        self.write(key, &raw)
    }
}
