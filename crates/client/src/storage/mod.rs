//! Key-value persistence for session state.
//!
//! [`KeyValueStore`] is the seam the session writes through: a string store
//! in the shape of browser local storage. [`TokenStore`] layers the token
//! pair record on top of it.
//!
//! Implementations:
//! - [`MemoryStore`] - in-process, for tests and throwaway sessions
//! - [`FileStore`] - one JSON file per key inside a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use creators_corner_core::TokenPair;
use thiserror::Error;

/// Key the token pair record is stored under.
pub const AUTH_STORAGE_KEY: &str = "directus_auth";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be (de)serialized.
    #[error("stored record is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    /// The key is not usable with this store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// The persisted token pair record.
///
/// Holds at most one pair: `save` overwrites, `clear` deletes.
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    /// Wrap a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Read the stored pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the record is not a token pair.
    pub fn load(&self) -> Result<Option<TokenPair>, StorageError> {
        self.store
            .get(AUTH_STORAGE_KEY)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Persist `pair`, replacing any stored pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, pair: &TokenPair) -> Result<(), StorageError> {
        let raw = serde_json::to_string(pair)?;
        self.store.set(AUTH_STORAGE_KEY, &raw)?;
        tracing::debug!(expires = pair.expires, "stored session tokens");
        Ok(())
    }

    /// Delete the stored pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(AUTH_STORAGE_KEY)?;
        tracing::debug!("cleared session tokens");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pair(token: &str) -> TokenPair {
        TokenPair {
            access_token: token.to_string(),
            expires: 1_700_000_000_000,
            refresh_token: Some("refresh".to_string()),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let tokens = TokenStore::new(MemoryStore::new());
        assert!(tokens.load().unwrap().is_none());

        tokens.save(&pair("first")).unwrap();
        tokens.save(&pair("second")).unwrap();
        assert_eq!(tokens.load().unwrap(), Some(pair("second")));

        tokens.clear().unwrap();
        assert!(tokens.load().unwrap().is_none());
        tokens.clear().unwrap();
    }

    #[test]
    fn test_record_format() {
        let tokens = TokenStore::new(MemoryStore::new());
        tokens.save(&pair("abc")).unwrap();

        let raw = tokens.inner().get(AUTH_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "access_token": "abc",
                "expires": 1_700_000_000_000_i64,
                "refresh_token": "refresh"
            })
        );
    }

    #[test]
    fn test_corrupt_record() {
        let tokens = TokenStore::new(MemoryStore::new());
        tokens.inner().set(AUTH_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(tokens.load(), Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_shared_store_through_arc() {
        let shared = Arc::new(MemoryStore::new());
        let tokens = TokenStore::new(Arc::clone(&shared));
        tokens.save(&pair("abc")).unwrap();
        assert!(shared.get(AUTH_STORAGE_KEY).unwrap().is_some());
    }
}
