//! Key-Value store wrapper with automatic serialization.

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{FileStore, KvBackend, MemoryStore};
use crate::CacheError;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<B = MemoryStore> {
    backend: B,
}

impl Cache<MemoryStore> {
    /// Open an empty in-memory cache.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Cache<FileStore> {
    /// Open a file-backed cache rooted at `root`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir(".handyman")?;
    /// ```
    pub fn open_dir(root: impl Into<std::path::PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(root)?))
    }
}

impl<B: KvBackend> Cache<B> {
    /// Wrap an existing backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. Bytes that do not decode as
    /// `T` surface as [`CacheError::SerializeError`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartLineItem>> = cache.get("handyman-cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        tracing::trace!(key, bytes = bytes.len(), "cache set");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::memory();
        let entries = vec![Entry {
            id: "1".to_string(),
            quantity: 2,
        }];

        cache.set("entries", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("entries").unwrap();

        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::memory();
        let loaded: Option<Vec<Entry>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_bytes_are_an_error() {
        let store = MemoryStore::new();
        store.set("entries", b"{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Entry>>, _> = cache.get("entries");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_file_cache_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();

        cache.set("b", &1).unwrap();
        cache.set("a", &2).unwrap();
        assert!(cache.exists("a").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        cache.delete("a").unwrap();
        assert!(!cache.exists("a").unwrap());
    }
}
