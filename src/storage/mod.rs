//! Persistence module
//!
//! Durable key-value slots that hold the search history and the article
//! cache. Slots are read once at startup and rewritten in full on every
//! mutation.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// Slot holding the search history (JSON array of strings)
pub const HISTORY_KEY: &str = "searchHistory";

/// Slot holding the article cache (JSON object of topic -> articles)
pub const CACHE_KEY: &str = "articlesCache";

/// Errors raised by a key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize slot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to named string slots
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's content
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load a JSON slot, falling back to the default when absent or unparsable
pub fn load_slot<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding unparsable slot {}: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to read slot {}: {}", key, e);
            T::default()
        }
    }
}

/// Serialize a value and write it to a slot
pub fn save_slot<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_absent_slot_uses_default() {
        let store = MemoryStore::new();
        let value: Vec<String> = load_slot(&store, HISTORY_KEY);
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_garbage_slot_uses_default() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "{not json").unwrap();
        let value: HashMap<String, Vec<String>> = load_slot(&store, CACHE_KEY);
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_slot(&store, HISTORY_KEY, &vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(store.raw(HISTORY_KEY).as_deref(), Some(r#"["a","b"]"#));

        let value: Vec<String> = load_slot(&store, HISTORY_KEY);
        assert_eq!(value, vec!["a", "b"]);
    }
}
