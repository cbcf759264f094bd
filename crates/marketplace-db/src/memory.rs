//! # In-Memory Key-Value Store
//!
//! A process-local `KeyValueStore` for tests and ephemeral hosts.
//!
//! Clones share the same map, so a test can hand one clone to the cart
//! and keep another to inspect what was written. Reads and writes can be
//! made to fail on demand to exercise storage-fault paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::KeyValueStore;

#[derive(Debug, Default)]
struct Inner {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// Key-value store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());

        MemoryStore {
            inner: Arc::new(Inner {
                entries: RwLock::new(entries),
                ..Inner::default()
            }),
        }
    }

    /// Number of successful `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Makes every following `get` fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every following `set`/`remove` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Reads a value without going through fault injection.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.entries.read().await.get(key).cloned()
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write refused".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("read refused".to_string()));
        }

        debug!(key = %key, "memory get");
        Ok(self.inner.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.check_writable()?;

        debug!(key = %key, bytes = value.len(), "memory set");
        self.inner
            .entries
            .write()
            .await
            .insert(key.to_string(), value);
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;

        debug!(key = %key, "memory remove");
        self.inner.entries.write().await.remove(key);
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::with_entry("k", "v");
        let other = store.clone();

        other.set("k", "w".to_string()).await.unwrap();
        assert_eq!(store.peek("k").await.as_deref(), Some("w"));
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let store = MemoryStore::with_entry("k", "v");

        store.fail_writes(true);
        assert!(store.set("k", "w".to_string()).await.is_err());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.peek("k").await.as_deref(), Some("v"));

        store.fail_reads(true);
        assert!(matches!(
            store.get("k").await,
            Err(StorageError::Unavailable(_))
        ));

        store.fail_reads(false);
        store.fail_writes(false);
        store.set("k", "w".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("w"));
    }
}
