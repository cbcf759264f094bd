//! # Key-Value Store Trait
//!
//! The two operations the cart needs from durable storage, plus `remove`
//! for hosts that reset the cart.
//!
//! ## Contract
//! ```text
//! get(key)        → Ok(Some(blob)) | Ok(None) when absent | Err(fault)
//! set(key, blob)  → Ok(())         | Err(fault)
//! remove(key)     → Ok(())  (absent key is fine) | Err(fault)
//! ```
//!
//! A successful `set` must be visible to every later `get` on the same
//! store, including one made from a new process against the same medium.

use std::future::Future;

use crate::error::StorageResult;

/// Durable key-value storage.
///
/// Implemented by [`crate::SqliteStore`] and [`crate::MemoryStore`]. Any
/// persistence API with get/set semantics can back the cart.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = StorageResult<()>> + Send;

    /// Deletes `key`.
    fn remove(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send;
}
