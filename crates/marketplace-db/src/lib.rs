//! # marketplace-db: Durable Key-Value Storage
//!
//! The cart is mirrored to a key-value medium that outlives the process.
//! This crate defines that medium and ships two implementations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartStore::add_to_cart(item)                                          │
//! │       │                                                                 │
//! │       │ set("@GoMarketplace:products", "[{...}]")                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  marketplace-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │  SqliteStore  │    │ MemoryStore  │  │   │
//! │  │   │  (store.rs)   │◄───│  (pool.rs)    │    │ (memory.rs)  │  │   │
//! │  │   │               │◄───┼───────────────┼────│              │  │   │
//! │  │   │  get / set    │    │ SqlitePool    │    │ HashMap +    │  │   │
//! │  │   │  remove       │    │ kv_store tbl  │    │ fault inject │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/marketplace-cart/cart.db                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` trait
//! - [`pool`] - SQLite pool configuration and `SqliteStore`
//! - [`memory`] - `MemoryStore` for tests and ephemeral hosts
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marketplace_db::{DbConfig, KeyValueStore, SqliteStore};
//!
//! let store = SqliteStore::open(DbConfig::new("cart.db")).await?;
//! store.set("@GoMarketplace:products", "[]".to_string()).await?;
//! let blob = store.get("@GoMarketplace:products").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use pool::{DbConfig, SqliteStore};
pub use store::KeyValueStore;
