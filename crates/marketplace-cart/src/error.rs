//! # Cart Error Type
//!
//! What cart consumers see.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind                      Variant              Recoverable?            │
//! │  ────                      ───────              ────────────            │
//! │  Storage fault             Storage              caller decides          │
//! │  Blob encode failure       Core                 no                      │
//! │  Bad configuration         Io / ConfigParse /   fix config              │
//! │                            ConfigWrite /                                │
//! │                            InvalidConfig                                │
//! │  Used outside provider     OutsideProvider      no (programming error)  │
//! │                            ProviderMismatch                             │
//! │                                                                         │
//! │  Unknown id on increment/decrement is a silent no-op, never an error.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use marketplace_core::CoreError;
use marketplace_db::StorageError;
use thiserror::Error;

/// Cart errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// Durable storage failed. In-memory state is unchanged.
    #[error("Cart storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be encoded.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Config file could not be read or written.
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `CartConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Config values are unusable.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    /// `use_cart` was called outside `CartProvider::scope`.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,

    /// The enclosing provider holds a cart over a different storage type.
    #[error("CartProvider holds a different cart type, expected {expected}")]
    ProviderMismatch { expected: &'static str },
}

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;
