//! # marketplace-core: Pure Cart Logic
//!
//! This crate holds the shopping cart model for the marketplace app as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Marketplace Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI (product list, cart)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ use_cart()                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            marketplace-cart (CartStore, provider)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ marketplace-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────────┐  ┌───────────────┐          │   │
//! │  │   │   types   │  │     cart      │  │  validation   │          │   │
//! │  │   │ LineItem  │  │  CartState    │  │  sanitize     │          │   │
//! │  │   │           │  │  CartMutation │  │  persisted    │          │   │
//! │  │   └───────────┘  └───────────────┘  └───────────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              marketplace-db (durable key-value store)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `LineItem`
//! - [`cart`] - `CartState`, `CartMutation` and the JSON blob codec
//! - [`error`] - Domain error types
//! - [`validation`] - Invariant checks for persisted data
//!
//! ## Example Usage
//!
//! ```rust
//! use marketplace_core::{CartState, LineItem};
//!
//! let cart = CartState::new();
//! let cart = cart.with_added(LineItem::new("a", "Cap", "https://img/a.png", 19.9));
//! let cart = cart.with_incremented("a").unwrap();
//!
//! assert_eq!(cart.get("a").unwrap().quantity, 2);
//! assert!(cart.with_incremented("missing").is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartMutation, CartState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::LineItem;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the storefront app has always used for the cart blob.
///
/// Kept byte-for-byte so carts persisted by earlier app builds still load.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";
