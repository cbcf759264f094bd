//! # marketplace-cart: Cart State for the Storefront
//!
//! The cart the storefront UI reads and mutates: an ordered list of line
//! items, hydrated once from durable storage and written back in full after
//! every change.
//!
//! ## Module Organization
//! ```text
//! marketplace_cart/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── CartStore: hydrate, mutate, persist, publish
//! ├── provider.rs     ◄─── CartProvider scope and use_cart()
//! ├── config.rs       ◄─── CartConfig (TOML + env)
//! └── error.rs        ◄─── CartError
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_cart::{use_cart, CartConfig, CartProvider, CartStore};
//! use marketplace_core::LineItem;
//! use marketplace_db::MemoryStore;
//!
//! # async fn run() -> marketplace_cart::CartResult<()> {
//! let cart = CartStore::initialize(MemoryStore::new(), &CartConfig::default())
//!     .await?
//!     .into_handle();
//!
//! CartProvider::scope(cart, async {
//!     let cart = use_cart::<MemoryStore>();
//!     cart.add_to_cart(LineItem::new("1", "Cap", "https://img/1.png", 19.9)).await?;
//!     cart.increment("1").await?;
//!     assert_eq!(cart.products().get("1").unwrap().quantity, 2);
//!     Ok::<(), marketplace_cart::CartError>(())
//! })
//! .await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod store;

pub use config::CartConfig;
pub use error::{CartError, CartResult};
pub use provider::{try_use_cart, use_cart, CartProvider};
pub use store::{CartHandle, CartStore};
