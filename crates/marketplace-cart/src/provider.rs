//! # Cart Provider
//!
//! Makes a cart reachable from anywhere inside a bounded scope without
//! threading the handle through every call.
//!
//! ## Scope Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartProvider::scope(handle, async {                                   │
//! │      ┌─────────────────────────────────────────────────────────────┐   │
//! │      │  product_list().await   ──► use_cart() ──► CartHandle  ✓    │   │
//! │      │  cart_screen().await    ──► use_cart() ──► CartHandle  ✓    │   │
//! │      └─────────────────────────────────────────────────────────────┘   │
//! │  }).await                                                              │
//! │                                                                         │
//! │  use_cart() out here ──► panic: "use_cart must be used within a        │
//! │                                  CartProvider"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scope is task-local: it follows the future passed to `scope`, not
//! tasks spawned from inside it. Code that spawns should pass the handle
//! explicitly.

use std::any::{type_name, Any};
use std::future::Future;
use std::sync::Arc;

use marketplace_db::KeyValueStore;

use crate::error::{CartError, CartResult};
use crate::store::CartHandle;

tokio::task_local! {
    static CURRENT_CART: Arc<dyn Any + Send + Sync>;
}

/// Establishes the scope inside which [`use_cart`] works.
pub struct CartProvider;

impl CartProvider {
    /// Runs `f` with `handle` as the current cart.
    ///
    /// Scopes nest; the innermost provider wins.
    pub async fn scope<S, F>(handle: CartHandle<S>, f: F) -> F::Output
    where
        S: KeyValueStore,
        F: Future,
    {
        CURRENT_CART.scope(erase(handle), f).await
    }

    /// Synchronous variant of [`CartProvider::scope`].
    pub fn sync_scope<S, F, R>(handle: CartHandle<S>, f: F) -> R
    where
        S: KeyValueStore,
        F: FnOnce() -> R,
    {
        CURRENT_CART.sync_scope(erase(handle), f)
    }
}

fn erase<S: KeyValueStore>(handle: CartHandle<S>) -> Arc<dyn Any + Send + Sync> {
    Arc::new(handle)
}

/// Returns the current cart.
///
/// # Panics
/// Outside [`CartProvider::scope`], or when the provider holds a cart over
/// a different storage type. Both are programming errors.
pub fn use_cart<S: KeyValueStore>() -> CartHandle<S> {
    match try_use_cart() {
        Ok(handle) => handle,
        Err(err) => panic!("{}", err),
    }
}

/// Returns the current cart, or an error outside a provider.
pub fn try_use_cart<S: KeyValueStore>() -> CartResult<CartHandle<S>> {
    let found = CURRENT_CART
        .try_with(|current| current.downcast_ref::<CartHandle<S>>().cloned())
        .map_err(|_| CartError::OutsideProvider)?;

    found.ok_or(CartError::ProviderMismatch {
        expected: type_name::<CartHandle<S>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_core::LineItem;
    use marketplace_db::{MemoryStore, SqliteStore};

    use crate::config::CartConfig;
    use crate::store::CartStore;

    async fn handle() -> CartHandle<MemoryStore> {
        CartStore::initialize(MemoryStore::new(), &CartConfig::default())
            .await
            .unwrap()
            .into_handle()
    }

    #[tokio::test]
    async fn test_use_cart_inside_scope() {
        let handle = handle().await;

        CartProvider::scope(Arc::clone(&handle), async {
            let cart = use_cart::<MemoryStore>();
            cart.add_to_cart(LineItem::new("a", "A", "u", 1.0))
                .await
                .unwrap();
        })
        .await;

        assert_eq!(handle.products().len(), 1);
    }

    #[tokio::test]
    async fn test_try_use_cart_outside_scope() {
        assert!(matches!(
            try_use_cart::<MemoryStore>(),
            Err(CartError::OutsideProvider)
        ));
    }

    #[test]
    #[should_panic(expected = "use_cart must be used within a CartProvider")]
    fn test_use_cart_outside_scope_panics() {
        let _ = use_cart::<MemoryStore>();
    }

    #[tokio::test]
    async fn test_wrong_storage_type_is_mismatch() {
        let handle = handle().await;

        CartProvider::scope(handle, async {
            assert!(matches!(
                try_use_cart::<SqliteStore>(),
                Err(CartError::ProviderMismatch { .. })
            ));
        })
        .await;
    }

    #[tokio::test]
    async fn test_inner_scope_wins() {
        let outer = handle().await;
        let inner = handle().await;

        CartProvider::scope(Arc::clone(&outer), async {
            CartProvider::scope(Arc::clone(&inner), async {
                assert!(Arc::ptr_eq(&use_cart::<MemoryStore>(), &inner));
            })
            .await;
            assert!(Arc::ptr_eq(&use_cart::<MemoryStore>(), &outer));
        })
        .await;
    }

    #[tokio::test]
    async fn test_sync_scope() {
        let handle = handle().await;

        let len = CartProvider::sync_scope(Arc::clone(&handle), || {
            use_cart::<MemoryStore>().products().len()
        });

        assert_eq!(len, 0);
    }
}
