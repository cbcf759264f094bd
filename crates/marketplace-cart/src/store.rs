//! # Cart Store
//!
//! Owns the cart, serializes every mutation, and mirrors each committed
//! state to durable storage.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore::apply(mutation)                         │
//! │                                                                         │
//! │  1. writer.lock().await          ◄── one mutation in flight, others    │
//! │       │                              queue on the lock                  │
//! │       ▼                                                                 │
//! │  2. mutation.apply(&current)                                           │
//! │       │                                                                 │
//! │       ├── None ──► return Ok(false)   (no write, no notify)            │
//! │       ▼                                                                 │
//! │  3. storage.set(key, next.to_blob())                                   │
//! │       │                                                                 │
//! │       ├── Err ───► return Err          (memory untouched)              │
//! │       ▼                                                                 │
//! │  4. *current = next                                                    │
//! │  5. watch::send_replace(next)    ◄── readers and subscribers see it    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return Ok(true)                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held across the storage write, so every mutation computes
//! from the committed result of the one before it. Two rapid taps on "+"
//! always end two higher.
//!
//! ## Reads
//! Readers never touch the writer lock. [`CartStore::products`] returns the
//! last committed snapshot and [`CartStore::subscribe`] yields a receiver
//! that wakes on each commit.

use std::sync::Arc;

use marketplace_core::{CartMutation, CartState, LineItem};
use marketplace_db::KeyValueStore;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::CartConfig;
use crate::error::CartResult;

/// Shared handle to a cart store, as handed to UI code.
pub type CartHandle<S> = Arc<CartStore<S>>;

/// The cart, mirrored to a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    writer: Mutex<Arc<CartState>>,
    published: watch::Sender<Arc<CartState>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Hydrates the cart from storage.
    ///
    /// ## Behavior
    /// - No blob under the key: empty cart
    /// - Unreadable blob: empty cart, logged at WARN
    /// - Entries that are not line items (e.g. `null` price) or break an
    ///   invariant (quantity 0, repeated id): dropped one by one, logged at
    ///   WARN; the rest of the cart survives
    /// - Storage `get` fails: `Err(CartError::Storage)`
    ///
    /// Hydration never writes.
    pub async fn initialize(storage: S, config: &CartConfig) -> CartResult<Self> {
        let storage_key = config.storage_key.clone();
        debug!(key = %storage_key, "Hydrating cart");

        let state = match storage.get(&storage_key).await? {
            Some(blob) => hydrate(&storage_key, &blob),
            None => {
                debug!(key = %storage_key, "No persisted cart");
                CartState::new()
            }
        };

        info!(
            key = %storage_key,
            items = state.len(),
            quantity = state.total_quantity(),
            "Cart hydrated"
        );

        let state = Arc::new(state);
        let (published, _) = watch::channel(Arc::clone(&state));

        Ok(CartStore {
            storage,
            storage_key,
            writer: Mutex::new(state),
            published,
        })
    }

    /// Wraps the store in a shareable handle.
    pub fn into_handle(self) -> CartHandle<S> {
        Arc::new(self)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The last committed cart.
    pub fn products(&self) -> Arc<CartState> {
        Arc::clone(&self.published.borrow())
    }

    /// Receiver that is marked changed after every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartState>> {
        self.published.subscribe()
    }

    /// The storage key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Adds `item`, or bumps the quantity of the line with the same id.
    pub async fn add_to_cart(&self, item: LineItem) -> CartResult<()> {
        self.apply(CartMutation::AddToCart(item)).await.map(|_| ())
    }

    /// Increments `id`. Unknown ids are a no-op.
    pub async fn increment(&self, id: &str) -> CartResult<()> {
        self.apply(CartMutation::Increment(id.to_string()))
            .await
            .map(|_| ())
    }

    /// Decrements `id`, dropping the line at zero. Unknown ids are a no-op.
    pub async fn decrement(&self, id: &str) -> CartResult<()> {
        self.apply(CartMutation::Decrement(id.to_string()))
            .await
            .map(|_| ())
    }

    /// Empties the cart. Already empty is a no-op.
    pub async fn clear(&self) -> CartResult<()> {
        self.apply(CartMutation::Clear).await.map(|_| ())
    }

    /// Applies one mutation: compute, persist, commit.
    ///
    /// ## Returns
    /// - `Ok(true)` - state changed and was persisted
    /// - `Ok(false)` - mutation was a no-op, nothing written
    /// - `Err(_)` - persisting failed, in-memory state unchanged
    pub async fn apply(&self, mutation: CartMutation) -> CartResult<bool> {
        let mut current = self.writer.lock().await;

        let Some(next) = mutation.apply(&current) else {
            debug!(
                mutation = mutation.name(),
                id = ?mutation.target_id(),
                "Cart unchanged, nothing persisted"
            );
            return Ok(false);
        };

        let blob = next.to_blob()?;

        if let Err(err) = self.storage.set(&self.storage_key, blob).await {
            error!(
                mutation = mutation.name(),
                id = ?mutation.target_id(),
                error = %err,
                "Failed to persist cart"
            );
            return Err(err.into());
        }

        let next = Arc::new(next);
        *current = Arc::clone(&next);
        self.published.send_replace(Arc::clone(&next));

        debug!(
            mutation = mutation.name(),
            id = ?mutation.target_id(),
            items = next.len(),
            "Cart updated"
        );

        Ok(true)
    }
}

/// Decodes a persisted blob, falling back to an empty cart.
fn hydrate(key: &str, blob: &str) -> CartState {
    match CartState::from_blob(blob) {
        Ok((state, rejected)) => {
            for err in &rejected {
                warn!(key = %key, error = %err, "Dropped invalid persisted line item");
            }
            state
        }
        Err(err) => {
            warn!(key = %key, error = %err, "Persisted cart is unreadable, starting empty");
            CartState::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
