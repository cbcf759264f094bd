//! # Cart State
//!
//! The ordered, id-keyed collection of line items and its transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Mutation                 Item present?        Next state               │
//! │  ────────                 ─────────────        ──────────               │
//! │                                                                         │
//! │  AddToCart(item) ───────► yes ───────────────► items[i].qty += 1       │
//! │                  └──────► no  ───────────────► items.push(item)        │
//! │                                                                         │
//! │  Increment(id) ─────────► yes ───────────────► items[i].qty += 1       │
//! │                └────────► no  ───────────────► None (no-op)            │
//! │                                                                         │
//! │  Decrement(id) ─────────► yes ───────────────► items[i].qty -= 1,      │
//! │                │                               drop qty == 0           │
//! │                └────────► no  ───────────────► None (no-op)            │
//! │                                                                         │
//! │  Clear ─────────────────► non-empty ─────────► []                      │
//! │        └────────────────► empty ─────────────► None (no-op)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions never mutate in place. They return the next state so the
//! caller can persist it before committing.

use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::types::LineItem;
use crate::validation;

// =============================================================================
// Cart State
// =============================================================================

/// The cart: line items in insertion order, unique by `id`.
///
/// ## Invariants
/// - At most one item per `id`
/// - Every `quantity` is > 0
///
/// Serializes as a bare JSON array, which is the persisted blob format.
/// Blobs are read back only through [`CartState::from_blob`], which checks
/// the invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Wraps items that are already known to hold the invariants.
    pub(crate) fn from_checked(items: Vec<LineItem>) -> Self {
        CartState { items }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterates line items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Ids in cart order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.id.as_str())
    }

    /// Looks up a line item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (badge count in the header).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Adds an item, or bumps the existing line by one.
    ///
    /// ## Behavior
    /// - Id already in cart: quantity += 1, every other field of the
    ///   existing line is kept and the incoming fields are ignored
    /// - Id not in cart: appended at the end with its own quantity
    ///
    /// Total for any input, so this always yields a new state.
    pub fn with_added(&self, item: LineItem) -> CartState {
        if self.contains(&item.id) {
            return self.bumped(&item.id, |q| q.saturating_add(1));
        }

        let mut items = self.items.clone();
        items.push(validation::normalize_new_item(item));
        CartState { items }
    }

    /// Increments the quantity of `id`, or `None` if it is not in the cart.
    pub fn with_incremented(&self, id: &str) -> Option<CartState> {
        if !self.contains(id) {
            return None;
        }
        Some(self.bumped(id, |q| q.saturating_add(1)))
    }

    /// Decrements the quantity of `id`, or `None` if it is not in the cart.
    ///
    /// Any line left at zero is dropped from the result.
    pub fn with_decremented(&self, id: &str) -> Option<CartState> {
        if !self.contains(id) {
            return None;
        }

        let mut next = self.bumped(id, |q| q.saturating_sub(1));
        next.items.retain(|i| i.quantity > 0);
        Some(next)
    }

    /// Empties the cart, or `None` if it is already empty.
    pub fn cleared(&self) -> Option<CartState> {
        if self.is_empty() {
            return None;
        }
        Some(CartState::new())
    }

    fn bumped(&self, id: &str, f: impl Fn(u32) -> u32) -> CartState {
        let items = self
            .items
            .iter()
            .map(|i| {
                let mut item = i.clone();
                if item.id == id {
                    item.quantity = f(item.quantity);
                }
                item
            })
            .collect();
        CartState { items }
    }

    // -------------------------------------------------------------------------
    // Blob Codec
    // -------------------------------------------------------------------------

    /// Encodes the cart as the persisted JSON array.
    pub fn to_blob(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a persisted JSON array.
    ///
    /// Entries are decoded one at a time, so a single bad entry (say a
    /// `null` price) costs that line only.
    ///
    /// ## Returns
    /// - `Ok((state, rejected))` - entries that did not decode or broke an
    ///   invariant are left out of `state` and reported in `rejected`
    /// - `Err(CoreError::Codec)` - the blob is not a JSON array
    pub fn from_blob(blob: &str) -> CoreResult<(CartState, Vec<ValidationError>)> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(blob)?;

        let mut items = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<LineItem>(entry) {
                Ok(item) => items.push(item),
                Err(err) => rejected.push(ValidationError::Malformed {
                    index,
                    reason: err.to_string(),
                }),
            }
        }

        let (state, dropped) = validation::sanitize(items);
        rejected.extend(dropped);
        Ok((state, rejected))
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Cart Mutation
// =============================================================================

/// A single cart mutation, as issued by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum CartMutation {
    AddToCart(LineItem),
    Increment(String),
    Decrement(String),
    Clear,
}

impl CartMutation {
    /// Computes the next state, or `None` when the mutation is a no-op.
    pub fn apply(&self, state: &CartState) -> Option<CartState> {
        match self {
            CartMutation::AddToCart(item) => Some(state.with_added(item.clone())),
            CartMutation::Increment(id) => state.with_incremented(id),
            CartMutation::Decrement(id) => state.with_decremented(id),
            CartMutation::Clear => state.cleared(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartMutation::AddToCart(_) => "add_to_cart",
            CartMutation::Increment(_) => "increment",
            CartMutation::Decrement(_) => "decrement",
            CartMutation::Clear => "clear",
        }
    }

    /// The line item id this mutation targets, if any.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            CartMutation::AddToCart(item) => Some(&item.id),
            CartMutation::Increment(id) | CartMutation::Decrement(id) => Some(id),
            CartMutation::Clear => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
