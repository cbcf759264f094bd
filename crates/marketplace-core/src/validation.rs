//! # Validation Module
//!
//! Invariant checks for line items entering the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Items Enter the Cart                         │
//! │                                                                         │
//! │  Path 1: add_to_cart (from the UI)                                     │
//! │  ├── Operation is total: never rejects                                 │
//! │  └── normalize_new_item() repairs quantity 0 and non-finite price      │
//! │           │                                                             │
//! │  Path 2: hydration (from durable storage)                              │
//! │  ├── Blob may be written by an older or buggy build                    │
//! │  ├── from_blob() drops entries that are not line items                 │
//! │  └── sanitize() drops entries breaking an invariant; both reported     │
//! │                                                                         │
//! │  Either way the in-memory cart always holds:                           │
//! │  • unique ids                                                          │
//! │  • quantity > 0                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use marketplace_core::validation::sanitize;
//! use marketplace_core::LineItem;
//!
//! let items = vec![
//!     LineItem::new("a", "Cap", "https://img/a.png", 10.0),
//!     LineItem::new("a", "Cap", "https://img/a.png", 10.0),
//! ];
//! let (cart, rejected) = sanitize(items);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(rejected.len(), 1);
//! ```

use std::collections::HashSet;

use crate::cart::CartState;
use crate::error::ValidationError;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Item Validators
// =============================================================================

/// Validates that a line item has a positive quantity.
///
/// ## Example
/// ```rust
/// use marketplace_core::validation::validate_quantity;
/// use marketplace_core::LineItem;
///
/// let item = LineItem::new("a", "Cap", "https://img/a.png", 10.0);
/// assert!(validate_quantity(&item).is_ok());
/// assert!(validate_quantity(&item.with_quantity(0)).is_err());
/// ```
pub fn validate_quantity(item: &LineItem) -> ValidationResult<()> {
    if item.quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
            id: item.id.clone(),
        });
    }
    Ok(())
}

/// Repairs a brand-new item so it can enter the cart.
///
/// ## Rules
/// - Quantity 0 becomes 1
/// - NaN or infinite price becomes 0.0 (JSON would write it as `null`,
///   which could never be read back)
pub fn normalize_new_item(mut item: LineItem) -> LineItem {
    if item.quantity == 0 {
        item.quantity = 1;
    }
    if !item.price.is_finite() {
        item.price = 0.0;
    }
    item
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Builds a cart from persisted items, dropping entries that break an
/// invariant.
///
/// ## Rules
/// - Quantity 0: dropped
/// - Repeated id: first occurrence wins, later ones dropped
///
/// Order of the surviving items is preserved. Each dropped entry yields one
/// [`ValidationError`] in the returned list. [`CartState::from_blob`] appends
/// these after its own [`ValidationError::Malformed`] entries for blob
/// elements that never decoded, so callers see every lost line in one list.
/// Dropping rather than failing keeps the rest of a saved cart usable when
/// one line is bad.
pub fn sanitize(items: Vec<LineItem>) -> (CartState, Vec<ValidationError>) {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for item in items {
        if let Err(err) = validate_quantity(&item) {
            rejected.push(err);
            continue;
        }

        if !seen.insert(item.id.clone()) {
            rejected.push(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id,
            });
            continue;
        }

        kept.push(item);
    }

    (CartState::from_checked(kept), rejected)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: u32) -> LineItem {
        LineItem::new(id, "Product", "https://img/p.png", 5.0).with_quantity(quantity)
    }

    #[test]
    fn test_normalize_new_item() {
        let fixed = normalize_new_item(item("a", 0));
        assert_eq!(fixed.quantity, 1);

        let mut nan = item("b", 2);
        nan.price = f64::NAN;
        let fixed = normalize_new_item(nan);
        assert_eq!(fixed.price, 0.0);
        assert_eq!(fixed.quantity, 2);
    }

    #[test]
    fn test_sanitize_clean_input() {
        let (cart, rejected) = sanitize(vec![item("a", 1), item("b", 3)]);
        assert_eq!(cart.len(), 2);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_sanitize_drops_zero_quantity() {
        let (cart, rejected) = sanitize(vec![item("a", 0), item("b", 1)]);

        assert_eq!(cart.ids().collect::<Vec<_>>(), vec!["b"]);
        assert!(matches!(
            rejected.as_slice(),
            [ValidationError::MustBePositive { .. }]
        ));
    }

    #[test]
    fn test_sanitize_first_duplicate_wins() {
        let (cart, rejected) = sanitize(vec![item("a", 2), item("b", 1), item("a", 9)]);

        assert_eq!(cart.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(cart.get("a").unwrap().quantity, 2);
        assert_eq!(
            rejected,
            vec![ValidationError::Duplicate {
                field: "id".to_string(),
                value: "a".to_string(),
            }]
        );
    }
}
