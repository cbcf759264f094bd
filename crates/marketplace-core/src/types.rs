//! # Domain Types
//!
//! ## LineItem
//! ```text
//! ┌─────────────────────────────┐
//! │         LineItem            │
//! │  ─────────────────────────  │
//! │  id         (unique key)    │
//! │  title      (display)       │
//! │  image_url  (display)       │
//! │  price      (display)       │
//! │  quantity   (> 0)           │
//! └─────────────────────────────┘
//! ```
//!
//! Field names are the JSON names of the persisted blob; do not rename.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// `price` is carried for display only. The cart never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: String,

    /// Product title shown in the cart list.
    pub title: String,

    /// Product image shown in the cart list.
    pub image_url: String,

    /// Unit price as shown by the storefront.
    pub price: f64,

    /// Number of units in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item with a quantity of one.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        LineItem {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity: 1,
        }
    }

    /// Sets the quantity (builder style).
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_one() {
        let item = LineItem::new("a", "Cap", "https://img/a.png", 19.9);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.with_quantity(4).quantity, 4);
    }

    #[test]
    fn test_json_field_names() {
        let item = LineItem::new("a", "Cap", "https://img/a.png", 19.5);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["title"], "Cap");
        assert_eq!(json["image_url"], "https://img/a.png");
        assert_eq!(json["price"], 19.5);
        assert_eq!(json["quantity"], 1);
    }
}
