//! # Domain Types
//!
//! The stored cart record.
//!
//! ## Storage Schema
//! The cart is persisted as a JSON array of line items under the `"cart"`
//! key. There is no version field; every reader must accept exactly this shape:
//!
//! ```json
//! [
//!   { "name": "Kimia Seamless Sport Set", "price": 200000, "quantity": 2 },
//!   { "name": "Sun Orange Seamless Sport Set", "price": 185000, "quantity": 1 }
//! ]
//! ```
//!
//! A line item's `name` is its key: the cart never holds two lines with the
//! same name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Invariants (enforced by `Cart`)
/// - `name` is non-empty and unique within the cart
/// - `price` is non-negative and frozen at the first add
/// - `quantity` is at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product name, the line's key.
    pub name: String,

    /// Unit price in whole currency units.
    #[ts(type = "number")]
    pub price: Money,

    /// How many units of the product are in the cart.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item without validating it.
    ///
    /// `Cart::add_item` is the validated entry point; this constructor exists
    /// for building fixtures and rehydrated payloads.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        LineItem {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
