//! # Derived Views
//!
//! Read-only projections of a cart that the presentation layer renders:
//! the cart panel rows, the header badge and the checkout summary.
//!
//! ## Where Each View Is Shown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listing page                    Checkout page          Every page     │
//! │  ────────────                    ─────────────          ──────────     │
//! │  CartLineView per row            CheckoutSummary        Badge          │
//! │  CartTotals (panel footer)       (subtotal, shipping,   (count, shown  │
//! │                                   total)                 when > 0)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;

// =============================================================================
// Cart Panel
// =============================================================================

/// One row of the cart panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    /// Zero-based position, passed back to `remove_at` by the row's button.
    pub position: usize,
    pub name: String,
    #[ts(type = "number")]
    pub quantity: i64,
    #[ts(type = "number")]
    pub line_total: Money,
}

impl CartLineView {
    /// Rows for every line in cart order.
    pub fn rows(cart: &Cart) -> Vec<CartLineView> {
        cart.items()
            .iter()
            .enumerate()
            .map(|(position, item)| CartLineView {
                position,
                name: item.name.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect()
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub lines: usize,
    /// Sum of quantities.
    #[ts(type = "number")]
    pub item_count: i64,
    /// Sum of line totals.
    #[ts(type = "number")]
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            lines: cart.len(),
            item_count: cart.item_count(),
            subtotal: cart.total(),
        }
    }
}

// =============================================================================
// Badge
// =============================================================================

/// The header badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Badge {
    #[ts(type = "number")]
    pub count: i64,
    /// Hidden when the cart is empty.
    pub visible: bool,
}

impl From<&Cart> for Badge {
    fn from(cart: &Cart) -> Self {
        let count = cart.item_count();
        Badge {
            count,
            visible: count > 0,
        }
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// Totals shown at the bottom of the checkout page.
///
/// ## Empty Cart
/// An empty cart shows zero for every figure, including shipping; the flat
/// shipping cost only applies once something is being shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSummary {
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub shipping: Money,
    #[ts(type = "number")]
    pub total: Money,
}

impl CheckoutSummary {
    /// Computes the summary for a cart with a flat shipping cost.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::{Cart, CheckoutSummary, Money, DEFAULT_SHIPPING_COST};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item("Kimia Seamless Sport Set", Money::from_units(185_000), 1).unwrap();
    ///
    /// let summary = CheckoutSummary::for_cart(&cart, DEFAULT_SHIPPING_COST);
    /// assert_eq!(summary.total.units(), 200_000);
    /// ```
    pub fn for_cart(cart: &Cart, shipping: Money) -> Self {
        if cart.is_empty() {
            return CheckoutSummary {
                subtotal: Money::zero(),
                shipping: Money::zero(),
                total: Money::zero(),
            };
        }

        let subtotal = cart.total();
        CheckoutSummary {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SHIPPING_COST;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("A", Money::from_units(10), 3).unwrap();
        cart.add_item("B", Money::from_units(5), 1).unwrap();
        cart
    }

    #[test]
    fn test_rows_follow_cart_order() {
        let rows = CartLineView::rows(&sample_cart());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[0].line_total.units(), 30);
        assert_eq!(rows[1].name, "B");
    }

    #[test]
    fn test_totals_and_badge() {
        let cart = sample_cart();
        let totals = CartTotals::from(&cart);
        assert_eq!(totals.lines, 2);
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.subtotal.units(), 35);

        assert_eq!(Badge::from(&cart), Badge { count: 4, visible: true });
        assert_eq!(Badge::from(&Cart::new()), Badge { count: 0, visible: false });
    }

    #[test]
    fn test_checkout_adds_shipping() {
        let summary = CheckoutSummary::for_cart(&sample_cart(), DEFAULT_SHIPPING_COST);
        assert_eq!(summary.subtotal.units(), 35);
        assert_eq!(summary.shipping.units(), 15_000);
        assert_eq!(summary.total.units(), 15_035);
    }

    #[test]
    fn test_checkout_empty_cart_is_all_zero() {
        let summary = CheckoutSummary::for_cart(&Cart::new(), DEFAULT_SHIPPING_COST);
        assert!(summary.subtotal.is_zero());
        assert!(summary.shipping.is_zero());
        assert!(summary.total.is_zero());
    }

    #[test]
    fn test_views_serialize_camel_case() {
        let json = serde_json::to_value(CartTotals::from(&sample_cart())).unwrap();
        assert_eq!(json["itemCount"], 4);
        assert_eq!(json["subtotal"], 35);
    }
}
