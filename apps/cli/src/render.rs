//! # Text Rendering
//!
//! Pure string builders for every storefront view. Nothing here touches
//! storage or the terminal, so each view is tested as a plain `String`.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────┐
//! │ Cart panel                   │   │ Checkout                         │
//! │  Kimia Seamless (x2)         │   │  [outfit3.jpg] Kimia Seamless    │
//! │    $370.000  [0]             │   │    Qty: 2  $370.000              │
//! │  Total: 370.000              │   │  Subtotal: $370.000              │
//! │  Badge: 2                    │   │  Shipping: $15.000               │
//! └──────────────────────────────┘   │  Total: $385.000                 │
//!                                    └──────────────────────────────────┘
//! ```

use std::fmt::Write;

use tienda_core::{
    format_amount, Badge, CartLineView, Catalog, CheckoutSummary, GroupingPolicy, Money,
    Product,
};

pub const EMPTY_CART: &str = "Your cart is empty.";

/// Formats amounts for one locale and currency symbol.
#[derive(Debug, Clone)]
pub struct Renderer {
    policy: GroupingPolicy,
    symbol: String,
}

impl Renderer {
    pub fn new(policy: GroupingPolicy, symbol: impl Into<String>) -> Self {
        Renderer {
            policy,
            symbol: symbol.into(),
        }
    }

    /// Grouped digits, no symbol.
    pub fn amount(&self, amount: Money) -> String {
        format_amount(amount.units(), &self.policy)
    }

    /// Grouped digits with the currency symbol.
    pub fn price(&self, amount: Money) -> String {
        format!("{}{}", self.symbol, self.amount(amount))
    }

    /// The product listing.
    pub fn products(&self, products: &[&Product]) -> String {
        if products.is_empty() {
            return "No products match your search.\n".to_string();
        }

        let width = products
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for product in products {
            let _ = writeln!(out, "{:<width$}  {}", product.name, product.price_text);
        }
        out
    }

    /// The cart panel: one row per line, the total and the badge.
    pub fn cart_panel(&self, rows: &[CartLineView], total: Money, badge: Badge) -> String {
        let mut out = String::new();

        if rows.is_empty() {
            let _ = writeln!(out, "{}", EMPTY_CART);
            let _ = writeln!(out, "Total: 0");
            return out;
        }

        for row in rows {
            let _ = writeln!(
                out,
                "{} (x{})  {}  [{}]",
                row.name,
                row.quantity,
                self.price(row.line_total),
                row.position
            );
        }
        let _ = writeln!(out, "Total: {}", self.amount(total));
        out.push_str(&self.badge(badge));
        out
    }

    /// Checkout page: each line with its image, then the totals block.
    pub fn checkout(
        &self,
        rows: &[CartLineView],
        summary: &CheckoutSummary,
        catalog: &Catalog,
    ) -> String {
        let mut out = String::new();

        if rows.is_empty() {
            let _ = writeln!(out, "{}", EMPTY_CART);
        }

        for row in rows {
            let _ = writeln!(out, "[{}] {}", catalog.image_for(&row.name), row.name);
            let _ = writeln!(
                out,
                "    Qty: {}  {}",
                row.quantity,
                self.price(row.line_total)
            );
        }

        let _ = writeln!(out, "Subtotal: {}", self.price(summary.subtotal));
        let _ = writeln!(out, "Shipping: {}", self.price(summary.shipping));
        let _ = writeln!(out, "Total: {}", self.price(summary.total));
        out
    }

    /// The header badge; nothing when hidden.
    pub fn badge(&self, badge: Badge) -> String {
        if badge.visible {
            format!("Badge: {}\n", badge.count)
        } else {
            String::new()
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(GroupingPolicy::ES_CO, "$")
    }
}
