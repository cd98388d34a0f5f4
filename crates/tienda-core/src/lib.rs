//! # tienda-core: Pure Cart Logic for the Tienda Storefront
//!
//! This crate holds everything about the shopping cart that can be computed
//! without touching storage or a screen.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (apps/cli, browser widget)            │   │
//! │  │   Product cards ──► Cart list ──► Checkout summary ──► Badge    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove_at / clear               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tienda-store (CartStore + Storage)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │   cart   │ │ catalog  │ │ checkout (views) │  │   │
//! │  │   │  format  │ │ LineItem │ │ Product  │ │  Badge, Summary  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-unit `Money` type
//! - [`format`] - Locale grouping policies, `format_amount` / `parse_amount`
//! - [`types`] - `LineItem`, the stored record
//! - [`cart`] - `Cart` and its invariants
//! - [`catalog`] - Storefront products, search, product-card reader
//! - [`checkout`] - Derived views: totals, badge, checkout summary
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{Cart, Money};
//! use tienda_core::format::{format_amount, GroupingPolicy};
//!
//! let mut cart = Cart::new();
//! cart.add_item("A", Money::from_units(10), 2).unwrap();
//! cart.add_item("B", Money::from_units(5), 1).unwrap();
//! cart.add_item("A", Money::from_units(10), 1).unwrap();
//!
//! assert_eq!(cart.total().units(), 35);
//! assert_eq!(cart.item_count(), 4);
//! assert_eq!(format_amount(200_000, &GroupingPolicy::ES_CO), "200.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod format;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart};
pub use catalog::{CardSelection, Catalog, Product, ProductCard};
pub use checkout::{Badge, CartLineView, CartTotals, CheckoutSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_amount, parse_amount, GroupingPolicy};
pub use money::Money;
pub use types::LineItem;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the serialized cart lives.
///
/// Browser builds of the widget and every `Storage` backend use the same slot,
/// so a cart written by one surface is readable by the others.
pub const CART_STORAGE_KEY: &str = "cart";

/// Flat shipping cost added on the checkout page, in whole currency units.
pub const DEFAULT_SHIPPING_COST: Money = Money::from_units(15_000);

/// Image shown on the checkout page for products without a mapped picture.
pub const PLACEHOLDER_IMAGE: &str = "./recursos/imagenes/placeholder.jpg";

/// Maximum length of a product name read off a product card.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
