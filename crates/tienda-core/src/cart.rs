//! # Cart
//!
//! The ordered collection of line items and the rules that keep it valid.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Cart Method              State Change          │
//! │  ─────────               ───────────              ────────────          │
//! │                                                                         │
//! │  "Add to cart" ────────► add_item() ─────┬──────► items[i].qty += q     │
//! │                                          └──────► items.push(item)      │
//! │                                                                         │
//! │  "Delete" (row i) ─────► remove_at(i) ──────────► items.remove(i)       │
//! │                                                                         │
//! │  "Clear cart" ─────────► clear() ───────────────► items.clear()         │
//! │                                                                         │
//! │  Cart panel / badge ───► total(), item_count() ─► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart does no I/O. Persisting after a mutation is the job of
//! `tienda_store::CartStore`.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::validation::{
    validate_line_name, validate_position, validate_price, validate_quantity,
};

/// What `add_item` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended at `position`.
    Appended { position: usize },

    /// An existing line at `position` grew to `quantity`.
    Merged { position: usize, quantity: i64 },
}

impl AddOutcome {
    /// Position of the line that was touched.
    pub fn position(&self) -> usize {
        match *self {
            AddOutcome::Appended { position } | AddOutcome::Merged { position, .. } => position,
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines keep insertion order
/// - At most one line per distinct name (adding the same name merges)
/// - Every quantity is >= 1 (removal deletes the line)
/// - Every price is >= 0
///
/// Serializes as the JSON array stored under `"cart"`. Deserializing goes
/// through `Cart::from_items`, so a decoded cart upholds the same invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from rehydrated lines, checking the cart invariants.
    ///
    /// Input policies such as the non-empty name rule are not re-applied;
    /// any line a previous session stored is kept if the cart stays valid.
    ///
    /// ## Errors
    /// - `Validation` if a line has a negative price or non-positive quantity
    /// - `DuplicateLine` if two lines share a name
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            validate_price(item.price)?;
            validate_quantity(item.quantity)?;
            if !seen.insert(item.name.as_str()) {
                return Err(CoreError::DuplicateLine {
                    name: item.name.clone(),
                });
            }
        }

        Ok(Cart { items })
    }

    /// Adds a product or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Name already in cart: quantity grows by `quantity`, price unchanged
    /// - Name not in cart: appended at the end with the given price
    ///
    /// ## Errors
    /// Invalid input (empty name, negative price, quantity < 1) or a quantity
    /// that would overflow. The cart is untouched on error.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> CoreResult<AddOutcome> {
        let name = name.into();
        validate_line_name(&name)?;
        validate_price(price)?;
        validate_quantity(quantity)?;

        if let Some(position) = self.position_of(&name) {
            let item = &mut self.items[position];
            let merged = item
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::QuantityOverflow { name })?;
            item.quantity = merged;
            return Ok(AddOutcome::Merged {
                position,
                quantity: merged,
            });
        }

        self.items.push(LineItem::new(name, price, quantity));
        Ok(AddOutcome::Appended {
            position: self.items.len() - 1,
        })
    }

    /// Removes exactly one line at a zero-based position.
    ///
    /// Remaining lines keep their relative order.
    pub fn remove_at(&mut self, position: usize) -> CoreResult<LineItem> {
        validate_position(position, self.items.len())?;
        Ok(self.items.remove(position))
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price × quantity over all lines; zero for an empty cart.
    ///
    /// Saturates at `i64::MAX` rather than wrapping.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities across all lines; zero for an empty cart.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line at a position, if any.
    pub fn get(&self, position: usize) -> Option<&LineItem> {
        self.items.get(position)
    }

    /// Position of the line with this exact name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Consumes the cart, returning its lines.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CoreError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
