//! # CartStore
//!
//! The in-memory cart plus the storage slot that mirrors it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartStore Lifecycle                               │
//! │                                                                         │
//! │  Page load ──────► CartStore::open(storage)                             │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                    load() ── slot "cart" ──┬── JSON array ─► Loaded     │
//! │                                            ├── absent/null ─► Missing   │
//! │                                            ├── bad payload ─► Corrupt   │
//! │                                            └── read error ──► Unavailable│
//! │                                                                         │
//! │  add / remove_at / clear                                                │
//! │       │                                                                 │
//! │       ├── rejected input ──► Err, cart and slot untouched               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutate cart ──► persist() ──► slot "cart" = JSON array                 │
//! │                                                                         │
//! │  NOTE: only Loaded replaces the in-memory cart. Every other outcome     │
//! │        keeps whatever the store held before.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persist Failures
//! A mutation that succeeds in memory but fails to persist returns the
//! storage error. The in-memory cart keeps the mutation; the next successful
//! persist writes it out.

use tienda_core::{
    format_amount, AddOutcome, Badge, Cart, CartLineView, CartTotals, CheckoutSummary,
    GroupingPolicy, LineItem, Money, CART_STORAGE_KEY,
};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::storage::Storage;

// =============================================================================
// Load Outcome
// =============================================================================

/// What `CartStore::load` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid cart was read and is now the in-memory cart.
    Loaded { lines: usize },

    /// Nothing stored under the key.
    Missing,

    /// The stored payload is not a valid cart. The in-memory cart is kept.
    Corrupt { reason: String },

    /// Storage could not be read. The in-memory cart is kept.
    Unavailable { reason: String },
}

impl LoadOutcome {
    /// Checks if the stored cart replaced the in-memory one.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// A cart kept in sync with a storage slot.
///
/// ## Example
/// ```rust
/// use tienda_core::Money;
/// use tienda_store::{CartStore, MemoryStorage};
///
/// let mut store = CartStore::open(MemoryStorage::new());
/// store.add("A", Money::from_units(10), 2).unwrap();
/// store.add("B", Money::from_units(5), 1).unwrap();
/// store.add("A", Money::from_units(10), 1).unwrap();
///
/// assert_eq!(store.total(), Money::from_units(35));
/// assert_eq!(store.item_count(), 4);
/// assert_eq!(store.format_amount(store.total()), "35");
/// ```
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    cart: Cart,
    policy: GroupingPolicy,
}

impl<S: Storage> CartStore<S> {
    /// Creates an empty store over the `"cart"` slot. Storage is not read.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Creates an empty store over a custom slot.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CartStore {
            storage,
            key: key.into(),
            cart: Cart::new(),
            policy: GroupingPolicy::default(),
        }
    }

    /// Creates a store and loads whatever the slot holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Replaces the grouping policy used by `format_amount`.
    pub fn with_policy(mut self, policy: GroupingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reads the slot and, if it holds a valid cart, adopts it.
    ///
    /// Never fails: a corrupt or unreadable slot is logged and reported in
    /// the outcome, and the current cart stays as it was.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => LoadOutcome::Missing,
            Ok(Some(payload)) => match parse_payload(&payload) {
                Ok(None) => LoadOutcome::Missing,
                Ok(Some(cart)) => {
                    let lines = cart.len();
                    self.cart = cart;
                    LoadOutcome::Loaded { lines }
                }
                Err(reason) => LoadOutcome::Corrupt { reason },
            },
            Err(e) => LoadOutcome::Unavailable {
                reason: e.to_string(),
            },
        };

        match &outcome {
            LoadOutcome::Loaded { lines } => info!(key = %self.key, lines, "Cart loaded"),
            LoadOutcome::Missing => debug!(key = %self.key, "No stored cart"),
            LoadOutcome::Corrupt { reason } => {
                warn!(key = %self.key, %reason, "Stored cart is corrupt; keeping current cart")
            }
            LoadOutcome::Unavailable { reason } => {
                warn!(key = %self.key, %reason, "Storage unavailable; keeping current cart")
            }
        }

        outcome
    }

    /// Writes the cart to the slot as a JSON array.
    pub fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.cart)?;
        self.storage.set(&self.key, &payload)?;
        debug!(key = %self.key, lines = self.cart.len(), "Cart persisted");
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product, merging by exact name, then persists.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> StoreResult<AddOutcome> {
        let outcome = self.cart.add_item(name, price, quantity)?;
        debug!(?outcome, "Added to cart");
        self.persist()?;
        Ok(outcome)
    }

    /// Removes the line at a zero-based position, then persists.
    pub fn remove_at(&mut self, position: usize) -> StoreResult<LineItem> {
        let removed = self.cart.remove_at(position)?;
        debug!(position, name = %removed.name, "Removed from cart");
        self.persist()?;
        Ok(removed)
    }

    /// Empties the cart, then persists the empty array.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.cart.clear();
        debug!("Cart cleared");
        self.persist()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Formats an amount with this store's grouping policy.
    pub fn format_amount(&self, amount: Money) -> String {
        format_amount(amount.units(), &self.policy)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    pub fn badge(&self) -> Badge {
        Badge::from(&self.cart)
    }

    pub fn checkout_summary(&self, shipping: Money) -> CheckoutSummary {
        CheckoutSummary::for_cart(&self.cart, shipping)
    }

    pub fn line_views(&self) -> Vec<CartLineView> {
        CartLineView::rows(&self.cart)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> &GroupingPolicy {
        &self.policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// `Ok(None)` for a stored `null`, `Err(reason)` for anything that is not a
/// valid cart.
fn parse_payload(payload: &str) -> Result<Option<Cart>, String> {
    serde_json::from_str(payload).map_err(|e| e.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;
    use tienda_core::{CoreError, ValidationError};

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    /// Storage whose every call fails.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_merge_scenario_persists_every_step() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.add("A", units(10), 2).unwrap();
        store.add("B", units(5), 1).unwrap();
        let outcome = store.add("A", units(10), 1).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Merged {
                position: 0,
                quantity: 3
            }
        );
        assert_eq!(store.total(), units(35));
        assert_eq!(store.item_count(), 4);
        assert_eq!(
            storage.get("cart").unwrap().as_deref(),
            Some(r#"[{"name":"A","price":10,"quantity":3},{"name":"B","price":5,"quantity":1}]"#)
        );
    }

    #[test]
    fn test_remove_then_clear() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.add("A", units(10), 3).unwrap();
        store.add("B", units(5), 1).unwrap();

        let removed = store.remove_at(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(store.total(), units(5));
        assert_eq!(store.item_count(), 1);

        store.clear().unwrap();
        assert_eq!(store.total(), Money::zero());
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let mut first = CartStore::new(storage.clone());
        first.add("Kimia Seamless Sport Set", units(185_000), 2).unwrap();
        first.add("Sun Orange Set", units(185_000), 1).unwrap();

        let mut second = CartStore::new(storage);
        assert_eq!(second.load(), LoadOutcome::Loaded { lines: 2 });
        assert_eq!(second.cart(), first.cart());
    }

    #[test]
    fn test_missing_and_null_slots() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        assert_eq!(store.load(), LoadOutcome::Missing);

        storage.set("cart", "null").unwrap();
        assert_eq!(store.load(), LoadOutcome::Missing);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_corrupt_payload_keeps_current_cart() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.add("A", units(10), 1).unwrap();

        for payload in [
            "not json",
            r#"{"name":"A"}"#,
            r#"[{"name":"A","price":"10","quantity":1}]"#,
            r#"[{"name":"A","price":10,"quantity":0}]"#,
            r#"[{"name":"A","price":10,"quantity":1},{"name":"A","price":10,"quantity":1}]"#,
        ] {
            storage.set("cart", payload).unwrap();
            let outcome = store.load();
            assert!(
                matches!(outcome, LoadOutcome::Corrupt { .. }),
                "{} gave {:?}",
                payload,
                outcome
            );
            assert_eq!(store.item_count(), 1);
        }
    }

    #[test]
    fn test_long_names_survive_load_and_mutation() {
        let storage = MemoryStorage::new();
        let long = "x".repeat(tienda_core::MAX_PRODUCT_NAME_LEN + 1);
        let payload = format!(r#"[{{"name":"{}","price":10,"quantity":2}}]"#, long);
        storage.set("cart", &payload).unwrap();

        let mut store = CartStore::new(storage.clone());
        assert_eq!(store.load(), LoadOutcome::Loaded { lines: 1 });

        store.add("B", units(5), 1).unwrap();
        assert_eq!(
            storage.get("cart").unwrap(),
            Some(format!(
                r#"[{{"name":"{}","price":10,"quantity":2}},{{"name":"B","price":5,"quantity":1}}]"#,
                long
            ))
        );
    }

    #[test]
    fn test_unavailable_storage_is_not_an_error() {
        let mut store = CartStore::new(BrokenStorage);
        assert!(matches!(store.load(), LoadOutcome::Unavailable { .. }));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_persist_failure_keeps_mutation() {
        let mut store = CartStore::new(BrokenStorage);
        let err = store.add("A", units(10), 1).unwrap_err();

        assert!(matches!(err, StoreError::Internal(_)));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_rejected_input_touches_nothing() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());

        let err = store.add("A", units(10), 0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let err = store.remove_at(0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidPosition { position: 0, len: 0 })
        ));

        assert!(store.cart().is_empty());
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_views_and_formatting() {
        let mut store = CartStore::new(MemoryStorage::new());
        assert!(!store.badge().visible);
        assert_eq!(store.checkout_summary(units(15_000)).total, Money::zero());

        store.add("Catalina Pink Set", units(200_000), 1).unwrap();
        let summary = store.checkout_summary(units(15_000));
        assert_eq!(store.format_amount(summary.total), "215.000");
        assert_eq!(store.format_amount(Money::zero()), "0");
        assert_eq!(store.badge(), Badge { count: 1, visible: true });
        assert_eq!(store.totals().lines, 1);
        assert_eq!(store.line_views()[0].line_total, units(200_000));
    }

    #[test]
    fn test_custom_key_and_policy() {
        let storage = MemoryStorage::new();
        let mut store =
            CartStore::with_key(storage.clone(), "wishlist").with_policy(GroupingPolicy::EN_US);
        store.add("A", units(1_000), 1).unwrap();

        assert_eq!(storage.get("cart").unwrap(), None);
        assert!(storage.get("wishlist").unwrap().is_some());
        assert_eq!(store.format_amount(store.total()), "1,000");
        assert_eq!(store.key(), "wishlist");
    }
}
