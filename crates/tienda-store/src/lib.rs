//! # tienda-store: Durable Cart Storage
//!
//! Keeps the shopping cart in a key-value slot so it survives page reloads
//! and restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tienda Data Flow                               │
//! │                                                                         │
//! │  tienda CLI command (add / remove / clear / cart / checkout)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tienda-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartStore    │───►│ Storage trait │───►│  Migrations  │  │   │
//! │  │   │ (cart_store)  │    │  memory/file/ │    │  (embedded)  │  │   │
//! │  │   │ load/persist  │    │  sqlite       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  slot "cart" = [{"name":..., "price":..., "quantity":...}, ...]         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tienda_core::Money;
//! use tienda_store::{CartStore, FileStorage};
//!
//! let storage = FileStorage::open("./data")?;
//! let mut store = CartStore::open(storage);
//! store.add("Kimia Seamless Sport Set", Money::from_units(185_000), 1)?;
//! println!("{}", store.format_amount(store.total()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod migrations;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, LoadOutcome};
pub use error::{StoreError, StoreResult};
pub use storage::{
    FileStorage, MemoryStorage, SqliteStorage, Storage, StorageBackend, StorageConfig,
};
