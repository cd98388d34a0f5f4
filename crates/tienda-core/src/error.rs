//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── CoreError        - Cart invariant violations                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tienda-store errors (separate crate)                                  │
//! │  └── StoreError       - Storage read/write failures                    │
//! │                                                                         │
//! │  CLI (binary)                                                          │
//! │  └── anyhow::Error    - What the terminal prints                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → anyhow → stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invalid Input Policy
//! Every cart command validates its arguments and rejects bad ones with a
//! typed error. A rejected command never mutates the cart and never writes
//! to storage.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A position outside `0..len` was passed to `remove_at`.
    #[error("Position {position} is out of range for a cart with {len} lines")]
    InvalidPosition { position: usize, len: usize },

    /// Merging quantities for an existing line would overflow.
    #[error("Quantity for '{name}' would overflow")]
    QuantityOverflow { name: String },

    /// A rehydrated payload holds two lines with the same name.
    ///
    /// ## When This Occurs
    /// Only when validating data that did not come through `add_item`,
    /// e.g. a stored payload edited by hand or written by an older widget.
    #[error("Cart already holds a line named '{name}'")]
    DuplicateLine { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are raised
/// before any cart state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price card that isn't a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
