//! # Validation Module
//!
//! Input validation for cart commands.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI / browser widget)                          │
//! │  ├── Parses card text, checks positions against cart length           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart (Rust)                                                  │
//! │  ├── THIS MODULE: name / price / quantity / position rules             │
//! │  └── Rejected input never mutates the cart or touches storage          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Rehydration                                                  │
//! │  └── Stored payloads are re-checked before they replace the cart       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Kimia Seamless Sport Set").unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the name of a line added to the cart.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// Names are compared verbatim afterwards; no trimming is applied to the
/// stored value.
pub fn validate_line_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name typed on or read off a product card.
///
/// ## Rules
/// - Everything `validate_line_name` checks
/// - Must be at most `MAX_PRODUCT_NAME_LEN` characters
///
/// Only new input goes through this check; carts rehydrated from storage
/// are never rejected for long names.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_line_name(name)?;

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a catalog search term.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed, lower-cased term used for matching.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_lowercase())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// Product card: quantity input "2"
///      │
///      ▼
/// validate_quantity(2) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be positive"
///      │
///      └── OK → add to cart
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a zero-based line position against the cart length.
pub fn validate_position(position: usize, len: usize) -> Result<(), CoreError> {
    if position >= len {
        return Err(CoreError::InvalidPosition { position, len });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
