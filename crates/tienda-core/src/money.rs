//! # Money Module
//!
//! Provides the `Money` type for prices and totals.
//!
//! ## Whole Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The storefront prices in whole pesos:                                  │
//! │                                                                         │
//! │    Card shows   "$200.000"  ──► 200000 units                            │
//! │    Stored as    "price": 200000                                         │
//! │                                                                         │
//! │  There is no minor unit. Every amount is an integer, and all math is    │
//! │  integer math.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::money::Money;
//!
//! let price = Money::from_units(200_000);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.units(), 400_000);
//! assert_eq!(line_total.to_string(), "$400.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::format::{format_amount, GroupingPolicy};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case subtraction
/// - **Single field tuple struct**: serializes as a bare JSON number, which is
///   exactly the `price` field of the stored cart record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::from_units(15_000);
    /// assert_eq!(price.units(), 15_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let unit_price = Money::from_units(10);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 30);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two values, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Adds two values, saturating at the i64 bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Renders the amount with the given grouping policy and no symbol.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    /// use tienda_core::format::GroupingPolicy;
    ///
    /// let total = Money::from_units(1_250_000);
    /// assert_eq!(total.format(&GroupingPolicy::EN_US), "1,250,000");
    /// ```
    pub fn format(&self, policy: &GroupingPolicy) -> String {
        format_amount(self.0, policy)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays with a `$` symbol and Colombian grouping, as on the storefront.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.format(&GroupingPolicy::ES_CO))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
