//! # Money Module
//!
//! Provides the `Money` type for sponsorship values and costs.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a meal plan in floating point:                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every line item, meal subtotal and sponsor value is i64 cents.      │
//! │    Floats only appear at the form boundary and are converted once.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sponsor_core::money::Money;
//!
//! let per_banner = Money::from_major(50);
//! assert_eq!(per_banner.checked_times(3), Some(Money::from_major(150)));
//! assert_eq!(per_banner.checked_times(i64::MAX), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: margins and differences can go negative; callers that
///   require non-negative amounts validate explicitly
/// - **Single field tuple struct**: serializes as a plain integer
///
/// ## Where Money is Used
/// ```text
/// LineItem.value_per_unit ──► LineItem.total_value ──► in-kind total
/// MealEntry.cost_per_person ──► MealEntry.subtotal ──► total food cost
/// Sponsor cash + in-kind ──► total value ──► profit margin
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::money::Money;
    ///
    /// let fee = Money::from_cents(1099);
    /// assert_eq!(fee.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units (dollars).
    ///
    /// Sponsorship amounts are almost always entered in whole dollars.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Converts a form-entered dollar amount into Money.
    ///
    /// ## Rules
    /// - NaN and infinities are rejected, never coerced to zero
    /// - The value is rounded to the nearest cent
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_major_f64("cost", 12.5).unwrap().cents(), 1250);
    /// assert!(Money::try_from_major_f64("cost", f64::NAN).is_err());
    /// ```
    pub fn try_from_major_f64(field: &str, value: f64) -> ValidationResult<Money> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "amount is too large".to_string(),
            });
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a per-unit amount by a count.
    ///
    /// Callers must know the product fits: rows validate it once in their
    /// constructor with [`checked_times`](Self::checked_times).
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::money::Money;
    ///
    /// let per_person = Money::from_major(8);
    /// assert_eq!(per_person.times(20), Money::from_major(160));
    /// ```
    #[inline]
    pub const fn times(&self, count: i64) -> Self {
        Money(self.0 * count)
    }

    /// `self × count`, or `None` if the product does not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(50).checked_times(3), Some(Money::from_major(150)));
    /// assert_eq!(Money::from_major(50).checked_times(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_times(&self, count: i64) -> Option<Self> {
        match self.0.checked_mul(count) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display. The dashboard formats for the UI itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(10_000).cents(), 1_000_000);
        assert_eq!(Money::from_major(-5).cents(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.times(3).cents(), 3000);
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!(big.checked_add(Money::from_cents(1)), None);
        assert_eq!(big.checked_add(Money::zero()), Some(big));
        assert_eq!(Money::from_cents(2).checked_times(i64::MAX / 2 + 1), None);
        assert_eq!(Money::from_cents(-3).checked_times(4), Some(Money::from_cents(-12)));
    }

    #[test]
    fn test_try_from_major_f64() {
        assert_eq!(Money::try_from_major_f64("x", 0.1).unwrap().cents(), 10);
        assert_eq!(Money::try_from_major_f64("x", 19.999).unwrap().cents(), 2000);
        assert!(Money::try_from_major_f64("x", f64::INFINITY).is_err());
        assert!(Money::try_from_major_f64("x", f64::NAN).is_err());
        assert!(Money::try_from_major_f64("x", 1e300).is_err());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }
}
