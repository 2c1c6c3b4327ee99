//! # Validation Module
//!
//! Input validation utilities for the sponsorship forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form (TypeScript)                                   │
//! │  └── Immediate field feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text length rules (titles, names, descriptions)                   │
//! │  ├── Non-negative amounts and counts                                   │
//! │  └── Finite numeric input                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregation engine                                           │
//! │  └── Ratios with explicit undefined results                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum length for sponsor names, legal names and task titles.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length for task descriptions.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Maximum length for any single-line text field.
pub const MAX_TEXT_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a text field with a minimum length.
///
/// ## Example
/// ```rust
/// use sponsor_core::validation::validate_text;
///
/// assert!(validate_text("name", "Acme", 2).is_ok());
/// assert!(validate_text("name", " ", 2).is_err());
/// assert!(validate_text("name", "A", 2).is_err());
/// ```
pub fn validate_text(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a long-form description (no upper bound).
pub fn validate_description(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if value.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Rejects a negative count. Zero is allowed (a freshly added row).
pub fn ensure_non_negative_count(field: &str, value: i64) -> CoreResult<()> {
    if value < 0 {
        tracing::debug!(field, value, "rejected negative count");
        return Err(CoreError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}

/// Rejects a negative amount. Zero is allowed.
pub fn ensure_non_negative_money(field: &str, value: Money) -> CoreResult<()> {
    if value.is_negative() {
        tracing::debug!(field, cents = value.cents(), "rejected negative amount");
        return Err(CoreError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}

/// Validates a count that must be strictly positive (submit-time rule).
pub fn validate_positive_count(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an amount that must be strictly positive (submit-time rule).
pub fn validate_positive_money(field: &str, value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// `amount × count`, or `InvalidInput` when the product leaves the i64 cents range.
///
/// ## Example
/// ```rust
/// use sponsor_core::validation::checked_total;
/// use sponsor_core::Money;
///
/// assert_eq!(checked_total("total", Money::from_major(50), 3).unwrap(), Money::from_major(150));
/// assert!(checked_total("total", Money::from_major(50), 100_000_000_000_000_000).is_err());
/// ```
pub fn checked_total(field: &str, amount: Money, count: i64) -> CoreResult<Money> {
    amount.checked_times(count).ok_or_else(|| out_of_range(field))
}

/// Adds up `amounts`, or `InvalidInput` when the sum leaves the i64 cents range.
pub fn checked_sum<I>(field: &str, amounts: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    amounts.into_iter().try_fold(Money::zero(), |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| out_of_range(field))
    })
}

fn out_of_range(field: &str) -> CoreError {
    tracing::debug!(field, "rejected amount outside the i64 cents range");
    CoreError::invalid_input(field, "amount out of range")
}

/// Converts a numeric form input into a whole count.
///
/// ## Rules
/// - Must be finite
/// - Must be a whole number
/// - Must not be negative
///
/// ## Example
/// ```rust
/// use sponsor_core::validation::count_from_input;
///
/// assert_eq!(count_from_input("units", 3.0).unwrap(), 3);
/// assert!(count_from_input("units", 2.5).is_err());
/// assert!(count_from_input("units", -1.0).is_err());
/// assert!(count_from_input("units", f64::NAN).is_err());
/// ```
pub fn count_from_input(field: &str, value: f64) -> CoreResult<i64> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(field, "must be a finite number"));
    }
    if value.fract() != 0.0 {
        return Err(CoreError::invalid_input(field, "must be a whole number"));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_input(field, "must not be negative"));
    }
    if value >= i64::MAX as f64 {
        return Err(CoreError::invalid_input(field, "is too large"));
    }
    Ok(value as i64)
}

/// Converts a numeric form input into a non-negative amount.
pub fn amount_from_input(field: &str, value: f64) -> CoreResult<Money> {
    let money = Money::try_from_major_f64(field, value)
        .map_err(|e| CoreError::invalid_input(field, e.to_string()))?;
    ensure_non_negative_money(field, money)?;
    Ok(money)
}

// =============================================================================
// Unit Tests
// =============================================================================
