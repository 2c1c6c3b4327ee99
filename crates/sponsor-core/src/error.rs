//! # Error Types
//!
//! Domain-specific error types for sponsor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sponsor-core errors (this file)                                       │
//! │  ├── CoreError        - Engine and form failures                       │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  sponsor-dashboard errors (separate crate)                             │
//! │  └── DashboardError   - Config, snapshot and I/O failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DashboardError → Display          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the aggregation engine and the form state objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A numeric input is negative or otherwise outside its domain.
    ///
    /// ## When This Occurs
    /// - Negative units, value per unit or cost per person
    /// - Deliverable counts where completed exceeds total
    /// - Non-finite numbers coming from a form field
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A ratio has a zero denominator.
    ///
    /// ## User Workflow
    /// ```text
    /// Sponsor with 0 deliverables
    ///      │
    ///      ▼
    /// completion_rate(0, 0)
    ///      │
    ///      ▼
    /// IndeterminateRatio { ratio: "completion rate" }
    ///      │
    ///      ▼
    /// UI renders a placeholder instead of "NaN%"
    /// ```
    #[error("{ratio} is undefined: {denominator} is zero")]
    IndeterminateRatio {
        ratio: &'static str,
        denominator: &'static str,
    },

    /// An edit or remove addressed a row that does not exist.
    #[error("Row {index} is out of range (collection has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Removing a row would drop the collection below its minimum size.
    #[error("{collection} must keep at least {min} row(s)")]
    MinimumRows { collection: &'static str, min: usize },

    /// Every department in the catalog is already assigned to the task.
    #[error("All {available} departments are already assigned")]
    NoDepartmentAvailable { available: usize },

    /// The department is already assigned on another row.
    #[error("Department {name} is already assigned to this task")]
    DuplicateDepartment { name: String },

    /// A cost-based task was submitted without choosing a cost type.
    #[error("Cost type is required for tasks with associated costs")]
    MissingCostType,

    /// The cost breakdown does not belong to the declared cost type.
    #[error("Cost breakdown does not match cost type {cost_type}")]
    CostTypeMismatch { cost_type: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error means "no result" rather than bad input.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, CoreError::IndeterminateRatio { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable number, departure before arrival).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
