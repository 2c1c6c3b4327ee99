//! # sponsor-core: Pure Business Logic for the Sponsorship Dashboard
//!
//! This crate holds every derived-value computation behind the sponsorship
//! dashboard, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sponsorship Dashboard Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (dashboard UI)                      │   │
//! │  │   Sponsors table ──► Sponsor details ──► Add sponsor / task     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               sponsor-dashboard (app layer)                     │   │
//! │  │   config, logging, JSON snapshot, screen state, report          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sponsor-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────┐ ┌────────────┐ ┌──────────┐ ┌──────────────┐  │   │
//! │  │  │ aggregation │ │ collection │ │  forms   │ │   metrics    │  │   │
//! │  │  │ sums, rates │ │ EditableList│ │ Sponsor  │ │ SponsorRecord│  │   │
//! │  │  │ margins     │ │ rows       │ │ Task     │ │ Deliverable  │  │   │
//! │  │  └─────────────┘ └────────────┘ └──────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`aggregation`] - Totals, classification, completion rate, profit margin
//! - [`collection`] - Generic add / update / remove row list
//! - [`rows`] - Line items, meals, guests, events, department assignments
//! - [`costs`] - Print orders and cost breakdowns for cost tasks
//! - [`forms`] - Sponsor and task form state with submit validation
//! - [`metrics`] - Snapshot records and per-sponsor derived figures
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Domain enums and departments
//! - [`error`] - Domain error types
//! - [`validation`] - Form input rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; nothing is cached
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Explicit Errors**: undefined ratios are errors, never NaN
//! 4. **No Stale Totals**: derived row values are recomputed on every edit
//!
//! ## Example Usage
//!
//! ```rust
//! use sponsor_core::aggregation::{profit_margin, sum_line_items};
//! use sponsor_core::{LineItem, Money};
//!
//! let items = vec![
//!     LineItem::new("Banner", 3, Money::from_major(50)).unwrap(),
//!     LineItem::new("Poster", 10, Money::from_major(5)).unwrap(),
//! ];
//! assert_eq!(sum_line_items(&items).unwrap().to_string(), "$200.00");
//!
//! let margin = profit_margin(Money::from_major(10_000), Money::from_major(6_000), None).unwrap();
//! assert_eq!(margin.to_string(), "40.00%");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregation;
pub mod collection;
pub mod costs;
pub mod error;
pub mod forms;
pub mod metrics;
pub mod money;
pub mod rows;
pub mod types;
pub mod validation;

#[cfg(test)]
mod aggregation_props;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregation::{CompletionRate, CostRecord, ProfitMargin, SponsorFinancials};
pub use collection::{BlankRow, EditableList, EditableRow};
pub use costs::{CostBreakdown, CostDetails, PrintEdit, PrintMaterial, PrintOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use forms::{SponsorDraft, SponsorForm, SponsorSubmission, TaskDraft, TaskForm, TaskSubmission};
pub use metrics::{Deliverable, DeliverableSet, SponsorMetrics, SponsorRecord};
pub use money::Money;
pub use rows::*;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum rows kept in the accommodation guest list.
pub const MIN_ACCOMMODATION_ROWS: usize = 1;

/// Minimum rows kept in the meal list.
pub const MIN_MEAL_ROWS: usize = 1;
