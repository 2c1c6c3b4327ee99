//! # Aggregation Engine
//!
//! Pure functions that turn line-item collections into the totals,
//! percentages and classifications the dashboard displays.
//!
//! ## Derivation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Aggregation Engine                                 │
//! │                                                                         │
//! │  [LineItem]  ──► sum_line_items ──► in-kind total (Money)              │
//! │  [MealEntry] ──► sum_meals ───────► total food cost (Money)            │
//! │                                                                         │
//! │  cash, in-kind ──► classify_sponsor_type ──► Cash | InKind | Hybrid    │
//! │                                                                         │
//! │  completed, total ──► completion_rate ──► 0..=100 %                    │
//! │                                           or IndeterminateRatio        │
//! │                                                                         │
//! │  value, estimated, actual? ──► profit_margin ──► basis points          │
//! │                                                  or IndeterminateRatio │
//! │                                                                         │
//! │  [LineItem], index, edit ──► apply_line_item_edit ──► new [LineItem]   │
//! │                                                                         │
//! │  NO STATE • NO I/O • SAME INPUT = SAME OUTPUT                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Formatting (currency symbols, "%" suffixes, placeholders for undefined
//! ratios) is left to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::collection::replace_row;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rows::{LineItem, LineItemEdit, MealEntry};
use crate::types::SponsorType;
use crate::validation::{checked_sum, ensure_non_negative_count, ensure_non_negative_money};

// =============================================================================
// Totals
// =============================================================================

/// Sums the `total_value` of every line item.
///
/// ## Example
/// ```rust
/// use sponsor_core::aggregation::sum_line_items;
/// use sponsor_core::{LineItem, Money};
///
/// let items = vec![
///     LineItem::new("Banner", 3, Money::from_major(50)).unwrap(),
///     LineItem::new("Poster", 10, Money::from_major(5)).unwrap(),
/// ];
/// assert_eq!(sum_line_items(&items).unwrap(), Money::from_major(200));
/// assert_eq!(sum_line_items(&[]).unwrap(), Money::zero());
/// ```
///
/// ## Errors
/// `InvalidInput` when the total does not fit in i64 cents.
pub fn sum_line_items(items: &[LineItem]) -> CoreResult<Money> {
    checked_sum("itemsTotal", items.iter().map(LineItem::total_value))
}

/// Sums `people × cost_per_person` across every meal.
pub fn sum_meals(meals: &[MealEntry]) -> CoreResult<Money> {
    checked_sum("totalFoodCost", meals.iter().map(MealEntry::subtotal))
}

// =============================================================================
// Sponsor Classification
// =============================================================================

/// Classifies a sponsor by which kinds of value it contributes.
///
/// | cash | in-kind | result |
/// |------|---------|--------|
/// | > 0  | > 0     | Hybrid |
/// | > 0  | 0       | Cash   |
/// | 0    | > 0     | InKind |
/// | 0    | 0       | InKind (unfunded, see [`SponsorFinancials::is_unfunded`]) |
///
/// ## Errors
/// `InvalidInput` when either amount is negative.
pub fn classify_sponsor_type(cash: Money, in_kind: Money) -> CoreResult<SponsorType> {
    ensure_non_negative_money("cashValue", cash)?;
    ensure_non_negative_money("inKindValue", in_kind)?;

    let sponsor_type = match (cash.is_positive(), in_kind.is_positive()) {
        (true, true) => SponsorType::Hybrid,
        (true, false) => SponsorType::Cash,
        (false, true) => SponsorType::InKind,
        // Nothing pledged yet: the dashboard has always listed these as In-Kind.
        (false, false) => SponsorType::InKind,
    };
    Ok(sponsor_type)
}

/// Cash and in-kind value pledged by one sponsor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SponsorFinancials {
    pub cash_value: Money,
    pub in_kind_value: Money,
}

impl SponsorFinancials {
    pub fn new(cash_value: Money, in_kind_value: Money) -> Self {
        SponsorFinancials {
            cash_value,
            in_kind_value,
        }
    }

    /// `cash + in-kind`; `InvalidInput` if the sum leaves the i64 cents range.
    pub fn total_value(&self) -> CoreResult<Money> {
        checked_sum("totalValue", [self.cash_value, self.in_kind_value])
    }

    pub fn sponsor_type(&self) -> CoreResult<SponsorType> {
        classify_sponsor_type(self.cash_value, self.in_kind_value)
    }

    /// True when neither cash nor in-kind value has been pledged.
    pub fn is_unfunded(&self) -> bool {
        self.cash_value.is_zero() && self.in_kind_value.is_zero()
    }
}

// =============================================================================
// Completion Rate
// =============================================================================

/// Share of deliverables completed, as a whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletionRate(u8);

impl CompletionRate {
    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl fmt::Display for CompletionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Computes `round(completed / total × 100)`.
///
/// Rounds half away from zero, so 1 of 8 (12.5 %) reports 13 %.
///
/// ## Errors
/// - `IndeterminateRatio` when `total == 0`
/// - `InvalidInput` when either count is negative or `completed > total`
///
/// ## Example
/// ```rust
/// use sponsor_core::aggregation::completion_rate;
///
/// assert_eq!(completion_rate(3, 4).unwrap().percent(), 75);
/// assert!(completion_rate(0, 0).unwrap_err().is_indeterminate());
/// ```
pub fn completion_rate(completed: i64, total: i64) -> CoreResult<CompletionRate> {
    ensure_non_negative_count("completedDeliverables", completed)?;
    ensure_non_negative_count("totalDeliverables", total)?;

    if total == 0 {
        return Err(CoreError::IndeterminateRatio {
            ratio: "completion rate",
            denominator: "total deliverables",
        });
    }
    if completed > total {
        return Err(CoreError::invalid_input(
            "completedDeliverables",
            format!("{} completed exceeds {} total", completed, total),
        ));
    }

    let percent = div_round_half_away(completed as i128 * 100, total as i128);
    Ok(CompletionRate(percent as u8))
}

// =============================================================================
// Profit Margin
// =============================================================================

/// Profit margin in basis points (1 bp = 0.01 %).
///
/// Negative margins are valid: they mean the cost exceeded the
/// sponsorship value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfitMargin(i64);

impl ProfitMargin {
    pub const fn from_bps(bps: i64) -> Self {
        ProfitMargin(bps)
    }

    pub fn bps(&self) -> i64 {
        self.0
    }

    /// Margin as a percentage, e.g. `40.0` (for display only).
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True when the cost is higher than the value received.
    pub fn is_cost_overrun(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for ProfitMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percentage())
    }
}

/// Estimated cost plus the actual cost once it is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    pub estimated_cost: Money,
    pub actual_cost: Option<Money>,
}

impl CostRecord {
    /// Actual cost when recorded, else the estimate.
    pub fn effective_cost(&self) -> Money {
        self.actual_cost.unwrap_or(self.estimated_cost)
    }

    pub fn profit_margin(&self, total_value: Money) -> CoreResult<ProfitMargin> {
        profit_margin(total_value, self.estimated_cost, self.actual_cost)
    }
}

/// Computes `(value − cost) / value × 100` where cost is the actual cost
/// when known and the estimate otherwise.
///
/// The result is rounded half away from zero to whole basis points.
///
/// ## Errors
/// - `IndeterminateRatio` when `total_value` is zero
/// - `InvalidInput` when any amount is negative
///
/// ## Example
/// ```rust
/// use sponsor_core::aggregation::profit_margin;
/// use sponsor_core::Money;
///
/// let margin = profit_margin(Money::from_major(10_000), Money::from_major(6_000), None).unwrap();
/// assert_eq!(margin.percentage(), 40.0);
/// ```
pub fn profit_margin(
    total_value: Money,
    estimated_cost: Money,
    actual_cost: Option<Money>,
) -> CoreResult<ProfitMargin> {
    ensure_non_negative_money("totalValue", total_value)?;
    ensure_non_negative_money("estimatedCost", estimated_cost)?;
    if let Some(actual) = actual_cost {
        ensure_non_negative_money("actualCost", actual)?;
    }

    if total_value.is_zero() {
        return Err(CoreError::IndeterminateRatio {
            ratio: "profit margin",
            denominator: "total value",
        });
    }

    let cost = actual_cost.unwrap_or(estimated_cost);
    let profit = (total_value - cost).cents() as i128;
    let bps = div_round_half_away(profit * 10_000, total_value.cents() as i128);
    Ok(ProfitMargin(bps as i64))
}

// =============================================================================
// Line Item Editing
// =============================================================================

/// Returns a new item list with one field of the item at `index` changed.
///
/// The replacement item's `total_value` is recomputed as part of the same
/// replace, so the returned list never holds a stale total. The input slice
/// is not modified.
///
/// ## Errors
/// - `IndexOutOfRange` when `index >= items.len()`
/// - `InvalidInput` when the new units or value is negative
pub fn apply_line_item_edit(items: &[LineItem], index: usize, edit: LineItemEdit) -> CoreResult<Vec<LineItem>> {
    tracing::trace!(index, field = %edit.field(), "applying line item edit");
    replace_row(items, index, edit)
}

// =============================================================================
// Helpers
// =============================================================================

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round_half_away(num: i128, den: i128) -> i128 {
    let half = den / 2;
    if num >= 0 {
        (num + half) / den
    } else {
        (num - half) / den
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
