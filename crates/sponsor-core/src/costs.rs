//! # Cost Breakdowns
//!
//! The cost details attached to a cost-based task.
//!
//! ## Cost Type → Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CostType        Breakdown                     Payment type             │
//! │  ────────        ─────────                     ────────────             │
//! │  posters  ─┐                                                            │
//! │  standee  ─┼──►  Print(PrintOrder)             carried                  │
//! │  banner   ─┘     quantity × cost_per_unit                               │
//! │                                                                         │
//! │  accommodation ► Accommodation([person])       dropped                  │
//! │                  counted, not priced                                    │
//! │                                                                         │
//! │  food ─────────► Food([meal])                  dropped                  │
//! │                  Σ people × cost_per_person                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::aggregation::sum_meals;
use crate::collection::EditableRow;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rows::{AccommodationPerson, MealEntry};
use crate::types::{CostType, PaymentType, PrintSize};
use crate::validation::{checked_total, ensure_non_negative_count, ensure_non_negative_money};

// =============================================================================
// Print Orders
// =============================================================================

/// A printed material that can be ordered for a sponsor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrintMaterial {
    Posters,
    Standee,
    Banner,
}

impl PrintMaterial {
    pub const ALL: [PrintMaterial; 3] = [PrintMaterial::Posters, PrintMaterial::Standee, PrintMaterial::Banner];

    pub fn cost_type(&self) -> CostType {
        match self {
            PrintMaterial::Posters => CostType::Posters,
            PrintMaterial::Standee => CostType::Standee,
            PrintMaterial::Banner => CostType::Banner,
        }
    }

    /// Maps a print cost type back to its material; `None` for accommodation and food.
    pub fn from_cost_type(cost_type: CostType) -> Option<Self> {
        match cost_type {
            CostType::Posters => Some(PrintMaterial::Posters),
            CostType::Standee => Some(PrintMaterial::Standee),
            CostType::Banner => Some(PrintMaterial::Banner),
            CostType::Accommodation | CostType::Food => None,
        }
    }
}

impl fmt::Display for PrintMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cost_type().as_str())
    }
}

/// Quantity, size and unit cost of one printed material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintOrder {
    material: PrintMaterial,
    quantity: i64,
    size: PrintSize,
    cost_per_unit: Money,
}

impl PrintOrder {
    pub fn new(material: PrintMaterial, quantity: i64, size: PrintSize, cost_per_unit: Money) -> CoreResult<Self> {
        ensure_non_negative_count("number", quantity)?;
        ensure_non_negative_money("cost", cost_per_unit)?;
        checked_total("total", cost_per_unit, quantity)?;

        Ok(PrintOrder {
            material,
            quantity,
            size,
            cost_per_unit,
        })
    }

    /// An empty order: zero units, small size, zero cost.
    pub fn empty(material: PrintMaterial) -> Self {
        PrintOrder {
            material,
            quantity: 0,
            size: PrintSize::default(),
            cost_per_unit: Money::zero(),
        }
    }

    pub fn material(&self) -> PrintMaterial {
        self.material
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn size(&self) -> PrintSize {
        self.size
    }

    pub fn cost_per_unit(&self) -> Money {
        self.cost_per_unit
    }

    /// `quantity × cost_per_unit`.
    pub fn total(&self) -> Money {
        self.cost_per_unit.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintEdit {
    Quantity(i64),
    Size(PrintSize),
    CostPerUnit(Money),
}

impl EditableRow for PrintOrder {
    type Edit = PrintEdit;

    fn apply_edit(&self, edit: PrintEdit) -> CoreResult<Self> {
        match edit {
            PrintEdit::Quantity(quantity) => PrintOrder::new(self.material, quantity, self.size, self.cost_per_unit),
            PrintEdit::Size(size) => Ok(PrintOrder { size, ..self.clone() }),
            PrintEdit::CostPerUnit(cost) => PrintOrder::new(self.material, self.quantity, self.size, cost),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrintOrderFields {
    material: PrintMaterial,
    quantity: i64,
    size: PrintSize,
    cost_per_unit: Money,
}

impl<'de> Deserialize<'de> for PrintOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let f = PrintOrderFields::deserialize(deserializer)?;
        PrintOrder::new(f.material, f.quantity, f.size, f.cost_per_unit).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// The sub-form data that backs a cost estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum CostBreakdown {
    Print(PrintOrder),
    Accommodation(Vec<AccommodationPerson>),
    Food(Vec<MealEntry>),
}

impl CostBreakdown {
    /// Total implied by the breakdown itself.
    ///
    /// Accommodation rows carry no prices, so they yield `None`.
    pub fn computed_total(&self) -> CoreResult<Option<Money>> {
        match self {
            CostBreakdown::Print(order) => Ok(Some(order.total())),
            CostBreakdown::Accommodation(_) => Ok(None),
            CostBreakdown::Food(meals) => sum_meals(meals).map(Some),
        }
    }

    /// Number of accommodation guests; `None` for other breakdowns.
    pub fn headcount(&self) -> Option<usize> {
        match self {
            CostBreakdown::Accommodation(people) => Some(people.len()),
            _ => None,
        }
    }

    /// Whether this breakdown is the right shape for `cost_type`.
    pub fn matches(&self, cost_type: CostType) -> bool {
        match (self, cost_type) {
            (CostBreakdown::Print(order), _) => order.material().cost_type() == cost_type,
            (CostBreakdown::Accommodation(_), CostType::Accommodation) => true,
            (CostBreakdown::Food(_), CostType::Food) => true,
            _ => false,
        }
    }
}

// =============================================================================
// Cost Details
// =============================================================================

/// Cost information attached to a submitted cost-based task.
///
/// ## Invariants
/// - `breakdown` matches `cost_type`
/// - `payment_type` is `None` unless `cost_type` is a printed material
/// - `estimated_cost >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostDetails {
    cost_type: CostType,
    payment_type: Option<PaymentType>,
    estimated_cost: Money,
    breakdown: CostBreakdown,
}

impl CostDetails {
    pub fn new(
        cost_type: CostType,
        payment_type: Option<PaymentType>,
        estimated_cost: Money,
        breakdown: CostBreakdown,
    ) -> CoreResult<Self> {
        ensure_non_negative_money("estimatedCost", estimated_cost)?;

        if !breakdown.matches(cost_type) {
            return Err(CoreError::CostTypeMismatch {
                cost_type: cost_type.to_string(),
            });
        }

        let payment_type = if cost_type.is_print() {
            payment_type
        } else {
            if payment_type.is_some() {
                tracing::debug!(%cost_type, "dropping payment type for non-print cost");
            }
            None
        };

        Ok(CostDetails {
            cost_type,
            payment_type,
            estimated_cost,
            breakdown,
        })
    }

    pub fn cost_type(&self) -> CostType {
        self.cost_type
    }

    pub fn payment_type(&self) -> Option<PaymentType> {
        self.payment_type
    }

    pub fn estimated_cost(&self) -> Money {
        self.estimated_cost
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealType;

    fn banner_order() -> PrintOrder {
        PrintOrder::new(PrintMaterial::Banner, 4, PrintSize::Large, Money::from_major(25)).unwrap()
    }

    #[test]
    fn test_print_order_total() {
        assert_eq!(banner_order().total(), Money::from_major(100));
        assert_eq!(PrintOrder::empty(PrintMaterial::Posters).total(), Money::zero());
    }

    #[test]
    fn test_print_order_rejects_negative() {
        assert!(PrintOrder::new(PrintMaterial::Posters, -1, PrintSize::Small, Money::zero()).is_err());
        assert!(PrintOrder::new(PrintMaterial::Posters, 1, PrintSize::Small, Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_print_order_rejects_overflowing_total() {
        let huge = PrintOrder::new(PrintMaterial::Banner, i64::MAX, PrintSize::Large, Money::from_major(25));
        assert!(matches!(huge, Err(CoreError::InvalidInput { .. })));
        assert!(banner_order().apply_edit(PrintEdit::Quantity(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_print_edit() {
        let order = banner_order().apply_edit(PrintEdit::Quantity(10)).unwrap();
        assert_eq!(order.total(), Money::from_major(250));
        let order = order.apply_edit(PrintEdit::Size(PrintSize::XLarge)).unwrap();
        assert_eq!(order.size().paper_format(), "A1");
        assert!(order.apply_edit(PrintEdit::Quantity(-2)).is_err());
    }

    #[test]
    fn test_material_cost_type_mapping() {
        for material in PrintMaterial::ALL {
            assert_eq!(PrintMaterial::from_cost_type(material.cost_type()), Some(material));
        }
        assert_eq!(PrintMaterial::from_cost_type(CostType::Food), None);
    }

    #[test]
    fn test_breakdown_totals() {
        let food = CostBreakdown::Food(vec![
            MealEntry::new(20, MealType::Lunch, Money::from_major(8)).unwrap(),
            MealEntry::new(20, MealType::Dinner, Money::from_major(12)).unwrap(),
        ]);
        assert_eq!(food.computed_total().unwrap(), Some(Money::from_major(400)));
        assert_eq!(food.headcount(), None);

        let stay = CostBreakdown::Accommodation(vec![AccommodationPerson::default(); 3]);
        assert_eq!(stay.computed_total().unwrap(), None);
        assert_eq!(stay.headcount(), Some(3));
    }

    #[test]
    fn test_cost_details_keeps_payment_for_print() {
        let details = CostDetails::new(
            CostType::Banner,
            Some(PaymentType::Custom),
            Money::from_major(100),
            CostBreakdown::Print(banner_order()),
        )
        .unwrap();
        assert_eq!(details.payment_type(), Some(PaymentType::Custom));
    }

    #[test]
    fn test_cost_details_drops_payment_for_food_and_accommodation() {
        let food = CostDetails::new(
            CostType::Food,
            Some(PaymentType::Event),
            Money::from_major(400),
            CostBreakdown::Food(vec![]),
        )
        .unwrap();
        assert_eq!(food.payment_type(), None);

        let stay = CostDetails::new(
            CostType::Accommodation,
            Some(PaymentType::Common),
            Money::zero(),
            CostBreakdown::Accommodation(vec![]),
        )
        .unwrap();
        assert_eq!(stay.payment_type(), None);
    }

    #[test]
    fn test_cost_details_rejects_mismatch() {
        let err = CostDetails::new(
            CostType::Posters,
            None,
            Money::zero(),
            CostBreakdown::Print(banner_order()),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::CostTypeMismatch { .. }));

        assert!(CostDetails::new(CostType::Food, None, Money::zero(), CostBreakdown::Accommodation(vec![])).is_err());
    }

    #[test]
    fn test_cost_details_rejects_negative_estimate() {
        let result = CostDetails::new(
            CostType::Food,
            None,
            Money::from_cents(-100),
            CostBreakdown::Food(vec![]),
        );
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    }
}
