//! Property-based tests for the aggregation engine.
//!
//! - Line item totals equal `units × value_per_unit` for every input
//! - Sums do not depend on row order
//! - Zero denominators are always indeterminate
//! - Line item edits are idempotent
//! - No amount in the i64 cents range makes the engine panic

use proptest::prelude::*;

use crate::aggregation::{
    apply_line_item_edit, completion_rate, profit_margin, sum_line_items, sum_meals, SponsorFinancials,
};
use crate::error::CoreError;
use crate::money::Money;
use crate::rows::{LineItem, LineItemEdit, MealEntry};
use crate::types::MealType;

/// Units per row (0 to 1,000,000).
fn units() -> impl Strategy<Value = i64> {
    0i64..=1_000_000
}

/// Per-unit value in cents (0 to $10,000,000.00).
fn unit_cents() -> impl Strategy<Value = i64> {
    0i64..=1_000_000_000
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (units(), unit_cents()).prop_map(|(units, cents)| {
        LineItem::new("item", units, Money::from_cents(cents)).expect("bounded inputs fit")
    })
}

fn meal_type() -> impl Strategy<Value = MealType> {
    prop_oneof![
        Just(MealType::Breakfast),
        Just(MealType::Lunch),
        Just(MealType::Dinner),
        Just(MealType::Snacks),
    ]
}

fn meal() -> impl Strategy<Value = MealEntry> {
    (units(), meal_type(), unit_cents()).prop_map(|(people, meal_type, cents)| {
        MealEntry::new(people, meal_type, Money::from_cents(cents)).expect("bounded inputs fit")
    })
}

fn line_item_edit() -> impl Strategy<Value = LineItemEdit> {
    prop_oneof![
        "[a-zA-Z ]{0,12}".prop_map(LineItemEdit::ItemName),
        units().prop_map(LineItemEdit::Units),
        unit_cents().prop_map(|cents| LineItemEdit::ValuePerUnit(Money::from_cents(cents))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Totals
    // =========================================================================

    /// *For any* units and value per unit, a single item sums to their product.
    #[test]
    fn prop_single_item_sum_is_product(units in units(), cents in unit_cents()) {
        let item = LineItem::new("item", units, Money::from_cents(cents)).unwrap();
        prop_assert_eq!(sum_line_items(&[item]).unwrap(), Money::from_cents(units * cents));
    }

    /// *For any* item list, every permutation sums to the same total.
    #[test]
    fn prop_sum_line_items_order_independent(
        (items, shuffled) in prop::collection::vec(line_item(), 0..20)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        prop_assert_eq!(sum_line_items(&items).unwrap(), sum_line_items(&shuffled).unwrap());
    }

    /// *For any* meal list, the sum is Σ people × cost per person.
    #[test]
    fn prop_sum_meals_matches_subtotals(meals in prop::collection::vec(meal(), 0..20)) {
        let expected: i64 = meals.iter().map(|m| m.people() * m.cost_per_person().cents()).sum();
        prop_assert_eq!(sum_meals(&meals).unwrap(), Money::from_cents(expected));
    }

    // =========================================================================
    // Ratios
    // =========================================================================

    /// *For any* completed count, a zero total is indeterminate.
    #[test]
    fn prop_completion_rate_zero_total_indeterminate(completed in 0i64..=i64::MAX) {
        let err = completion_rate(completed, 0).unwrap_err();
        prop_assert!(err.is_indeterminate(), "completed={} gave {:?}", completed, err);
    }

    /// *For any* valid counts, the rate stays within 0..=100.
    #[test]
    fn prop_completion_rate_in_bounds(
        (completed, total) in (1i64..=i64::MAX).prop_flat_map(|total| (0..=total, Just(total)))
    ) {
        let rate = completion_rate(completed, total).unwrap();
        prop_assert!(rate.percent() <= 100);
        prop_assert_eq!(rate.is_complete(), completed == total);
    }

    /// *For any* estimated and actual cost, a zero total value is indeterminate.
    #[test]
    fn prop_profit_margin_zero_value_indeterminate(
        estimated in 0i64..=i64::MAX,
        actual in prop::option::of(0i64..=i64::MAX),
    ) {
        let err = profit_margin(Money::zero(), Money::from_cents(estimated), actual.map(Money::from_cents))
            .unwrap_err();
        prop_assert!(err.is_indeterminate());
    }

    /// *For any* cost not above the value, the margin is within 0..=100 %.
    #[test]
    fn prop_profit_margin_bounded_when_profitable(
        (value, cost) in (1i64..=i64::MAX).prop_flat_map(|value| (Just(value), 0..=value))
    ) {
        let margin = profit_margin(Money::from_cents(value), Money::from_cents(cost), None).unwrap();
        prop_assert!((0..=10_000).contains(&margin.bps()));
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// *For any* list, index and edit, applying the edit twice equals applying it once.
    #[test]
    fn prop_apply_line_item_edit_idempotent(
        items in prop::collection::vec(line_item(), 1..10),
        index in any::<prop::sample::Index>(),
        edit in line_item_edit(),
    ) {
        let index = index.index(items.len());
        let once = apply_line_item_edit(&items, index, edit.clone()).unwrap();
        let twice = apply_line_item_edit(&once, index, edit).unwrap();

        prop_assert_eq!(&once, &twice);
        let edited = &once[index];
        prop_assert_eq!(edited.total_value(), edited.value_per_unit().times(edited.units()));
    }

    // =========================================================================
    // Range
    // =========================================================================

    /// *For any* non-negative units and cents, an item either holds the exact
    /// product or is rejected as out of range.
    #[test]
    fn prop_line_item_never_overflows(units in 0i64..=i64::MAX, cents in 0i64..=i64::MAX) {
        let exact = units as i128 * cents as i128;
        match LineItem::new("item", units, Money::from_cents(cents)) {
            Ok(item) => prop_assert_eq!(item.total_value().cents() as i128, exact),
            Err(err) => {
                prop_assert!(exact > i64::MAX as i128);
                prop_assert!(matches!(err, CoreError::InvalidInput { .. }), "unexpected {:?}", err);
            }
        }
    }

    /// *For any* non-negative totals, summing either fits exactly or is rejected.
    #[test]
    fn prop_sum_never_overflows(totals in prop::collection::vec(0i64..=i64::MAX, 0..8)) {
        let items: Vec<LineItem> = totals
            .iter()
            .map(|&cents| LineItem::new("item", 1, Money::from_cents(cents)).unwrap())
            .collect();
        let exact: i128 = totals.iter().map(|&c| c as i128).sum();

        match sum_line_items(&items) {
            Ok(total) => prop_assert_eq!(total.cents() as i128, exact),
            Err(err) => {
                prop_assert!(exact > i64::MAX as i128);
                prop_assert!(matches!(err, CoreError::InvalidInput { .. }), "unexpected {:?}", err);
            }
        }
    }

    /// *For any* non-negative cash and in-kind value, the total fits or is rejected.
    #[test]
    fn prop_financials_total_never_overflows(cash in 0i64..=i64::MAX, in_kind in 0i64..=i64::MAX) {
        let financials = SponsorFinancials::new(Money::from_cents(cash), Money::from_cents(in_kind));
        let exact = cash as i128 + in_kind as i128;

        match financials.total_value() {
            Ok(total) => prop_assert_eq!(total.cents() as i128, exact),
            Err(_) => prop_assert!(exact > i64::MAX as i128),
        }
    }
}
