//! # Form Rows
//!
//! The line-item records edited inside the sponsor and task forms.
//!
//! | Row                    | Derived value                   | Form            |
//! |------------------------|---------------------------------|-----------------|
//! | [`LineItem`]           | `total_value = units × value`   | sponsor items   |
//! | [`MealEntry`]          | `subtotal = people × cost`      | food costs      |
//! | [`AccommodationPerson`]| none (counted)                  | accommodation   |
//! | [`EventAssociation`]   | none                            | sponsor events  |
//! | [`DepartmentAssignment`]| none                           | task departments|
//!
//! Rows with numeric inputs keep their fields private: the only ways to
//! obtain one are the validating constructor, an edit, or deserialization
//! (which runs the same constructor), so a negative amount never reaches
//! the aggregation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::collection::{BlankRow, EditableRow};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AssociationType, Department, MealType};
use crate::validation::{
    amount_from_input, checked_total, count_from_input, ensure_non_negative_count, ensure_non_negative_money,
};

// =============================================================================
// Line Item (in-kind contribution)
// =============================================================================

/// One in-kind item contributed by a sponsor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    item_name: String,
    units: i64,
    value_per_unit: Money,
    total_value: Money,
}

impl LineItem {
    /// Creates a line item, computing its total.
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::{LineItem, Money};
    ///
    /// let banners = LineItem::new("Banner", 3, Money::from_major(50)).unwrap();
    /// assert_eq!(banners.total_value(), Money::from_major(150));
    /// assert!(LineItem::new("Banner", -3, Money::from_major(50)).is_err());
    /// ```
    pub fn new(item_name: impl Into<String>, units: i64, value_per_unit: Money) -> CoreResult<Self> {
        ensure_non_negative_count("units", units)?;
        ensure_non_negative_money("valuePerUnit", value_per_unit)?;
        let total_value = checked_total("totalValue", value_per_unit, units)?;

        Ok(LineItem {
            item_name: item_name.into(),
            units,
            value_per_unit,
            total_value,
        })
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn value_per_unit(&self) -> Money {
        self.value_per_unit
    }

    /// `units × value_per_unit`, always in sync with the inputs.
    pub fn total_value(&self) -> Money {
        self.total_value
    }
}

/// Field names of [`LineItem`] as used by the sponsor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemField {
    ItemName,
    Units,
    ValuePerUnit,
}

impl LineItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemField::ItemName => "itemName",
            LineItemField::Units => "units",
            LineItemField::ValuePerUnit => "valuePerUnit",
        }
    }
}

impl fmt::Display for LineItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineItemField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "itemName" => Ok(LineItemField::ItemName),
            "units" => Ok(LineItemField::Units),
            "valuePerUnit" => Ok(LineItemField::ValuePerUnit),
            other => Err(ValidationError::NotAllowed {
                field: format!("line item field '{}'", other),
                allowed: vec![
                    "itemName".to_string(),
                    "units".to_string(),
                    "valuePerUnit".to_string(),
                ],
            }),
        }
    }
}

/// A single field change on a [`LineItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemEdit {
    ItemName(String),
    Units(i64),
    ValuePerUnit(Money),
}

impl LineItemEdit {
    /// The field this edit writes.
    pub fn field(&self) -> LineItemField {
        match self {
            LineItemEdit::ItemName(_) => LineItemField::ItemName,
            LineItemEdit::Units(_) => LineItemField::Units,
            LineItemEdit::ValuePerUnit(_) => LineItemField::ValuePerUnit,
        }
    }

    /// Builds an edit from a form field name and its raw text value.
    ///
    /// Numeric fields must hold a finite, non-negative number; an empty
    /// input is rejected rather than read as zero.
    ///
    /// ## Example
    /// ```rust
    /// use sponsor_core::{LineItemEdit, Money};
    ///
    /// assert_eq!(LineItemEdit::parse("units", "10").unwrap(), LineItemEdit::Units(10));
    /// assert_eq!(
    ///     LineItemEdit::parse("valuePerUnit", "4.5").unwrap(),
    ///     LineItemEdit::ValuePerUnit(Money::from_cents(450))
    /// );
    /// assert!(LineItemEdit::parse("units", "").is_err());
    /// assert!(LineItemEdit::parse("colour", "red").is_err());
    /// ```
    pub fn parse(field: &str, value: &str) -> CoreResult<Self> {
        let field: LineItemField = field.parse()?;

        match field {
            LineItemField::ItemName => Ok(LineItemEdit::ItemName(value.to_string())),
            LineItemField::Units => {
                let number = parse_number(field.as_str(), value)?;
                Ok(LineItemEdit::Units(count_from_input(field.as_str(), number)?))
            }
            LineItemField::ValuePerUnit => {
                let number = parse_number(field.as_str(), value)?;
                Ok(LineItemEdit::ValuePerUnit(amount_from_input(field.as_str(), number)?))
            }
        }
    }
}

fn parse_number(field: &str, value: &str) -> CoreResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CoreError::invalid_input(field, format!("'{}' is not a number", value)))
}

impl EditableRow for LineItem {
    type Edit = LineItemEdit;

    /// Writes the field and recomputes `total_value` in one step.
    fn apply_edit(&self, edit: LineItemEdit) -> CoreResult<Self> {
        match edit {
            LineItemEdit::ItemName(name) => Ok(LineItem {
                item_name: name,
                ..self.clone()
            }),
            LineItemEdit::Units(units) => LineItem::new(self.item_name.clone(), units, self.value_per_unit),
            LineItemEdit::ValuePerUnit(value) => LineItem::new(self.item_name.clone(), self.units, value),
        }
    }
}

impl BlankRow for LineItem {
    fn blank() -> Self {
        LineItem {
            item_name: String::new(),
            units: 0,
            value_per_unit: Money::zero(),
            total_value: Money::zero(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemFields {
    item_name: String,
    units: i64,
    value_per_unit: Money,
}

/// Incoming `totalValue` is ignored and recomputed.
impl<'de> Deserialize<'de> for LineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = LineItemFields::deserialize(deserializer)?;
        LineItem::new(fields.item_name, fields.units, fields.value_per_unit)
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Meal Entry
// =============================================================================

/// One meal slot in a food cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    people: i64,
    meal_type: MealType,
    cost_per_person: Money,
}

impl MealEntry {
    pub fn new(people: i64, meal_type: MealType, cost_per_person: Money) -> CoreResult<Self> {
        ensure_non_negative_count("people", people)?;
        ensure_non_negative_money("costPerPerson", cost_per_person)?;
        checked_total("subtotal", cost_per_person, people)?;

        Ok(MealEntry {
            people,
            meal_type,
            cost_per_person,
        })
    }

    pub fn people(&self) -> i64 {
        self.people
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn cost_per_person(&self) -> Money {
        self.cost_per_person
    }

    /// `people × cost_per_person`. The constructor has already checked it fits.
    pub fn subtotal(&self) -> Money {
        self.cost_per_person.times(self.people)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealEdit {
    People(i64),
    MealType(MealType),
    CostPerPerson(Money),
}

impl EditableRow for MealEntry {
    type Edit = MealEdit;

    fn apply_edit(&self, edit: MealEdit) -> CoreResult<Self> {
        match edit {
            MealEdit::People(people) => MealEntry::new(people, self.meal_type, self.cost_per_person),
            MealEdit::MealType(meal_type) => Ok(MealEntry {
                meal_type,
                ..self.clone()
            }),
            MealEdit::CostPerPerson(cost) => MealEntry::new(self.people, self.meal_type, cost),
        }
    }
}

impl BlankRow for MealEntry {
    fn blank() -> Self {
        MealEntry {
            people: 0,
            meal_type: MealType::default(),
            cost_per_person: Money::zero(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealEntryFields {
    people: i64,
    meal_type: MealType,
    cost_per_person: Money,
}

impl<'de> Deserialize<'de> for MealEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = MealEntryFields::deserialize(deserializer)?;
        MealEntry::new(fields.people, fields.meal_type, fields.cost_per_person)
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Accommodation Person
// =============================================================================

/// A guest who needs accommodation for the event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationPerson {
    pub name: String,
    #[ts(as = "Option<String>")]
    pub arrival_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub departure_date: Option<NaiveDate>,
    pub food_included: bool,
}

impl AccommodationPerson {
    /// Checks that departure does not precede arrival when both are known.
    pub fn validate_stay(&self) -> CoreResult<()> {
        if let (Some(arrival), Some(departure)) = (self.arrival_date, self.departure_date) {
            if departure < arrival {
                return Err(ValidationError::InvalidFormat {
                    field: "departureDate".to_string(),
                    reason: format!("{} is before arrival on {}", departure, arrival),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccommodationEdit {
    Name(String),
    ArrivalDate(Option<NaiveDate>),
    DepartureDate(Option<NaiveDate>),
    FoodIncluded(bool),
}

impl EditableRow for AccommodationPerson {
    type Edit = AccommodationEdit;

    fn apply_edit(&self, edit: AccommodationEdit) -> CoreResult<Self> {
        let mut next = self.clone();
        match edit {
            AccommodationEdit::Name(name) => next.name = name,
            AccommodationEdit::ArrivalDate(date) => next.arrival_date = date,
            AccommodationEdit::DepartureDate(date) => next.departure_date = date,
            AccommodationEdit::FoodIncluded(food) => next.food_included = food,
        }
        Ok(next)
    }
}

impl BlankRow for AccommodationPerson {
    fn blank() -> Self {
        AccommodationPerson::default()
    }
}

// =============================================================================
// Event Association
// =============================================================================

/// An event the sponsor is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventAssociation {
    pub event_name: String,
    pub association_type: AssociationType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventEdit {
    EventName(String),
    AssociationType(AssociationType),
}

impl EditableRow for EventAssociation {
    type Edit = EventEdit;

    fn apply_edit(&self, edit: EventEdit) -> CoreResult<Self> {
        let mut next = self.clone();
        match edit {
            EventEdit::EventName(name) => next.event_name = name,
            EventEdit::AssociationType(kind) => next.association_type = kind,
        }
        Ok(next)
    }
}

impl BlankRow for EventAssociation {
    fn blank() -> Self {
        EventAssociation::default()
    }
}

// =============================================================================
// Department Assignment
// =============================================================================

/// A department asked to work on a task, with instructions.
///
/// There is no blank assignment: rows are created by picking a free
/// department (see `TaskForm::add_department`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAssignment {
    pub department: Department,
    pub message: String,
}

impl DepartmentAssignment {
    pub fn new(department: Department) -> Self {
        DepartmentAssignment {
            department,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentEdit {
    Department(Department),
    Message(String),
}

impl EditableRow for DepartmentAssignment {
    type Edit = DepartmentEdit;

    fn apply_edit(&self, edit: DepartmentEdit) -> CoreResult<Self> {
        let mut next = self.clone();
        match edit {
            DepartmentEdit::Department(department) => next.department = department,
            DepartmentEdit::Message(message) => next.message = message,
        }
        Ok(next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_total() {
        let item = LineItem::new("Poster", 10, Money::from_major(5)).unwrap();
        assert_eq!(item.total_value(), Money::from_major(50));
    }

    #[test]
    fn test_line_item_rejects_negative() {
        assert!(matches!(
            LineItem::new("Poster", 1, Money::from_cents(-1)),
            Err(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_line_item_edit_recomputes_total() {
        let item = LineItem::new("Poster", 10, Money::from_major(5)).unwrap();

        let more = item.apply_edit(LineItemEdit::Units(12)).unwrap();
        assert_eq!(more.total_value(), Money::from_major(60));

        let pricier = more.apply_edit(LineItemEdit::ValuePerUnit(Money::from_major(6))).unwrap();
        assert_eq!(pricier.total_value(), Money::from_major(72));

        let renamed = pricier.apply_edit(LineItemEdit::ItemName("A2 Poster".into())).unwrap();
        assert_eq!(renamed.item_name(), "A2 Poster");
        assert_eq!(renamed.total_value(), Money::from_major(72));
    }

    #[test]
    fn test_line_item_field_names() {
        assert_eq!(LineItemEdit::Units(1).field(), LineItemField::Units);
        assert!(matches!(
            LineItemEdit::parse("totalValue", "1"),
            Err(CoreError::Validation(ValidationError::NotAllowed { .. }))
        ));
        assert!(LineItemEdit::parse("units", "NaN").is_err());
        assert!(LineItemEdit::parse("units", "-2").is_err());
    }

    #[test]
    fn test_line_item_deserialize_recomputes_total() {
        let json = r#"{"itemName":"Banner","units":3,"valuePerUnit":5000,"totalValue":1}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.total_value(), Money::from_major(150));

        let bad = r#"{"itemName":"Banner","units":-3,"valuePerUnit":5000}"#;
        assert!(serde_json::from_str::<LineItem>(bad).is_err());
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = LineItem::new("Banner", 3, Money::from_major(50)).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["totalValue"], 15000);
        assert_eq!(json["valuePerUnit"], 5000);
    }

    #[test]
    fn test_line_item_rejects_overflowing_total() {
        let err = LineItem::new("Banner", i64::MAX, Money::from_major(50)).unwrap_err();
        assert_eq!(err, CoreError::invalid_input("totalValue", "amount out of range"));

        let item = LineItem::new("Banner", 3, Money::from_major(50)).unwrap();
        let huge = LineItemEdit::parse("units", "1e17").unwrap();
        assert!(matches!(item.apply_edit(huge), Err(CoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_meal_rejects_overflowing_subtotal() {
        assert!(MealEntry::new(i64::MAX, MealType::Dinner, Money::from_major(12)).is_err());

        let json = r#"{"people":4611686018427387904,"mealType":"lunch","costPerPerson":2}"#;
        assert!(serde_json::from_str::<MealEntry>(json).is_err());
    }

    #[test]
    fn test_meal_subtotal() {
        let meal = MealEntry::new(20, MealType::Lunch, Money::from_major(8)).unwrap();
        assert_eq!(meal.subtotal(), Money::from_major(160));
        assert!(MealEntry::new(-1, MealType::Lunch, Money::zero()).is_err());
        assert!(meal.apply_edit(MealEdit::CostPerPerson(Money::from_cents(-5))).is_err());
    }

    #[test]
    fn test_accommodation_stay_validation() {
        let mut guest = AccommodationPerson::blank();
        assert!(guest.validate_stay().is_ok());

        guest.arrival_date = NaiveDate::from_ymd_opt(2025, 3, 10);
        guest.departure_date = NaiveDate::from_ymd_opt(2025, 3, 8);
        assert!(guest.validate_stay().is_err());

        guest.departure_date = NaiveDate::from_ymd_opt(2025, 3, 12);
        assert!(guest.validate_stay().is_ok());
    }

    #[test]
    fn test_event_defaults_to_powered() {
        let event = EventAssociation::blank();
        assert_eq!(event.association_type, AssociationType::Powered);
        let renamed = event.apply_edit(EventEdit::EventName("TechFest".into())).unwrap();
        assert_eq!(renamed.event_name, "TechFest");
    }
}
