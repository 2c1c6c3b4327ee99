//! # Domain Types
//!
//! The enumerations and small value types shared by every sponsorship form.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Sponsor side                     Task side                             │
//! │  ────────────                     ─────────                             │
//! │  SponsorType   cash/inKind/hybrid TaskType      standard/cost           │
//! │  SponsorStatus active/pending/..  ProofType     image/document/...      │
//! │  Priority      low/mid/high       CostType      posters/.../food        │
//! │  AssociationType presents/...     PaymentType   event/custom/common     │
//! │                                   PrintSize     small(A4)..xlarge(A1)   │
//! │  DeliverableStatus pending/in_progress/completed                        │
//! │  MealType      breakfast/lunch/dinner/snacks                            │
//! │  Department    { id, name }                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serde names match the values the frontend already sends, so a form
//! payload deserializes without a mapping layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Implements `FromStr` over the serde names of a unit-only enum.
macro_rules! form_value_enum {
    ($ty:ident, $field:literal, { $($text:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(ValidationError::NotAllowed {
                        field: $field.to_string(),
                        allowed: vec![$($text.to_string()),+],
                    }),
                }
            }
        }

        impl $ty {
            /// Returns the wire value sent by the frontend.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }
    };
}

// =============================================================================
// Sponsor Type
// =============================================================================

/// How a sponsor contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SponsorType {
    /// Money only.
    Cash,
    /// Goods or services valued in money.
    InKind,
    /// Both cash and in-kind.
    Hybrid,
}

form_value_enum!(SponsorType, "sponsorType", {
    "cash" => Cash,
    "inKind" => InKind,
    "hybrid" => Hybrid,
});

impl SponsorType {
    /// Label shown in the sponsors table.
    pub fn label(&self) -> &'static str {
        match self {
            SponsorType::Cash => "Cash",
            SponsorType::InKind => "In-Kind",
            SponsorType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for SponsorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Sponsor Status & Priority
// =============================================================================

/// Lifecycle state of a sponsorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SponsorStatus {
    Active,
    #[default]
    Pending,
    Completed,
}

form_value_enum!(SponsorStatus, "status", {
    "active" => Active,
    "pending" => Pending,
    "completed" => Completed,
});

/// Internal priority assigned to a sponsor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Mid,
    High,
}

form_value_enum!(Priority, "priority", {
    "low" => Low,
    "mid" => Mid,
    "high" => High,
});

// =============================================================================
// Event Association
// =============================================================================

/// How a sponsor's name is attached to an event ("X presents", "powered by X").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AssociationType {
    Presents,
    CoPowered,
    #[default]
    Powered,
}

form_value_enum!(AssociationType, "associationType", {
    "presents" => Presents,
    "coPowered" => CoPowered,
    "powered" => Powered,
});

// =============================================================================
// Deliverables & Tasks
// =============================================================================

/// Progress of a single deliverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

form_value_enum!(DeliverableStatus, "status", {
    "pending" => Pending,
    "in_progress" => InProgress,
    "completed" => Completed,
});

impl DeliverableStatus {
    /// Label shown in the deliverables table ("In progress").
    pub fn label(&self) -> &'static str {
        match self {
            DeliverableStatus::Pending => "Pending",
            DeliverableStatus::InProgress => "In progress",
            DeliverableStatus::Completed => "Completed",
        }
    }
}

/// Whether a task carries costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    Standard,
    Cost,
}

form_value_enum!(TaskType, "taskType", {
    "standard" => Standard,
    "cost" => Cost,
});

/// Evidence a department must upload to close a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProofType {
    #[default]
    Image,
    Document,
    Video,
    Other,
}

form_value_enum!(ProofType, "proofRequired", {
    "image" => Image,
    "document" => Document,
    "video" => Video,
    "other" => Other,
});

// =============================================================================
// Cost Types
// =============================================================================

/// Category of expense attached to a cost-based task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Posters,
    Standee,
    Banner,
    Accommodation,
    Food,
}

form_value_enum!(CostType, "costType", {
    "posters" => Posters,
    "standee" => Standee,
    "banner" => Banner,
    "accommodation" => Accommodation,
    "food" => Food,
});

impl CostType {
    /// Printed materials are the only cost types that take a payment type.
    pub fn is_print(&self) -> bool {
        matches!(self, CostType::Posters | CostType::Standee | CostType::Banner)
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who pays for a printed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Event-based, first person pays.
    Event,
    /// Sponsor pays.
    Custom,
    /// Common pool, first person pays.
    Common,
}

form_value_enum!(PaymentType, "paymentType", {
    "event" => Event,
    "custom" => Custom,
    "common" => Common,
});

/// Paper size of a printed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PrintSize {
    /// A4
    #[default]
    Small,
    /// A3
    Medium,
    /// A2
    Large,
    /// A1
    XLarge,
}

form_value_enum!(PrintSize, "size", {
    "small" => Small,
    "medium" => Medium,
    "large" => Large,
    "xlarge" => XLarge,
});

impl PrintSize {
    /// ISO paper format for the size.
    pub fn paper_format(&self) -> &'static str {
        match self {
            PrintSize::Small => "A4",
            PrintSize::Medium => "A3",
            PrintSize::Large => "A2",
            PrintSize::XLarge => "A1",
        }
    }
}

/// Meal slot for food costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snacks,
}

form_value_enum!(MealType, "mealType", {
    "breakfast" => Breakfast,
    "lunch" => Lunch,
    "dinner" => Dinner,
    "snacks" => Snacks,
});

// =============================================================================
// Department
// =============================================================================

/// A department that can be assigned sponsor deliverables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Department {
    pub id: u32,
    pub name: String,
}

impl Department {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Department {
            id,
            name: name.into(),
        }
    }
}

/// Departments used when the data source does not provide its own list.
pub fn default_departments() -> Vec<Department> {
    [
        (1, "Marketing"),
        (2, "Finance"),
        (3, "Events"),
        (4, "PR & Communications"),
        (5, "Digital"),
        (6, "Production"),
    ]
    .into_iter()
    .map(|(id, name)| Department::new(id, name))
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
