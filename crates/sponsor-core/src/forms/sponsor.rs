//! Add / edit sponsor form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::aggregation::{sum_line_items, SponsorFinancials};
use crate::collection::EditableList;
use crate::error::CoreResult;
use crate::metrics::SponsorRecord;
use crate::money::Money;
use crate::rows::{EventAssociation, LineItem};
use crate::types::{Priority, SponsorType};
use crate::validation::{
    ensure_non_negative_money, validate_positive_count, validate_positive_money, validate_text, MIN_NAME_LEN,
};

/// Scalar fields of the sponsor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SponsorDraft {
    pub name: String,
    pub legal_name: String,
    pub sponsor_type: SponsorType,
    pub cash_value: Money,
    pub in_kind_value: Money,
    pub level: String,
    pub priority: Priority,
}

impl Default for SponsorDraft {
    fn default() -> Self {
        SponsorDraft {
            name: String::new(),
            legal_name: String::new(),
            sponsor_type: SponsorType::Cash,
            cash_value: Money::zero(),
            in_kind_value: Money::zero(),
            level: String::new(),
            priority: Priority::Mid,
        }
    }
}

/// The sponsor form: scalar draft plus the in-kind item and event tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SponsorForm {
    pub draft: SponsorDraft,
    pub items: EditableList<LineItem>,
    pub events: EditableList<EventAssociation>,
    /// Name of the attached MOU file, if any. Only the name is carried.
    pub mou_file_name: Option<String>,
}

impl Default for SponsorForm {
    fn default() -> Self {
        SponsorForm::new()
    }
}

impl SponsorForm {
    pub fn new() -> Self {
        SponsorForm {
            draft: SponsorDraft::default(),
            items: EditableList::empty("items"),
            events: EditableList::empty("associatedEvents"),
            mou_file_name: None,
        }
    }

    /// Prefills the form from a saved sponsor for editing.
    pub fn from_record(record: &SponsorRecord) -> CoreResult<Self> {
        let sponsor_type = record.financials().sponsor_type()?;
        Ok(SponsorForm {
            draft: SponsorDraft {
                name: record.name.clone(),
                legal_name: record.legal_name.clone(),
                sponsor_type,
                cash_value: record.cash_value,
                in_kind_value: record.in_kind_value,
                level: record.level.clone(),
                priority: record.priority,
            },
            ..SponsorForm::new()
        })
    }

    /// Sum of every in-kind item row.
    pub fn items_total(&self) -> CoreResult<Money> {
        sum_line_items(self.items.rows())
    }

    /// Validates the form and builds the submission.
    ///
    /// ## Rules
    /// - name and legal name: at least 2 characters
    /// - cash and in-kind values: not negative
    /// - every item: units > 0 and value per unit > 0
    pub fn submit(&self) -> CoreResult<SponsorSubmission> {
        let draft = &self.draft;

        validate_text("name", &draft.name, MIN_NAME_LEN)?;
        validate_text("legalName", &draft.legal_name, MIN_NAME_LEN)?;
        ensure_non_negative_money("cashValue", draft.cash_value)?;
        ensure_non_negative_money("inKindValue", draft.in_kind_value)?;

        for item in &self.items {
            validate_positive_count("units", item.units())?;
            validate_positive_money("valuePerUnit", item.value_per_unit())?;
        }

        let financials = SponsorFinancials::new(draft.cash_value, draft.in_kind_value);
        let classified_type = financials.sponsor_type()?;
        if classified_type != draft.sponsor_type {
            tracing::debug!(
                declared = %draft.sponsor_type,
                classified = %classified_type,
                "declared sponsor type differs from values"
            );
        }

        let submission = SponsorSubmission {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            legal_name: draft.legal_name.trim().to_string(),
            declared_type: draft.sponsor_type,
            classified_type,
            cash_value: draft.cash_value,
            in_kind_value: draft.in_kind_value,
            total_value: financials.total_value()?,
            items_total: self.items_total()?,
            level: draft.level.clone(),
            priority: draft.priority,
            items: self.items.rows().to_vec(),
            associated_events: self.events.rows().to_vec(),
            mou_file_name: self.mou_file_name.clone(),
            submitted_at: Utc::now(),
        };

        tracing::info!(
            id = %submission.id,
            name = %submission.name,
            items = submission.items.len(),
            events = submission.associated_events.len(),
            "sponsor form submitted"
        );
        Ok(submission)
    }
}

/// A validated sponsor, ready to hand to whatever stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SponsorSubmission {
    #[ts(as = "String")]
    pub id: Uuid,
    pub name: String,
    pub legal_name: String,
    /// Type picked in the form.
    pub declared_type: SponsorType,
    /// Type implied by the cash and in-kind values.
    pub classified_type: SponsorType,
    pub cash_value: Money,
    pub in_kind_value: Money,
    pub total_value: Money,
    pub items_total: Money,
    pub level: String,
    pub priority: Priority,
    pub items: Vec<LineItem>,
    pub associated_events: Vec<EventAssociation>,
    pub mou_file_name: Option<String>,
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::rows::{EventEdit, LineItemEdit};
    use crate::types::{AssociationType, SponsorStatus};

    fn filled_form() -> SponsorForm {
        let mut form = SponsorForm::new();
        form.draft.name = "Acme".to_string();
        form.draft.legal_name = "Acme Holdings LLC".to_string();
        form.draft.sponsor_type = SponsorType::Hybrid;
        form.draft.cash_value = Money::from_major(5_000);
        form.draft.in_kind_value = Money::from_major(200);
        form
    }

    #[test]
    fn test_item_table_drives_total() {
        let mut form = filled_form();
        let i = form.items.add_row();
        form.items.update(i, LineItemEdit::ItemName("Banner".into())).unwrap();
        form.items.update(i, LineItemEdit::Units(3)).unwrap();
        form.items.update(i, LineItemEdit::ValuePerUnit(Money::from_major(50))).unwrap();

        let j = form.items.add_row();
        form.items.update(j, LineItemEdit::Units(10)).unwrap();
        form.items.update(j, LineItemEdit::ValuePerUnit(Money::from_major(5))).unwrap();

        assert_eq!(form.items_total().unwrap(), Money::from_major(200));

        form.items.remove(0).unwrap();
        assert_eq!(form.items_total().unwrap(), Money::from_major(50));
    }

    #[test]
    fn test_submit_valid_form() {
        let mut form = filled_form();
        form.items.push(LineItem::new("Banner", 3, Money::from_major(50)).unwrap());
        let e = form.events.add_row();
        assert_eq!(form.events.rows()[e].association_type, AssociationType::Powered);
        form.events.update(e, EventEdit::EventName("Tech Summit".into())).unwrap();
        form.mou_file_name = Some("acme-mou.pdf".to_string());

        let submission = form.submit().unwrap();
        assert_eq!(submission.classified_type, SponsorType::Hybrid);
        assert_eq!(submission.total_value, Money::from_major(5_200));
        assert_eq!(submission.items_total, Money::from_major(150));
        assert_eq!(submission.associated_events.len(), 1);
        assert_eq!(submission.mou_file_name.as_deref(), Some("acme-mou.pdf"));
    }

    #[test]
    fn test_submit_rejects_short_name() {
        let mut form = filled_form();
        form.draft.name = "A".to_string();
        assert!(matches!(
            form.submit(),
            Err(CoreError::Validation(ValidationError::TooShort { .. }))
        ));
    }

    #[test]
    fn test_submit_rejects_zero_unit_item() {
        let mut form = filled_form();
        form.items.add_row();
        assert!(matches!(
            form.submit(),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_from_record_prefills() {
        let record = SponsorRecord {
            id: 3,
            name: "Initech".to_string(),
            legal_name: "Initech Inc".to_string(),
            level: "Silver".to_string(),
            priority: Priority::Low,
            status: SponsorStatus::Active,
            cash_value: Money::zero(),
            in_kind_value: Money::from_major(800),
            estimated_cost: Money::from_major(100),
            actual_cost: None,
            total_deliverables: 1,
            completed_deliverables: 0,
        };
        let form = SponsorForm::from_record(&record).unwrap();
        assert_eq!(form.draft.sponsor_type, SponsorType::InKind);
        assert_eq!(form.draft.priority, Priority::Low);
        assert!(form.items.is_empty());
    }
}
