//! Add task form.
//!
//! A task is assigned to one or more departments. Cost tasks additionally
//! carry one of five cost sub-forms, picked by the cost type:
//!
//! ```text
//! posters / standee / banner ──► PrintOrder (one kept per material)
//! accommodation ───────────────► guest list   (at least one row)
//! food ────────────────────────► meal list    (at least one row)
//! ```
//!
//! Switching the cost type does not clear the other sub-forms; only the
//! one matching the cost type at submit time is sent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::aggregation::sum_meals;
use crate::collection::{EditableList, EditableRow};
use crate::costs::{CostBreakdown, CostDetails, PrintEdit, PrintMaterial, PrintOrder};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rows::{AccommodationPerson, DepartmentAssignment, DepartmentEdit, MealEntry};
use crate::types::{CostType, Department, PaymentType, ProofType, TaskType};
use crate::validation::{validate_description, validate_text, MIN_NAME_LEN};

/// Scalar fields of the task form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub proof_required: ProofType,
    pub cost_type: Option<CostType>,
    pub payment_type: Option<PaymentType>,
    pub estimated_cost: Money,
    /// Name of the additional file, if one was attached.
    pub attachment_name: Option<String>,
}

impl TaskDraft {
    /// An empty draft due on `due_date`.
    pub fn new(due_date: NaiveDate) -> Self {
        TaskDraft {
            title: String::new(),
            description: String::new(),
            task_type: TaskType::Standard,
            due_date,
            proof_required: ProofType::Image,
            cost_type: None,
            payment_type: None,
            estimated_cost: Money::zero(),
            attachment_name: None,
        }
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        TaskDraft::new(Utc::now().date_naive())
    }
}

/// The task form with department assignments and every cost sub-form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub draft: TaskDraft,
    departments: EditableList<DepartmentAssignment>,
    posters: PrintOrder,
    standee: PrintOrder,
    banner: PrintOrder,
    pub accommodation: EditableList<AccommodationPerson>,
    pub meals: EditableList<MealEntry>,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::with_draft(TaskDraft::default())
    }
}

impl TaskForm {
    pub fn new(due_date: NaiveDate) -> Self {
        TaskForm::with_draft(TaskDraft::new(due_date))
    }

    fn with_draft(draft: TaskDraft) -> Self {
        TaskForm {
            draft,
            departments: EditableList::empty("departments"),
            posters: PrintOrder::empty(PrintMaterial::Posters),
            standee: PrintOrder::empty(PrintMaterial::Standee),
            banner: PrintOrder::empty(PrintMaterial::Banner),
            accommodation: EditableList::new("accommodation", crate::MIN_ACCOMMODATION_ROWS),
            meals: EditableList::new("meals", crate::MIN_MEAL_ROWS),
        }
    }

    // -------------------------------------------------------------------------
    // Departments
    // -------------------------------------------------------------------------

    pub fn departments(&self) -> &[DepartmentAssignment] {
        self.departments.rows()
    }

    /// Adds the first catalog department not already selected.
    ///
    /// ## Returns
    /// - `Ok(index)` of the new row
    /// - `Err(NoDepartmentAvailable)` when every department is taken
    pub fn add_department(&mut self, catalog: &[Department]) -> CoreResult<usize> {
        let next = catalog
            .iter()
            .find(|d| !self.is_selected(d.id, None))
            .cloned()
            .ok_or(CoreError::NoDepartmentAvailable {
                available: catalog.len(),
            })?;

        tracing::debug!(department = %next.name, "department added to task");
        Ok(self.departments.push(DepartmentAssignment::new(next)))
    }

    /// Points row `index` at a different department.
    ///
    /// Fails with `DuplicateDepartment` if another row already uses it.
    pub fn select_department(&mut self, index: usize, department: Department) -> CoreResult<()> {
        if self.is_selected(department.id, Some(index)) {
            return Err(CoreError::DuplicateDepartment { name: department.name });
        }
        self.departments.update(index, DepartmentEdit::Department(department))?;
        Ok(())
    }

    pub fn set_department_message(&mut self, index: usize, message: impl Into<String>) -> CoreResult<()> {
        self.departments.update(index, DepartmentEdit::Message(message.into()))?;
        Ok(())
    }

    pub fn remove_department(&mut self, index: usize) -> CoreResult<DepartmentAssignment> {
        self.departments.remove(index)
    }

    /// Departments row `index` may switch to: its own plus every unselected one.
    pub fn available_departments<'a>(&self, catalog: &'a [Department], index: usize) -> Vec<&'a Department> {
        catalog
            .iter()
            .filter(|d| !self.is_selected(d.id, Some(index)))
            .collect()
    }

    fn is_selected(&self, department_id: u32, except: Option<usize>) -> bool {
        self.departments
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != except && row.department.id == department_id)
    }

    // -------------------------------------------------------------------------
    // Cost sub-forms
    // -------------------------------------------------------------------------

    pub fn print_order(&self, material: PrintMaterial) -> &PrintOrder {
        match material {
            PrintMaterial::Posters => &self.posters,
            PrintMaterial::Standee => &self.standee,
            PrintMaterial::Banner => &self.banner,
        }
    }

    /// Edits the order for `material`; the order is unchanged on error.
    pub fn update_print_order(&mut self, material: PrintMaterial, edit: PrintEdit) -> CoreResult<&PrintOrder> {
        let slot = match material {
            PrintMaterial::Posters => &mut self.posters,
            PrintMaterial::Standee => &mut self.standee,
            PrintMaterial::Banner => &mut self.banner,
        };
        *slot = slot.apply_edit(edit)?;
        Ok(&*slot)
    }

    /// Sum of `people × cost_per_person` over the meal rows.
    pub fn total_food_cost(&self) -> CoreResult<Money> {
        sum_meals(self.meals.rows())
    }

    fn cost_details(&self) -> CoreResult<CostDetails> {
        let cost_type = self.draft.cost_type.ok_or(CoreError::MissingCostType)?;

        let breakdown = match cost_type {
            CostType::Posters => CostBreakdown::Print(self.posters.clone()),
            CostType::Standee => CostBreakdown::Print(self.standee.clone()),
            CostType::Banner => CostBreakdown::Print(self.banner.clone()),
            CostType::Accommodation => {
                for person in &self.accommodation {
                    person.validate_stay()?;
                }
                CostBreakdown::Accommodation(self.accommodation.rows().to_vec())
            }
            CostType::Food => CostBreakdown::Food(self.meals.rows().to_vec()),
        };

        CostDetails::new(
            cost_type,
            self.draft.payment_type,
            self.draft.estimated_cost,
            breakdown,
        )
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// Validates the form and builds the submission for `sponsor_id`.
    ///
    /// ## Rules
    /// - title: at least 2 characters
    /// - description: at least 10 characters
    /// - cost tasks: a cost type is required, and its sub-form must be valid
    pub fn submit(&self, sponsor_id: u32) -> CoreResult<TaskSubmission> {
        let draft = &self.draft;

        validate_text("title", &draft.title, MIN_NAME_LEN)?;
        validate_description(&draft.description)?;

        let cost_details = match draft.task_type {
            TaskType::Standard => None,
            TaskType::Cost => Some(self.cost_details()?),
        };

        let submission = TaskSubmission {
            id: Uuid::new_v4(),
            sponsor_id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            task_type: draft.task_type,
            due_date: draft.due_date,
            proof_required: draft.proof_required,
            department_count: self.departments.len(),
            departments: self.departments.rows().to_vec(),
            attachment_name: draft.attachment_name.clone(),
            cost_details,
            submitted_at: Utc::now(),
        };

        tracing::info!(
            id = %submission.id,
            sponsor_id,
            title = %submission.title,
            departments = submission.department_count,
            "task added"
        );
        Ok(submission)
    }
}

/// A validated task, ready to hand to whatever stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaskSubmission {
    #[ts(as = "String")]
    pub id: Uuid,
    pub sponsor_id: u32,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub proof_required: ProofType,
    pub departments: Vec<DepartmentAssignment>,
    pub department_count: usize,
    pub attachment_name: Option<String>,
    /// Present only for cost tasks.
    pub cost_details: Option<CostDetails>,
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{AccommodationEdit, MealEdit};
    use crate::types::{default_departments, MealType};

    fn form() -> TaskForm {
        let mut form = TaskForm::new(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        form.draft.title = "Stage banners".to_string();
        form.draft.description = "Print and hang the sponsor banners".to_string();
        form
    }

    #[test]
    fn test_add_department_never_duplicates() {
        let catalog = default_departments();
        let mut form = form();

        for expected in 0..catalog.len() {
            assert_eq!(form.add_department(&catalog).unwrap(), expected);
        }
        assert!(matches!(
            form.add_department(&catalog),
            Err(CoreError::NoDepartmentAvailable { available: 6 })
        ));

        let mut ids: Vec<u32> = form.departments().iter().map(|a| a.department.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_add_department_fills_gap_after_remove() {
        let catalog = default_departments();
        let mut form = form();
        form.add_department(&catalog).unwrap();
        form.add_department(&catalog).unwrap();
        form.remove_department(0).unwrap();

        form.add_department(&catalog).unwrap();
        assert_eq!(form.departments()[1].department.name, "Marketing");
    }

    #[test]
    fn test_select_department_rejects_duplicate() {
        let catalog = default_departments();
        let mut form = form();
        form.add_department(&catalog).unwrap();
        form.add_department(&catalog).unwrap();

        let err = form.select_department(1, catalog[0].clone()).unwrap_err();
        assert_eq!(err, CoreError::DuplicateDepartment { name: "Marketing".into() });

        // re-selecting its own department is fine
        form.select_department(1, catalog[1].clone()).unwrap();
        form.select_department(1, catalog[4].clone()).unwrap();
        assert_eq!(form.departments()[1].department.name, "Digital");
    }

    #[test]
    fn test_available_departments() {
        let catalog = default_departments();
        let mut form = form();
        form.add_department(&catalog).unwrap();
        form.add_department(&catalog).unwrap();

        let choices: Vec<u32> = form.available_departments(&catalog, 0).iter().map(|d| d.id).collect();
        assert_eq!(choices, vec![1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_total_food_cost() {
        let mut form = form();
        form.meals.update(0, MealEdit::People(20)).unwrap();
        form.meals.update(0, MealEdit::CostPerPerson(Money::from_major(8))).unwrap();
        let i = form.meals.add_row();
        form.meals.update(i, MealEdit::People(20)).unwrap();
        form.meals.update(i, MealEdit::MealType(MealType::Dinner)).unwrap();
        form.meals.update(i, MealEdit::CostPerPerson(Money::from_major(12))).unwrap();

        assert_eq!(form.total_food_cost().unwrap(), Money::from_major(400));
    }

    #[test]
    fn test_last_meal_and_guest_rows_cannot_be_removed() {
        let mut form = form();
        assert!(matches!(form.meals.remove(0), Err(CoreError::MinimumRows { .. })));
        assert!(matches!(form.accommodation.remove(0), Err(CoreError::MinimumRows { .. })));
        assert_eq!(form.meals.len(), 1);
        assert_eq!(form.accommodation.len(), 1);
    }

    #[test]
    fn test_submit_standard_task() {
        let catalog = default_departments();
        let mut form = form();
        form.add_department(&catalog).unwrap();
        form.set_department_message(0, "Logo on every poster").unwrap();

        let submission = form.submit(7).unwrap();
        assert_eq!(submission.sponsor_id, 7);
        assert_eq!(submission.department_count, 1);
        assert_eq!(submission.cost_details, None);
    }

    #[test]
    fn test_submit_validates_text() {
        let mut form = form();
        form.draft.description = "short".to_string();
        assert!(matches!(form.submit(1), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_submit_cost_task_requires_cost_type() {
        let mut form = form();
        form.draft.task_type = TaskType::Cost;
        assert_eq!(form.submit(1).unwrap_err(), CoreError::MissingCostType);
    }

    #[test]
    fn test_submit_print_cost_task() {
        let mut form = form();
        form.draft.task_type = TaskType::Cost;
        form.draft.cost_type = Some(CostType::Banner);
        form.draft.payment_type = Some(PaymentType::Custom);
        form.update_print_order(PrintMaterial::Banner, PrintEdit::Quantity(4)).unwrap();
        form.update_print_order(PrintMaterial::Banner, PrintEdit::CostPerUnit(Money::from_major(25)))
            .unwrap();
        form.update_print_order(PrintMaterial::Posters, PrintEdit::Quantity(100)).unwrap();

        let details = form.submit(1).unwrap().cost_details.unwrap();
        assert_eq!(details.payment_type(), Some(PaymentType::Custom));
        assert_eq!(details.breakdown().computed_total().unwrap(), Some(Money::from_major(100)));
    }

    #[test]
    fn test_submit_food_task_drops_payment_type() {
        let mut form = form();
        form.draft.task_type = TaskType::Cost;
        form.draft.cost_type = Some(CostType::Food);
        form.draft.payment_type = Some(PaymentType::Event);

        let details = form.submit(1).unwrap().cost_details.unwrap();
        assert_eq!(details.cost_type(), CostType::Food);
        assert_eq!(details.payment_type(), None);
    }

    #[test]
    fn test_submit_accommodation_checks_dates() {
        let mut form = form();
        form.draft.task_type = TaskType::Cost;
        form.draft.cost_type = Some(CostType::Accommodation);
        form.accommodation
            .update(0, AccommodationEdit::ArrivalDate(NaiveDate::from_ymd_opt(2026, 11, 3)))
            .unwrap();
        form.accommodation
            .update(0, AccommodationEdit::DepartureDate(NaiveDate::from_ymd_opt(2026, 11, 1)))
            .unwrap();
        assert!(form.submit(1).is_err());

        form.accommodation
            .update(0, AccommodationEdit::DepartureDate(NaiveDate::from_ymd_opt(2026, 11, 5)))
            .unwrap();
        let details = form.submit(1).unwrap().cost_details.unwrap();
        assert_eq!(details.breakdown().headcount(), Some(1));
    }
}
