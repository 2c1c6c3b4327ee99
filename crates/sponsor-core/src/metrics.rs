//! # Sponsor Metrics
//!
//! Snapshot record shapes and the per-sponsor figures derived from them.
//!
//! ```text
//! SponsorRecord ──► SponsorMetrics::compute ──► total value
//!                                            ├─► sponsor type
//!                                            ├─► completion rate  (None if 0 deliverables)
//!                                            └─► profit margin    (None if 0 value)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregation::{completion_rate, CompletionRate, CostRecord, ProfitMargin, SponsorFinancials};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CostType, Department, DeliverableStatus, Priority, SponsorStatus, SponsorType, TaskType};
use crate::validation::ensure_non_negative_count;

// =============================================================================
// Snapshot Records
// =============================================================================

/// A sponsor as stored in the data snapshot. Amounts are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SponsorRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: SponsorStatus,
    pub cash_value: Money,
    pub in_kind_value: Money,
    pub estimated_cost: Money,
    #[serde(default)]
    pub actual_cost: Option<Money>,
    pub total_deliverables: i64,
    pub completed_deliverables: i64,
}

impl SponsorRecord {
    pub fn financials(&self) -> SponsorFinancials {
        SponsorFinancials::new(self.cash_value, self.in_kind_value)
    }

    pub fn cost_record(&self) -> CostRecord {
        CostRecord {
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
        }
    }

    pub fn deliverable_set(&self) -> CoreResult<DeliverableSet> {
        DeliverableSet::new(self.completed_deliverables, self.total_deliverables)
    }
}

/// A task assigned to a department on behalf of a sponsor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: u32,
    pub sponsor_id: u32,
    pub title: String,
    pub department_id: u32,
    #[serde(default)]
    pub status: DeliverableStatus,
    #[serde(default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub cost_type: Option<CostType>,
    #[serde(default)]
    pub estimated_cost: Money,
    #[serde(default)]
    pub actual_cost: Option<Money>,
}

impl Deliverable {
    pub fn is_completed(&self) -> bool {
        self.status == DeliverableStatus::Completed
    }

    /// Actual cost when recorded, else the estimate.
    pub fn effective_cost(&self) -> Money {
        self.actual_cost.unwrap_or(self.estimated_cost)
    }

    /// Text for the "Cost Type" column.
    ///
    /// `"N/A"` for standard tasks; a cost task without a recorded cost
    /// type shows `"Standard"`.
    pub fn cost_label(&self) -> &'static str {
        match (self.task_type, self.cost_type) {
            (TaskType::Standard, _) => "N/A",
            (TaskType::Cost, Some(cost_type)) => cost_type.as_str(),
            (TaskType::Cost, None) => "Standard",
        }
    }

    /// Looks up the assigned department's name in `catalog`.
    pub fn department_name<'a>(&self, catalog: &'a [Department]) -> Option<&'a str> {
        catalog
            .iter()
            .find(|d| d.id == self.department_id)
            .map(|d| d.name.as_str())
    }
}

// =============================================================================
// Deliverable Set
// =============================================================================

/// Completed and total deliverable counts for one sponsor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliverableSet {
    completed: i64,
    total: i64,
}

impl DeliverableSet {
    pub fn new(completed: i64, total: i64) -> CoreResult<Self> {
        ensure_non_negative_count("completedDeliverables", completed)?;
        ensure_non_negative_count("totalDeliverables", total)?;
        if completed > total {
            return Err(CoreError::invalid_input(
                "completedDeliverables",
                format!("{} completed exceeds {} total", completed, total),
            ));
        }
        Ok(DeliverableSet { completed, total })
    }

    /// Counts completed deliverables among `deliverables`.
    pub fn from_deliverables<'a, I>(deliverables: I) -> Self
    where
        I: IntoIterator<Item = &'a Deliverable>,
    {
        deliverables
            .into_iter()
            .fold(DeliverableSet::default(), |mut set, d| {
                set.total += 1;
                if d.is_completed() {
                    set.completed += 1;
                }
                set
            })
    }

    pub fn completed(&self) -> i64 {
        self.completed
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn completion_rate(&self) -> CoreResult<CompletionRate> {
        completion_rate(self.completed, self.total)
    }
}

// =============================================================================
// Sponsor Metrics
// =============================================================================

/// Derived figures for one sponsor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SponsorMetrics {
    pub total_value: Money,
    pub sponsor_type: SponsorType,
    pub unfunded: bool,
    /// `None` when the sponsor has no deliverables.
    pub completion_rate: Option<CompletionRate>,
    /// `None` when the sponsor's total value is zero.
    pub profit_margin: Option<ProfitMargin>,
}

impl SponsorMetrics {
    /// Computes every derived figure for `record`.
    ///
    /// Undefined ratios come back as `None`. Negative amounts or counts
    /// are still errors.
    pub fn compute(record: &SponsorRecord) -> CoreResult<Self> {
        let financials = record.financials();
        let total_value = financials.total_value()?;

        let metrics = SponsorMetrics {
            total_value,
            sponsor_type: financials.sponsor_type()?,
            unfunded: financials.is_unfunded(),
            completion_rate: defined(record.deliverable_set()?.completion_rate())?,
            profit_margin: defined(record.cost_record().profit_margin(total_value))?,
        };

        tracing::debug!(
            sponsor_id = record.id,
            total_cents = total_value.cents(),
            sponsor_type = %metrics.sponsor_type,
            "computed sponsor metrics"
        );
        Ok(metrics)
    }
}

/// Turns an indeterminate ratio into `None`, passing other errors through.
fn defined<T>(result: CoreResult<T>) -> CoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_indeterminate() => Ok(None),
        Err(err) => Err(err),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_departments;

    fn record() -> SponsorRecord {
        SponsorRecord {
            id: 1,
            name: "Acme".to_string(),
            legal_name: "Acme Holdings LLC".to_string(),
            level: "Gold".to_string(),
            priority: Priority::High,
            status: SponsorStatus::Active,
            cash_value: Money::from_major(7_000),
            in_kind_value: Money::from_major(3_000),
            estimated_cost: Money::from_major(6_000),
            actual_cost: None,
            total_deliverables: 5,
            completed_deliverables: 2,
        }
    }

    fn deliverable(id: u32, status: DeliverableStatus) -> Deliverable {
        Deliverable {
            id,
            sponsor_id: 1,
            title: format!("Task {}", id),
            department_id: 1,
            status,
            task_type: TaskType::Standard,
            cost_type: None,
            estimated_cost: Money::zero(),
            actual_cost: None,
        }
    }

    #[test]
    fn test_compute_metrics() {
        let metrics = SponsorMetrics::compute(&record()).unwrap();
        assert_eq!(metrics.total_value, Money::from_major(10_000));
        assert_eq!(metrics.sponsor_type, SponsorType::Hybrid);
        assert!(!metrics.unfunded);
        assert_eq!(metrics.completion_rate.map(|r| r.percent()), Some(40));
        assert_eq!(metrics.profit_margin.map(|m| m.bps()), Some(4_000));
    }

    #[test]
    fn test_compute_metrics_indeterminate_ratios() {
        let mut r = record();
        r.cash_value = Money::zero();
        r.in_kind_value = Money::zero();
        r.total_deliverables = 0;
        r.completed_deliverables = 0;

        let metrics = SponsorMetrics::compute(&r).unwrap();
        assert!(metrics.unfunded);
        assert_eq!(metrics.sponsor_type, SponsorType::InKind);
        assert_eq!(metrics.completion_rate, None);
        assert_eq!(metrics.profit_margin, None);
    }

    #[test]
    fn test_compute_metrics_rejects_bad_counts() {
        let mut r = record();
        r.completed_deliverables = 9;
        assert!(matches!(SponsorMetrics::compute(&r), Err(CoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_compute_metrics_rejects_total_beyond_cents_range() {
        let json = r#"{ "id": 3, "name": "Maxed", "cashValue": 9223372036854775807, "inKindValue": 1,
                        "estimatedCost": 0, "totalDeliverables": 1, "completedDeliverables": 0 }"#;
        let r: SponsorRecord = serde_json::from_str(json).unwrap();

        let err = SponsorMetrics::compute(&r).unwrap_err();
        assert_eq!(err, CoreError::invalid_input("totalValue", "amount out of range"));
    }

    #[test]
    fn test_deliverable_set_from_deliverables() {
        let list = vec![
            deliverable(1, DeliverableStatus::Completed),
            deliverable(2, DeliverableStatus::InProgress),
            deliverable(3, DeliverableStatus::Completed),
            deliverable(4, DeliverableStatus::Pending),
        ];
        let set = DeliverableSet::from_deliverables(&list);
        assert_eq!((set.completed(), set.total()), (2, 4));
        assert_eq!(set.completion_rate().unwrap().percent(), 50);

        let empty = DeliverableSet::from_deliverables(&Vec::<Deliverable>::new());
        assert!(empty.completion_rate().unwrap_err().is_indeterminate());
    }

    #[test]
    fn test_deliverable_cost_label_and_cost() {
        let mut d = deliverable(1, DeliverableStatus::Pending);
        assert_eq!(d.cost_label(), "N/A");

        d.task_type = TaskType::Cost;
        assert_eq!(d.cost_label(), "Standard");

        d.cost_type = Some(CostType::Posters);
        d.estimated_cost = Money::from_major(500);
        assert_eq!(d.cost_label(), "posters");
        assert_eq!(d.effective_cost(), Money::from_major(500));

        d.actual_cost = Some(Money::from_major(450));
        assert_eq!(d.effective_cost(), Money::from_major(450));
    }

    #[test]
    fn test_department_name() {
        let mut d = deliverable(1, DeliverableStatus::Pending);
        let catalog = default_departments();
        d.department_id = 4;
        assert_eq!(d.department_name(&catalog), Some("PR & Communications"));
        d.department_id = 99;
        assert_eq!(d.department_name(&catalog), None);
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Globex",
            "cashValue": 500000,
            "inKindValue": 0,
            "estimatedCost": 200000,
            "totalDeliverables": 3,
            "completedDeliverables": 1
        }"#;
        let r: SponsorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.cash_value, Money::from_major(5_000));
        assert_eq!(r.status, SponsorStatus::Pending);
        assert_eq!(r.actual_cost, None);
    }
}
