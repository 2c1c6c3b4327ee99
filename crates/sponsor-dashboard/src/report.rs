//! # Sponsor Report
//!
//! Turns core figures into the text shown in the sponsors table and the
//! sponsor detail view. All currency and percentage formatting lives here.
//!
//! ## Column Formats
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Column       │ Format                                                   │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ Total Value  │ $10,000        (cents shown only when non-zero: $12.50)  │
//! │ Type         │ Cash | In-Kind | Hybrid                                  │
//! │ Completion   │ 40%            placeholder when there are no tasks       │
//! │ Margin       │ 40.00%         placeholder when value is zero,           │
//! │              │ ⚠ -50.00%      marker when cost exceeds value            │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sponsor_core::{Deliverable, Department, Money, ProfitMargin, SponsorMetrics, SponsorRecord};
use std::fmt::Write as _;

use crate::config::DisplaySettings;
use crate::error::DashboardResult;
use crate::store::DataStore;

/// Prefix for a negative profit margin.
pub const OVERRUN_MARKER: &str = "⚠ ";

// =============================================================================
// Formatting
// =============================================================================

/// Formats cents as `$10,000` or `$12.50`, with thousands separators.
pub fn format_money(amount: Money, symbol: &str) -> String {
    let cents = amount.cents().unsigned_abs();
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if amount.is_negative() { "-" } else { "" };

    if fraction == 0 {
        format!("{}{}{}", sign, symbol, whole)
    } else {
        format!("{}{}{}.{:02}", sign, symbol, whole, fraction)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a margin with `decimals` places, marking cost overruns.
pub fn format_margin(margin: ProfitMargin, decimals: u8) -> String {
    let text = format!("{:.*}%", decimals as usize, margin.percentage());
    if margin.is_cost_overrun() {
        format!("{}{}", OVERRUN_MARKER, text)
    } else {
        text
    }
}

// =============================================================================
// Sponsors Table
// =============================================================================

/// One formatted row of the sponsors table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorRow {
    pub id: u32,
    pub name: String,
    pub sponsor_type: String,
    pub total_value: String,
    pub completion: String,
    pub margin: String,
    pub status: String,
    /// No cash or in-kind value pledged yet.
    pub unfunded: bool,
}

impl SponsorRow {
    pub fn build(record: &SponsorRecord, display: &DisplaySettings) -> DashboardResult<Self> {
        let metrics = SponsorMetrics::compute(record)?;

        Ok(SponsorRow {
            id: record.id,
            name: record.name.clone(),
            sponsor_type: metrics.sponsor_type.label().to_string(),
            total_value: format_money(metrics.total_value, &display.currency_symbol),
            completion: metrics
                .completion_rate
                .map(|rate| rate.to_string())
                .unwrap_or_else(|| display.placeholder.clone()),
            margin: metrics
                .profit_margin
                .map(|m| format_margin(m, display.margin_decimals))
                .unwrap_or_else(|| display.placeholder.clone()),
            status: record.status.as_str().to_string(),
            unfunded: metrics.unfunded,
        })
    }

    fn cells(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.sponsor_type.clone(),
            self.total_value.clone(),
            self.completion.clone(),
            self.margin.clone(),
            self.status.clone(),
        ]
    }
}

const HEADERS: [&str; 7] = ["ID", "Sponsor", "Type", "Total Value", "Completion", "Margin", "Status"];

/// The full sponsors table.
#[derive(Debug, Clone)]
pub struct SponsorReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SponsorRow>,
}

impl SponsorReport {
    /// Builds a row per sponsor. A sponsor with invalid figures fails the report.
    pub fn build(store: &DataStore, display: &DisplaySettings) -> DashboardResult<Self> {
        let rows = store
            .sponsors()
            .iter()
            .map(|record| SponsorRow::build(record, display))
            .collect::<DashboardResult<Vec<_>>>()?;

        Ok(SponsorReport {
            generated_at: Utc::now(),
            rows,
        })
    }

    /// Renders an aligned plain-text table.
    pub fn render(&self) -> String {
        let cells: Vec<[String; 7]> = self.rows.iter().map(SponsorRow::cells).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, HEADERS.iter().copied(), &widths);
        push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
        for row in &cells {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        let _ = writeln!(
            out,
            "\n{} sponsor(s), generated {}",
            self.rows.len(),
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        out
    }
}

fn push_line<I, S>(out: &mut String, cells: I, widths: &[usize])
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

// =============================================================================
// Sponsor Detail
// =============================================================================

/// One formatted row of the detail view's cost table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverableRow {
    pub title: String,
    pub department: String,
    pub cost_type: String,
    pub estimated: String,
    /// Actual cost, or `"Pending"` when not yet recorded.
    pub actual: String,
}

impl DeliverableRow {
    pub fn build(deliverable: &Deliverable, catalog: &[Department], display: &DisplaySettings) -> Self {
        let symbol = &display.currency_symbol;
        DeliverableRow {
            title: deliverable.title.clone(),
            department: deliverable
                .department_name(catalog)
                .map(str::to_string)
                .unwrap_or_else(|| display.placeholder.clone()),
            cost_type: deliverable.cost_label().to_string(),
            estimated: format_money(deliverable.estimated_cost, symbol),
            actual: deliverable
                .actual_cost
                .map(|cost| format_money(cost, symbol))
                .unwrap_or_else(|| "Pending".to_string()),
        }
    }
}

/// Summary cards and cost table for one sponsor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorDetail {
    pub row: SponsorRow,
    /// `"Cash: $7,000 / In-Kind: $3,000"`.
    pub value_split: String,
    /// `"2 of 5 tasks completed"`.
    pub progress: String,
    /// `"Est. Cost: $6,000 / Actual: Pending"`.
    pub cost_summary: String,
    pub deliverables: Vec<DeliverableRow>,
}

impl SponsorDetail {
    pub fn build(store: &DataStore, id: u32, display: &DisplaySettings) -> DashboardResult<Self> {
        let record = store.sponsor(id)?;
        let symbol = &display.currency_symbol;

        let actual = record
            .actual_cost
            .map(|cost| format_money(cost, symbol))
            .unwrap_or_else(|| "Pending".to_string());

        Ok(SponsorDetail {
            row: SponsorRow::build(record, display)?,
            value_split: format!(
                "Cash: {} / In-Kind: {}",
                format_money(record.cash_value, symbol),
                format_money(record.in_kind_value, symbol)
            ),
            progress: format!(
                "{} of {} tasks completed",
                record.completed_deliverables, record.total_deliverables
            ),
            cost_summary: format!(
                "Est. Cost: {} / Actual: {}",
                format_money(record.estimated_cost, symbol),
                actual
            ),
            deliverables: store
                .deliverables_for(id)
                .into_iter()
                .map(|d| DeliverableRow::build(d, store.departments(), display))
                .collect(),
        })
    }
}
